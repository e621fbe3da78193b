//! Selection of the potential-evapotranspiration model and its per-model
//! parameter records.

use crate::types::variable::Variable;

/// Overrides for the Priestley-Taylor model.
///
/// `Default` yields the standard constants; set individual fields to
/// override them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriestleyTaylorParams {
    /// Proportionality constant of the equilibrium evaporation term.
    pub alpha: f64,
    /// Surface albedo used for net shortwave radiation.
    pub albedo: f64,
    /// Soil heat flux density, MJ/m^2/day. Assumed zero for daily steps.
    pub soil_heat_flux: f64,
    /// Site elevation above sea level, m.
    pub elevation: f64,
}

impl Default for PriestleyTaylorParams {
    fn default() -> Self {
        Self {
            alpha: 1.26,
            albedo: 0.23,
            soil_heat_flux: 0.0,
            elevation: 0.0,
        }
    }
}

/// Overrides for the Penman-Monteith model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenmanMonteithParams {
    /// Wind speed at 2 m height, m/s. Daymet carries no wind variable, so a
    /// fixed value is used for the aerodynamic term.
    pub wind_2m: f64,
    /// Surface albedo used for net shortwave radiation.
    pub albedo: f64,
    /// Soil heat flux density, MJ/m^2/day. Assumed zero for daily steps.
    pub soil_heat_flux: f64,
    /// Site elevation above sea level, m.
    pub elevation: f64,
}

impl Default for PenmanMonteithParams {
    fn default() -> Self {
        Self {
            wind_2m: 2.0,
            albedo: 0.23,
            soil_heat_flux: 0.0,
            elevation: 0.0,
        }
    }
}

/// The PET model to derive from an assembled dataset.
///
/// Each model declares the variables it needs; a dataset missing one of them
/// produces an error naming the first absent input and listing the full
/// required set.
///
/// # Examples
///
/// ```
/// use daymet::{PetModel, PriestleyTaylorParams, Variable};
///
/// let model = PetModel::PriestleyTaylor(PriestleyTaylorParams {
///     alpha: 1.30,
///     ..Default::default()
/// });
/// assert!(model.required_variables().contains(&Variable::Srad));
/// assert_eq!(PetModel::HargreavesSamani.required_variables().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PetModel {
    /// FAO-56 Penman-Monteith, combining energy-balance and aerodynamic
    /// terms; soil heat flux density assumed zero.
    PenmanMonteith(PenmanMonteithParams),
    /// Priestley-Taylor energy-balance estimate with an empirically fixed
    /// proportionality constant; soil heat flux density assumed zero.
    PriestleyTaylor(PriestleyTaylorParams),
    /// Hargreaves-Samani empirical estimate from the temperature range and
    /// location alone.
    HargreavesSamani,
    /// Do not compute PET; return the dataset unmodified.
    #[default]
    None,
}

const TEMPERATURE_ONLY: &[Variable] = &[Variable::Tmin, Variable::Tmax];
const ENERGY_BALANCE: &[Variable] = &[
    Variable::Tmin,
    Variable::Tmax,
    Variable::Srad,
    Variable::Vp,
    Variable::Dayl,
];

impl PetModel {
    /// The model name as it appears in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            PetModel::PenmanMonteith(_) => "penman_monteith",
            PetModel::PriestleyTaylor(_) => "priestley_taylor",
            PetModel::HargreavesSamani => "hargreaves_samani",
            PetModel::None => "none",
        }
    }

    /// The variables this model needs in the assembled dataset.
    pub fn required_variables(&self) -> &'static [Variable] {
        match self {
            PetModel::PenmanMonteith(_) | PetModel::PriestleyTaylor(_) => ENERGY_BALANCE,
            PetModel::HargreavesSamani => TEMPERATURE_ONLY,
            PetModel::None => &[],
        }
    }

    pub(crate) fn is_none(&self) -> bool {
        matches!(self, PetModel::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_sets_name_temperature_first() {
        for model in [
            PetModel::HargreavesSamani,
            PetModel::PriestleyTaylor(Default::default()),
            PetModel::PenmanMonteith(Default::default()),
        ] {
            assert_eq!(model.required_variables()[0], Variable::Tmin);
        }
        assert!(PetModel::None.required_variables().is_empty());
    }
}
