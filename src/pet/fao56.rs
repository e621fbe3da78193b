//! Scalar building blocks of the FAO-56 evapotranspiration equations.
//!
//! All radiation terms are in MJ/m^2/day, temperatures in degrees C,
//! pressures in kPa, and the returned PET values in mm/day.

use crate::types::pet_model::{PenmanMonteithParams, PriestleyTaylorParams};
use std::f64::consts::PI;

/// Solar constant, MJ/m^2/min.
const SOLAR_CONSTANT: f64 = 0.0820;
/// Stefan-Boltzmann constant, MJ/K^4/m^2/day.
const STEFAN_BOLTZMANN: f64 = 4.903e-9;
/// Conversion from MJ/m^2/day of latent heat to mm/day of water.
const MJ_TO_MM: f64 = 0.408;

/// Per-day, per-location inputs shared by the energy-balance models.
pub(crate) struct DailyInputs {
    /// Day of year, 1-366.
    pub doy: f64,
    /// Latitude, degrees north.
    pub lat: f64,
    /// Daily minimum temperature, degrees C.
    pub tmin: f64,
    /// Daily maximum temperature, degrees C.
    pub tmax: f64,
    /// Daylight-average shortwave radiation, W/m^2.
    pub srad: f64,
    /// Water vapor pressure, Pa.
    pub vp: f64,
    /// Day length, s/day.
    pub dayl: f64,
}

/// Extraterrestrial radiation for a given day of year and latitude.
pub(crate) fn extraterrestrial_radiation(doy: f64, lat: f64) -> f64 {
    let phi = lat.to_radians();
    let dr = 1.0 + 0.033 * (2.0 * PI * doy / 365.0).cos();
    let declination = 0.409 * (2.0 * PI * doy / 365.0 - 1.39).sin();
    let sunset_angle = (-phi.tan() * declination.tan()).clamp(-1.0, 1.0).acos();
    24.0 * 60.0 / PI
        * SOLAR_CONSTANT
        * dr
        * (sunset_angle * phi.sin() * declination.sin()
            + phi.cos() * declination.cos() * sunset_angle.sin())
}

/// Saturation vapor pressure at temperature `t`, kPa.
fn saturation_vapor_pressure(t: f64) -> f64 {
    0.6108 * (17.27 * t / (t + 237.3)).exp()
}

/// Slope of the saturation vapor pressure curve at `tmean`, kPa/degC.
fn vapor_slope(tmean: f64) -> f64 {
    4098.0 * saturation_vapor_pressure(tmean) / (tmean + 237.3).powi(2)
}

/// Psychrometric constant from site elevation, kPa/degC.
fn psychrometric_constant(elevation: f64) -> f64 {
    let pressure = 101.3 * ((293.0 - 0.0065 * elevation) / 293.0).powf(5.26);
    0.000665 * pressure
}

/// Net radiation at the surface from the Daymet radiation and humidity
/// variables.
fn net_radiation(inputs: &DailyInputs, albedo: f64, elevation: f64) -> f64 {
    // Daylight-average W/m^2 times daylight seconds gives J/m^2/day.
    let rs = inputs.srad * inputs.dayl * 1e-6;
    let ea = inputs.vp * 1e-3;
    let ra = extraterrestrial_radiation(inputs.doy, inputs.lat);
    let rso = (0.75 + 2e-5 * elevation) * ra;
    let clearness = if rso > 0.0 { (rs / rso).min(1.0) } else { 1.0 };
    let shortwave = (1.0 - albedo) * rs;
    let longwave = STEFAN_BOLTZMANN
        * ((inputs.tmax + 273.16).powi(4) + (inputs.tmin + 273.16).powi(4))
        / 2.0
        * (0.34 - 0.14 * ea.max(0.0).sqrt())
        * (1.35 * clearness - 0.35);
    shortwave - longwave
}

/// Hargreaves-Samani: temperature range and location alone.
pub(crate) fn hargreaves_samani(doy: f64, lat: f64, tmin: f64, tmax: f64) -> f64 {
    let tmean = (tmin + tmax) / 2.0;
    let ra = extraterrestrial_radiation(doy, lat);
    MJ_TO_MM * 0.0023 * ra * (tmax - tmin).max(0.0).sqrt() * (tmean + 17.8)
}

/// Priestley-Taylor equilibrium evaporation scaled by `alpha`.
pub(crate) fn priestley_taylor(inputs: &DailyInputs, params: &PriestleyTaylorParams) -> f64 {
    let tmean = (inputs.tmin + inputs.tmax) / 2.0;
    let delta = vapor_slope(tmean);
    let gamma = psychrometric_constant(params.elevation);
    let rn = net_radiation(inputs, params.albedo, params.elevation);
    params.alpha * delta / (delta + gamma) * (rn - params.soil_heat_flux) * MJ_TO_MM
}

/// FAO-56 Penman-Monteith with a fixed 2 m wind speed.
pub(crate) fn penman_monteith(inputs: &DailyInputs, params: &PenmanMonteithParams) -> f64 {
    let tmean = (inputs.tmin + inputs.tmax) / 2.0;
    let delta = vapor_slope(tmean);
    let gamma = psychrometric_constant(params.elevation);
    let rn = net_radiation(inputs, params.albedo, params.elevation);
    let es =
        (saturation_vapor_pressure(inputs.tmax) + saturation_vapor_pressure(inputs.tmin)) / 2.0;
    let ea = inputs.vp * 1e-3;
    let u2 = params.wind_2m;
    let radiation_term = MJ_TO_MM * delta * (rn - params.soil_heat_flux);
    let aerodynamic_term = gamma * 900.0 / (tmean + 273.0) * u2 * (es - ea);
    (radiation_term + aerodynamic_term) / (delta + gamma * (1.0 + 0.34 * u2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn extraterrestrial_radiation_matches_fao_example() {
        // FAO-56 example 8: 20 degrees south, 3 September (doy 246).
        let ra = extraterrestrial_radiation(246.0, -20.0);
        assert!(close(ra, 32.2, 0.2), "ra = {ra}");
    }

    #[test]
    fn midsummer_ra_exceeds_midwinter_ra_in_the_north() {
        let summer = extraterrestrial_radiation(172.0, 45.0);
        let winter = extraterrestrial_radiation(355.0, 45.0);
        assert!(summer > 3.0 * winter);
    }

    #[test]
    fn hargreaves_samani_is_positive_on_a_warm_day() {
        let pet = hargreaves_samani(180.0, 45.0, 12.0, 28.0);
        assert!(pet > 1.0 && pet < 15.0, "pet = {pet}");
    }

    #[test]
    fn energy_models_agree_on_magnitude() {
        let inputs = DailyInputs {
            doy: 180.0,
            lat: 45.0,
            tmin: 12.0,
            tmax: 28.0,
            srad: 450.0,
            vp: 1400.0,
            dayl: 55_000.0,
        };
        let pt = priestley_taylor(&inputs, &Default::default());
        let pm = penman_monteith(&inputs, &Default::default());
        assert!(pt > 1.0 && pt < 15.0, "pt = {pt}");
        assert!(pm > 1.0 && pm < 15.0, "pm = {pm}");
        assert!(close(pt, pm, 5.0));
    }

    #[test]
    fn priestley_taylor_scales_with_alpha() {
        let inputs = DailyInputs {
            doy: 180.0,
            lat: 45.0,
            tmin: 12.0,
            tmax: 28.0,
            srad: 450.0,
            vp: 1400.0,
            dayl: 55_000.0,
        };
        let base = priestley_taylor(&inputs, &Default::default());
        let scaled = priestley_taylor(
            &inputs,
            &PriestleyTaylorParams {
                alpha: 2.52,
                ..Default::default()
            },
        );
        assert!(close(scaled, 2.0 * base, 1e-9));
    }
}
