//! PET computation for gridded datasets.

use crate::grid::dataset::{GridDataset, GridVariable};
use crate::pet::error::PetError;
use crate::pet::fao56::{hargreaves_samani, penman_monteith, priestley_taylor, DailyInputs};
use crate::types::pet_model::PetModel;
use chrono::Datelike;
use ndarray::Array3;

/// Appends a `pet` variable derived with `model`; latitude comes from the
/// per-cell coordinate arrays. `PetModel::None` leaves the dataset
/// untouched.
pub(crate) fn potential_et(dataset: &mut GridDataset, model: &PetModel) -> Result<(), PetError> {
    if model.is_none() {
        return Ok(());
    }

    let required = model.required_variables();
    if let Some(&missing) = required
        .iter()
        .find(|v| dataset.variable(v.code()).is_none())
    {
        return Err(PetError::missing(model.name(), missing, required));
    }

    let (nt, ny, nx) = dataset.shape();
    let doy: Vec<f64> = dataset.time.iter().map(|d| d.ordinal() as f64).collect();
    let mut pet = Array3::<f64>::zeros((nt, ny, nx));

    {
        let grab = |name: &str| &dataset.variable(name).expect("checked above").values;
        match model {
            PetModel::HargreavesSamani => {
                let (tmin, tmax) = (grab("tmin"), grab("tmax"));
                for t in 0..nt {
                    for i in 0..ny {
                        for j in 0..nx {
                            pet[[t, i, j]] = hargreaves_samani(
                                doy[t],
                                dataset.lat[[i, j]],
                                tmin[[t, i, j]],
                                tmax[[t, i, j]],
                            );
                        }
                    }
                }
            }
            PetModel::PriestleyTaylor(_) | PetModel::PenmanMonteith(_) => {
                let (tmin, tmax) = (grab("tmin"), grab("tmax"));
                let (srad, vp, dayl) = (grab("srad"), grab("vp"), grab("dayl"));
                for t in 0..nt {
                    for i in 0..ny {
                        for j in 0..nx {
                            let inputs = DailyInputs {
                                doy: doy[t],
                                lat: dataset.lat[[i, j]],
                                tmin: tmin[[t, i, j]],
                                tmax: tmax[[t, i, j]],
                                srad: srad[[t, i, j]],
                                vp: vp[[t, i, j]],
                                dayl: dayl[[t, i, j]],
                            };
                            pet[[t, i, j]] = match model {
                                PetModel::PriestleyTaylor(params) => {
                                    priestley_taylor(&inputs, params)
                                }
                                PetModel::PenmanMonteith(params) => {
                                    penman_monteith(&inputs, params)
                                }
                                _ => unreachable!(),
                            };
                        }
                    }
                }
            }
            PetModel::None => unreachable!("handled above"),
        }
    }

    dataset.variables.push(GridVariable {
        name: "pet".to_string(),
        units: "mm/day",
        crs: dataset.crs.clone(),
        nodata: dataset.nodata,
        values: pet,
    });
    Ok(())
}
