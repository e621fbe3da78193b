//! PET computation for single-pixel frames.

use crate::pet::error::PetError;
use crate::pet::fao56::{hargreaves_samani, penman_monteith, priestley_taylor, DailyInputs};
use crate::types::pet_model::PetModel;
use crate::types::variable::Variable;
use chrono::{Datelike, Duration, NaiveDate};
use polars::prelude::*;

/// Column label of the derived series.
pub(crate) const PET_LABEL: &str = "pet (mm/day)";

fn column_values(df: &DataFrame, label: &str) -> Result<Vec<f64>, PetError> {
    Ok(df
        .column(label)?
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

fn day_of_year(df: &DataFrame) -> Result<Vec<f64>, PetError> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch");
    df.column("date")?
        .date()?
        .into_iter()
        .map(|days| {
            days.map(|d| (epoch + Duration::days(d as i64)).ordinal() as f64)
                .ok_or_else(|| {
                    PetError::Frame(PolarsError::NoData("null date in assembled frame".into()))
                })
        })
        .collect()
}

/// Appends a `pet (mm/day)` column derived with `model`; latitude comes from
/// the query coordinates. `PetModel::None` returns the frame untouched.
pub(crate) fn potential_et(
    clm: DataFrame,
    lat: f64,
    model: &PetModel,
) -> Result<DataFrame, PetError> {
    if model.is_none() {
        return Ok(clm);
    }

    let required = model.required_variables();
    if let Some(&missing) = required
        .iter()
        .find(|v| clm.column(v.column_label().as_str()).is_err())
    {
        return Err(PetError::missing(model.name(), missing, required));
    }

    let doy = day_of_year(&clm)?;
    let tmin = column_values(&clm, &Variable::Tmin.column_label())?;
    let tmax = column_values(&clm, &Variable::Tmax.column_label())?;

    let pet: Vec<f64> = match model {
        PetModel::HargreavesSamani => (0..doy.len())
            .map(|i| hargreaves_samani(doy[i], lat, tmin[i], tmax[i]))
            .collect(),
        PetModel::PriestleyTaylor(params) => {
            let srad = column_values(&clm, &Variable::Srad.column_label())?;
            let vp = column_values(&clm, &Variable::Vp.column_label())?;
            let dayl = column_values(&clm, &Variable::Dayl.column_label())?;
            (0..doy.len())
                .map(|i| {
                    priestley_taylor(
                        &DailyInputs {
                            doy: doy[i],
                            lat,
                            tmin: tmin[i],
                            tmax: tmax[i],
                            srad: srad[i],
                            vp: vp[i],
                            dayl: dayl[i],
                        },
                        params,
                    )
                })
                .collect()
        }
        PetModel::PenmanMonteith(params) => {
            let srad = column_values(&clm, &Variable::Srad.column_label())?;
            let vp = column_values(&clm, &Variable::Vp.column_label())?;
            let dayl = column_values(&clm, &Variable::Dayl.column_label())?;
            (0..doy.len())
                .map(|i| {
                    penman_monteith(
                        &DailyInputs {
                            doy: doy[i],
                            lat,
                            tmin: tmin[i],
                            tmax: tmax[i],
                            srad: srad[i],
                            vp: vp[i],
                            dayl: dayl[i],
                        },
                        params,
                    )
                })
                .collect()
        }
        PetModel::None => unreachable!("handled above"),
    };

    let mut clm = clm;
    clm.with_column(Series::new(PET_LABEL.into(), pet))?;
    Ok(clm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(columns: &[(Variable, Vec<f64>)]) -> DataFrame {
        let start = NaiveDate::from_ymd_opt(2000, 6, 1).unwrap();
        let n = columns[0].1.len();
        let dates: Vec<NaiveDate> = (0..n)
            .map(|d| start + Duration::days(d as i64))
            .collect();
        let mut cols = vec![DateChunked::from_naive_date("date".into(), dates)
            .into_series()
            .into_column()];
        for (variable, values) in columns {
            cols.push(
                Series::new(variable.column_label().as_str().into(), values.clone())
                    .into_column(),
            );
        }
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn hargreaves_samani_needs_only_temperature() {
        let clm = frame(&[
            (Variable::Tmin, vec![10.0, 11.0]),
            (Variable::Tmax, vec![24.0, 27.0]),
        ]);
        let out = potential_et(clm, 45.2, &PetModel::HargreavesSamani).unwrap();
        let pet = out.column(PET_LABEL).unwrap().f64().unwrap();
        assert_eq!(pet.len(), 2);
        assert!(pet.get(0).unwrap() > 0.0);
    }

    #[test]
    fn missing_temperature_is_named_first() {
        let clm = frame(&[(Variable::Prcp, vec![1.0])]);
        let err = potential_et(clm, 45.2, &PetModel::HargreavesSamani).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'tmin'"), "{message}");
        assert!(message.contains("tmin, tmax"), "{message}");
    }

    #[test]
    fn energy_models_require_the_full_input_set() {
        let clm = frame(&[
            (Variable::Tmin, vec![10.0]),
            (Variable::Tmax, vec![24.0]),
        ]);
        let err = potential_et(
            clm,
            45.2,
            &PetModel::PriestleyTaylor(Default::default()),
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'srad'"), "{message}");
        assert!(message.contains("tmin, tmax, srad, vp, dayl"), "{message}");
    }

    #[test]
    fn none_returns_the_frame_unchanged() {
        let clm = frame(&[
            (Variable::Tmin, vec![10.0, 11.0]),
            (Variable::Tmax, vec![24.0, 27.0]),
        ]);
        let expected = clm.clone();
        let out = potential_et(clm, 45.2, &PetModel::None).unwrap();
        assert!(out.equals(&expected));
    }
}
