//! Re-assembly of single-pixel CSV payloads into one date-indexed frame.
//!
//! Each payload covers one (variable, window) pair. Payloads arrive in plan
//! order: grouped by variable, windows ascending within each group. Per
//! variable the windows are concatenated vertically, then all variables are
//! aligned horizontally on their shared date index.

use crate::retrieval::error::RetrievalError;
use crate::types::variable::Variable;
use chrono::NaiveDate;
use polars::prelude::*;
use std::io::Cursor;

struct PointSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
    label: String,
}

/// Rewrites the service's `name[unit="u"]` column label to `name (u)`.
fn normalize_label(raw: &str) -> String {
    raw.replace("[unit=\"", " (").replace("\"]", ")")
}

/// Decodes one CSV payload. Only the timestamp column (0) and the third
/// declared data column (3) are consumed; the latitude/longitude echo
/// columns in between are ignored.
fn decode_payload(payload: &[u8], variable: Variable) -> Result<PointSeries, RetrievalError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(payload))
        .finish()
        .map_err(|e| RetrievalError::CsvDecode {
            variable,
            source: e,
        })?;

    if df.width() < 4 {
        return Err(RetrievalError::PayloadShape {
            variable,
            message: format!("expected at least 4 columns, got {}", df.width()),
        });
    }
    let label = normalize_label(df.get_column_names()[3].as_str());

    let columns = df.get_columns();
    let time = columns[0].str().map_err(|e| RetrievalError::CsvDecode {
        variable,
        source: e,
    })?;
    let mut dates = Vec::with_capacity(time.len());
    for value in time.into_iter() {
        let value = value.ok_or_else(|| RetrievalError::PayloadShape {
            variable,
            message: "empty timestamp".to_string(),
        })?;
        let date = value
            .get(..10)
            .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
            .ok_or_else(|| RetrievalError::TimestampParse {
                variable,
                value: value.to_string(),
            })?;
        dates.push(date);
    }

    let data = columns[3]
        .cast(&DataType::Float64)
        .map_err(|e| RetrievalError::CsvDecode {
            variable,
            source: e,
        })?;
    let values = data
        .f64()
        .map_err(|e| RetrievalError::CsvDecode {
            variable,
            source: e,
        })?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect();

    Ok(PointSeries {
        dates,
        values,
        label,
    })
}

/// Assembles all point-mode payloads, in plan order, into one frame with a
/// `date` column and one normalized `name (unit)` column per variable.
pub(crate) fn assemble_point(
    variables: &[Variable],
    windows: usize,
    payloads: Vec<Vec<u8>>,
) -> Result<DataFrame, RetrievalError> {
    let mut columns: Vec<Column> = Vec::with_capacity(variables.len() + 1);
    let mut reference: Option<(Variable, Vec<NaiveDate>)> = None;

    for (index, &variable) in variables.iter().enumerate() {
        let mut dates = Vec::new();
        let mut values = Vec::new();
        let mut label: Option<String> = None;
        for payload in &payloads[index * windows..(index + 1) * windows] {
            let part = decode_payload(payload, variable)?;
            label.get_or_insert(part.label);
            dates.extend(part.dates);
            values.extend(part.values);
        }

        let mut label = label.unwrap_or_else(|| variable.column_label());
        // Aggregated precipitation arrives as a per-period total; the rest
        // of the system speaks per-day rates.
        if label == "prcp (mm)" {
            label = "prcp (mm/day)".to_string();
        }

        match &reference {
            None => {
                if !dates.windows(2).all(|pair| pair[0] < pair[1]) {
                    return Err(RetrievalError::PayloadShape {
                        variable,
                        message: "time steps are not strictly ascending".to_string(),
                    });
                }
                reference = Some((variable, dates));
            }
            Some((reference_variable, reference_dates)) => {
                if *reference_dates != dates {
                    return Err(RetrievalError::CalendarMismatch {
                        variable,
                        reference: *reference_variable,
                    });
                }
            }
        }
        columns.push(Series::new(label.as_str().into(), values).into_column());
    }

    let Some((_, dates)) = reference else {
        return Ok(DataFrame::default());
    };
    let date = DateChunked::from_naive_date("date".into(), dates)
        .into_series()
        .into_column();
    columns.insert(0, date);
    DataFrame::new(columns).map_err(RetrievalError::Frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv(var: &str, unit: &str, rows: &[(&str, f64)]) -> Vec<u8> {
        let mut out = format!(
            "time,latitude[unit=\"degrees_north\"],longitude[unit=\"degrees_east\"],{var}[unit=\"{unit}\"]\n"
        );
        for (day, value) in rows {
            out.push_str(&format!("{day}T12:00:00Z,45.2,-69.5,{value}\n"));
        }
        out.into_bytes()
    }

    #[test]
    fn yearly_payloads_concatenate_into_one_continuous_series() {
        let payloads = vec![
            csv(
                "tmin",
                "degrees C",
                &[("2001-12-30", -4.0), ("2001-12-31", -5.0)],
            ),
            csv(
                "tmin",
                "degrees C",
                &[("2002-01-01", -6.0), ("2002-01-02", -7.0), ("2002-01-03", -8.0)],
            ),
        ];
        let df = assemble_point(&[Variable::Tmin], 2, payloads).unwrap();
        assert_eq!(df.shape(), (5, 2));
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["date", "tmin (degrees C)"]);
        let tmin = df.column("tmin (degrees C)").unwrap().f64().unwrap();
        assert_eq!(tmin.get(0), Some(-4.0));
        assert_eq!(tmin.get(4), Some(-8.0));
        let date = df.column("date").unwrap().date().unwrap();
        let days: Vec<i32> = date.into_iter().flatten().collect();
        assert!(days.windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn variables_align_on_the_shared_date_index() {
        let payloads = vec![
            csv("prcp", "mm/day", &[("2000-05-01", 3.5), ("2000-05-02", 0.0)]),
            csv(
                "tmax",
                "degrees C",
                &[("2000-05-01", 18.0), ("2000-05-02", 21.0)],
            ),
        ];
        let df = assemble_point(&[Variable::Prcp, Variable::Tmax], 1, payloads).unwrap();
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["date", "prcp (mm/day)", "tmax (degrees C)"]);
    }

    #[test]
    fn aggregated_prcp_totals_are_relabelled_as_rates() {
        let payloads = vec![csv("prcp", "mm", &[("2000-01-16", 88.4)])];
        let df = assemble_point(&[Variable::Prcp], 1, payloads).unwrap();
        assert!(df.column("prcp (mm/day)").is_ok());
    }

    #[test]
    fn calendar_mismatch_across_variables_is_an_integrity_failure() {
        let payloads = vec![
            csv("prcp", "mm/day", &[("2000-05-01", 3.5), ("2000-05-02", 0.0)]),
            csv("tmax", "degrees C", &[("2000-05-01", 18.0)]),
        ];
        let err = assemble_point(&[Variable::Prcp, Variable::Tmax], 1, payloads).unwrap_err();
        assert!(matches!(
            err,
            RetrievalError::CalendarMismatch {
                variable: Variable::Tmax,
                reference: Variable::Prcp,
            }
        ));
    }

    #[test]
    fn malformed_timestamp_is_reported() {
        let payload = b"time,lat,lon,tmin[unit=\"degrees C\"]\nnot-a-date,45.0,-69.0,1.0\n".to_vec();
        let err = assemble_point(&[Variable::Tmin], 1, vec![payload]).unwrap_err();
        assert!(matches!(err, RetrievalError::TimestampParse { .. }));
    }
}
