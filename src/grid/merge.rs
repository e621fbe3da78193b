//! Deterministic merging of per-year gridded payloads into one dataset.
//!
//! The merge follows a minimal-coordinate policy: only the coordinate axes
//! needed for alignment are compared across files, within a floating-point
//! tolerance, so independently generated yearly files with negligible
//! coordinate jitter still merge while genuine structural mismatches fail.

use crate::grid::dataset::{axes_transform, GridDataset, GridSlab, GridVariable, DAYMET_CRS, NODATA};
use crate::retrieval::error::RetrievalError;
use crate::types::variable::Variable;
use log::info;
use ndarray::{concatenate, Axis};

fn merge_err(reason: impl Into<String>) -> RetrievalError {
    RetrievalError::GridMerge {
        reason: reason.into(),
    }
}

fn axes_close(a: &[f64], b: &[f64], epsilon: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() <= epsilon)
}

/// Merges decoded slabs, in plan order (variable-major, windows ascending),
/// into one [`GridDataset`] with canonical metadata attached.
pub(crate) fn merge_slabs(
    variables: &[Variable],
    windows: usize,
    slabs: Vec<GridSlab>,
    epsilon: f64,
) -> Result<GridDataset, RetrievalError> {
    if slabs.len() != variables.len() * windows {
        return Err(merge_err(format!(
            "expected {} payloads, got {}",
            variables.len() * windows,
            slabs.len()
        )));
    }

    let mut merged: Vec<GridVariable> = Vec::with_capacity(variables.len());
    let mut time: Option<Vec<chrono::NaiveDate>> = None;
    let mut axes: Option<(Vec<f64>, Vec<f64>)> = None;
    let mut latlon = None;

    let mut chunks = slabs.chunks_exact(windows);
    for (&variable, chunk) in variables.iter().zip(&mut chunks) {
        let first = &chunk[0];
        if first.time.is_empty() || first.y.is_empty() || first.x.is_empty() {
            return Err(merge_err(format!(
                "the subset for '{variable}' contains no cells or time steps"
            )));
        }
        let mut var_time = first.time.clone();
        let mut parts = vec![first.values.view()];
        for slab in &chunk[1..] {
            if !axes_close(&slab.y, &first.y, epsilon) || !axes_close(&slab.x, &first.x, epsilon) {
                return Err(merge_err(format!(
                    "coordinate axes of yearly '{variable}' files do not align"
                )));
            }
            match (slab.time.first(), var_time.last()) {
                (Some(next), Some(prev)) if next > prev => {}
                _ => {
                    return Err(merge_err(format!(
                        "time steps of yearly '{variable}' files are not strictly ascending"
                    )));
                }
            }
            var_time.extend_from_slice(&slab.time);
            parts.push(slab.values.view());
        }
        let values = concatenate(Axis(0), &parts)
            .map_err(|e| merge_err(format!("cannot concatenate '{variable}' payloads: {e}")))?;

        match &time {
            None => time = Some(var_time),
            Some(reference) if *reference == var_time => {}
            Some(_) => {
                return Err(merge_err(format!(
                    "time axis of '{variable}' disagrees with the other variables"
                )));
            }
        }
        match &axes {
            None => axes = Some((first.y.clone(), first.x.clone())),
            Some((y, x)) if axes_close(y, &first.y, epsilon) && axes_close(x, &first.x, epsilon) => {
            }
            Some(_) => {
                return Err(merge_err(format!(
                    "spatial axes of '{variable}' disagree with the other variables"
                )));
            }
        }
        if latlon.is_none() {
            latlon = Some((first.lat.clone(), first.lon.clone()));
        }

        merged.push(GridVariable {
            name: variable.code().to_string(),
            units: variable.unit(),
            crs: DAYMET_CRS.to_string(),
            nodata: NODATA,
            values,
        });
    }

    let time = time.ok_or_else(|| merge_err("no payloads to merge"))?;
    let (y, x) = axes.ok_or_else(|| merge_err("no payloads to merge"))?;
    let (lat, lon) = latlon.ok_or_else(|| merge_err("no payloads to merge"))?;
    let (transform, res) = axes_transform(&x, &y);

    info!(
        "Merged {} variables over {} time steps on a {}x{} grid",
        merged.len(),
        time.len(),
        y.len(),
        x.len()
    );

    Ok(GridDataset {
        time,
        y,
        x,
        lat,
        lon,
        variables: merged,
        crs: DAYMET_CRS.to_string(),
        transform,
        res,
        nodata: NODATA,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ndarray::{Array2, Array3};

    fn slab(year: i32, days: usize, fill: f64, jitter: f64) -> GridSlab {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
        GridSlab {
            time: (0..days)
                .map(|d| start + chrono::Duration::days(d as i64))
                .collect(),
            y: vec![10.5 + jitter, 9.5 + jitter],
            x: vec![0.5, 1.5, 2.5],
            lat: Array2::from_elem((2, 3), 45.0),
            lon: Array2::from_elem((2, 3), -69.0),
            values: Array3::from_elem((days, 2, 3), fill),
        }
    }

    #[test]
    fn yearly_slabs_concatenate_in_plan_order() {
        let slabs = vec![
            slab(2001, 3, 1.0, 0.0),
            slab(2002, 4, 2.0, 0.0),
            slab(2001, 3, 5.0, 0.0),
            slab(2002, 4, 6.0, 0.0),
        ];
        let ds = merge_slabs(&[Variable::Prcp, Variable::Tmin], 2, slabs, 1e-6).unwrap();
        assert_eq!(ds.shape(), (7, 2, 3));
        assert_eq!(ds.variables[0].name, "prcp");
        assert_eq!(ds.variables[1].name, "tmin");
        assert_eq!(ds.variables[0].values[[0, 0, 0]], 1.0);
        assert_eq!(ds.variables[0].values[[3, 0, 0]], 2.0);
        assert_eq!(ds.variables[1].values[[6, 1, 2]], 6.0);
        // Time index is strictly increasing with no duplicates.
        assert!(ds.time.windows(2).all(|p| p[0] < p[1]));
        assert_eq!(ds.variables[0].units, "mm/day");
        assert_eq!(ds.crs, DAYMET_CRS);
        assert_eq!(ds.nodata, 0.0);
        assert_eq!(ds.variables[0].crs, ds.crs);
    }

    #[test]
    fn coordinate_jitter_within_epsilon_is_tolerated() {
        let slabs = vec![slab(2001, 2, 1.0, 0.0), slab(2002, 2, 2.0, 1e-9)];
        assert!(merge_slabs(&[Variable::Prcp], 2, slabs, 1e-6).is_ok());
    }

    #[test]
    fn structural_mismatch_fails_the_merge() {
        let mut bad = slab(2002, 2, 2.0, 0.0);
        bad.y = vec![99.5, 98.5];
        let slabs = vec![slab(2001, 2, 1.0, 0.0), bad];
        let err = merge_slabs(&[Variable::Prcp], 2, slabs, 1e-6).unwrap_err();
        assert!(matches!(err, RetrievalError::GridMerge { .. }));
    }

    #[test]
    fn mismatched_time_axes_across_variables_fail() {
        let slabs = vec![slab(2001, 3, 1.0, 0.0), slab(2001, 4, 2.0, 0.0)];
        let err = merge_slabs(&[Variable::Prcp, Variable::Tmin], 1, slabs, 1e-6).unwrap_err();
        assert!(matches!(err, RetrievalError::GridMerge { .. }));
    }

    #[test]
    fn overlapping_years_are_rejected() {
        let slabs = vec![slab(2001, 3, 1.0, 0.0), slab(2001, 3, 2.0, 0.0)];
        let err = merge_slabs(&[Variable::Prcp], 2, slabs, 1e-6).unwrap_err();
        assert!(matches!(err, RetrievalError::GridMerge { .. }));
    }

    #[test]
    fn empty_subset_axes_fail_the_merge() {
        let mut degenerate = slab(2001, 2, 1.0, 0.0);
        degenerate.x = Vec::new();
        degenerate.values = Array3::from_elem((2, 2, 0), 0.0);
        let err = merge_slabs(&[Variable::Prcp], 1, vec![degenerate], 1e-6).unwrap_err();
        assert!(matches!(err, RetrievalError::GridMerge { .. }));
    }

    #[test]
    fn wrong_payload_count_is_rejected() {
        let err = merge_slabs(&[Variable::Prcp], 2, vec![slab(2001, 2, 1.0, 0.0)], 1e-6)
            .unwrap_err();
        assert!(matches!(err, RetrievalError::GridMerge { .. }));
    }
}
