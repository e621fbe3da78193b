//! Clipping a merged dataset to the exact query geometry.

use crate::grid::dataset::GridDataset;
use geo::{Contains, Geometry, Point};
use log::info;

/// Sets every cell whose centre falls outside `geometry` to the nodata
/// sentinel, across all variables and time steps. Cells inside the geometry
/// keep their merged values.
pub(crate) fn mask_dataset(dataset: &mut GridDataset, geometry: &Geometry<f64>) {
    let (nt, ny, nx) = dataset.shape();
    let nodata = dataset.nodata;
    let mut outside = 0usize;
    for i in 0..ny {
        for j in 0..nx {
            let centre = Point::new(dataset.lon[[i, j]], dataset.lat[[i, j]]);
            if geometry.contains(&centre) {
                continue;
            }
            outside += 1;
            for variable in &mut dataset.variables {
                for t in 0..nt {
                    variable.values[[t, i, j]] = nodata;
                }
            }
        }
    }
    info!(
        "Masked {outside} of {} cells outside the query geometry",
        ny * nx
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::dataset::{GridVariable, DAYMET_CRS, NODATA};
    use chrono::NaiveDate;
    use geo::polygon;
    use ndarray::{Array2, Array3};

    fn dataset() -> GridDataset {
        // 1x2x2 grid; cell longitudes -69.8 and -69.2, latitudes 45.1/45.4.
        let lat = Array2::from_shape_vec((2, 2), vec![45.1, 45.1, 45.4, 45.4]).unwrap();
        let lon = Array2::from_shape_vec((2, 2), vec![-69.8, -69.2, -69.8, -69.2]).unwrap();
        GridDataset {
            time: vec![NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()],
            y: vec![1.5, 0.5],
            x: vec![0.5, 1.5],
            lat,
            lon,
            variables: vec![GridVariable {
                name: "tmin".to_string(),
                units: "degrees C",
                crs: DAYMET_CRS.to_string(),
                nodata: NODATA,
                values: Array3::from_elem((1, 2, 2), 7.0),
            }],
            crs: DAYMET_CRS.to_string(),
            transform: [1.0, 0.0, 0.0, 0.0, -1.0, 2.0],
            res: (1.0, -1.0),
            nodata: NODATA,
        }
    }

    #[test]
    fn cells_outside_the_exact_polygon_become_nodata() {
        // Covers only the western column of the grid, though its bounding
        // box would touch all four cells.
        let western = polygon![
            (x: -69.95, y: 45.0),
            (x: -69.55, y: 45.0),
            (x: -69.55, y: 45.5),
            (x: -69.95, y: 45.5),
            (x: -69.95, y: 45.0),
        ];
        let mut ds = dataset();
        mask_dataset(&mut ds, &Geometry::Polygon(western));
        let values = &ds.variable("tmin").unwrap().values;
        assert_eq!(values[[0, 0, 0]], 7.0);
        assert_eq!(values[[0, 1, 0]], 7.0);
        assert_eq!(values[[0, 0, 1]], 0.0);
        assert_eq!(values[[0, 1, 1]], 0.0);
    }
}
