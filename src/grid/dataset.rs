//! In-memory representation of gridded Daymet data.

use chrono::NaiveDate;
use ndarray::{Array2, Array3};

/// Canonical Lambert Conformal Conic definition of the Daymet grid.
pub const DAYMET_CRS: &str = "+proj=lcc +lat_1=25 +lat_2=60 +lat_0=42.5 +lon_0=-100 \
     +x_0=0 +y_0=0 +ellps=WGS84 +units=km +no_defs";

/// Sentinel written into cells outside the query geometry.
pub const NODATA: f64 = 0.0;

/// One decoded gridded payload: a single variable over a single per-year
/// window.
///
/// Produced by a [`GridDecoder`](crate::GridDecoder) implementation from the
/// raw NetCDF bytes the archive returns. Axis order of `values` is
/// (time, y, x).
#[derive(Debug, Clone)]
pub struct GridSlab {
    /// Time steps covered by this payload, ascending.
    pub time: Vec<NaiveDate>,
    /// Projected y coordinates (km, LCC grid).
    pub y: Vec<f64>,
    /// Projected x coordinates (km, LCC grid).
    pub x: Vec<f64>,
    /// Derived latitude of each cell centre, shape (y, x).
    pub lat: Array2<f64>,
    /// Derived longitude of each cell centre, shape (y, x).
    pub lon: Array2<f64>,
    /// Data values, shape (time, y, x).
    pub values: Array3<f64>,
}

/// One variable of an assembled [`GridDataset`], with its propagated
/// metadata.
#[derive(Debug, Clone)]
pub struct GridVariable {
    /// Canonical variable code (e.g. `"prcp"`), or `"pet"` for the derived
    /// series.
    pub name: String,
    /// Canonical unit string.
    pub units: &'static str,
    /// Projection definition, identical to the dataset-level value.
    pub crs: String,
    /// Nodata sentinel, identical to the dataset-level value.
    pub nodata: f64,
    /// Data values, shape (time, y, x).
    pub values: Array3<f64>,
}

/// A merged multi-variable gridded dataset.
///
/// Variables keep the order of the request plan; time is continuous across
/// the merged per-year files.
#[derive(Debug, Clone)]
pub struct GridDataset {
    /// Time steps, ascending across all merged windows.
    pub time: Vec<NaiveDate>,
    /// Projected y coordinates (km).
    pub y: Vec<f64>,
    /// Projected x coordinates (km).
    pub x: Vec<f64>,
    /// Latitude of each cell centre, shape (y, x).
    pub lat: Array2<f64>,
    /// Longitude of each cell centre, shape (y, x).
    pub lon: Array2<f64>,
    /// Data variables in plan order.
    pub variables: Vec<GridVariable>,
    /// Projection definition ([`DAYMET_CRS`]).
    pub crs: String,
    /// Affine transform (a, b, c, d, e, f): x = a*col + b*row + c,
    /// y = d*col + e*row + f, referenced to cell edges.
    pub transform: [f64; 6],
    /// Cell size (x, y); y is negative for a north-up grid.
    pub res: (f64, f64),
    /// Nodata sentinel.
    pub nodata: f64,
}

impl GridDataset {
    /// Looks up a variable by its canonical code.
    pub fn variable(&self, name: &str) -> Option<&GridVariable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Grid shape as (time, y, x).
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.time.len(), self.y.len(), self.x.len())
    }
}

/// Computes the affine transform and resolution from the coordinate axes.
///
/// Axes are assumed evenly spaced; a single-element axis falls back to the
/// native 1 km cell size.
pub(crate) fn axes_transform(x: &[f64], y: &[f64]) -> ([f64; 6], (f64, f64)) {
    let xres = if x.len() > 1 {
        (x[x.len() - 1] - x[0]) / (x.len() - 1) as f64
    } else {
        1.0
    };
    let yres = if y.len() > 1 {
        (y[y.len() - 1] - y[0]) / (y.len() - 1) as f64
    } else {
        -1.0
    };
    let transform = [
        xres,
        0.0,
        x[0] - xres / 2.0,
        0.0,
        yres,
        y[0] - yres / 2.0,
    ];
    (transform, (xres, yres))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_references_cell_edges() {
        let x = vec![0.5, 1.5, 2.5];
        let y = vec![10.5, 9.5];
        let (transform, res) = axes_transform(&x, &y);
        assert_eq!(res, (1.0, -1.0));
        assert_eq!(transform, [1.0, 0.0, 0.0, 0.0, -1.0, 11.0]);
    }

    #[test]
    fn degenerate_axis_uses_native_cell_size() {
        let (transform, res) = axes_transform(&[3.5], &[7.5]);
        assert_eq!(res, (1.0, -1.0));
        assert_eq!(transform[2], 3.0);
        assert_eq!(transform[5], 8.0);
    }
}
