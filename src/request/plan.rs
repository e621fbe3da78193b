//! Construction of the exact request descriptors sent to the archive, for
//! both single-pixel and gridded queries.

use crate::request::dates::DateWindow;
use crate::types::region::Region;
use crate::types::time_scale::TimeScale;
use crate::types::variable::Variable;
use geo::Rect;

/// Root of the THREDDS NetCDF Subset Service hosting the Daymet collections.
pub const SERVICE_ROOT: &str = "https://thredds.daac.ornl.gov/thredds/ncss/ornldaac";

/// One fully determined remote fetch.
///
/// Immutable once built; carries the (variable, window) pair it answers so
/// responses can be re-assembled in plan order regardless of completion
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// The variable this request fetches.
    pub variable: Variable,
    /// The single-year window this request covers.
    pub window: DateWindow,
    /// Full URL of the remote yearly file.
    pub url: String,
    /// Query parameters, in the order they are sent.
    pub params: Vec<(&'static str, String)>,
}

fn file_url(scale: TimeScale, region: Region, variable: Variable, window: &DateWindow) -> String {
    format!(
        "{SERVICE_ROOT}/{}/{}",
        scale.endpoint_code(),
        scale.file_name(region, variable, window.year())
    )
}

/// Builds the point-mode plan: one CSV time-series request per
/// (variable, window) pair, grouped by variable with windows ascending
/// within each group. Re-assembly relies on exactly this order.
pub(crate) fn point_plan(
    scale: TimeScale,
    region: Region,
    variables: &[Variable],
    windows: &[DateWindow],
    lon: f64,
    lat: f64,
) -> Vec<RequestDescriptor> {
    variables
        .iter()
        .flat_map(|&variable| {
            windows.iter().map(move |window| RequestDescriptor {
                variable,
                window: *window,
                url: file_url(scale, region, variable, window),
                params: vec![
                    ("var", variable.code().to_string()),
                    ("longitude", lon.to_string()),
                    ("latitude", lat.to_string()),
                    ("time_start", window.time_start()),
                    ("time_end", window.time_end()),
                    ("accept", "csv".to_string()),
                ],
            })
        })
        .collect()
}

/// Builds the grid-mode plan: one NetCDF bounding-box subset request per
/// (variable, window) pair, as the cartesian product of variables and
/// windows with variables as the outer loop.
pub(crate) fn grid_plan(
    scale: TimeScale,
    region: Region,
    variables: &[Variable],
    windows: &[DateWindow],
    bounds: Rect<f64>,
) -> Vec<RequestDescriptor> {
    let (west, south) = (bounds.min().x, bounds.min().y);
    let (east, north) = (bounds.max().x, bounds.max().y);
    variables
        .iter()
        .flat_map(|&variable| {
            windows.iter().map(move |window| RequestDescriptor {
                variable,
                window: *window,
                url: file_url(scale, region, variable, window),
                params: vec![
                    ("var", variable.code().to_string()),
                    ("north", north.to_string()),
                    ("west", west.to_string()),
                    ("east", east.to_string()),
                    ("south", south.to_string()),
                    ("disableProjSubset", "on".to_string()),
                    ("horizStride", "1".to_string()),
                    ("time_start", window.time_start()),
                    ("time_end", window.time_end()),
                    ("timeStride", "1".to_string()),
                    ("addLatLon", "true".to_string()),
                    ("accept", "netcdf".to_string()),
                ],
            })
        })
        .collect()
}
