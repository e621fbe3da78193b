use crate::types::region::Region;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Input location ({lon}, {lat}) is outside the Daymet spatial range (regions: na, hi, pr)")]
    PointOutOfDomain { lon: f64, lat: f64 },

    #[error("Input geometry is outside the Daymet spatial range (regions: na, hi, pr)")]
    GeometryOutOfDomain,

    #[error("Input location ({lon}, {lat}) is outside the '{region}' region")]
    PointOutsideRegion { region: Region, lon: f64, lat: f64 },

    #[error("Input geometry does not overlap the '{region}' region")]
    GeometryOutsideRegion { region: Region },

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateOrder { start: NaiveDate, end: NaiveDate },

    #[error("Daymet coverage begins on 1980-01-01; the requested range starts at {date}")]
    BeforeCoverage { date: NaiveDate },

    #[error("Daymet coverage begins in 1980; got year {year}")]
    YearBeforeCoverage { year: i32 },

    #[error("At least one year is required")]
    EmptyYears,

    #[error("At least one variable is required")]
    EmptyVariables,

    #[error("Unknown Daymet variable '{given}'. Valid variables: dayl, prcp, srad, swe, tmax, tmin, vp")]
    UnknownVariable { given: String },

    #[error("Unsupported geometry type '{found}'; gridded queries accept Polygon, MultiPolygon, or Rect")]
    UnsupportedGeometry { found: &'static str },
}
