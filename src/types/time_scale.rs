//! Time scales served by the archive and their endpoint/file-name
//! conventions.

use crate::types::region::Region;
use crate::types::variable::Variable;
use std::fmt;

/// The temporal aggregation of the requested data.
///
/// Each scale maps to a distinct THREDDS endpoint code and file-name
/// convention. The mapping is total and fixed.
///
/// # Examples
///
/// ```
/// use daymet::TimeScale;
///
/// assert_eq!(TimeScale::Daily.endpoint_code(), 1840);
/// assert_eq!(format!("{}", TimeScale::Monthly), "monthly");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeScale {
    /// Unaggregated daily values.
    #[default]
    Daily,
    /// Monthly summaries (totals for precipitation, averages otherwise).
    Monthly,
    /// Annual summaries (totals for precipitation, averages otherwise).
    Annual,
}

impl TimeScale {
    /// The opaque numeric collection identifier on the archive.
    pub fn endpoint_code(self) -> u16 {
        match self {
            TimeScale::Daily => 1840,
            TimeScale::Monthly => 1855,
            TimeScale::Annual => 1852,
        }
    }

    /// The variable-specific file-name stem for this scale.
    ///
    /// Monthly and annual precipitation is served as a total (`*ttl`), every
    /// other aggregated variable as an average (`*avg`). The daily files are
    /// unaggregated and share one form. This picks which remote file is
    /// addressed, not just a label.
    pub(crate) fn filename_stem(self, region: Region, variable: Variable) -> String {
        let v = variable.code();
        let r = region.as_str();
        match self {
            TimeScale::Daily => format!("daily_{r}_{v}"),
            TimeScale::Monthly if variable == Variable::Prcp => format!("{v}_monttl_{r}"),
            TimeScale::Monthly => format!("{v}_monavg_{r}"),
            TimeScale::Annual if variable == Variable::Prcp => format!("{v}_annttl_{r}"),
            TimeScale::Annual => format!("{v}_annavg_{r}"),
        }
    }

    /// The full remote file name for one (variable, year) pair.
    pub(crate) fn file_name(self, region: Region, variable: Variable, year: i32) -> String {
        format!("daymet_v4_{}_{year}.nc", self.filename_stem(region, variable))
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeScale::Daily => "daily",
            TimeScale::Monthly => "monthly",
            TimeScale::Annual => "annual",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_files_share_one_form() {
        assert_eq!(
            TimeScale::Daily.file_name(Region::Na, Variable::Prcp, 2000),
            "daymet_v4_daily_na_prcp_2000.nc"
        );
        assert_eq!(
            TimeScale::Daily.file_name(Region::Hi, Variable::Tmin, 1999),
            "daymet_v4_daily_hi_tmin_1999.nc"
        );
    }

    #[test]
    fn aggregated_prcp_addresses_total_files() {
        assert_eq!(
            TimeScale::Monthly.file_name(Region::Na, Variable::Prcp, 2005),
            "daymet_v4_prcp_monttl_na_2005.nc"
        );
        assert_eq!(
            TimeScale::Annual.file_name(Region::Pr, Variable::Prcp, 2005),
            "daymet_v4_prcp_annttl_pr_2005.nc"
        );
    }

    #[test]
    fn aggregated_non_prcp_addresses_average_files() {
        assert_eq!(
            TimeScale::Monthly.file_name(Region::Na, Variable::Vp, 2005),
            "daymet_v4_vp_monavg_na_2005.nc"
        );
        assert_eq!(
            TimeScale::Annual.file_name(Region::Na, Variable::Tmax, 2005),
            "daymet_v4_tmax_annavg_na_2005.nc"
        );
    }
}
