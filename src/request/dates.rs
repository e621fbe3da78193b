//! Decomposition of a requested date span into the per-year windows the
//! archive actually serves.

use crate::request::error::RequestError;
use chrono::{Datelike, NaiveDate};

/// First year with Daymet coverage.
pub const COVERAGE_START_YEAR: i32 = 1980;

/// A requested time span: either an inclusive date range or an explicit
/// list of calendar years.
///
/// # Examples
///
/// ```
/// use daymet::Dates;
/// use chrono::NaiveDate;
///
/// let range: Dates = (
///     NaiveDate::from_ymd_opt(2000, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2002, 3, 15).unwrap(),
/// )
///     .into();
/// let years: Dates = vec![2001, 2003].into();
/// # let _ = (range, years);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dates {
    /// Inclusive (start, end) date pair.
    Range(NaiveDate, NaiveDate),
    /// Explicit calendar years; each maps to its full Jan 1 - Dec 31 window.
    Years(Vec<i32>),
}

impl From<(NaiveDate, NaiveDate)> for Dates {
    fn from((start, end): (NaiveDate, NaiveDate)) -> Self {
        Dates::Range(start, end)
    }
}

impl From<Vec<i32>> for Dates {
    fn from(years: Vec<i32>) -> Self {
        Dates::Years(years)
    }
}

impl From<i32> for Dates {
    fn from(year: i32) -> Self {
        Dates::Years(vec![year])
    }
}

impl Dates {
    /// Decomposes the span into ordered per-year windows.
    pub fn windows(&self) -> Result<Vec<DateWindow>, RequestError> {
        match self {
            Dates::Range(start, end) => DateWindow::from_range(*start, *end),
            Dates::Years(years) => DateWindow::from_years(years),
        }
    }
}

/// One calendar-year sub-interval of a requested span.
///
/// Windows produced by a decomposition are strictly ascending,
/// non-overlapping, and reconstruct the requested span exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// Inclusive start date.
    pub start: NaiveDate,
    /// Inclusive end date; always in the same calendar year as `start`.
    pub end: NaiveDate,
}

impl DateWindow {
    /// The calendar year this window lies in.
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// Splits an inclusive date range into one window per spanned year.
    ///
    /// The first window starts at `start`, the last ends at `end`, and
    /// intermediate windows cover full calendar years.
    pub fn from_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<DateWindow>, RequestError> {
        if start > end {
            return Err(RequestError::InvalidDateOrder { start, end });
        }
        if start.year() < COVERAGE_START_YEAR {
            return Err(RequestError::BeforeCoverage { date: start });
        }
        let windows = (start.year()..=end.year())
            .map(|year| DateWindow {
                start: start.max(first_day(year)),
                end: end.min(last_day(year)),
            })
            .collect();
        Ok(windows)
    }

    /// Maps each listed year to its full-year window, ascending.
    ///
    /// Duplicate years are kept; each yields one window.
    pub fn from_years(years: &[i32]) -> Result<Vec<DateWindow>, RequestError> {
        if years.is_empty() {
            return Err(RequestError::EmptyYears);
        }
        if let Some(&year) = years.iter().find(|&&y| y < COVERAGE_START_YEAR) {
            return Err(RequestError::YearBeforeCoverage { year });
        }
        let mut sorted = years.to_vec();
        sorted.sort_unstable();
        Ok(sorted
            .into_iter()
            .map(|year| DateWindow {
                start: first_day(year),
                end: last_day(year),
            })
            .collect())
    }

    /// Window start as the UTC timestamp string the service expects.
    pub(crate) fn time_start(&self) -> String {
        format!("{}T00:00:00Z", self.start.format("%Y-%m-%d"))
    }

    /// Window end as the UTC timestamp string the service expects.
    pub(crate) fn time_end(&self) -> String {
        format!("{}T00:00:00Z", self.end.format("%Y-%m-%d"))
    }
}

fn first_day(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).expect("Jan 1 exists for every year")
}

fn last_day(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).expect("Dec 31 exists for every year")
}
