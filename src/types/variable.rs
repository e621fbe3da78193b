//! The fixed set of climate variables served by the Daymet archive.

use crate::request::error::RequestError;
use std::fmt;
use std::str::FromStr;

/// A Daymet climate variable.
///
/// The archive serves exactly seven variables; anything else is rejected
/// before a request is built. Each variable has a canonical unit string that
/// is attached to assembled datasets.
///
/// # Examples
///
/// ```
/// use daymet::Variable;
///
/// assert_eq!(Variable::Prcp.unit(), "mm/day");
/// assert_eq!("tmin".parse::<Variable>().unwrap(), Variable::Tmin);
/// assert!("wind".parse::<Variable>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    /// Day length (seconds of daylight per day).
    Dayl,
    /// Precipitation.
    Prcp,
    /// Shortwave radiation (daylight average).
    Srad,
    /// Snow water equivalent.
    Swe,
    /// Daily maximum 2 m air temperature.
    Tmax,
    /// Daily minimum 2 m air temperature.
    Tmin,
    /// Water vapor pressure.
    Vp,
}

impl Variable {
    /// Every variable the archive serves, in canonical order.
    pub const ALL: [Variable; 7] = [
        Variable::Dayl,
        Variable::Prcp,
        Variable::Srad,
        Variable::Swe,
        Variable::Tmax,
        Variable::Tmin,
        Variable::Vp,
    ];

    /// The short code used in request parameters and file names.
    pub fn code(self) -> &'static str {
        match self {
            Variable::Dayl => "dayl",
            Variable::Prcp => "prcp",
            Variable::Srad => "srad",
            Variable::Swe => "swe",
            Variable::Tmax => "tmax",
            Variable::Tmin => "tmin",
            Variable::Vp => "vp",
        }
    }

    /// The canonical unit string for this variable.
    pub fn unit(self) -> &'static str {
        match self {
            Variable::Dayl => "s/day",
            Variable::Prcp => "mm/day",
            Variable::Srad => "W/m2",
            Variable::Swe => "kg/m2",
            Variable::Tmax => "degrees C",
            Variable::Tmin => "degrees C",
            Variable::Vp => "Pa",
        }
    }

    /// The normalized `name (unit)` column label used in point-mode frames.
    pub(crate) fn column_label(self) -> String {
        format!("{} ({})", self.code(), self.unit())
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Variable {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variable::ALL
            .iter()
            .find(|v| v.code() == s)
            .copied()
            .ok_or_else(|| RequestError::UnknownVariable {
                given: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for v in Variable::ALL {
            assert_eq!(v.code().parse::<Variable>().unwrap(), v);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = "wind".parse::<Variable>().unwrap_err();
        assert!(err.to_string().contains("wind"));
        assert!(err.to_string().contains("tmin"));
    }

    #[test]
    fn column_labels_carry_units() {
        assert_eq!(Variable::Tmin.column_label(), "tmin (degrees C)");
        assert_eq!(Variable::Prcp.column_label(), "prcp (mm/day)");
    }
}
