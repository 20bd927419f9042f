use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Platshållare för okänd månad eller dag i lagrad form
pub const UNKNOWN_PART: &str = "XX";

/// Ett datum där dag och/eller månad kan vara okända.
///
/// Delarna sparas som de skrevs in i källan (ingen numerisk kontroll),
/// eftersom arkivuppgifter ofta är ofullständiga. Året är alltid känt om
/// någon del alls är känd.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "Option<String>", from = "Option<String>")]
pub enum PartialDate {
    #[default]
    Unknown,
    Year {
        year: String,
    },
    YearMonth {
        year: String,
        month: String,
    },
    Full {
        year: String,
        month: String,
        day: String,
    },
}

impl PartialDate {
    pub fn year(year: impl Into<String>) -> Self {
        Self::Year { year: year.into() }
    }

    pub fn year_month(year: impl Into<String>, month: impl Into<String>) -> Self {
        Self::YearMonth {
            year: year.into(),
            month: month.into(),
        }
    }

    pub fn full(year: impl Into<String>, month: impl Into<String>, day: impl Into<String>) -> Self {
        Self::Full {
            year: year.into(),
            month: month.into(),
            day: day.into(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Årtalet som heltal, om det går att tolka
    pub fn year_number(&self) -> Option<i32> {
        match self {
            Self::Unknown => None,
            Self::Year { year } | Self::YearMonth { year, .. } | Self::Full { year, .. } => {
                year.trim().parse().ok()
            }
        }
    }

    /// Lagringsform `YYYY-MM-DD` med `XX` för okända delar, `None` för helt okänt
    pub fn to_canonical(&self) -> Option<String> {
        match self {
            Self::Unknown => None,
            Self::Year { year } => Some(format!("{}-{}-{}", year, UNKNOWN_PART, UNKNOWN_PART)),
            Self::YearMonth { year, month } => Some(format!("{}-{}-{}", year, month, UNKNOWN_PART)),
            Self::Full { year, month, day } => Some(format!("{}-{}-{}", year, month, day)),
        }
    }

    /// Tolka lagringsformen. Årtalsdelen får själv innehålla bindestreck,
    /// så strängen delas bakifrån.
    pub fn from_canonical(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return Self::Unknown;
        }

        let mut parts = s.rsplitn(3, '-');
        let day = parts.next().unwrap_or_default();
        let (Some(month), Some(year)) = (parts.next(), parts.next()) else {
            // Ingen lagringsform, behåll texten som årtal
            return Self::year(s);
        };

        match (month == UNKNOWN_PART, day == UNKNOWN_PART) {
            (true, _) => Self::year(year),
            (false, true) => Self::year_month(year, month),
            (false, false) => Self::full(year, month, day),
        }
    }

    /// Varning om numeriska delar inte bildar ett verkligt datum.
    ///
    /// Värdet behålls ändå; varningen är bara till för operatören.
    pub fn calendar_warning(&self) -> Option<String> {
        let parse = |s: &str| s.trim().parse::<u32>().ok();

        match self {
            Self::Unknown | Self::Year { .. } => None,
            Self::YearMonth { month, .. } => match parse(month) {
                Some(m) if !(1..=12).contains(&m) => {
                    Some(format!("Månad {} finns inte i kalendern", month))
                }
                _ => None,
            },
            Self::Full { year, month, day } => {
                let (Some(y), Some(m), Some(d)) = (self.year_number(), parse(month), parse(day)) else {
                    return None;
                };
                if NaiveDate::from_ymd_opt(y, m, d).is_none() {
                    Some(format!("{}-{}-{} är inget giltigt kalenderdatum", year, month, day))
                } else {
                    None
                }
            }
        }
    }
}

/// Visningsform utan platshållare: `1950`, `1950-07`, `1950-07-04`
impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => Ok(()),
            Self::Year { year } => write!(f, "{}", year),
            Self::YearMonth { year, month } => write!(f, "{}-{}", year, month),
            Self::Full { year, month, day } => write!(f, "{}-{}-{}", year, month, day),
        }
    }
}

impl From<PartialDate> for Option<String> {
    fn from(date: PartialDate) -> Self {
        date.to_canonical()
    }
}

impl From<Option<String>> for PartialDate {
    fn from(value: Option<String>) -> Self {
        value
            .map(|s| PartialDate::from_canonical(&s))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_form() {
        assert_eq!(PartialDate::Unknown.to_canonical(), None);
        assert_eq!(PartialDate::year("1950").to_canonical().unwrap(), "1950-XX-XX");
        assert_eq!(
            PartialDate::year_month("1950", "07").to_canonical().unwrap(),
            "1950-07-XX"
        );
        assert_eq!(
            PartialDate::full("1950", "07", "04").to_canonical().unwrap(),
            "1950-07-04"
        );
    }

    #[test]
    fn test_from_canonical_keeps_precision() {
        assert_eq!(PartialDate::from_canonical("1950-XX-XX"), PartialDate::year("1950"));
        assert_eq!(
            PartialDate::from_canonical("1950-07-XX"),
            PartialDate::year_month("1950", "07")
        );
        assert_eq!(
            PartialDate::from_canonical("1950-07-04"),
            PartialDate::full("1950", "07", "04")
        );
        assert_eq!(PartialDate::from_canonical(""), PartialDate::Unknown);
        // Årtal med bindestreck
        assert_eq!(
            PartialDate::from_canonical("ca-1850-XX-XX"),
            PartialDate::year("ca-1850")
        );
    }

    #[test]
    fn test_display_trims_placeholders() {
        assert_eq!(PartialDate::year("1950").to_string(), "1950");
        assert_eq!(PartialDate::year_month("1950", "07").to_string(), "1950-07");
        assert_eq!(PartialDate::Unknown.to_string(), "");
    }

    #[test]
    fn test_year_number() {
        assert_eq!(PartialDate::full("1900", "01", "01").year_number(), Some(1900));
        assert_eq!(PartialDate::year("omkr. 1850").year_number(), None);
        assert_eq!(PartialDate::Unknown.year_number(), None);
    }

    #[test]
    fn test_calendar_warning() {
        assert!(PartialDate::full("1950", "13", "01").calendar_warning().is_some());
        assert!(PartialDate::full("1950", "02", "40").calendar_warning().is_some());
        assert!(PartialDate::year_month("1950", "13").calendar_warning().is_some());
        assert!(PartialDate::full("1950", "07", "04").calendar_warning().is_none());
        assert!(PartialDate::year("1950").calendar_warning().is_none());
    }
}
