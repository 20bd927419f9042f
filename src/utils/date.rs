use crate::models::partial_date::UNKNOWN_PART;
use crate::models::PartialDate;
use crate::utils::error::{AppError, AppResult};

/// Tolka ett datum skrivet som `DD.MM.YYYY`, `MM.YYYY` eller `YYYY`.
///
/// Tom inmatning ger ett helt okänt datum. Fler än tre delar, en känd dag
/// utan känd månad eller ett bindestreck i dag eller månad ger
/// `InvalidDateFormat` med originalsträngen oförändrad.
pub fn normalize_date(raw: &str) -> AppResult<PartialDate> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(PartialDate::Unknown);
    }

    let invalid = || AppError::InvalidDateFormat(raw.to_string());
    let parts: Vec<&str> = s.split('.').map(str::trim).collect();

    let (day, month, year) = match parts.as_slice() {
        [year] => (None, None, *year),
        [month, year] => (None, known(month), *year),
        [day, month, year] => (known(day), known(month), *year),
        _ => return Err(invalid()),
    };

    if known(year).is_none() {
        return Err(invalid());
    }

    // Lagringsformen avgränsar dag och månad med bindestreck
    if [day, month].iter().flatten().any(|part| part.contains('-')) {
        return Err(invalid());
    }

    match (month, day) {
        (None, None) => Ok(PartialDate::year(year)),
        (Some(month), None) => Ok(PartialDate::year_month(year, month)),
        (Some(month), Some(day)) => Ok(PartialDate::full(year, month, day)),
        (None, Some(_)) => Err(invalid()),
    }
}

/// `None` om delen är tom eller platshållaren `XX`
fn known(part: &str) -> Option<&str> {
    if part.is_empty() || part.eq_ignore_ascii_case(UNKNOWN_PART) {
        None
    } else {
        Some(part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(raw: &str) -> String {
        normalize_date(raw).unwrap().to_canonical().unwrap()
    }

    #[test]
    fn test_full_date_is_reordered() {
        assert_eq!(canonical("04.07.1950"), "1950-07-04");
        assert_eq!(canonical(" 31.12.1899 "), "1899-12-31");
    }

    #[test]
    fn test_month_and_year() {
        assert_eq!(canonical("07.1950"), "1950-07-XX");
    }

    #[test]
    fn test_year_only() {
        assert_eq!(canonical("1950"), "1950-XX-XX");
    }

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(normalize_date("").unwrap(), PartialDate::Unknown);
        assert_eq!(normalize_date("   ").unwrap(), PartialDate::Unknown);
    }

    #[test]
    fn test_placeholder_parts() {
        assert_eq!(canonical("XX.07.1950"), "1950-07-XX");
        assert_eq!(canonical("xx.xx.1950"), "1950-XX-XX");
    }

    #[test]
    fn test_no_numeric_validation() {
        assert_eq!(canonical("40.13.1950"), "1950-13-40");
    }

    #[test]
    fn test_invalid_keeps_original() {
        match normalize_date("1.2.3.4") {
            Err(AppError::InvalidDateFormat(original)) => assert_eq!(original, "1.2.3.4"),
            other => panic!("oväntat resultat: {:?}", other),
        }

        assert!(matches!(
            normalize_date("04.XX.1950"),
            Err(AppError::InvalidDateFormat(_))
        ));
        assert!(matches!(
            normalize_date("04.07."),
            Err(AppError::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn test_hyphen_in_day_or_month_is_invalid() {
        match normalize_date("1-2.07.1900") {
            Err(AppError::InvalidDateFormat(original)) => assert_eq!(original, "1-2.07.1900"),
            other => panic!("oväntat resultat: {:?}", other),
        }
        assert!(matches!(
            normalize_date("06-07.1900"),
            Err(AppError::InvalidDateFormat(_))
        ));
    }
}
