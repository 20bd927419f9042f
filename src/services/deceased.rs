use crate::models::PartialDate;

/// Personer födda detta år eller tidigare antas vara avlidna
pub const DECEASED_CUTOFF_YEAR: i32 = 1919;

/// Härled om en person är avliden.
///
/// `None` betyder att det inte går att avgöra; operatören måste då svara.
pub fn infer_deceased(death_date: &PartialDate, birth_date: &PartialDate) -> Option<bool> {
    if death_date.is_known() {
        return Some(true);
    }

    match birth_date.year_number() {
        Some(year) if year <= DECEASED_CUTOFF_YEAR => Some(true),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_death_date_means_deceased() {
        assert_eq!(
            infer_deceased(&PartialDate::year("1950"), &PartialDate::Unknown),
            Some(true)
        );
        assert_eq!(
            infer_deceased(&PartialDate::year("2001"), &PartialDate::full("1990", "01", "01")),
            Some(true)
        );
    }

    #[test]
    fn test_old_birth_year_means_deceased() {
        assert_eq!(
            infer_deceased(&PartialDate::Unknown, &PartialDate::full("1900", "01", "01")),
            Some(true)
        );
        assert_eq!(
            infer_deceased(&PartialDate::Unknown, &PartialDate::year("1919")),
            Some(true)
        );
    }

    #[test]
    fn test_unresolved() {
        assert_eq!(
            infer_deceased(&PartialDate::Unknown, &PartialDate::full("1990", "01", "01")),
            None
        );
        assert_eq!(
            infer_deceased(&PartialDate::Unknown, &PartialDate::year("1920")),
            None
        );
        assert_eq!(infer_deceased(&PartialDate::Unknown, &PartialDate::Unknown), None);
        // Årtal som inte går att tolka
        assert_eq!(
            infer_deceased(&PartialDate::Unknown, &PartialDate::year("omkr. 1850")),
            None
        );
    }
}
