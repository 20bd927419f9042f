use serde::{Deserialize, Serialize};

use super::PartialDate;
use crate::services::deceased::infer_deceased;
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Tolka fritext; okänd inmatning ger `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" | "man" => Some(Self::Male),
            "f" | "female" | "k" | "kvinna" => Some(Self::Female),
            _ => None,
        }
    }

    pub fn as_db_str(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "MALE" => Some(Self::Male),
            "FEMALE" => Some(Self::Female),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Male => "Man",
            Self::Female => "Kvinna",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Person {
    pub id: Option<i64>,
    pub page_number: Option<i64>,
    pub page_from: Option<i64>,
    pub page_to: Option<i64>,
    pub first_names: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: PartialDate,
    pub birth_place: Option<String>,
    pub death_date: PartialDate,
    pub death_place: Option<String>,
    pub deceased: bool,
    pub comments: Option<String>,
    pub created_at: Option<String>,
}

impl Person {
    /// Kort namn för listor och frågor; okända delar visas som `[okänd]`
    pub fn full_name(&self) -> String {
        let first = self.first_names.as_deref().unwrap_or("[okänd]");
        let last = self.last_name.as_deref().unwrap_or("[okänd]");
        format!("{} {}", first, last)
    }

    /// Namn med levnadsår, t.ex. `Anna Berg (f. 1890 d. 1950)`
    pub fn short_display(&self) -> String {
        let name = self.full_name();
        match (self.birth_date.is_known(), self.death_date.is_known()) {
            (true, true) => format!("{} (f. {} d. {})", name, self.birth_date, self.death_date),
            (true, false) => format!("{} (f. {})", name, self.birth_date),
            (false, true) => format!("{} (d. {})", name, self.death_date),
            (false, false) => name,
        }
    }
}

/// Personuppgifter under inmatning, innan avliden-flaggan är fastställd
#[derive(Debug, Clone, Default)]
pub struct PersonDraft {
    pub page_number: Option<i64>,
    pub page_from: Option<i64>,
    pub page_to: Option<i64>,
    pub first_names: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: PartialDate,
    pub birth_place: Option<String>,
    pub death_date: PartialDate,
    pub death_place: Option<String>,
    pub deceased: Option<bool>,
    pub comments: Option<String>,
}

impl PersonDraft {
    pub fn new(page_number: Option<i64>) -> Self {
        Self {
            page_number,
            ..Default::default()
        }
    }

    /// Härled avliden-flaggan från datumen om det går
    pub fn infer_deceased(&mut self) {
        self.deceased = infer_deceased(&self.death_date, &self.birth_date);
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.deceased.is_none() {
            return Err(AppError::UnresolvedRequiredField("deceased"));
        }
        Ok(())
    }

    pub fn into_person(self) -> AppResult<Person> {
        let deceased = self
            .deceased
            .ok_or(AppError::UnresolvedRequiredField("deceased"))?;

        Ok(Person {
            id: None,
            page_number: self.page_number,
            page_from: self.page_from,
            page_to: self.page_to,
            first_names: self.first_names,
            last_name: self.last_name,
            gender: self.gender,
            birth_date: self.birth_date,
            birth_place: self.birth_place,
            death_date: self.death_date,
            death_place: self.death_place,
            deceased,
            comments: self.comments,
            created_at: None,
        })
    }
}

/// Tom sträng betyder "saknas"
pub fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("M"), Some(Gender::Male));
        assert_eq!(Gender::parse("female"), Some(Gender::Female));
        assert_eq!(Gender::parse("k"), Some(Gender::Female));
        assert_eq!(Gender::parse(""), None);
        assert_eq!(Gender::parse("okänt"), None);
    }

    #[test]
    fn test_short_display() {
        let person = Person {
            first_names: Some("Anna Maria".into()),
            last_name: Some("Berg".into()),
            birth_date: PartialDate::year("1890"),
            death_date: PartialDate::year_month("1950", "03"),
            ..Default::default()
        };
        assert_eq!(person.short_display(), "Anna Maria Berg (f. 1890 d. 1950-03)");

        let unnamed = Person::default();
        assert_eq!(unnamed.short_display(), "[okänd] [okänd]");
    }

    #[test]
    fn test_unresolved_deceased_is_rejected() {
        let draft = PersonDraft::new(Some(12));
        assert!(matches!(
            draft.validate(),
            Err(AppError::UnresolvedRequiredField("deceased"))
        ));
        assert!(draft.into_person().is_err());
    }

    #[test]
    fn test_inferred_draft_becomes_person() {
        let mut draft = PersonDraft::new(Some(3));
        draft.birth_date = PartialDate::full("1900", "01", "01");
        draft.infer_deceased();

        let person = draft.into_person().unwrap();
        assert!(person.deceased);
        assert_eq!(person.page_number, Some(3));
    }
}
