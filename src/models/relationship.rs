use serde::{Deserialize, Serialize};

use super::PartialDate;

/// Parrelation. Partner 2 saknas när maken/makan inte är känd.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Relationship {
    pub id: Option<i64>,
    pub partner1_id: i64,
    pub partner2_id: Option<i64>,
    pub marriage_date: PartialDate,
    pub marriage_place: Option<String>,
    pub divorce_date: PartialDate,
    pub divorce_place: Option<String>,
    pub comments: Option<String>,
    pub created_at: Option<String>,
}

impl Relationship {
    pub fn new(partner1_id: i64, partner2_id: Option<i64>) -> Self {
        Self {
            partner1_id,
            partner2_id,
            ..Default::default()
        }
    }

    /// `g. 1920 skild 1931`, tom sträng om inga datum finns
    pub fn marriage_display(&self) -> String {
        match (self.marriage_date.is_known(), self.divorce_date.is_known()) {
            (true, true) => format!("g. {} skild {}", self.marriage_date, self.divorce_date),
            (true, false) => format!("g. {}", self.marriage_date),
            (false, true) => format!("skild {}", self.divorce_date),
            (false, false) => String::new(),
        }
    }
}

/// Relationsuppgifter under inmatning
#[derive(Debug, Clone, Default)]
pub struct RelationshipDraft {
    /// Visningsnamn för partnerna, används bara i granskningen
    pub partner1_label: String,
    pub partner2_label: Option<String>,
    pub marriage_known: bool,
    pub marriage_date: PartialDate,
    pub marriage_place: Option<String>,
    pub divorce_date: PartialDate,
    pub divorce_place: Option<String>,
    pub comments: Option<String>,
}

impl RelationshipDraft {
    pub fn new(partner1_label: String, partner2_label: Option<String>) -> Self {
        Self {
            partner1_label,
            partner2_label,
            ..Default::default()
        }
    }
}

/// Koppling mellan en relation och en person som är barn i den
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Child {
    pub id: Option<i64>,
    pub relationship_id: i64,
    pub person_id: i64,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ChildDraft {
    pub relationship_id: Option<i64>,
    pub person_id: Option<i64>,
}
