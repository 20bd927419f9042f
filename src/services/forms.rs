//! Inmatningsformulär för person, relation och barn

use super::review::{Review, ReviewLoop};
use crate::db::{FieldUpdate, FieldValue};
use crate::models::{ChildDraft, Gender, PartialDate, Person, PersonDraft, RelationshipDraft};
use crate::ui::prompt::{ask_date, ask_id, ask_integer, ask_text, ask_yes_no, ask_yes_no_default};
use crate::ui::Console;
use crate::utils::error::{AppError, AppResult};

fn show_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn show_date(date: &PartialDate) -> String {
    date.to_canonical().unwrap_or_default()
}

impl Review for PersonDraft {
    fn summary(&self) -> Vec<(&'static str, String)> {
        let mut lines = vec![
            ("Förnamn", show_text(&self.first_names)),
            ("Efternamn", show_text(&self.last_name)),
            (
                "Kön",
                self.gender.map(|g| g.display_name().to_string()).unwrap_or_default(),
            ),
            ("Födelsedatum", show_date(&self.birth_date)),
            ("Födelseort", show_text(&self.birth_place)),
            ("Dödsdatum", show_date(&self.death_date)),
            ("Dödsort", show_text(&self.death_place)),
            (
                "Avliden",
                match self.deceased {
                    Some(true) => "ja".to_string(),
                    Some(false) => "nej".to_string(),
                    None => "?".to_string(),
                },
            ),
        ];

        if self.page_from.is_some() || self.page_to.is_some() {
            let page = |p: Option<i64>| p.map(|n| n.to_string()).unwrap_or_default();
            lines.push(("Från sida", page(self.page_from)));
            lines.push(("Till sida", page(self.page_to)));
        }

        lines.push(("Kommentarer", show_text(&self.comments)));
        lines
    }
}

fn person_form<'a>() -> ReviewLoop<'a, PersonDraft> {
    ReviewLoop::new("person")
        .step(|console, draft: &mut PersonDraft| {
            draft.first_names = ask_text(console, "- Förnamn: ")?;
            draft.last_name = ask_text(console, "- Efternamn: ")?;
            draft.gender = ask_text(console, "- Kön (m/k): ")?
                .as_deref()
                .and_then(Gender::parse);
            Ok(())
        })
        .step(|console, draft: &mut PersonDraft| {
            draft.birth_date = ask_date(console, "- Födelsedatum: ")?;
            draft.birth_place = ask_text(console, "- Födelseort: ")?;
            draft.death_date = ask_date(console, "- Dödsdatum: ")?;
            draft.death_place = ask_text(console, "- Dödsort: ")?;
            Ok(())
        })
        .step(|console, draft: &mut PersonDraft| {
            draft.infer_deceased();
            if draft.deceased.is_none() {
                draft.deceased = Some(ask_yes_no(console, "- Avliden (j/n): ")?);
            }
            Ok(())
        })
        .step(|console, draft: &mut PersonDraft| {
            if ask_yes_no_default(console, "Lägg till sidhänvisningar (j/N)? ", false)? {
                draft.page_from = ask_integer(console, "  - Personen kommer från sida: ", true)?;
                draft.page_to = ask_integer(console, "  - Personen fortsätter på sida: ", true)?;
            }
            draft.comments = ask_text(console, "- Kommentarer: ")?;
            Ok(())
        })
        .validate_with(PersonDraft::validate)
}

/// Fråga efter en ny person och granska uppgifterna
pub fn collect_person(console: &mut dyn Console, page_number: Option<i64>) -> AppResult<Person> {
    console.say("Lägg till en ny person:");
    person_form()
        .run(console, &PersonDraft::new(page_number))?
        .into_person()
}

impl Review for RelationshipDraft {
    fn summary(&self) -> Vec<(&'static str, String)> {
        let mut lines = vec![
            ("Partner 1", self.partner1_label.clone()),
            (
                "Partner 2",
                self.partner2_label.clone().unwrap_or_else(|| "[okänd]".to_string()),
            ),
        ];

        if self.marriage_known {
            lines.push(("Vigseldatum", show_date(&self.marriage_date)));
            lines.push(("Vigselort", show_text(&self.marriage_place)));
            lines.push(("Skilsmässodatum", show_date(&self.divorce_date)));
            lines.push(("Skilsmässoort", show_text(&self.divorce_place)));
        }

        lines.push(("Kommentarer", show_text(&self.comments)));
        lines
    }
}

fn relationship_form<'a>() -> ReviewLoop<'a, RelationshipDraft> {
    ReviewLoop::new("relation")
        .step(|console, draft: &mut RelationshipDraft| {
            draft.marriage_known =
                ask_yes_no_default(console, "- Lägg till vigseluppgifter (J/n)? ", true)?;
            if draft.marriage_known {
                draft.marriage_date = ask_date(console, "- Vigseldatum: ")?;
                draft.marriage_place = ask_text(console, "- Vigselort: ")?;
                draft.divorce_date = ask_date(console, "- Skilsmässodatum: ")?;
                draft.divorce_place = ask_text(console, "- Skilsmässoort: ")?;
            }
            Ok(())
        })
        .step(|console, draft: &mut RelationshipDraft| {
            draft.comments = ask_text(console, "- Kommentarer om relationen: ")?;
            Ok(())
        })
}

/// Fråga efter vigsel- och skilsmässouppgifter för en relation
pub fn collect_relationship(
    console: &mut dyn Console,
    partner1_label: String,
    partner2_label: Option<String>,
) -> AppResult<RelationshipDraft> {
    console.say("Lägger till en relation");
    relationship_form().run(console, &RelationshipDraft::new(partner1_label, partner2_label))
}

/// Fältuppdateringar som sparar en granskad relation
pub fn relationship_updates(draft: &RelationshipDraft) -> Vec<FieldUpdate> {
    vec![
        FieldUpdate::new("marriage_date", FieldValue::Date(draft.marriage_date.clone())),
        FieldUpdate::new("marriage_place", FieldValue::Text(draft.marriage_place.clone())),
        FieldUpdate::new("divorce_date", FieldValue::Date(draft.divorce_date.clone())),
        FieldUpdate::new("divorce_place", FieldValue::Text(draft.divorce_place.clone())),
        FieldUpdate::new("comments", FieldValue::Text(draft.comments.clone())),
    ]
}

impl Review for ChildDraft {
    fn summary(&self) -> Vec<(&'static str, String)> {
        let id = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();
        vec![
            ("Relations-ID", id(self.relationship_id)),
            ("Barnets person-ID", id(self.person_id)),
        ]
    }
}

/// Fråga efter de ID:n som saknas. Granskning behövs inte om båda är givna.
pub fn collect_child(
    console: &mut dyn Console,
    relationship_id: Option<i64>,
    person_id: Option<i64>,
) -> AppResult<(i64, i64)> {
    let seed = ChildDraft {
        relationship_id,
        person_id,
    };

    let draft = if relationship_id.is_some() && person_id.is_some() {
        seed
    } else {
        ReviewLoop::new("barn")
            .step(|console, draft: &mut ChildDraft| {
                if draft.relationship_id.is_none() {
                    draft.relationship_id = Some(ask_id(console, "- Relations-ID: ")?);
                }
                if draft.person_id.is_none() {
                    draft.person_id = Some(ask_id(console, "- Barnets person-ID: ")?);
                }
                Ok(())
            })
            .run(console, &seed)?
    };

    match (draft.relationship_id, draft.person_id) {
        (Some(rel), Some(person)) => Ok((rel, person)),
        (None, _) => Err(AppError::UnresolvedRequiredField("relationship_id")),
        (_, None) => Err(AppError::UnresolvedRequiredField("person_id")),
    }
}
