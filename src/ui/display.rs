use serde::Serialize;

use super::Console;
use crate::db::Gateway;
use crate::utils::error::AppResult;

/// Skriv ut en sparad post fält för fält, som den ligger i databasen
pub fn print_stored<T: Serialize>(console: &mut dyn Console, title: &str, record: &T) {
    console.say(title);

    match serde_json::to_value(record) {
        Ok(serde_json::Value::Object(fields)) => {
            for (name, value) in fields {
                let value = match value {
                    serde_json::Value::Null => "-".to_string(),
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                console.say(&format!("- {}: {}", name, value));
            }
        }
        Ok(other) => console.say(&format!("- {}", other)),
        Err(e) => console.say(&format!("FEL: Kunde inte visa posten: {}", e)),
    }
}

/// Kort beskrivning av en person, t.ex. `Anna Berg (f. 1890)`
pub fn person_label(gateway: &dyn Gateway, person_id: i64) -> AppResult<String> {
    Ok(gateway.get_person(person_id)?.short_display())
}

/// Visa en relation med partner, vigseldatum och barn
pub fn show_relationship(
    console: &mut dyn Console,
    gateway: &dyn Gateway,
    relationship_id: i64,
) -> AppResult<()> {
    let rel = gateway.get_relationship(relationship_id)?;

    console.say("");
    console.say("Relation:");
    console.say(&format!("- Partner 1: {}", person_label(gateway, rel.partner1_id)?));
    let partner2 = match rel.partner2_id {
        Some(id) => person_label(gateway, id)?,
        None => "[okänd]".to_string(),
    };
    console.say(&format!("- Partner 2: {}", partner2));

    let marriage = rel.marriage_display();
    if !marriage.is_empty() {
        console.say(&format!("- Äktenskap: {}", marriage));
    }

    for child in gateway.children_of(relationship_id)? {
        console.say(&format!("- Barn: {}", person_label(gateway, child.person_id)?));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{PartialDate, Person};
    use crate::ui::ScriptedConsole;

    #[test]
    fn test_print_stored() {
        let person = Person {
            id: Some(3),
            last_name: Some("Berg".into()),
            birth_date: PartialDate::year("1890"),
            deceased: true,
            ..Default::default()
        };

        let mut console = ScriptedConsole::new(&[]);
        print_stored(&mut console, "Sparad person:", &person);

        assert_eq!(console.output[0], "Sparad person:");
        assert!(console.said("- last_name: Berg"));
        assert!(console.said("- birth_date: 1890-XX-XX"));
        assert!(console.said("- deceased: true"));
        assert!(console.said("- first_names: -"));
    }

    #[test]
    fn test_show_relationship_with_unknown_spouse() {
        let db = Database::open_in_memory().unwrap();
        let mut head = Person {
            first_names: Some("Anna".into()),
            last_name: Some("Berg".into()),
            birth_date: PartialDate::year("1890"),
            death_date: PartialDate::year("1950"),
            deceased: true,
            ..Default::default()
        };
        let head_id = db.persons().create(&mut head).unwrap();
        let rel_id = db.relationships().create(head_id, None).unwrap();

        let mut console = ScriptedConsole::new(&[]);
        show_relationship(&mut console, &db, rel_id).unwrap();

        assert!(console.said("- Partner 1: Anna Berg (f. 1890 d. 1950)"));
        assert!(console.said("- Partner 2: [okänd]"));
        assert!(!console.said("Äktenskap"));
    }
}
