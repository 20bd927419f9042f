use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};
use tracing::info;

use super::fields::{apply_updates, FieldUpdate, UpdateReport, PERSON_FIELDS};
use super::lock;
use crate::models::{non_empty, Gender, PartialDate, Person};
use crate::utils::error::AppResult;

const PERSON_COLUMNS: &str = "person_id, page_number, page_from, page_to, first_names, last_name,
     gender, birth_date, birth_place, death_date, death_place, deceased, comments, created_at";

pub struct PersonRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PersonRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Hämta person via ID
    pub fn find_by_id(&self, id: i64) -> AppResult<Option<Person>> {
        let conn = lock(&self.conn)?;
        let sql = format!("SELECT {} FROM persons WHERE person_id = ?", PERSON_COLUMNS);
        let person = conn.query_row(&sql, [id], Self::row_to_person).optional()?;
        Ok(person)
    }

    /// Skapa ny person i en enda INSERT
    pub fn create(&self, person: &mut Person) -> AppResult<i64> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO persons (page_number, page_from, page_to, first_names, last_name,
                                  gender, birth_date, birth_place, death_date, death_place,
                                  deceased, comments)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                person.page_number,
                person.page_from,
                person.page_to,
                text(&person.first_names),
                text(&person.last_name),
                person.gender.map(|g| g.as_db_str()),
                person.birth_date.to_canonical(),
                text(&person.birth_place),
                person.death_date.to_canonical(),
                text(&person.death_place),
                person.deceased,
                text(&person.comments),
            ],
        )?;

        let id = conn.last_insert_rowid();
        person.id = Some(id);
        info!("Skapade person {} ({})", id, person.full_name());

        Ok(id)
    }

    /// Uppdatera enskilda fält
    pub fn update_fields(&self, id: i64, updates: &[FieldUpdate]) -> AppResult<UpdateReport> {
        let conn = lock(&self.conn)?;
        let report = apply_updates(&conn, "persons", "person_id", id, PERSON_FIELDS, updates)?;
        info!("Uppdaterade person {} ({} rader)", id, report.updated_rows);
        Ok(report)
    }

    /// Räkna antal personer
    pub fn count(&self) -> AppResult<i64> {
        let conn = lock(&self.conn)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM persons", [], |row| row.get(0))?;
        Ok(count)
    }

    fn row_to_person(row: &Row) -> rusqlite::Result<Person> {
        Ok(Person {
            id: row.get(0)?,
            page_number: row.get(1)?,
            page_from: row.get(2)?,
            page_to: row.get(3)?,
            first_names: row.get(4)?,
            last_name: row.get(5)?,
            gender: row
                .get::<_, Option<String>>(6)?
                .and_then(|s| Gender::from_db_str(&s)),
            birth_date: PartialDate::from(row.get::<_, Option<String>>(7)?),
            birth_place: row.get(8)?,
            death_date: PartialDate::from(row.get::<_, Option<String>>(9)?),
            death_place: row.get(10)?,
            deceased: row.get(11)?,
            comments: row.get(12)?,
            created_at: row.get(13)?,
        })
    }
}

/// Tom text sparas som NULL
fn text(value: &Option<String>) -> Option<String> {
    value.as_deref().and_then(non_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fields::FieldValue;
    use crate::db::Database;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn sample_person() -> Person {
        Person {
            page_number: Some(14),
            first_names: Some("Johan Erik".into()),
            last_name: Some("Andersson".into()),
            gender: Some(Gender::Male),
            birth_date: PartialDate::year_month("1890", "07"),
            birth_place: Some("Ljusdal".into()),
            death_date: PartialDate::year("1950"),
            deceased: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_create_and_find() {
        let db = setup_db();
        let repo = db.persons();

        let mut person = sample_person();
        let id = repo.create(&mut person).unwrap();
        assert!(id > 0);
        assert_eq!(person.id, Some(id));

        let found = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(found.first_names, Some("Johan Erik".into()));
        assert_eq!(found.gender, Some(Gender::Male));
        assert_eq!(found.birth_date, PartialDate::year_month("1890", "07"));
        assert_eq!(found.death_date, PartialDate::year("1950"));
        assert!(found.deceased);
        assert!(found.created_at.is_some());
    }

    #[test]
    fn test_dates_are_stored_with_placeholders() {
        let db = setup_db();
        let mut person = sample_person();
        let id = db.persons().create(&mut person).unwrap();

        let stored: String = db
            .with_connection(|conn| {
                Ok(conn.query_row(
                    "SELECT birth_date FROM persons WHERE person_id = ?",
                    [id],
                    |row| row.get(0),
                )?)
            })
            .unwrap();
        assert_eq!(stored, "1890-07-XX");
    }

    #[test]
    fn test_entered_dates_survive_the_store() {
        use crate::utils::date::normalize_date;

        let db = setup_db();
        let repo = db.persons();

        for raw in ["04.07.1900", "XX.07.1900", "1900", "40.13.1900"] {
            let mut person = sample_person();
            person.birth_date = normalize_date(raw).unwrap();
            let id = repo.create(&mut person).unwrap();

            let found = repo.find_by_id(id).unwrap().unwrap();
            assert_eq!(found.birth_date, person.birth_date, "{}", raw);
            assert_eq!(found.birth_date.year_number(), Some(1900));
        }

        // Bindestreck skulle dela lagringsformen fel och tas inte emot
        assert!(normalize_date("1-2.07.1900").is_err());
    }

    #[test]
    fn test_empty_text_and_quotes() {
        let db = setup_db();
        let repo = db.persons();

        let mut person = sample_person();
        person.death_place = Some("   ".into());
        person.comments = Some("Kallad 'Lill-Johan' i husförhöret".into());
        let id = repo.create(&mut person).unwrap();

        let found = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(found.death_place, None);
        assert_eq!(
            found.comments.as_deref(),
            Some("Kallad 'Lill-Johan' i husförhöret")
        );
    }

    #[test]
    fn test_update_skips_unsupported_fields() {
        let db = setup_db();
        let repo = db.persons();

        let mut person = sample_person();
        let id = repo.create(&mut person).unwrap();

        let report = repo
            .update_fields(
                id,
                &[
                    FieldUpdate::new("last_name", FieldValue::Text(Some("Berg".into()))),
                    FieldUpdate::new("shoe_size", FieldValue::Integer(Some(42))),
                    FieldUpdate::new("page_to", FieldValue::Integer(Some(15))),
                    // Fel typ för kolumnen
                    FieldUpdate::new("deceased", FieldValue::Text(Some("ja".into()))),
                ],
            )
            .unwrap();

        assert_eq!(report.updated_rows, 1);
        assert_eq!(report.unsupported, vec!["shoe_size".to_string(), "deceased".to_string()]);

        let found = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(found.last_name, Some("Berg".into()));
        assert_eq!(found.page_to, Some(15));
        assert!(found.deceased);
    }

    #[test]
    fn test_update_missing_person_updates_nothing() {
        let db = setup_db();
        let report = db
            .persons()
            .update_fields(999, &[FieldUpdate::new("comments", FieldValue::Text(None))])
            .unwrap();
        assert_eq!(report.updated_rows, 0);
    }

    #[test]
    fn test_find_missing() {
        let db = setup_db();
        assert!(db.persons().find_by_id(999).unwrap().is_none());
        assert_eq!(db.persons().count().unwrap(), 0);
    }
}
