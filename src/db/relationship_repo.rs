use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};
use tracing::info;

use super::fields::{apply_updates, FieldUpdate, UpdateReport, RELATIONSHIP_FIELDS};
use super::lock;
use crate::models::{PartialDate, Relationship};
use crate::utils::error::AppResult;

const RELATIONSHIP_COLUMNS: &str = "relationship_id, person_id_partner1, person_id_partner2,
     marriage_date, marriage_place, divorce_date, divorce_place, comments, created_at";

pub struct RelationshipRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RelationshipRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Hämta relation via ID
    pub fn find_by_id(&self, id: i64) -> AppResult<Option<Relationship>> {
        let conn = lock(&self.conn)?;
        let sql = format!(
            "SELECT {} FROM relationships WHERE relationship_id = ?",
            RELATIONSHIP_COLUMNS
        );
        let rel = conn.query_row(&sql, [id], Self::row_to_relationship).optional()?;
        Ok(rel)
    }

    /// Hämta alla relationer där personen är partner
    pub fn find_by_partner(&self, person_id: i64) -> AppResult<Vec<Relationship>> {
        let conn = lock(&self.conn)?;
        let sql = format!(
            "SELECT {} FROM relationships
             WHERE person_id_partner1 = ?1 OR person_id_partner2 = ?1
             ORDER BY relationship_id",
            RELATIONSHIP_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rels = stmt
            .query_map([person_id], Self::row_to_relationship)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rels)
    }

    /// Skapa relation. Partner 1 måste finnas; partner 2 kan saknas.
    pub fn create(&self, partner1_id: i64, partner2_id: Option<i64>) -> AppResult<i64> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO relationships (person_id_partner1, person_id_partner2) VALUES (?1, ?2)",
            params![partner1_id, partner2_id],
        )?;

        let id = conn.last_insert_rowid();
        info!(
            "Skapade relation {} ({} och {})",
            id,
            partner1_id,
            partner2_id.map(|p| p.to_string()).unwrap_or_else(|| "okänd".into())
        );

        Ok(id)
    }

    /// Uppdatera enskilda fält
    pub fn update_fields(&self, id: i64, updates: &[FieldUpdate]) -> AppResult<UpdateReport> {
        let conn = lock(&self.conn)?;
        let report = apply_updates(
            &conn,
            "relationships",
            "relationship_id",
            id,
            RELATIONSHIP_FIELDS,
            updates,
        )?;
        info!("Uppdaterade relation {} ({} rader)", id, report.updated_rows);
        Ok(report)
    }

    /// Räkna alla relationer
    pub fn count(&self) -> AppResult<i64> {
        let conn = lock(&self.conn)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM relationships", [], |row| row.get(0))?;
        Ok(count)
    }

    fn row_to_relationship(row: &Row) -> rusqlite::Result<Relationship> {
        Ok(Relationship {
            id: row.get(0)?,
            partner1_id: row.get(1)?,
            partner2_id: row.get(2)?,
            marriage_date: PartialDate::from(row.get::<_, Option<String>>(3)?),
            marriage_place: row.get(4)?,
            divorce_date: PartialDate::from(row.get::<_, Option<String>>(5)?),
            divorce_place: row.get(6)?,
            comments: row.get(7)?,
            created_at: row.get(8)?,
        })
    }
}
