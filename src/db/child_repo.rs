use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};
use tracing::info;

use super::lock;
use crate::models::Child;
use crate::utils::error::AppResult;

pub struct ChildRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ChildRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Hämta barnpost via ID
    pub fn find_by_id(&self, id: i64) -> AppResult<Option<Child>> {
        let conn = lock(&self.conn)?;
        let child = conn
            .query_row(
                "SELECT child_id, relationship_id, person_id, created_at
                 FROM children WHERE child_id = ?",
                [id],
                Self::row_to_child,
            )
            .optional()?;
        Ok(child)
    }

    /// Hämta alla barn i en relation
    pub fn find_by_relationship(&self, relationship_id: i64) -> AppResult<Vec<Child>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(
            "SELECT child_id, relationship_id, person_id, created_at
             FROM children WHERE relationship_id = ?
             ORDER BY child_id",
        )?;
        let children = stmt
            .query_map([relationship_id], Self::row_to_child)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(children)
    }

    /// Koppla en person som barn till en relation. Samma par får bara finnas en gång.
    pub fn create(&self, relationship_id: i64, person_id: i64) -> AppResult<i64> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO children (relationship_id, person_id) VALUES (?1, ?2)",
            params![relationship_id, person_id],
        )?;

        let id = conn.last_insert_rowid();
        info!(
            "Skapade barnpost {} (relation {}, person {})",
            id, relationship_id, person_id
        );

        Ok(id)
    }

    fn row_to_child(row: &Row) -> rusqlite::Result<Child> {
        Ok(Child {
            id: row.get(0)?,
            relationship_id: row.get(1)?,
            person_id: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}
