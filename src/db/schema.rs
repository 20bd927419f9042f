/// SQL-schema för registreringsdatabasen
use rusqlite::Connection;
use tracing::info;

use crate::utils::error::AppResult;

pub const SCHEMA_VERSION: i32 = 1;

pub const CREATE_TABLES: &str = r#"
-- Personer
CREATE TABLE IF NOT EXISTS persons (
    person_id INTEGER PRIMARY KEY AUTOINCREMENT,
    page_number INTEGER,
    page_from INTEGER,
    page_to INTEGER,
    first_names TEXT,
    last_name TEXT,
    gender TEXT CHECK (gender IN ('MALE', 'FEMALE')),
    birth_date TEXT,
    birth_place TEXT,
    death_date TEXT,
    death_place TEXT,
    deceased INTEGER NOT NULL,
    comments TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_persons_last_name ON persons(last_name);

-- Parrelationer, partner 2 är NULL när maken/makan inte är känd
CREATE TABLE IF NOT EXISTS relationships (
    relationship_id INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id_partner1 INTEGER NOT NULL,
    person_id_partner2 INTEGER,
    marriage_date TEXT,
    marriage_place TEXT,
    divorce_date TEXT,
    divorce_place TEXT,
    comments TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    FOREIGN KEY (person_id_partner1) REFERENCES persons(person_id),
    FOREIGN KEY (person_id_partner2) REFERENCES persons(person_id)
);

CREATE INDEX IF NOT EXISTS idx_relationships_partner1 ON relationships(person_id_partner1);
CREATE INDEX IF NOT EXISTS idx_relationships_partner2 ON relationships(person_id_partner2);

-- Barn i en relation
CREATE TABLE IF NOT EXISTS children (
    child_id INTEGER PRIMARY KEY AUTOINCREMENT,
    relationship_id INTEGER NOT NULL,
    person_id INTEGER NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    FOREIGN KEY (relationship_id) REFERENCES relationships(relationship_id),
    FOREIGN KEY (person_id) REFERENCES persons(person_id),
    UNIQUE (relationship_id, person_id)
);

CREATE INDEX IF NOT EXISTS idx_children_person ON children(person_id);

-- Schemaversion
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

/// Skapa tabellerna om de saknas och notera schemaversionen
pub fn initialize(conn: &Connection) -> AppResult<()> {
    let current_version = get_current_version(conn)?;

    if current_version == 0 {
        info!("Skapar ny databas med schema version {}", SCHEMA_VERSION);
        conn.execute_batch(CREATE_TABLES)?;
        conn.execute(
            "INSERT INTO schema_migrations (version) VALUES (?)",
            [SCHEMA_VERSION],
        )?;
    } else {
        info!("Databas har schema version {}", current_version);
    }

    Ok(())
}

fn get_current_version(conn: &Connection) -> AppResult<i32> {
    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_migrations')",
        [],
        |row| row.get(0),
    )?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |row| row.get(0))?;

    Ok(version.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_setup() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"persons".to_string()));
        assert!(tables.contains(&"relationships".to_string()));
        assert!(tables.contains(&"children".to_string()));
    }

    #[test]
    fn test_idempotent_setup() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();
        initialize(&conn).unwrap();

        assert_eq!(get_current_version(&conn).unwrap(), SCHEMA_VERSION);
    }
}
