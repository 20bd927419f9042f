pub mod child_repo;
pub mod fields;
pub mod gateway;
pub mod person_repo;
pub mod relationship_repo;
pub mod schema;

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::utils::error::{AppError, AppResult};

pub use child_repo::ChildRepository;
pub use fields::{FieldKind, FieldUpdate, FieldValue, UpdateReport};
pub use gateway::Gateway;
pub use person_repo::PersonRepository;
pub use relationship_repo::RelationshipRepository;

/// Huvuddatabas-wrapper. Varje skapande eller uppdatering är en egen
/// sats; ingen transaktion spänner över ett helt släktträd.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Öppna eller skapa databas
    pub fn open(path: &Path) -> AppResult<Self> {
        // Skapa katalog om den inte finns
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Konfigurera SQLite
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA busy_timeout = 5000;
            ",
        )?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.initialize()?;
        Ok(db)
    }

    /// Öppna in-memory databas (för tester)
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.initialize()?;
        Ok(db)
    }

    /// Skapa schemat om det saknas
    pub fn initialize(&self) -> AppResult<()> {
        let conn = lock(&self.conn)?;
        schema::initialize(&conn)
    }

    /// Hämta person-repository
    pub fn persons(&self) -> PersonRepository {
        PersonRepository::new(Arc::clone(&self.conn))
    }

    /// Hämta relations-repository
    pub fn relationships(&self) -> RelationshipRepository {
        RelationshipRepository::new(Arc::clone(&self.conn))
    }

    /// Hämta barn-repository
    pub fn children(&self) -> ChildRepository {
        ChildRepository::new(Arc::clone(&self.conn))
    }

    /// Direkt tillgång till connection i tester
    #[cfg(test)]
    pub fn with_connection<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let conn = lock(&self.conn)?;
        f(&conn)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

pub(crate) fn lock(conn: &Arc<Mutex<Connection>>) -> AppResult<MutexGuard<'_, Connection>> {
    conn.lock().map_err(|_| AppError::ConnectionPoisoned)
}
