//! Genlib Entry - registrering av släktdata från kyrkböcker och liknande källor
//!
//! Operatören matar in personer, relationer och barn i en konsol. Varje
//! post granskas innan den sparas i SQLite.

pub mod app;
pub mod cli;
pub mod db;
pub mod models;
pub mod services;
pub mod ui;
pub mod utils;

// Re-exports
pub use app::{EntryApp, EntryMode};
pub use db::{Database, Gateway};
pub use models::*;
pub use utils::{normalize_date, AppError, AppResult};
