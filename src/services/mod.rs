//! Tjänster för inmatningen
//!
//! Innehåller affärslogik som inte hör hemma i konsolen eller databasen.

pub mod deceased;
pub mod family_builder;
pub mod forms;
pub mod review;

pub use deceased::{infer_deceased, DECEASED_CUTOFF_YEAR};
pub use family_builder::FamilyBuilder;
pub use review::{Review, ReviewLoop, ReviewState};
