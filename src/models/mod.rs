pub mod config;
pub mod partial_date;
pub mod person;
pub mod relationship;

pub use config::*;
pub use partial_date::PartialDate;
pub use person::*;
pub use relationship::*;
