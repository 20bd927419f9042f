pub mod date;
pub mod error;
pub mod path;

pub use date::normalize_date;
pub use error::{AppError, AppResult};
