use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Ogiltigt datumformat: {0}")]
    InvalidDateFormat(String),

    #[error("Ogiltigt heltal: {0}")]
    InvalidIntegerInput(String),

    #[error("Ogiltigt ja/nej-svar: {0}")]
    InvalidYesNo(String),

    #[error("Obligatoriskt fält saknar värde: {0}")]
    UnresolvedRequiredField(&'static str),

    #[error("Databasfel: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("Fält stöds inte: {0}")]
    UnsupportedField(String),

    #[error("Hittades inte: {0}")]
    NotFound(String),

    #[error("Databasanslutningen är oanvändbar efter ett tidigare fel")]
    ConnectionPoisoned,

    #[error("Inmatningen stängdes")]
    InputClosed,

    #[error("IO-fel: {0}")]
    Io(#[from] std::io::Error),

    #[error("Konfigurationsfel: {0}")]
    Config(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Fel som bara avbryter den aktuella posten, inte hela sessionen
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, Self::Persistence(_) | Self::NotFound(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
