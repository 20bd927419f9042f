//! Kommandoradsargument

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::app::EntryMode;

/// Genlib Entry - registrera personer, relationer och barn från källmaterial
#[derive(Debug, Parser)]
#[command(name = "genlib-entry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Inställningsfil (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Databasfil; ersätter värdet i inställningsfilen
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Visa debug-loggning
    #[arg(short, long)]
    pub verbose: bool,

    /// Kör ett enda registreringsläge i stället för menyn
    #[arg(value_enum)]
    pub mode: Option<CliMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliMode {
    /// Personer, med familjer
    Person,
    /// Relationer mellan befintliga personer
    Relationship,
    /// Barn i en befintlig relation
    Child,
    /// Ändra en befintlig person
    Edit,
}

impl From<CliMode> for EntryMode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Person => EntryMode::Person,
            CliMode::Relationship => EntryMode::Relationship,
            CliMode::Child => EntryMode::Child,
            CliMode::Edit => EntryMode::EditPerson,
        }
    }
}
