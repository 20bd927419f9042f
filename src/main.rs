//! Genlib Entry - Entry Point

use anyhow::Context;
use clap::Parser;

use genlib_entry::cli::Cli;
use genlib_entry::models::Settings;
use genlib_entry::ui::StdConsole;
use genlib_entry::utils::path::get_config_path;
use genlib_entry::{AppError, Database, EntryApp};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(get_config_path);
    let config_exists = config_path.exists();
    let mut settings = Settings::load_from(&config_path)
        .with_context(|| format!("Kunde inte läsa inställningar {}", config_path.display()))?;
    let first_run = (!config_exists).then(|| settings.clone());

    if let Some(path) = cli.database {
        settings.database_path = path;
    }

    // Initiera logging; stderr så att loggen inte blandas med frågorna
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        settings.tracing_level()
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Startar Genlib Entry v{}", env!("CARGO_PKG_VERSION"));

    // Första körningen: spara standardinställningarna så att de går att redigera
    if let Some(defaults) = first_run {
        match defaults.save_to(&config_path) {
            Ok(()) => tracing::info!("Skapade inställningsfil: {:?}", config_path),
            Err(e) => tracing::warn!("Kunde inte spara inställningar: {}", e),
        }
    }

    tracing::info!("Öppnar databas: {:?}", settings.database_path);

    let db = Database::open(&settings.database_path)
        .with_context(|| format!("Kunde inte öppna databas {}", settings.database_path.display()))?;

    let app = EntryApp::new(&db);
    let mut console = StdConsole::new();
    let result = match cli.mode {
        Some(mode) => app.run_mode(&mut console, mode.into()),
        None => app.run(&mut console),
    };

    match result {
        Ok(()) | Err(AppError::InputClosed) => {
            tracing::info!("Avslutar");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
