use std::path::PathBuf;

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("se", "genlib", "Genlib")
}

/// Hämta databassökväg
pub fn get_database_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("genlib-entry.db"))
        .unwrap_or_else(|| PathBuf::from("genlib-entry.db"))
}

/// Hämta konfigurationssökväg
pub fn get_config_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().join("entry.toml"))
        .unwrap_or_else(|| PathBuf::from("entry.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_have_expected_file_names() {
        assert!(get_database_path().ends_with("genlib-entry.db"));
        assert!(get_config_path().ends_with("entry.toml"));
    }
}
