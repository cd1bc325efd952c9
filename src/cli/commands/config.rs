//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;
use std::path::PathBuf;

/// Run the config command against the active config path.
pub fn run_config(action: &ConfigAction, settings: Settings, path: Option<&str>) -> Result<()> {
    let config_path = path
        .map(Settings::expand_path)
        .unwrap_or_else(Settings::default_config_path);

    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Init => write_config(&settings, &config_path)?,

        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

fn write_config(settings: &Settings, config_path: &PathBuf) -> Result<()> {
    if config_path.exists() {
        Output::warning(&format!(
            "Config already exists at {}; leaving it unchanged.",
            config_path.display()
        ));
        return Ok(());
    }

    settings.save_to(config_path)?;
    Output::success(&format!("Created config at {}", config_path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.retrieval.k = 5;
        write_config(&settings, &path).unwrap();
        assert_eq!(Settings::load_from(Some(&path)).unwrap().retrieval.k, 5);

        settings.retrieval.k = 7;
        write_config(&settings, &path).unwrap();
        assert_eq!(Settings::load_from(Some(&path)).unwrap().retrieval.k, 5);
    }
}
