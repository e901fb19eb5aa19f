//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings, config_path: &Path) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Set { key, value } => {
            let updated = set_value(&settings, key, value)?;
            updated.save_to(config_path)?;
            Output::success(&format!("Set {} = {}", key, value));
        }

        ConfigAction::Edit => {
            // Create default config if it doesn't exist
            if !config_path.exists() {
                settings.save_to(config_path)?;
                Output::info(&format!("Created default config at {:?}", config_path));
            }

            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

            Output::info(&format!("Opening config in {}...", editor));

            let status = std::process::Command::new(&editor)
                .arg(config_path)
                .status();

            match status {
                Ok(s) if s.success() => match Settings::load_from(Some(config_path)) {
                    Ok(_) => Output::success("Config saved."),
                    Err(e) => Output::warning(&format!("Config saved but does not load: {}", e)),
                },
                Ok(_) => {
                    Output::warning("Editor exited with non-zero status.");
                }
                Err(e) => {
                    Output::error(&format!("Failed to open editor: {}", e));
                    Output::info(&format!("Config file is at: {:?}", config_path));
                }
            }
        }

        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Return a copy of `settings` with `section.key` set to `value`.
///
/// The value is parsed as the type the key already has.
fn set_value(settings: &Settings, key: &str, value: &str) -> Result<Settings> {
    let (section, field) = key
        .split_once('.')
        .with_context(|| format!("Expected section.key, got {:?}", key))?;

    let mut root = toml::Value::try_from(settings)?;
    let current = root
        .get_mut(section)
        .and_then(|s| s.get_mut(field))
        .with_context(|| format!("Unknown configuration key: {}", key))?;

    let replacement = match &*current {
        toml::Value::Boolean(_) => toml::Value::Boolean(
            value
                .parse()
                .with_context(|| format!("{} expects true or false", key))?,
        ),
        toml::Value::Integer(_) => toml::Value::Integer(
            value
                .parse()
                .with_context(|| format!("{} expects an integer", key))?,
        ),
        _ => toml::Value::String(value.to_string()),
    };
    *current = replacement;

    let updated: Settings = root.try_into()?;
    updated.validate()?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_value() {
        let settings = Settings::default();

        let updated = set_value(&settings, "playback.sentence_mode", "true").unwrap();
        assert!(updated.playback.sentence_mode);

        let updated = set_value(&updated, "playback.tick_interval_ms", "100").unwrap();
        assert_eq!(updated.playback.tick_interval_ms, 100);

        let updated = set_value(&updated, "document.block_marker", "```lyrics").unwrap();
        assert_eq!(updated.document.block_marker, "```lyrics");
    }

    #[test]
    fn test_set_value_rejects_bad_input() {
        let settings = Settings::default();
        assert!(set_value(&settings, "playback", "true").is_err());
        assert!(set_value(&settings, "playback.missing", "1").is_err());
        assert!(set_value(&settings, "playback.auto_scroll", "yes").is_err());
        assert!(set_value(&settings, "playback.tick_interval_ms", "-").is_err());
        assert!(set_value(&settings, "playback.tick_interval_ms", "0").is_err());
    }

    #[test]
    fn test_set_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let action = ConfigAction::Set {
            key: "playback.auto_scroll".to_string(),
            value: "false".to_string(),
        };

        run_config(&action, Settings::default(), &path).unwrap();

        let loaded = Settings::load_from(Some(path.as_path())).unwrap();
        assert!(!loaded.playback.auto_scroll);
    }
}
