use super::models::AppConfig;
use super::tables::{ConfigTables, TABLE_NAMES};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            AppConfig::default()
        }
    }
}

/// Parse either the grouped table layout or the flat legacy layout.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let table: toml::Table = toml::from_str(contents).context("config is not valid TOML")?;
    let grouped = table.keys().any(|key| TABLE_NAMES.contains(&key.as_str()));
    if grouped {
        let tables: ConfigTables =
            toml::from_str(contents).context("config tables do not match the schema")?;
        Ok(tables.into())
    } else {
        toml::from_str::<AppConfig>(contents).context("flat config does not match the schema")
    }
}

/// Serialize using the grouped table layout.
pub fn serialize_config(config: &AppConfig) -> Result<String> {
    toml::to_string(&ConfigTables::from(config)).context("failed to serialize config")
}

pub fn save_config(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let contents = serialize_config(config)?;
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "Saved config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeMode;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = parse_config("").expect("empty config parses");
        assert_eq!(cfg.user_idle_ms, 4000);
        assert_eq!(cfg.recenter_settle_ms, 600);
        assert_eq!(cfg.mirror_guard_ms, 50);
        assert_eq!(cfg.videos_per_page, 6);
        assert_eq!(cfg.target_languages.len(), 2);
    }

    #[test]
    fn grouped_tables_override_defaults() {
        let cfg = parse_config(
            r#"
[appearance]
theme = "day"
font_size = 24

[sync]
user_idle_ms = 2500

[captions]
target_language = "en"
"#,
        )
        .expect("grouped config parses");
        assert_eq!(cfg.theme, ThemeMode::Day);
        assert_eq!(cfg.font_size, 24);
        assert_eq!(cfg.user_idle_ms, 2500);
        assert_eq!(cfg.mirror_guard_ms, 50);
        assert_eq!(cfg.target_language, "en");
    }

    #[test]
    fn flat_layout_is_still_accepted() {
        let cfg = parse_config("videos_per_page = 9\nlog_level = \"info\"\n")
            .expect("flat config parses");
        assert_eq!(cfg.videos_per_page, 9);
        assert_eq!(cfg.log_level, crate::config::LogLevel::Info);
    }

    #[test]
    fn serialized_config_round_trips_through_tables() {
        let mut cfg = AppConfig::default();
        cfg.theme = ThemeMode::Day;
        cfg.user_idle_ms = 1234;
        let text = serialize_config(&cfg).expect("serialize");
        assert!(text.contains("[sync]"));
        let back = parse_config(&text).expect("parse back");
        assert_eq!(back.theme, ThemeMode::Day);
        assert_eq!(back.user_idle_ms, 1234);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(parse_config("font_size = [").is_err());
    }
}
