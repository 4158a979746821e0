//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use recorder_core::RenderOptions;
use recorder_streaming::StreamingOptions;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, when no `--config` is given.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["recorder.toml", ".recorder.toml", "recorder.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Options forwarded to both entries.
    #[serde(default)]
    pub render: RenderOptions,

    /// Flush configuration for stream mode.
    #[serde(default)]
    pub stream: StreamingOptions,
}

impl RecorderConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Generate a default recorder.toml config file.
pub fn generate_default_config() -> String {
    r#"# MQTT recorder front-end configuration

[render]
base = "/build/"
container_tag = "html"

[render.container_attributes]
lang = "en-us"

[render.head]
# title = "MQTT Recorder"
# [[render.head.meta]]
# name = "description"
# content = "MQTT message traffic and system status"

[stream]
# auto | direct | disabled
strategy = "auto"
max_initial_chunk = 30000
max_chunk = 10000
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use recorder_streaming::FlushStrategy;

    use super::*;

    #[test]
    fn test_default_config_file_parses_to_defaults() {
        let config: RecorderConfig = toml::from_str(&generate_default_config()).unwrap();

        assert_eq!(config, RecorderConfig::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: RecorderConfig = toml::from_str("").unwrap();

        assert_eq!(config, RecorderConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config: RecorderConfig = toml::from_str(
            r#"
[render]
base = "/static/"

[stream]
strategy = "disabled"
"#,
        )
        .unwrap();

        assert_eq!(config.render.base, "/static/");
        assert_eq!(config.render.container_tag, "html");
        assert_eq!(config.stream.strategy, FlushStrategy::Disabled);
        assert_eq!(config.stream.max_chunk, 10_000);
    }

    #[test]
    fn test_save_and_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recorder.toml");
        let config = RecorderConfig {
            render: RenderOptions::new()
                .with_title("Recorder")
                .with_meta("description", "MQTT"),
            stream: StreamingOptions::new(FlushStrategy::Direct),
        };

        config.save(&path).unwrap();
        let loaded = RecorderConfig::load(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_untitled_config_keeps_no_title_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("recorder.json");
        let toml_path = dir.path().join("recorder.toml");
        std::fs::write(&json_path, r#"{"render":{"head":{"title":null}}}"#).unwrap();

        let config = RecorderConfig::load(&json_path).unwrap();
        config.save(&toml_path).unwrap();
        let loaded = RecorderConfig::load(&toml_path).unwrap();

        assert_eq!(loaded.render.head.title, None);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recorder.json");
        let config = RecorderConfig {
            render: RenderOptions::new().with_container_tag("div"),
            ..Default::default()
        };

        config.save(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.trim_start().starts_with('{'));
        assert_eq!(RecorderConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = RecorderConfig::load(&dir.path().join("missing.toml"));

        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recorder.toml");
        std::fs::write(&path, "[render\nbase = 1").unwrap();

        let err = RecorderConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }
}
