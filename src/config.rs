use std::path::{Path, PathBuf};
use std::env;
use std::fs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::error::StorrError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Token dump options. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: OutputFormat,
    /// Prefix each token with `line:column`.
    pub positions: bool,
    pub skip_comments: bool,
    /// Exit non-zero when the source contains illegal tokens.
    pub strict: bool,
}

impl Config {
    /// Load from the config file (if any), then apply `STORR_FORMAT`.
    pub fn load() -> Result<Self, StorrError> {
        let mut config = Self::load_from(&Self::get_config_path())?;
        if let Ok(format) = env::var("STORR_FORMAT") {
            config.apply_format_override(&format);
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, StorrError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| StorrError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json(&contents).map_err(|source| StorrError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    pub fn apply_format_override(&mut self, value: &str) {
        match OutputFormat::parse(value) {
            Some(format) => self.format = format,
            None => warn!(value, "ignoring unknown STORR_FORMAT"),
        }
    }

    /// `$STORR_CONFIG`, or `storr.json` in the working directory.
    pub fn get_config_path() -> PathBuf {
        env::var("STORR_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("storr.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_json(r#"{ "format": "json", "strict": true }"#).unwrap();
        assert_eq!(
            config,
            Config {
                format: OutputFormat::Json,
                positions: false,
                skip_comments: false,
                strict: true,
            }
        );
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Config::from_json(r#"{ "format": "yaml" }"#).is_err());
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let config = Config::load_from(Path::new("definitely/not/here/storr.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn format_override() {
        let mut config = Config::default();
        config.apply_format_override(" JSON ");
        assert_eq!(config.format, OutputFormat::Json);
        config.apply_format_override("xml");
        assert_eq!(config.format, OutputFormat::Json);
        config.apply_format_override("text");
        assert_eq!(config.format, OutputFormat::Text);
    }
}
