//! Embedder-facing configuration: rendering locale and the due-soon window.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CoreResult;
use crate::format::LocaleConfig;
use crate::status::DUE_SOON_WINDOW_DAYS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub language_tag: String,
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    /// Days ahead of due date at which an open obligation renders as due
    /// soon.
    pub due_soon_window_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language_tag: "pt-BR".into(),
            currency_symbol: "R$".into(),
            decimal_separator: ',',
            grouping_separator: '.',
            due_soon_window_days: DUE_SOON_WINDOW_DAYS,
        }
    }
}

impl Config {
    /// Loads the config at `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load_from(path: &Path) -> CoreResult<Self> {
        if path.exists() {
            let data = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        crate::storage::write_atomic(path, &json)
    }

    pub fn locale(&self) -> LocaleConfig {
        LocaleConfig {
            currency_symbol: self.currency_symbol.clone(),
            decimal_separator: self.decimal_separator,
            grouping_separator: self.grouping_separator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let config = Config::load_from(&temp.path().join("missing.json")).unwrap();
        assert_eq!(config.language_tag, "pt-BR");
        assert_eq!(config.due_soon_window_days, 7);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.json");
        let mut config = Config::default();
        config.currency_symbol = "US$".into();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.currency_symbol, "US$");
    }
}
