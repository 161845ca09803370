//! Configuration
//!
//! Everything the page layer hard-codes about the site it runs on. The
//! defaults match the stock markup; hosts may override them from JSON.

use fos_dom::{DomError, SelectorList};
use serde::Deserialize;

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid selector in configuration: {0}")]
    Selector(#[from] DomError),

    #[error("Alert timings must be increasing (show {show}ms, hide {hide}ms, remove {remove}ms)")]
    AlertTimings { show: u64, hide: u64, remove: u64 },
}

/// Global alert timeline, in milliseconds after the alert is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlertTimings {
    pub show_after_ms: u64,
    pub hide_after_ms: u64,
    pub remove_after_ms: u64,
}

impl Default for AlertTimings {
    fn default() -> Self {
        Self {
            show_after_ms: 50,
            hide_after_ms: 5000,
            remove_after_ms: 5500,
        }
    }
}

/// Page layer configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpaConfig {
    /// Element swapped on navigation
    pub content_selector: String,
    /// `href` prefixes that are left to the browser
    pub external_prefixes: Vec<String>,
    /// Buttons that submit their enclosing form on click
    pub submit_button_selector: String,
    /// `id` of the theme toggle button
    pub theme_toggle_id: String,
    pub alert: AlertTimings,
}

impl Default for SpaConfig {
    fn default() -> Self {
        Self {
            content_selector: "main".into(),
            external_prefixes: vec!["http".into(), "mailto:".into(), "#".into()],
            submit_button_selector: ".button-enviar".into(),
            theme_toggle_id: "mode-toggle".into(),
            alert: AlertTimings::default(),
        }
    }
}

impl SpaConfig {
    /// Parse and validate a JSON configuration. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check selectors and timings
    pub fn validate(&self) -> Result<(), ConfigError> {
        SelectorList::parse(&self.content_selector)?;
        SelectorList::parse(&self.submit_button_selector)?;

        let AlertTimings { show_after_ms: show, hide_after_ms: hide, remove_after_ms: remove } = self.alert;
        if !(show <= hide && hide <= remove) {
            return Err(ConfigError::AlertTimings { show, hide, remove });
        }
        Ok(())
    }

    /// Content container selector, parsed
    pub fn content_matcher(&self) -> Result<SelectorList, ConfigError> {
        Ok(SelectorList::parse(&self.content_selector)?)
    }
}
