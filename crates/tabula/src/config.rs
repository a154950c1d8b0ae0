//! Provider configuration.
//!
//! ```
//! use tabula::config::ProviderConfig;
//!
//! let config = ProviderConfig::from_toml_str(r#"
//! full_reload_threshold = 50
//! emit_signals = true
//! "#).unwrap();
//! assert_eq!(config.threshold(), Some(50));
//! ```

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use tabula_core::{Error, Result};

/// Settings for a [`DataProvider`](crate::model::DataProvider).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// Escalate a section to a wholesale reload when its pending diff holds
    /// more than this many positions. `None` never escalates, and a zero
    /// threshold is rejected when parsing.
    pub full_reload_threshold: Option<NonZeroUsize>,
    /// Whether the provider emits its signals. When `false` the signals are
    /// blocked and flushes only return their batch.
    pub emit_signals: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            full_reload_threshold: None,
            emit_signals: true,
        }
    }
}

impl ProviderConfig {
    /// Parses a configuration from TOML text.
    ///
    /// Missing keys take their default values.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::config(e.to_string()))
    }

    /// Serializes the configuration to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Sets the full reload threshold.
    pub fn with_full_reload_threshold(mut self, threshold: NonZeroUsize) -> Self {
        self.full_reload_threshold = Some(threshold);
        self
    }

    /// The full reload threshold as a plain count.
    pub fn threshold(&self) -> Option<usize> {
        self.full_reload_threshold.map(NonZeroUsize::get)
    }

    /// Sets whether signals are emitted.
    pub fn with_signals(mut self, emit_signals: bool) -> Self {
        self.emit_signals = emit_signals;
        self
    }
}
