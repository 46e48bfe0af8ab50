//! Engine-wide configuration

use serde::{Deserialize, Serialize};

use crate::foundation::ConfigError;
use crate::rules::CascadeMode;

/// Defaults shared by the rule sets and engine built with it.
///
/// ```
/// use cascade_validator::config::ValidatorConfig;
/// use cascade_validator::rules::CascadeMode;
///
/// let config = ValidatorConfig::from_json(r#"{ "default_cascade": "continue_all" }"#).unwrap();
/// assert_eq!(config.default_cascade, CascadeMode::ContinueAll);
/// assert!(!config.parallel_chains);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Cascade policy for chains that do not set their own.
    pub default_cascade: CascadeMode,
    /// Run chains concurrently. Has no effect without the `parallel`
    /// feature.
    pub parallel_chains: bool,
}

impl ValidatorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default cascade policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_default_cascade(mut self, mode: CascadeMode) -> Self {
        self.default_cascade = mode;
        self
    }

    /// Enables or disables concurrent chain execution.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_parallel_chains(mut self, enabled: bool) -> Self {
        self.parallel_chains = enabled;
        self
    }

    /// Parses a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidConfig(e.to_string()))
    }
}
