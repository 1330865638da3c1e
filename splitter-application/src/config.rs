use crate::error::ConfigError;
use splitter_domain::SplitDefault;

pub const SPLIT_DEFAULT_VAR: &str = "SPLITTER_SPLIT_DEFAULT";
pub const CURRENCY_SYMBOL_VAR: &str = "SPLITTER_CURRENCY_SYMBOL";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub split_default: SplitDefault,
    pub currency_symbol: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            split_default: SplitDefault::default(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl EngineConfig {
    /// Reads the process environment. Unset or blank variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = non_blank(lookup(SPLIT_DEFAULT_VAR)) {
            config.split_default = raw.parse().map_err(|reason| ConfigError::InvalidValue {
                var: SPLIT_DEFAULT_VAR,
                reason,
            })?;
        }
        if let Some(symbol) = non_blank(lookup(CURRENCY_SYMBOL_VAR)) {
            config.currency_symbol = symbol;
        }

        tracing::debug!(
            split_default = ?config.split_default,
            currency_symbol = %config.currency_symbol,
            "Loaded engine configuration"
        );
        Ok(config)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
