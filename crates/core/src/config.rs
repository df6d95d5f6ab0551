//! Runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into services.
//! Request handling never reads process-wide environment variables, which keeps
//! behaviour consistent across worker threads and test harnesses.

use crate::constants::{
    DEFAULT_COMPLETIONS_URL, DEFAULT_DECK_TIMEOUT, DEFAULT_DECK_URL, DEFAULT_INTERPRET_TIMEOUT,
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_REST_ADDR,
};
use crate::error::ConfigError;
use std::time::Duration;

/// Bind address for the REST server.
pub const ENV_REST_ADDR: &str = "TAROT_REST_ADDR";
/// Card-data endpoint.
pub const ENV_DECK_URL: &str = "TAROT_DECK_URL";
pub const ENV_DECK_TIMEOUT_SECS: &str = "TAROT_DECK_TIMEOUT_SECS";
/// Text-completion endpoint.
pub const ENV_COMPLETIONS_URL: &str = "TAROT_COMPLETIONS_URL";
pub const ENV_MODEL: &str = "TAROT_MODEL";
pub const ENV_MAX_TOKENS: &str = "TAROT_MAX_TOKENS";
pub const ENV_INTERPRET_TIMEOUT_SECS: &str = "TAROT_INTERPRET_TIMEOUT_SECS";
/// Secret for the text-generation service.
pub const ENV_API_KEY: &str = "API_KEY";
/// When set, interpretations are replaced by a fixed sentinel and no completion call is made.
pub const ENV_TEST_MODE: &str = "TESTING";

/// Configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct TarotConfig {
    rest_addr: String,
    deck_url: String,
    deck_timeout: Duration,
    completions_url: String,
    model: String,
    max_tokens: u32,
    interpret_timeout: Duration,
    api_key: Option<String>,
    test_mode: bool,
}

impl TarotConfig {
    /// Create a configuration with default endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if no API key is given and test mode is off.
    pub fn new(api_key: Option<String>, test_mode: bool) -> Result<Self, ConfigError> {
        let api_key = non_empty(api_key);
        if api_key.is_none() && !test_mode {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(Self {
            rest_addr: DEFAULT_REST_ADDR.to_string(),
            deck_url: DEFAULT_DECK_URL.to_string(),
            deck_timeout: DEFAULT_DECK_TIMEOUT,
            completions_url: DEFAULT_COMPLETIONS_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            interpret_timeout: DEFAULT_INTERPRET_TIMEOUT,
            api_key,
            test_mode,
        })
    }

    /// Resolve configuration from a variable lookup, typically `std::env::var`.
    ///
    /// Unset or blank variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_empty(lookup(key));

        let test_mode = test_mode_from_env_value(get(ENV_TEST_MODE))?;
        let mut cfg = Self::new(get(ENV_API_KEY), test_mode)?;

        if let Some(addr) = get(ENV_REST_ADDR) {
            cfg.rest_addr = addr;
        }
        if let Some(url) = get(ENV_DECK_URL) {
            cfg.deck_url = url;
        }
        if let Some(url) = get(ENV_COMPLETIONS_URL) {
            cfg.completions_url = url;
        }
        if let Some(model) = get(ENV_MODEL) {
            cfg.model = model;
        }
        cfg.max_tokens = max_tokens_from_env_value(get(ENV_MAX_TOKENS))?;
        cfg.interpret_timeout = timeout_from_env_value(get(ENV_INTERPRET_TIMEOUT_SECS))?;
        cfg.deck_timeout = secs_from_env_value(
            ENV_DECK_TIMEOUT_SECS,
            get(ENV_DECK_TIMEOUT_SECS),
            DEFAULT_DECK_TIMEOUT,
        )?;

        Ok(cfg)
    }

    pub fn rest_addr(&self) -> &str {
        &self.rest_addr
    }

    pub fn deck_url(&self) -> &str {
        &self.deck_url
    }

    pub fn deck_timeout(&self) -> Duration {
        self.deck_timeout
    }

    pub fn completions_url(&self) -> &str {
        &self.completions_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn interpret_timeout(&self) -> Duration {
        self.interpret_timeout
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn test_mode(&self) -> bool {
        self.test_mode
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the test-mode flag. `None` or blank means off.
pub fn test_mode_from_env_value(value: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = non_empty(value) else {
        return Ok(false);
    };

    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidInput(format!(
            "{ENV_TEST_MODE} must be a boolean, got '{value}'"
        ))),
    }
}

/// Parse the interpretation timeout in whole seconds. `None` or blank gives the default.
pub fn timeout_from_env_value(value: Option<String>) -> Result<Duration, ConfigError> {
    secs_from_env_value(ENV_INTERPRET_TIMEOUT_SECS, value, DEFAULT_INTERPRET_TIMEOUT)
}

fn secs_from_env_value(
    var: &str,
    value: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let Some(value) = non_empty(value) else {
        return Ok(default);
    };

    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidInput(format!(
            "{var} must be a positive number of seconds, got '{value}'"
        ))),
    }
}

/// Parse the completion token cap. `None` or blank gives the default.
pub fn max_tokens_from_env_value(value: Option<String>) -> Result<u32, ConfigError> {
    let Some(value) = non_empty(value) else {
        return Ok(DEFAULT_MAX_TOKENS);
    };

    match value.parse::<u32>() {
        Ok(tokens) if tokens > 0 => Ok(tokens),
        _ => Err(ConfigError::InvalidInput(format!(
            "{ENV_MAX_TOKENS} must be a positive integer, got '{value}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = TarotConfig::from_lookup(lookup(&[(ENV_API_KEY, "sk-test")])).unwrap();

        assert_eq!(cfg.rest_addr(), DEFAULT_REST_ADDR);
        assert_eq!(cfg.deck_url(), DEFAULT_DECK_URL);
        assert_eq!(cfg.completions_url(), DEFAULT_COMPLETIONS_URL);
        assert_eq!(cfg.model(), DEFAULT_MODEL);
        assert_eq!(cfg.max_tokens(), DEFAULT_MAX_TOKENS);
        assert_eq!(cfg.interpret_timeout(), DEFAULT_INTERPRET_TIMEOUT);
        assert_eq!(cfg.deck_timeout(), DEFAULT_DECK_TIMEOUT);
        assert_eq!(cfg.api_key(), Some("sk-test"));
        assert!(!cfg.test_mode());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = TarotConfig::from_lookup(lookup(&[
            (ENV_TEST_MODE, "True"),
            (ENV_REST_ADDR, "127.0.0.1:8080"),
            (ENV_DECK_URL, "http://deck.local/cards"),
            (ENV_COMPLETIONS_URL, "http://llm.local/v1/completions"),
            (ENV_MODEL, "tiny"),
            (ENV_MAX_TOKENS, "200"),
            (ENV_INTERPRET_TIMEOUT_SECS, "5"),
            (ENV_DECK_TIMEOUT_SECS, "3"),
        ]))
        .unwrap();

        assert!(cfg.test_mode());
        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.rest_addr(), "127.0.0.1:8080");
        assert_eq!(cfg.deck_url(), "http://deck.local/cards");
        assert_eq!(cfg.completions_url(), "http://llm.local/v1/completions");
        assert_eq!(cfg.model(), "tiny");
        assert_eq!(cfg.max_tokens(), 200);
        assert_eq!(cfg.interpret_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.deck_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn api_key_is_required_outside_test_mode() {
        let err = TarotConfig::from_lookup(lookup(&[(ENV_API_KEY, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn test_mode_flag_parsing() {
        assert!(!test_mode_from_env_value(None).unwrap());
        assert!(!test_mode_from_env_value(Some("".into())).unwrap());
        assert!(test_mode_from_env_value(Some("True".into())).unwrap());
        assert!(test_mode_from_env_value(Some("1".into())).unwrap());
        assert!(!test_mode_from_env_value(Some("false".into())).unwrap());
        assert!(test_mode_from_env_value(Some("maybe".into())).is_err());
    }

    #[test]
    fn numeric_values_must_be_positive() {
        assert!(timeout_from_env_value(Some("0".into())).is_err());
        assert!(timeout_from_env_value(Some("soon".into())).is_err());
        assert!(TarotConfig::from_lookup(lookup(&[
            (ENV_TEST_MODE, "true"),
            (ENV_DECK_TIMEOUT_SECS, "0"),
        ]))
        .is_err());
        assert!(max_tokens_from_env_value(Some("0".into())).is_err());
        assert!(max_tokens_from_env_value(Some("-3".into())).is_err());
        assert_eq!(max_tokens_from_env_value(Some(" 64 ".into())).unwrap(), 64);
    }
}
