use std::env;
use std::fmt;

use tracing::debug;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TAVILY_BASE_URL: &str = "https://api.tavily.com";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Only the first search result feeds the prompt.
const DEFAULT_MAX_RESULTS: u8 = 1;
const ENV_FILE: &str = ".env";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not set. Add it to the environment or to .env")]
    MissingVar(&'static str),

    #[error("invalid {var}: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid {var}: must be an HTTP(S) URL")]
    InvalidScheme { var: &'static str },

    #[error("failed to load .env: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

/// Secret value whose `Debug` output never shows the key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_key: ApiKey,
    pub base_url: String,
    pub max_results: u8,
}

#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_key: ApiKey,
    pub base_url: String,
    pub model: String,
}

/// Settings for both providers, resolved once at startup.
///
/// Environment variables:
/// - `TAVILY_API_KEY`: search provider key (required)
/// - `OPENAI_API_KEY`: completion provider key (required)
/// - `OPENAI_MODEL`: chat model (default `gpt-3.5-turbo`)
/// - `OPENAI_BASE_URL`, `TAVILY_BASE_URL`: endpoint overrides
#[derive(Debug, Clone)]
pub struct Config {
    pub search: SearchConfig,
    pub completion: CompletionConfig,
}

impl Config {
    /// Load `.env` (overriding already-set variables), then read the process environment.
    /// A missing `.env` file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::from_filename_override(ENV_FILE) {
            Ok(path) => debug!(path = %path.display(), "loaded env file"),
            Err(e) if e.not_found() => debug!("no {ENV_FILE} file, using process environment"),
            Err(e) => return Err(e.into()),
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let tavily_key =
            non_empty("TAVILY_API_KEY").ok_or(ConfigError::MissingVar("TAVILY_API_KEY"))?;
        let openai_key =
            non_empty("OPENAI_API_KEY").ok_or(ConfigError::MissingVar("OPENAI_API_KEY"))?;

        let tavily_base = base_url(
            "TAVILY_BASE_URL",
            non_empty("TAVILY_BASE_URL").as_deref(),
            DEFAULT_TAVILY_BASE_URL,
        )?;
        let openai_base = base_url(
            "OPENAI_BASE_URL",
            non_empty("OPENAI_BASE_URL").as_deref(),
            DEFAULT_OPENAI_BASE_URL,
        )?;

        let model = non_empty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            search: SearchConfig {
                api_key: ApiKey::new(tavily_key),
                base_url: tavily_base,
                max_results: DEFAULT_MAX_RESULTS,
            },
            completion: CompletionConfig {
                api_key: ApiKey::new(openai_key),
                base_url: openai_base,
                model,
            },
        })
    }
}

/// Validate an endpoint override and strip trailing slashes so paths can be appended.
fn base_url(var: &'static str, value: Option<&str>, default: &str) -> Result<String, ConfigError> {
    let raw = value.unwrap_or(default);
    let parsed = url::Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { var, source })?;
    match parsed.scheme() {
        "http" | "https" => {}
        _ => return Err(ConfigError::InvalidScheme { var }),
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const KEYS: [(&str, &str); 2] = [("TAVILY_API_KEY", "tvly-key"), ("OPENAI_API_KEY", "sk-key")];

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup(&KEYS)).unwrap();

        assert_eq!(config.search.api_key.expose(), "tvly-key");
        assert_eq!(config.search.base_url, "https://api.tavily.com");
        assert_eq!(config.search.max_results, 1);
        assert_eq!(config.completion.api_key.expose(), "sk-key");
        assert_eq!(config.completion.base_url, "https://api.openai.com/v1");
        assert_eq!(config.completion.model, "gpt-3.5-turbo");
    }

    #[test]
    fn missing_tavily_key_is_rejected() {
        let err = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-key")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("TAVILY_API_KEY")));
    }

    #[test]
    fn blank_openai_key_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[
            ("TAVILY_API_KEY", "tvly-key"),
            ("OPENAI_API_KEY", "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("OPENAI_API_KEY")));
        assert!(err.to_string().contains(".env"), "got: {err}");
    }

    #[test]
    fn overrides_are_trimmed_and_normalised() {
        let config = Config::from_lookup(lookup(&[
            KEYS[0],
            KEYS[1],
            ("OPENAI_MODEL", " gpt-4o-mini "),
            ("OPENAI_BASE_URL", "http://localhost:8080/v1/"),
            ("TAVILY_BASE_URL", "https://search.internal//"),
        ]))
        .unwrap();

        assert_eq!(config.completion.model, "gpt-4o-mini");
        assert_eq!(config.completion.base_url, "http://localhost:8080/v1");
        assert_eq!(config.search.base_url, "https://search.internal");
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            KEYS[0],
            KEYS[1],
            ("OPENAI_BASE_URL", "ftp://example.com"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidScheme {
                var: "OPENAI_BASE_URL"
            }
        ));
    }

    #[test]
    fn unparsable_base_url_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            KEYS[0],
            KEYS[1],
            ("TAVILY_BASE_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidUrl {
                var: "TAVILY_BASE_URL",
                ..
            }
        ));
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let config = Config::from_lookup(lookup(&KEYS)).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-key"));
        assert!(!debug.contains("tvly-key"));
        assert!(debug.contains("[REDACTED]"));
    }
}
