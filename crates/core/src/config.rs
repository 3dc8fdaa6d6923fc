use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recommend::DEFAULT_MAX_RECOMMENDATIONS;
use crate::search::{SortBy, DEFAULT_HISTORY_LIMIT};

pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["smartshop.toml", "config/smartshop.toml"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub search: SearchConfig,
    pub recommendations: RecommendationConfig,
    pub checkout: CheckoutConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Dataset file; the built-in demo dataset is used when unset.
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub history_limit: usize,
    pub default_sort: SortBy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecommendationConfig {
    pub max_count: usize,
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutConfig {
    pub currency: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub catalog_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub max_recommendations: Option<usize>,
    pub recommendation_seed: Option<u64>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            search: SearchConfig {
                history_limit: DEFAULT_HISTORY_LIMIT,
                default_sort: SortBy::Relevance,
            },
            recommendations: RecommendationConfig {
                max_count: DEFAULT_MAX_RECOMMENDATIONS,
                seed: None,
            },
            checkout: CheckoutConfig { currency: "SEK".to_string() },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILES[0]));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(catalog) = patch.catalog {
            if let Some(path) = catalog.path {
                self.catalog.path = Some(path);
            }
        }

        if let Some(search) = patch.search {
            if let Some(history_limit) = search.history_limit {
                self.search.history_limit = history_limit;
            }
            if let Some(default_sort) = search.default_sort {
                self.search.default_sort = default_sort;
            }
        }

        if let Some(recommendations) = patch.recommendations {
            if let Some(max_count) = recommendations.max_count {
                self.recommendations.max_count = max_count;
            }
            if let Some(seed) = recommendations.seed {
                self.recommendations.seed = Some(seed);
            }
        }

        if let Some(checkout) = patch.checkout {
            if let Some(currency) = checkout.currency {
                self.checkout.currency = currency;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("SMARTSHOP_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(value));
        }

        if let Some(value) = read_env("SMARTSHOP_SEARCH_HISTORY_LIMIT") {
            self.search.history_limit = parse_usize("SMARTSHOP_SEARCH_HISTORY_LIMIT", &value)?;
        }
        if let Some(value) = read_env("SMARTSHOP_SEARCH_DEFAULT_SORT") {
            self.search.default_sort =
                value.parse().map_err(|_| ConfigError::InvalidEnvOverride {
                    key: "SMARTSHOP_SEARCH_DEFAULT_SORT".to_string(),
                    value: value.clone(),
                })?;
        }

        if let Some(value) = read_env("SMARTSHOP_RECOMMENDATIONS_MAX_COUNT") {
            self.recommendations.max_count =
                parse_usize("SMARTSHOP_RECOMMENDATIONS_MAX_COUNT", &value)?;
        }
        if let Some(value) = read_env("SMARTSHOP_RECOMMENDATIONS_SEED") {
            self.recommendations.seed = Some(parse_u64("SMARTSHOP_RECOMMENDATIONS_SEED", &value)?);
        }

        if let Some(value) = read_env("SMARTSHOP_CHECKOUT_CURRENCY") {
            self.checkout.currency = value;
        }

        let log_level =
            read_env("SMARTSHOP_LOGGING_LEVEL").or_else(|| read_env("SMARTSHOP_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("SMARTSHOP_LOGGING_FORMAT").or_else(|| read_env("SMARTSHOP_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(catalog_path) = overrides.catalog_path {
            self.catalog.path = Some(catalog_path);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
        if let Some(max_recommendations) = overrides.max_recommendations {
            self.recommendations.max_count = max_recommendations;
        }
        if let Some(seed) = overrides.recommendation_seed {
            self.recommendations.seed = Some(seed);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_catalog(&self.catalog)?;
        validate_search(&self.search)?;
        validate_recommendations(&self.recommendations)?;
        validate_checkout(&self.checkout)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

/// The explicit path if it exists, otherwise the first default location found.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    DEFAULT_CONFIG_FILES.into_iter().map(PathBuf::from).find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    let Some(path) = &catalog.path else {
        return Ok(());
    };

    let extension = path.extension().and_then(|extension| extension.to_str());
    match extension.map(str::to_ascii_lowercase).as_deref() {
        Some("toml") | Some("json") => Ok(()),
        _ => Err(ConfigError::Validation(format!(
            "catalog.path `{}` must point to a .toml or .json dataset",
            path.display()
        ))),
    }
}

fn validate_search(search: &SearchConfig) -> Result<(), ConfigError> {
    if search.history_limit == 0 || search.history_limit > 100 {
        return Err(ConfigError::Validation(
            "search.history_limit must be in range 1..=100".to_string(),
        ));
    }

    Ok(())
}

fn validate_recommendations(recommendations: &RecommendationConfig) -> Result<(), ConfigError> {
    if recommendations.max_count == 0 || recommendations.max_count > 50 {
        return Err(ConfigError::Validation(
            "recommendations.max_count must be in range 1..=50".to_string(),
        ));
    }

    Ok(())
}

fn validate_checkout(checkout: &CheckoutConfig) -> Result<(), ConfigError> {
    let currency = checkout.currency.trim();
    if currency.len() != 3 || !currency.chars().all(|ch| ch.is_ascii_uppercase()) {
        return Err(ConfigError::Validation(
            "checkout.currency must be a three-letter uppercase code such as `SEK`".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    catalog: Option<CatalogPatch>,
    search: Option<SearchPatch>,
    recommendations: Option<RecommendationPatch>,
    checkout: Option<CheckoutPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchPatch {
    history_limit: Option<usize>,
    default_sort: Option<SortBy>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendationPatch {
    max_count: Option<usize>,
    seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct CheckoutPatch {
    currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
    use crate::search::SortBy;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_are_valid() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let config = AppConfig::load(LoadOptions::default())
            .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.catalog.path.is_none(), "no dataset path by default")?;
        ensure(config.search.history_limit == 10, "history limit should default to 10")?;
        ensure(config.search.default_sort == SortBy::Relevance, "relevance sort by default")?;
        ensure(config.recommendations.max_count == 4, "four recommendations by default")?;
        ensure(config.checkout.currency == "SEK", "currency should default to SEK")?;
        ensure(
            matches!(config.logging.format, LogFormat::Compact),
            "default logging format should be compact",
        )
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_SMARTSHOP_DATA_DIR", "/srv/smartshop");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("smartshop.toml");
            fs::write(
                &path,
                r#"
[catalog]
path = "${TEST_SMARTSHOP_DATA_DIR}/catalog.toml"

[search]
default_sort = "price_asc"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.catalog.path == Some(PathBuf::from("/srv/smartshop/catalog.toml")),
                "catalog path should be interpolated from environment",
            )?;
            ensure(
                config.search.default_sort == SortBy::PriceAsc,
                "default sort should be read from file",
            )
        })();

        clear_vars(&["TEST_SMARTSHOP_DATA_DIR"]);
        result
    }

    #[test]
    fn missing_interpolation_variable_is_reported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("smartshop.toml");
        fs::write(&path, "[checkout]\ncurrency = \"${TEST_SMARTSHOP_UNSET_CURRENCY}\"\n")
            .map_err(|err| err.to_string())?;

        let error = match AppConfig::load(LoadOptions {
            config_path: Some(path),
            ..LoadOptions::default()
        }) {
            Ok(_) => return Err("expected interpolation failure".to_string()),
            Err(error) => error,
        };
        ensure(
            matches!(error, ConfigError::MissingEnvInterpolation { ref var } if var == "TEST_SMARTSHOP_UNSET_CURRENCY"),
            "missing variable should be named in the error",
        )
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("SMARTSHOP_LOG_LEVEL", "warn");
        env::set_var("SMARTSHOP_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )
        })();

        clear_vars(&["SMARTSHOP_LOG_LEVEL", "SMARTSHOP_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("SMARTSHOP_RECOMMENDATIONS_MAX_COUNT", "8");
        env::set_var("SMARTSHOP_CHECKOUT_CURRENCY", "EUR");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("smartshop.toml");
            fs::write(
                &path,
                r#"
[catalog]
path = "from-file.toml"

[recommendations]
max_count = 6
seed = 11

[checkout]
currency = "NOK"

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    catalog_path: Some(PathBuf::from("from-override.json")),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.catalog.path == Some(PathBuf::from("from-override.json")),
                "override catalog path should win",
            )?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(config.recommendations.max_count == 8, "env max count should win over file")?;
            ensure(config.recommendations.seed == Some(11), "file seed should be kept")?;
            ensure(config.checkout.currency == "EUR", "env currency should win over file")
        })();

        clear_vars(&["SMARTSHOP_RECOMMENDATIONS_MAX_COUNT", "SMARTSHOP_CHECKOUT_CURRENCY"]);
        result
    }

    #[test]
    fn invalid_env_override_is_reported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("SMARTSHOP_SEARCH_HISTORY_LIMIT", "lots");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => return Err("expected env override failure".to_string()),
                Err(error) => error,
            };
            ensure(
                matches!(error, ConfigError::InvalidEnvOverride { ref key, .. } if key == "SMARTSHOP_SEARCH_HISTORY_LIMIT"),
                "invalid override should name the variable",
            )
        })();

        clear_vars(&["SMARTSHOP_SEARCH_HISTORY_LIMIT"]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("SMARTSHOP_RECOMMENDATIONS_MAX_COUNT", "0");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("recommendations.max_count")
            );
            ensure(has_message, "validation failure should mention recommendations.max_count")
        })();

        clear_vars(&["SMARTSHOP_RECOMMENDATIONS_MAX_COUNT"]);
        result
    }

    #[test]
    fn required_file_must_exist() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let missing = dir.path().join("absent.toml");
        let result = AppConfig::load(LoadOptions {
            config_path: Some(missing),
            require_file: true,
            ..LoadOptions::default()
        });

        ensure(
            matches!(result, Err(ConfigError::MissingConfigFile(_))),
            "missing required file should fail",
        )
    }

    #[test]
    fn lowercase_currency_is_rejected() {
        let mut config = AppConfig::default();
        config.checkout.currency = "sek".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}
