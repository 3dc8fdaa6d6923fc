use std::env;
use std::fs;
use std::path::Path;

use serde::Serialize;
use smartshop_core::config::{resolve_config_path, AppConfig};
use toml::Value;

use super::{CommandResult, GlobalArgs, EXIT_CONFIG};

const COMMAND: &str = "config";

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

pub fn run(globals: &GlobalArgs) -> CommandResult {
    let config = match AppConfig::load(globals.load_options()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                COMMAND,
                "config_validation",
                format!("config validation failed: {error}"),
                EXIT_CONFIG,
            )
        }
    };

    let config_file_path = resolve_config_path(globals.config_path.as_deref());
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let sources =
        SourceResolver { doc: config_file_doc.as_ref(), path: config_file_path.as_deref() };

    let catalog_source = if globals.catalog.is_some() {
        "flag (--catalog)".to_string()
    } else {
        sources.field_source("catalog.path", "SMARTSHOP_CATALOG_PATH")
    };
    let entries = vec![
        ConfigEntry {
            key: "catalog.path",
            value: config
                .catalog
                .path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "<built-in demo dataset>".to_string()),
            source: catalog_source,
        },
        ConfigEntry {
            key: "search.history_limit",
            value: config.search.history_limit.to_string(),
            source: sources.field_source("search.history_limit", "SMARTSHOP_SEARCH_HISTORY_LIMIT"),
        },
        ConfigEntry {
            key: "search.default_sort",
            value: config.search.default_sort.to_string(),
            source: sources.field_source("search.default_sort", "SMARTSHOP_SEARCH_DEFAULT_SORT"),
        },
        ConfigEntry {
            key: "recommendations.max_count",
            value: config.recommendations.max_count.to_string(),
            source: sources
                .field_source("recommendations.max_count", "SMARTSHOP_RECOMMENDATIONS_MAX_COUNT"),
        },
        ConfigEntry {
            key: "recommendations.seed",
            value: config
                .recommendations
                .seed
                .map(|seed| seed.to_string())
                .unwrap_or_else(|| "<unset>".to_string()),
            source: sources.field_source("recommendations.seed", "SMARTSHOP_RECOMMENDATIONS_SEED"),
        },
        ConfigEntry {
            key: "checkout.currency",
            value: config.checkout.currency.clone(),
            source: sources.field_source("checkout.currency", "SMARTSHOP_CHECKOUT_CURRENCY"),
        },
        ConfigEntry {
            key: "logging.level",
            value: config.logging.level.clone(),
            source: sources.field_source("logging.level", "SMARTSHOP_LOGGING_LEVEL"),
        },
        ConfigEntry {
            key: "logging.format",
            value: config.logging.format.as_str().to_string(),
            source: sources.field_source("logging.format", "SMARTSHOP_LOGGING_FORMAT"),
        },
    ];

    let mut lines =
        vec!["effective config (source precedence: flag > env > file > default):".to_string()];
    lines.extend(entries.iter().map(render_line));

    CommandResult::success_with_data(COMMAND, lines.join("\n"), entries)
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

struct SourceResolver<'a> {
    doc: Option<&'a Value>,
    path: Option<&'a Path>,
}

impl SourceResolver<'_> {
    fn field_source(&self, key_path: &str, env_key: &str) -> String {
        if env::var(env_key).is_ok_and(|value| !value.trim().is_empty()) {
            return format!("env ({env_key})");
        }

        if let Some(doc) = self.doc {
            if contains_path(doc, key_path) {
                let file_path = self
                    .path
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "config file".to_string());
                return format!("file ({file_path})");
            }
        }

        "default".to_string()
    }
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(entry: &ConfigEntry) -> String {
    format!("- {} = {} (source: {})", entry.key, entry.value, entry.source)
}
