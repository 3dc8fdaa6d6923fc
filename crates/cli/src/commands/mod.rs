pub mod compare;
pub mod config;
pub mod doctor;
pub mod login;
pub mod order;
pub mod recommend;
pub mod search;

use std::path::PathBuf;

use anyhow::{bail, Context};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::Value;
use smartshop_core::cart::Cart;
use smartshop_core::catalog::{Catalog, Dataset};
use smartshop_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use smartshop_core::domain::cart::CartLineItem;
use smartshop_core::domain::product::ProductId;
use smartshop_core::errors::{ApplicationError, DomainError, InterfaceError};
use smartshop_core::fixtures;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_DATASET: u8 = 3;
pub const EXIT_BAD_REQUEST: u8 = 4;
pub const EXIT_UNAUTHORIZED: u8 = 5;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    data: Option<Value>,
}

impl CommandResult {
    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: impl Serialize,
    ) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(Value::Null) => None,
            Ok(value) => Some(value),
            Err(error) => {
                return Self::failure(command, "serialization", error.to_string(), EXIT_DATASET)
            }
        };
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Maps a core failure onto the envelope through the interface error layer.
    pub fn from_application_error(command: &str, error: ApplicationError) -> Self {
        let is_configuration = matches!(error, ApplicationError::Configuration(_));
        let correlation_id = uuid::Uuid::new_v4().to_string();
        let interface = error.into_interface(correlation_id.as_str());
        let (error_class, exit_code) = match &interface {
            InterfaceError::BadRequest { .. } => ("bad_request", EXIT_BAD_REQUEST),
            InterfaceError::Unauthorized { .. } => ("unauthorized", EXIT_UNAUTHORIZED),
            InterfaceError::Internal { .. } if is_configuration => {
                ("config_validation", EXIT_CONFIG)
            }
            InterfaceError::Internal { .. } => ("dataset", EXIT_DATASET),
        };

        tracing::debug!(
            event_name = "cli.command.failed",
            command,
            error_class,
            correlation_id = %correlation_id,
            "command failed"
        );

        Self::failure(
            command,
            error_class,
            format!("{interface} (correlation id {correlation_id})"),
            exit_code,
        )
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\",\"data\":null}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub config_path: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            require_file: self.config_path.is_some(),
            config_path: self.config_path.clone(),
            overrides: ConfigOverrides {
                catalog_path: self.catalog.clone(),
                ..ConfigOverrides::default()
            },
        }
    }
}

/// Effective configuration plus the dataset it points at.
#[derive(Debug)]
pub struct Runtime {
    pub config: AppConfig,
    pub dataset: Dataset,
}

impl Runtime {
    pub fn load(command: &str, globals: &GlobalArgs) -> Result<Self, CommandResult> {
        let config = AppConfig::load(globals.load_options()).map_err(|error| {
            CommandResult::failure(command, "config_validation", error.to_string(), EXIT_CONFIG)
        })?;

        let dataset = match &config.catalog.path {
            Some(path) => Dataset::load(path).map_err(|error| {
                CommandResult::from_application_error(command, ApplicationError::from(error))
            })?,
            None => fixtures::demo_dataset(),
        };

        Ok(Self { config, dataset })
    }

    pub fn catalog(&self) -> Catalog {
        self.dataset.catalog()
    }

    pub fn rng(&self, seed: Option<u64>) -> StdRng {
        match seed.or(self.config.recommendations.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Parses `ID` or `ID:QTY`.
pub fn parse_item(raw: &str) -> anyhow::Result<(ProductId, u32)> {
    let (id, quantity) = match raw.rsplit_once(':') {
        Some((id, quantity)) => {
            let quantity = quantity
                .trim()
                .parse::<u32>()
                .with_context(|| format!("invalid quantity in item `{raw}`"))?;
            (id.trim(), quantity)
        }
        None => (raw.trim(), 1),
    };

    if id.is_empty() {
        bail!("item `{raw}` is missing a product id");
    }
    if quantity == 0 {
        bail!("item `{raw}` must have a quantity of at least 1");
    }

    Ok((ProductId(id.to_string()), quantity))
}

/// Builds a cart from `--item` arguments against the catalog.
pub fn build_cart(catalog: &Catalog, items: &[String]) -> Result<Cart, ApplicationError> {
    let mut lines = Vec::with_capacity(items.len());
    for raw in items {
        let (product_id, quantity) = parse_item(raw).map_err(|error| {
            ApplicationError::from(DomainError::invalid_argument("item", format!("{error:#}")))
        })?;
        let product = catalog
            .find(&product_id)
            .ok_or_else(|| DomainError::UnknownProduct(product_id.0.clone()))?;

        lines.push(CartLineItem { product: product.clone(), quantity });
    }
    Ok(lines.into_iter().collect())
}
