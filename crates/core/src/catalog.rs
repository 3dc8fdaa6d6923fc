//! Injected reference data: the product catalog and retailer profiles.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::product::{Product, ProductId};
use crate::domain::retailer::RetailerProfile;
use crate::errors::{ApplicationError, DomainError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == product_id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub retailers: Vec<RetailerProfile>,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("could not read dataset file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse dataset file `{path}`: {message}")]
    ParseFile { path: PathBuf, message: String },
    #[error("unsupported dataset format for `{0}` (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("duplicate {kind} id `{id}` in dataset")]
    DuplicateId { kind: &'static str, id: String },
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

impl From<DatasetError> for ApplicationError {
    fn from(value: DatasetError) -> Self {
        match value {
            DatasetError::Invalid(error) => ApplicationError::Domain(error),
            other => ApplicationError::Catalog(other.to_string()),
        }
    }
}

impl Dataset {
    pub fn from_toml_str(raw: &str) -> Result<Self, DatasetError> {
        let dataset: Self = toml::from_str(raw).map_err(|error| DatasetError::ParseFile {
            path: PathBuf::from("<inline>"),
            message: error.to_string(),
        })?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Loads a `.toml` or `.json` dataset and validates it.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| DatasetError::ReadFile { path: path.to_path_buf(), source })?;

        let extension =
            path.extension().and_then(|extension| extension.to_str()).map(str::to_ascii_lowercase);
        let parsed: Result<Self, String> = match extension.as_deref() {
            Some("toml") => toml::from_str(&raw).map_err(|error| error.to_string()),
            Some("json") => serde_json::from_str(&raw).map_err(|error| error.to_string()),
            _ => return Err(DatasetError::UnsupportedFormat(path.to_path_buf())),
        };
        let dataset = parsed
            .map_err(|message| DatasetError::ParseFile { path: path.to_path_buf(), message })?;

        dataset.validate()?;
        Ok(dataset)
    }

    pub fn validate(&self) -> Result<(), DatasetError> {
        let mut product_ids = HashSet::new();
        for product in &self.products {
            product.validate()?;
            if !product_ids.insert(product.id.0.as_str()) {
                return Err(DatasetError::DuplicateId { kind: "product", id: product.id.0.clone() });
            }
        }

        let mut retailer_ids = HashSet::new();
        for retailer in &self.retailers {
            retailer.validate()?;
            if !retailer_ids.insert(retailer.id.0.as_str()) {
                return Err(DatasetError::DuplicateId {
                    kind: "retailer",
                    id: retailer.id.0.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.products.clone())
    }
}
