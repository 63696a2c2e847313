//! Red-flagged contracts listed on the dashboard.
//!
//! The catalog is read once at startup from a JSON seed. Each entry is the
//! source of the [`ContractContext`] imported into a draft when its card is
//! selected.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::report::ContractContext;

const BUNDLED_SEED: &str = include_str!("../data/seed/contracts.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedFlagContract {
    pub contract_id: String,
    pub entity: String,
    /// Display string, kept as written in the source data.
    pub amount: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub flags: Vec<String>,
}

impl RedFlagContract {
    pub fn context(&self) -> ContractContext {
        ContractContext {
            contract_id: self.contract_id.clone(),
            entity: self.entity.clone(),
            amount: self.amount.clone(),
        }
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "Failed to read contracts seed: {e}"),
            CatalogError::Json(e) => write!(f, "Bad contracts seed JSON: {e}"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Json(e)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    contracts: Vec<RedFlagContract>,
}

impl Catalog {
    pub fn new(contracts: Vec<RedFlagContract>) -> Self {
        Self { contracts }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let contracts: Vec<RedFlagContract> = serde_json::from_str(json)?;
        Ok(Self::new(contracts))
    }

    /// The seed compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_SEED)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `CONTRACTS_SEED` when configured, else the bundled seed.
    pub fn load(config: &AppConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.contracts_seed {
            Some(path) => {
                log::info!("Loading contracts seed from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::bundled()?,
        };
        log::info!("Catalog ready: {} red-flag contract(s)", catalog.len());
        Ok(catalog)
    }

    pub fn all(&self) -> &[RedFlagContract] {
        &self.contracts
    }

    pub fn find(&self, contract_id: &str) -> Option<&RedFlagContract> {
        self.contracts.iter().find(|c| c.contract_id == contract_id)
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
