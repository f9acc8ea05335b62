use crate::config::toml_config::TomlConfig;
use crate::config::{
    DEFAULT_API_ENDPOINT, DEFAULT_CART_KEY, DEFAULT_STORAGE_PATH, DEFAULT_TIMEOUT_SECONDS,
};
use crate::core::ProductId;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cart")]
#[command(about = "Manage the storefront cart from the command line")]
pub struct CliConfig {
    #[arg(
        long,
        global = true,
        help = "Load settings from a TOML file; flags given alongside override its values"
    )]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Catalog base URL [default: http://localhost:3333]")]
    pub api_endpoint: Option<String>,

    #[arg(long, global = true, help = "Serve the catalog from a JSON fixture file")]
    pub fixture: Option<String>,

    #[arg(long, global = true, help = "Directory holding cart files [default: ./.cart]")]
    pub storage_path: Option<String>,

    #[arg(long, global = true, help = "Cart namespace [default: rocketshoes-cart]")]
    pub cart_key: Option<String>,

    #[arg(long, global = true, help = "Catalog request timeout [default: 10]")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Subcommand)]
pub enum CartCommand {
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Remove a product's line
    Remove { product_id: ProductId },
    /// Set the quantity of a product already in the cart
    SetAmount {
        product_id: ProductId,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Print the cart
    Show,
}

impl CliConfig {
    /// Every flag given explicitly replaces the matching TOML value. An explicit `--api-endpoint` also drops a TOML fixture,
    /// since a fixture would otherwise take precedence.
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(endpoint) = &self.api_endpoint {
            config.catalog.endpoint = Some(endpoint.clone());
            config.catalog.fixture = None;
            tracing::info!("🔧 Catalog endpoint overridden to: {}", endpoint);
        }
        if let Some(fixture) = &self.fixture {
            config.catalog.fixture = Some(fixture.clone());
            tracing::info!("🔧 Catalog fixture overridden to: {}", fixture);
        }
        if let Some(path) = &self.storage_path {
            config.storage.path = path.clone();
            tracing::info!("🔧 Storage path overridden to: {}", path);
        }
        if let Some(key) = &self.cart_key {
            config.storage.cart_key = Some(key.clone());
            tracing::info!("🔧 Cart key overridden to: {}", key);
        }
        if let Some(timeout) = self.timeout_seconds {
            config.catalog.timeout_seconds = Some(timeout);
            tracing::info!("🔧 Timeout overridden to: {}s", timeout);
        }
    }
}

impl ConfigProvider for CliConfig {
    fn catalog_endpoint(&self) -> Option<&str> {
        Some(self.api_endpoint.as_deref().unwrap_or(DEFAULT_API_ENDPOINT))
    }

    fn catalog_fixture(&self) -> Option<&str> {
        self.fixture.as_deref()
    }

    fn storage_path(&self) -> &str {
        self.storage_path.as_deref().unwrap_or(DEFAULT_STORAGE_PATH)
    }

    fn cart_key(&self) -> &str {
        self.cart_key.as_deref().unwrap_or(DEFAULT_CART_KEY)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.fixture {
            Some(fixture) => validation::validate_path("fixture", fixture)?,
            None => validation::validate_url(
                "api_endpoint",
                self.api_endpoint.as_deref().unwrap_or(DEFAULT_API_ENDPOINT),
            )?,
        }
        validation::validate_path("storage_path", self.storage_path())?;
        validation::validate_cart_key("cart_key", self.cart_key())?;
        validation::validate_positive_number(
            "timeout_seconds",
            self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            1,
        )?;
        Ok(())
    }
}
