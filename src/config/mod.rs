#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CartCommand, CliConfig};
pub use toml_config::TomlConfig;

pub const DEFAULT_API_ENDPOINT: &str = "http://localhost:3333";
pub const DEFAULT_STORAGE_PATH: &str = "./.cart";
pub const DEFAULT_CART_KEY: &str = "rocketshoes-cart";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
