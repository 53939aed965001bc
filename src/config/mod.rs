//! Configuration loading.
//!
//! Settings live in a TOML file under the platform config directory; every
//! field has a default so a missing file or section is valid.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ApiConfig, Config, DisplayConfig};
