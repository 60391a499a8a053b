pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{http::router, webhook::WebhookSink};
pub use crate::config::{toml_config::RelayConfig, CliConfig};
pub use crate::core::relay::{FormRelay, RelayOutcome};
pub use crate::utils::error::{RelayError, Result};
