pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use toml_config::RelayConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "form-relay")]
#[command(about = "Relays contact form submissions to a chat webhook")]
pub struct CliConfig {
    #[arg(long, short, env = "FORM_RELAY_CONFIG", help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "FORM_RELAY_WEBHOOK_URL", hide_env_values = true)]
    pub webhook_url: Option<String>,

    #[arg(long, env = "FORM_RELAY_BIND")]
    pub bind: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 載入設定檔（若有），再以 CLI / 環境變數覆蓋，最後驗證
    pub fn load(&self) -> Result<RelayConfig> {
        let base = match &self.config {
            Some(path) => {
                tracing::debug!("Loading config file: {}", path.display());
                RelayConfig::from_file(path)?
            }
            None => RelayConfig::default(),
        };

        let config = self.apply(base);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&self, mut config: RelayConfig) -> RelayConfig {
        if let Some(url) = &self.webhook_url {
            config.sink.webhook_url = Some(url.clone());
        }
        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(webhook_url: Option<&str>, bind: Option<&str>) -> CliConfig {
        CliConfig {
            config: None,
            webhook_url: webhook_url.map(str::to_string),
            bind: bind.map(str::to_string),
            verbose: false,
            json_logs: false,
        }
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let file = RelayConfig::from_toml_str(
            r#"
[server]
bind = "127.0.0.1:1234"

[sink]
webhook_url = "https://hooks.example.com/from-file"
"#,
        )
        .unwrap();

        let merged = cli(Some("https://hooks.example.com/from-cli"), None).apply(file);
        assert_eq!(
            merged.sink.webhook_url.as_deref(),
            Some("https://hooks.example.com/from-cli")
        );
        assert_eq!(merged.server.bind, "127.0.0.1:1234");
    }

    #[test]
    fn test_load_without_file() {
        let config = cli(Some("https://hooks.example.com/x"), Some("127.0.0.1:0"))
            .load()
            .unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:0");
    }

    #[test]
    fn test_load_requires_webhook() {
        assert!(cli(None, None).load().is_err());
    }
}
