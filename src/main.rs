use clap::Parser;
use form_relay::adapters::http;
use form_relay::utils::logger;
use form_relay::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting form-relay");

    // 載入並驗證配置
    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    tracing::debug!(
        "Relaying fields {:?} (honeypot: {})",
        config.form.fields,
        config.form.honeypot_field
    );

    http::serve(config).await?;
    Ok(())
}
