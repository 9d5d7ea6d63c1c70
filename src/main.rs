use billing::config::ServiceConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "billing=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("billing-api starting");

    // Load configuration; defaults apply when no file is given
    let config = match std::env::var("BILLING_CONFIG") {
        Ok(path) => ServiceConfig::from_yaml_file(&path)?,
        Err(_) => ServiceConfig::default_config(),
    };

    tracing::info!(
        bind_address = %config.bind_addr,
        blocked_domains = config.blocked_email_domains.len(),
        "Configuration loaded"
    );

    billing::server::serve(config).await
}
