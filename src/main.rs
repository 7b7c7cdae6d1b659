use clap::Parser;
use funpay_hunter::config::Config;
use funpay_hunter::fetcher::HttpFetcher;
use funpay_hunter::funpay::{ItemExtractor, StructuralProber};
use funpay_hunter::hunter::Hunter;
use funpay_hunter::web::{build_app, AppState};
use funpay_hunter::HunterError;
use std::sync::Arc;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,funpay_hunter=debug,html5ever=error,selectors=error,hyper=warn,reqwest=info"
                    .into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let config = Config::parse();
    let extractor_config = config.load_extractor_config().map_err(HunterError::from)?;

    let fetcher = HttpFetcher::new(config.fetch_timeout(), config.preview_timeout())
        .map_err(HunterError::from)?;
    let hunter = Hunter::new(
        Arc::new(fetcher),
        ItemExtractor::new(&extractor_config).map_err(HunterError::from)?,
        StructuralProber::new(&extractor_config).map_err(HunterError::from)?,
        &config.target_url,
    );
    info!("Target: {}", hunter.target_url());
    info!("Notifications configured: {}", config.notifications_configured());

    let app = build_app(AppState::new(hunter));

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(HunterError::from)?;
    axum::serve(listener, app).await.map_err(HunterError::from)?;

    Ok(())
}
