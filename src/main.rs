//! Vendor Match server binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vendor_match::adapters::ai::{OpenAIConfig, OpenAIProvider};
use vendor_match::adapters::http::{app_router, HealthInfo, SearchHandlers};
use vendor_match::adapters::postgres::{PostgresSearchSessionLog, PostgresVendorCatalog};
use vendor_match::application::{ContinueDialogueHandler, FindMatchesHandler, SessionRecorder};
use vendor_match::config::{AiConfig, AppConfig};
use vendor_match::ports::AIProvider;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// `None` when no key is configured; search requests then fail per call.
fn build_ai_provider(config: &AiConfig) -> Result<Option<Arc<dyn AIProvider>>, BoxError> {
    let Some(api_key) = config.api_key() else {
        tracing::warn!("OPENAI_API_KEY not configured; search requests will fail");
        return Ok(None);
    };

    let provider = OpenAIProvider::new(
        OpenAIConfig::new(api_key)
            .with_model(&config.model)
            .with_base_url(&config.base_url)
            .with_timeout(config.timeout())
            .with_max_retries(config.max_retries),
    )?;

    let info = provider.provider_info();
    tracing::info!(provider = %info.name, model = %info.model, "Completion service ready");
    Ok(Some(Arc::new(provider)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let pool = config.database.connect().await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied");
    }

    let ai_provider = build_ai_provider(&config.ai)?;
    let recorder = SessionRecorder::new(Arc::new(PostgresSearchSessionLog::new(pool.clone())))
        .with_timeout(config.search.session_log_timeout());

    let search = SearchHandlers::new(
        Arc::new(ContinueDialogueHandler::new(ai_provider.clone())),
        Arc::new(FindMatchesHandler::new(
            ai_provider.clone(),
            Arc::new(PostgresVendorCatalog::new(pool)),
            recorder,
        )),
    );

    let app = app_router(
        search,
        HealthInfo {
            completion_service_configured: ai_provider.is_some(),
        },
        config.server.request_timeout(),
        &config.server.cors_origins_list(),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Vendor Match listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
