mod config;
mod errors;
mod extract;
mod llm_client;
mod models;
mod profile;
mod recommendation;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{ChatCompletionClient, Provider};
use crate::profile::supabase::SupabaseStore;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing Supabase credentials)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Compass API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM gateways
    let groq = ChatCompletionClient::new(
        Provider::Groq,
        config.groq_api_url.clone(),
        config.groq_api_key.clone(),
        config.groq_model.clone(),
        config.llm_timeout_secs,
    )?;
    if config.groq_api_key.is_none() {
        tracing::warn!("GROQ_API_KEY is not set; LLM endpoints will fail");
    }
    info!("Groq gateway initialized (model: {})", groq.model());

    let openai = ChatCompletionClient::new(
        Provider::OpenAi,
        config.openai_api_url.clone(),
        config.openai_api_key.clone(),
        config.openai_model.clone(),
        config.llm_timeout_secs,
    )?;
    info!("Legacy OpenAI gateway initialized (model: {})", openai.model());

    // Initialize Supabase
    let store = SupabaseStore::new(&config.supabase_url, config.supabase_anon_key.clone())?;
    info!("Supabase store initialized ({})", config.supabase_url);

    let state = AppState {
        llm: Arc::new(groq),
        legacy_llm: Arc::new(openai),
        store: Arc::new(store),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config)?);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
