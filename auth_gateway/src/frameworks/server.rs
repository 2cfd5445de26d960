// Framework bootstrap for the auth gateway.

use crate::frameworks::config;
use crate::interface_adapters::clients::HostedAuthClient;
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::AppState;

use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener, state: AppState) -> Result<()> {
    let address = listener.local_addr()?;
    let app = app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let state = build_state()?;
    let address = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, state).await
}

pub fn build_state() -> Result<AppState> {
    let provider_url = config::auth_provider_url();
    let provider_timeout = config::auth_provider_timeout();
    let anon_key = config::auth_provider_anon_key();
    if anon_key.is_empty() {
        tracing::warn!("AUTH_PROVIDER_ANON_KEY is not set; provider calls will be rejected");
    }

    let client = HostedAuthClient::new(provider_url.clone(), anon_key, provider_timeout)
        .map_err(|e| std::io::Error::other(format!("failed to initialize auth client: {e}")))?;
    tracing::debug!(
        provider_url = %provider_url,
        provider_timeout_ms = provider_timeout.as_millis(),
        "auth provider client configured"
    );

    Ok(AppState::new(Arc::new(client), config::site_origin()))
}
