//! HTTP layer.
//!
//! Builds the axum router over the shared [`AppState`] and runs the server
//! with graceful shutdown.

pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use chrono::FixedOffset;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::bible::VerseSource;
use crate::config::Config;
use crate::database::Stores;
use crate::permissions::Permissions;
use crate::services::{DailyBreadDefaults, DailyBreadService, EventService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Daily bread resolver.
    pub daily_bread: Arc<DailyBreadService>,

    /// Event range queries.
    pub events: Arc<EventService>,

    /// Record stores for the admin API.
    pub stores: Stores,

    /// Permission checker with role caching.
    pub permissions: Permissions,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        stores: Stores,
        source: Arc<dyn VerseSource>,
        site_offset: FixedOffset,
        admin_tokens: Vec<String>,
    ) -> Self {
        let daily_bread = Arc::new(DailyBreadService::new(
            stores.verses.clone(),
            source,
            DailyBreadDefaults::default(),
        ));
        let events = Arc::new(EventService::new(stores.events.clone(), site_offset));
        let permissions = Permissions::with_owners(stores.users.clone(), admin_tokens);

        Self {
            daily_bread,
            events,
            stores,
            permissions,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/daily-bread", get(routes::daily_bread::get_daily_bread))
        .route("/api/events", get(routes::events::list_events))
        .nest("/api/admin", routes::admin::router())
        .with_state(state)
}

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let origin = match &config.cors_allowed_origin {
        Some(origin) => AllowOrigin::exact(
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS_ALLOWED_ORIGIN '{}'", origin))?,
        ),
        None => AllowOrigin::from(Any),
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60)))
}

/// Serve until Ctrl+C or SIGTERM.
pub async fn serve(config: &Config, state: AppState) -> anyhow::Result<()> {
    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config)?);

    let address = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Binding to {}", address);

    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Server running on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::response::{IntoResponse, Response};
    use chrono::FixedOffset;

    use super::AppState;
    use crate::bible::{Language, VerseContent, VerseSource};
    use crate::database::Stores;

    pub const OWNER: &str = "owner-token";

    /// Upstream that is always down.
    pub struct OfflineSource;

    #[async_trait]
    impl VerseSource for OfflineSource {
        async fn fetch(&self, _reference: &str, _language: Language) -> Option<VerseContent> {
            None
        }
    }

    /// State over empty in-memory stores, an offline upstream, UTC, and a
    /// single owner token.
    pub fn state() -> AppState {
        AppState::new(
            Stores::memory(),
            Arc::new(OfflineSource),
            FixedOffset::east_opt(0).unwrap(),
            vec![OWNER.to_string()],
        )
    }

    /// Status and JSON body of a handler result.
    pub async fn json(response: impl IntoResponse) -> (axum::http::StatusCode, serde_json::Value) {
        let response: Response = response.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}
