//! Church site backend
//!
//! Bilingual (English/Chinese) content API for a church website.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `database` - Record stores (MongoDB or in-memory)
//! - `cache` - Moka-backed caches
//! - `permissions` - Admin token checks with caching
//! - `bible` - Book names, reference formatting, upstream verse text
//! - `services` - Daily bread and event queries
//! - `web` - HTTP routes
//! - `utils` - Date parsing helpers

mod bible;
mod cache;
mod config;
mod database;
mod error;
mod permissions;
mod services;
mod utils;
mod web;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bible::BibleApiClient;
use config::Config;
use database::Stores;
use web::AppState;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("church_site=info,tower_http=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting church site backend...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");
    info!("Store backend: {:?}", config.store_backend);

    let stores = Stores::open(&config).await?;
    info!("Stores ready");

    let bible_api = Arc::new(BibleApiClient::new(&config.bible_api)?);
    info!("Bible API: {}", config.bible_api.base_url);

    if config.admin_tokens.is_empty() {
        info!("No owner tokens configured, admin API needs user tokens");
    } else {
        info!("{} owner token(s) configured", config.admin_tokens.len());
    }

    let state = AppState::new(
        stores,
        bible_api,
        config.site_offset,
        config.admin_tokens.clone(),
    );

    web::serve(&config, state).await
}
