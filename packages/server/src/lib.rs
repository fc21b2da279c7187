#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the water service line map.
//!
//! Serves the normalized service-line table and the fuzzy address search
//! as a JSON API for the map-rendering frontend. The upstream feed is
//! fetched on demand; a staleness-bounded in-memory cache avoids
//! re-downloading the whole dataset on every request while never serving
//! data older than the configured TTL.

mod handlers;

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use water_map_source::{DEFAULT_FEED_URL, FeedClient, SourceError};
use water_map_source_models::ServiceRecord;

/// Server configuration, built once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server to.
    pub bind_addr: String,
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Upstream feed endpoint.
    pub feed_url: String,
    /// Timeout applied to the upstream GET.
    pub fetch_timeout: Duration,
    /// Maximum age of a cached dataset. Zero disables caching and
    /// re-fetches on every request.
    pub cache_ttl: Duration,
}

impl Config {
    /// Reads configuration from `BIND_ADDR`, `PORT`, `FEED_URL`,
    /// `FETCH_TIMEOUT_SECS`, and `CACHE_TTL_SECS`, with defaults for
    /// anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_port(std::env::var("PORT").ok().as_deref()),
            feed_url: std::env::var("FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string()),
            fetch_timeout: parse_secs(std::env::var("FETCH_TIMEOUT_SECS").ok().as_deref(), 30),
            cache_ttl: parse_secs(std::env::var("CACHE_TTL_SECS").ok().as_deref(), 300),
        }
    }
}

fn parse_port(value: Option<&str>) -> u16 {
    value.and_then(|v| v.parse().ok()).unwrap_or(8080)
}

fn parse_secs(value: Option<&str>, default: u64) -> Duration {
    Duration::from_secs(value.and_then(|v| v.parse().ok()).unwrap_or(default))
}

/// A cached copy of the normalized dataset.
struct CachedTable {
    records: Arc<Vec<ServiceRecord>>,
    fetched_at: Instant,
}

/// Shared application state.
pub struct AppState {
    /// Server configuration.
    pub config: Config,
    client: FeedClient,
    cache: RwLock<Option<CachedTable>>,
}

impl AppState {
    /// Builds the application state, including the feed client.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self, SourceError> {
        let client = FeedClient::new(&config.feed_url, config.fetch_timeout)?;
        Ok(Self {
            config,
            client,
            cache: RwLock::new(None),
        })
    }

    /// Returns the normalized service table, re-fetching when the cached
    /// copy is missing or older than the configured TTL.
    ///
    /// The lock is held only to read or replace the cache entry, never
    /// across the network fetch, so a slow upstream cannot wedge other
    /// requests behind cache bookkeeping. Concurrent requests with a
    /// stale cache fetch redundantly; last writer wins.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the feed fetch or normalization fails.
    /// The stale cache entry is left untouched in that case but is never
    /// served.
    pub async fn service_records(&self) -> Result<Arc<Vec<ServiceRecord>>, SourceError> {
        let ttl = self.config.cache_ttl;

        if !ttl.is_zero() {
            let guard = self.cache.read().expect("dataset cache lock poisoned");
            if let Some(entry) = guard.as_ref()
                && entry.fetched_at.elapsed() <= ttl
            {
                return Ok(Arc::clone(&entry.records));
            }
        }

        let records = Arc::new(self.client.fetch_service_records().await?);

        if !ttl.is_zero() {
            let mut guard = self.cache.write().expect("dataset cache lock poisoned");
            *guard = Some(CachedTable {
                records: Arc::clone(&records),
                fetched_at: Instant::now(),
            });
        }

        Ok(records)
    }

    #[cfg(test)]
    fn seed_cache(&self, records: Vec<ServiceRecord>, fetched_at: Instant) {
        let mut guard = self.cache.write().expect("dataset cache lock poisoned");
        *guard = Some(CachedTable {
            records: Arc::new(records),
            fetched_at,
        });
    }
}

/// Starts the water map API server.
///
/// Builds the configuration from the environment, constructs the shared
/// [`AppState`], and runs the Actix-Web HTTP server. This is a regular
/// async function; the caller provides the runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if the feed HTTP client cannot be constructed.
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = Config::from_env();
    let bind_addr = config.bind_addr.clone();
    let port = config.port;

    log::info!("Feed URL: {}", config.feed_url);
    log::info!(
        "Dataset cache TTL: {}s (0 = fetch per request)",
        config.cache_ttl.as_secs()
    );

    let state = web::Data::new(AppState::new(config).expect("Failed to build feed client"));

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/map", web::get().to(handlers::map_defaults))
                    .route("/services", web::get().to(handlers::services))
                    .route("/search", web::post().to(handlers::search)),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use water_map_source_models::Coordinates;

    fn record(address: &str) -> ServiceRecord {
        ServiceRecord {
            address: address.to_string(),
            material: "COPPER".to_string(),
            service_date: "2001".to_string(),
            coordinates: Coordinates { x: -76.1, y: 43.0 },
        }
    }

    /// State whose feed client points at a dead endpoint: any code path
    /// that actually fetches will error.
    fn unreachable_state(cache_ttl: Duration) -> AppState {
        let config = Config {
            bind_addr: "127.0.0.1".to_string(),
            port: 0,
            feed_url: "http://127.0.0.1:9/feed.geojson".to_string(),
            fetch_timeout: Duration::from_millis(200),
            cache_ttl,
        };
        AppState::new(config).expect("client builds")
    }

    #[test]
    fn port_parsing_defaults() {
        assert_eq!(parse_port(None), 8080);
        assert_eq!(parse_port(Some("not a port")), 8080);
        assert_eq!(parse_port(Some("9000")), 9000);
    }

    #[test]
    fn secs_parsing_defaults() {
        assert_eq!(parse_secs(None, 300), Duration::from_secs(300));
        assert_eq!(parse_secs(Some("bogus"), 30), Duration::from_secs(30));
        assert_eq!(parse_secs(Some("0"), 300), Duration::ZERO);
    }

    #[actix_web::test]
    async fn fresh_cache_entry_is_served_without_fetching() {
        let state = unreachable_state(Duration::from_secs(300));
        state.seed_cache(vec![record("123 main st")], Instant::now());

        let records = state
            .service_records()
            .await
            .expect("fresh cache hit must not touch the network");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].address, "123 main st");
    }

    #[actix_web::test]
    async fn stale_cache_entry_is_never_served() {
        let state = unreachable_state(Duration::from_secs(300));
        let stale = Instant::now()
            .checked_sub(Duration::from_secs(600))
            .expect("stale instant");
        state.seed_cache(vec![record("123 main st")], stale);

        // The entry is older than the TTL, so the state must re-fetch,
        // which fails against the dead endpoint.
        assert!(state.service_records().await.is_err());
    }

    #[actix_web::test]
    async fn zero_ttl_always_refetches() {
        let state = unreachable_state(Duration::ZERO);
        state.seed_cache(vec![record("123 main st")], Instant::now());

        assert!(state.service_records().await.is_err());
    }
}
