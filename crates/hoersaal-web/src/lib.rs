//! HTTP layer for Hörsaal.
//!
//! Exposes an axum [`Router`] that renders lectures from any
//! [`LectureStore`] through the handlebars templates in [`views`], plus the
//! fixed pages and static assets around them.

pub mod error;
pub mod handlers;
pub mod views;

pub use error::Error;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use hoersaal_core::{resolve::Resolver, store::LectureStore};
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

use handlers::{lecture, pages};
use views::Views;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `HOERSAAL_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "defaults::host")]
  pub host:             String,
  #[serde(default = "defaults::port")]
  pub port:             u16,
  #[serde(default = "defaults::store_path")]
  pub store_path:       PathBuf,
  #[serde(default = "defaults::static_dir")]
  pub static_dir:       PathBuf,
  /// Per-call limit on store queries, in milliseconds.
  #[serde(default = "defaults::store_timeout_ms")]
  pub store_timeout_ms: u64,
}

/// Lower bound for [`ServerConfig::store_timeout`]. A store call crosses to
/// the database thread and is never ready on its first poll, so a zero
/// timeout would fail every lecture request.
pub const MIN_STORE_TIMEOUT: Duration = Duration::from_millis(50);

impl ServerConfig {
  /// The configured store timeout, raised to [`MIN_STORE_TIMEOUT`].
  pub fn store_timeout(&self) -> Duration {
    Duration::from_millis(self.store_timeout_ms).max(MIN_STORE_TIMEOUT)
  }
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:             defaults::host(),
      port:             defaults::port(),
      store_path:       defaults::store_path(),
      static_dir:       defaults::static_dir(),
      store_timeout_ms: defaults::store_timeout_ms(),
    }
  }
}

mod defaults {
  use std::path::PathBuf;

  pub fn host() -> String { "127.0.0.1".to_string() }
  pub fn port() -> u16 { 3000 }
  pub fn store_path() -> PathBuf { PathBuf::from("sqlite3.db") }
  pub fn static_dir() -> PathBuf { PathBuf::from("public") }
  pub fn store_timeout_ms() -> u64 { 5_000 }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S: LectureStore> {
  pub resolver: Resolver<S>,
  pub views:    Arc<Views>,
  pub config:   Arc<ServerConfig>,
}

impl<S: LectureStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      resolver: self.resolver.clone(),
      views:    Arc::clone(&self.views),
      config:   Arc::clone(&self.config),
    }
  }
}

impl<S: LectureStore> AppState<S> {
  pub fn new(store: Arc<S>, views: Views, config: ServerConfig) -> Self {
    let resolver = Resolver::new(store).with_timeout(config.store_timeout());
    Self {
      resolver,
      views: Arc::new(views),
      config: Arc::new(config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the site.
///
/// Lecture routes also answer with a trailing slash. Anything not matched by
/// a route is looked up under [`ServerConfig::static_dir`].
pub fn router<S>(state: AppState<S>) -> Router
where
  S: LectureStore + 'static,
{
  let assets = ServeDir::new(&state.config.static_dir);

  Router::new()
    .route("/",                               get(pages::index::<S>))
    .route("/search",                         get(pages::search::<S>))
    .route("/about",                          get(pages::about::<S>))
    .route("/lecture/{number}",               get(lecture::handler::<S>))
    .route("/lecture/{number}/{part}",        get(lecture::handler::<S>))
    .route("/lecture/{number}/{part}/{name}", get(lecture::handler::<S>))
    .route("/lecture/{number}/",               get(lecture::handler::<S>))
    .route("/lecture/{number}/{part}/",        get(lecture::handler::<S>))
    .route("/lecture/{number}/{part}/{name}/", get(lecture::handler::<S>))
    .fallback_service(assets)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
