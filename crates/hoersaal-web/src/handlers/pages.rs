//! Fixed pages: `/`, `/search`, `/about`.
//!
//! These carry no data; they render their template with an empty model.

use axum::{extract::State, response::Html};
use hoersaal_core::store::LectureStore;
use serde_json::json;

use crate::{
  AppState,
  error::Result,
  views::{ABOUT_VIEW, INDEX_VIEW, SEARCH_VIEW},
};

fn page<S: LectureStore>(state: &AppState<S>, view: &str) -> Result<Html<String>> {
  Ok(Html(state.views.render(view, &json!({}))?))
}

/// `GET /`
pub async fn index<S: LectureStore>(
  State(state): State<AppState<S>>,
) -> Result<Html<String>> {
  page(&state, INDEX_VIEW)
}

/// `GET /search`: the client-side search shell.
pub async fn search<S: LectureStore>(
  State(state): State<AppState<S>>,
) -> Result<Html<String>> {
  page(&state, SEARCH_VIEW)
}

/// `GET /about`
pub async fn about<S: LectureStore>(
  State(state): State<AppState<S>>,
) -> Result<Html<String>> {
  page(&state, ABOUT_VIEW)
}
