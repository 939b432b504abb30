//! Handler for `GET /lecture/{number}[/{part}[/{name}]]`.
//!
//! | Outcome | Status | Body |
//! |---------|--------|------|
//! | lecture found | 200 | `lecture` view |
//! | no such lecture | 200 | `lecture-not-found` view |
//! | store/data/template fault | 500 | generic message |

use axum::{
  extract::{Path, State},
  response::Html,
};
use hoersaal_core::{
  resolve::{NotFoundView, ResolvedView},
  store::LectureStore,
};
use serde::Deserialize;

use crate::{AppState, error::Result};

/// Raw path segments. Kept as strings so the not-found page can echo back
/// exactly what was requested, even when it is not a number.
#[derive(Debug, Deserialize)]
pub struct LectureParams {
  pub number: String,
  #[serde(default)]
  pub part:   Option<String>,
  #[serde(default)]
  pub name:   Option<String>,
}

impl LectureParams {
  /// The numeric lookup key, or `None` if a segment cannot name any lecture.
  fn key(&self) -> Option<(u32, Option<u32>)> {
    let number = parse_positive(&self.number)?;
    let part = match self.part.as_deref() {
      Some(p) => Some(parse_positive(p)?),
      None => None,
    };
    Some((number, part))
  }
}

fn parse_positive(segment: &str) -> Option<u32> {
  segment.parse::<u32>().ok().filter(|n| *n > 0)
}

pub async fn handler<S: LectureStore>(
  State(state): State<AppState<S>>,
  Path(params): Path<LectureParams>,
) -> Result<Html<String>> {
  let view = match params.key() {
    Some((number, part)) => {
      state.resolver.resolve(number, part, params.name).await?
    }
    None => {
      tracing::debug!(?params, "unparsable lecture key");
      ResolvedView::NotFound(NotFoundView::raw(
        params.number,
        params.part,
        params.name,
      ))
    }
  };

  if let ResolvedView::NotFound(missing) = &view {
    tracing::info!(
      number = %missing.number,
      part = %missing.part,
      "lecture not found"
    );
  }

  let html = state.views.render(view.view_name(), &view)?;
  Ok(Html(html))
}
