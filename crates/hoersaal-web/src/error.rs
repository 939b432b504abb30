//! Error types and axum `IntoResponse` implementation.
//!
//! Every variant is a server fault. The cause is logged here and the client
//! only ever sees a generic 500 body.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

/// Body sent for every server fault.
pub const FAULT_BODY: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Resolve(#[from] hoersaal_core::Error),

  #[error("no template registered for view {0:?}")]
  TemplateMissing(String),

  #[error("render error: {0}")]
  Render(#[from] handlebars::RenderError),

  #[error("template error: {0}")]
  Template(#[from] handlebars::TemplateError),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match &self {
      Error::Resolve(hoersaal_core::Error::CorruptField { .. }) => {
        tracing::error!(error = %self, "data integrity fault");
      }
      Error::Resolve(e) => {
        tracing::error!(error = %e, source = ?std::error::Error::source(e), "store fault");
      }
      Error::TemplateMissing(_) | Error::Template(_) => {
        tracing::error!(error = %self, "template configuration fault");
      }
      Error::Render(_) => tracing::error!(error = %self, "render fault"),
    }
    (StatusCode::INTERNAL_SERVER_ERROR, FAULT_BODY).into_response()
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
