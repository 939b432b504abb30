//! Error types for `hoersaal-core`.
//!
//! A missing lecture is not an error: the store reports it as `None` and the
//! resolver turns it into [`ResolvedView::NotFound`](crate::resolve::ResolvedView).
//! Everything in this enum is a server fault.

use thiserror::Error;

use crate::codec::DecodeError;

#[derive(Debug, Error)]
pub enum Error {
  /// The backing store failed, timed out, or returned inconsistent rows.
  #[error("store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// A persisted encoded array could not be decoded.
  #[error("corrupt `{field}` field on lecture {lecture_id}: {source}")]
  CorruptField {
    field:      &'static str,
    lecture_id: i64,
    #[source]
    source:     DecodeError,
  },
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::StoreUnavailable(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
