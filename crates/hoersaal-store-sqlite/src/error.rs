//! Error type for `hoersaal-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("lecture {number}/{part} is already stored")]
  DuplicateLecture { number: u32, part: u32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
