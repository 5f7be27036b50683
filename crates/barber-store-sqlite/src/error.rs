//! Error type for `barber-store-sqlite`.

use barber_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A domain rejection (duplicate, ineligible staff, slot conflict, …).
  #[error(transparent)]
  Core(#[from] barber_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A stored row could not be decoded back into a domain type.
  #[error("corrupt row in {table}: {detail}")]
  CorruptRow {
    table:  &'static str,
    detail: String,
  },
}

impl StoreError for Error {
  fn domain(&self) -> Option<&barber_core::Error> {
    match self {
      Error::Core(e) => Some(e),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
