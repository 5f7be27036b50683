//! Error types for `barber-core`.
//!
//! [`Error`] names every rejection the domain can produce. Storage backends
//! wrap it in their own error type and expose it again through
//! [`StoreError::domain`], so callers can tell a rejected booking apart from
//! a broken database without knowing which backend is in use.

use chrono::NaiveDate;
use thiserror::Error;

use crate::schedule::Slot;

#[derive(Debug, Error)]
pub enum Error {
  /// A required field is missing or malformed.
  #[error("{0}")]
  InvalidInput(String),

  /// A uniqueness constraint rejected the write (CPF or service name).
  #[error("{0}")]
  Duplicate(String),

  #[error("selected staff member is not authorized to perform services")]
  IneligibleStaff(i64),

  #[error("a booking already exists for this staff member at the selected time")]
  SlotConflict {
    staff_id: i64,
    date:     NaiveDate,
    time:     Slot,
  },

  #[error("{0} not found")]
  NotFound(String),

  #[error("name or CPF incorrect")]
  Unauthorized,
}

impl Error {
  pub fn invalid(message: impl Into<String>) -> Self {
    Self::InvalidInput(message.into())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Implemented by every backend error type.
///
/// `domain` returns the wrapped [`Error`] when the failure is a domain
/// rejection, and `None` for infrastructure failures (I/O, corrupt rows).
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn domain(&self) -> Option<&Error>;
}

impl StoreError for Error {
  fn domain(&self) -> Option<&Error> { Some(self) }
}
