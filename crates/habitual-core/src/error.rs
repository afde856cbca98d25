//! Error types for `habitual-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("habit not found: {0:?}")]
  NotFound(String),

  #[error("a habit named {0:?} already exists")]
  AlreadyExists(String),

  #[error("habit name must not be empty")]
  InvalidName,

  #[error("unknown interval: {0:?} (expected daily or weekly)")]
  UnknownInterval(String),

  /// An I/O failure from the backing store, surfaced verbatim.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
