//! Error type for `habitual-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] habitual_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A stored column could not be decoded into its domain type.
  #[error("decode error: {0}")]
  Decode(String),

  #[error("habit not found: {0:?}")]
  HabitNotFound(String),

  #[error("a habit named {0:?} already exists")]
  AlreadyExists(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for habitual_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::Core(e) => e,
      Error::HabitNotFound(name) => Self::NotFound(name),
      Error::AlreadyExists(name) => Self::AlreadyExists(name),
      other => Self::Store(Box::new(other)),
    }
  }
}
