//! Runtime settings, layered from an optional TOML file and `HABITUAL_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Runtime configuration, deserialised from `habitual.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// SQLite database file; a leading `~/` is expanded.
  pub store_path: PathBuf,
  /// Default tracing level when `RUST_LOG` is unset.
  pub log_level:  String,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      store_path: PathBuf::from("habits.db"),
      log_level:  "warn".to_string(),
    }
  }
}

impl Settings {
  /// Read `path` (if it exists), then the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("HABITUAL"))
      .build()
      .context("failed to read config file")?;

    let mut settings: Settings = settings
      .try_deserialize()
      .context("failed to deserialise settings")?;
    settings.store_path = expand_tilde(&settings.store_path);
    Ok(settings)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
