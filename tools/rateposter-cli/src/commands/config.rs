//! Show the effective configuration and optionally write the defaults.

use std::path::Path;

use rateposter_common::error::{PosterError, PosterResult};
use rateposter_common::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, init: bool) -> anyhow::Result<()> {
    let path = config_file_path();
    if init {
        if write_defaults(&path)? {
            println!("Wrote default settings to {}", path.display());
        } else {
            println!("Keeping existing {}", path.display());
        }
    }

    println!("Config file: {}", path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

/// Write [`AppConfig::default`] to `path` unless a file is already there.
/// Returns whether anything was written.
fn write_defaults(path: &Path) -> PosterResult<bool> {
    if path.exists() {
        return Ok(false);
    }
    AppConfig::default()
        .save_to(path)
        .map_err(|e| PosterError::config(format!("cannot write {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), "Wrote default config");
    Ok(true)
}
