use colored::Colorize;
use std::path::Path;

use crate::config::Config;
use crate::error::Result;

/// Save default connection settings
///
/// Writes to `path` when given, otherwise to [`Config::default_path`].
///
/// # Errors
///
/// Returns `SekhaError::Configuration` if `api_url` is invalid, or an I/O
/// error if the file cannot be written
pub fn save_defaults(path: Option<&Path>, api_url: &str, api_key: Option<&str>) -> Result<()> {
    let config = Config::new(api_url, api_key.unwrap_or_default())?;

    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path()?,
    };
    config.save(&path)?;

    println!(
        "{}",
        format!("Configuration saved to {}", path.display()).green()
    );
    Ok(())
}
