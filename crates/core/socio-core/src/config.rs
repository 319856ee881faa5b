//! Configuration management and environment variable loading

use crate::{Result, SocioError};
use std::env;
use std::path::Path;

/// Load environment variables from a .env file
///
/// Looks in the current directory and its parents. A missing file is not an
/// error; a file that fails to parse is.
///
/// # Example
///
/// ```no_run
/// use socio_core::load_env;
///
/// load_env().ok();
/// let token = std::env::var("APPLICATION_TOKEN").unwrap_or_default();
/// ```
pub fn load_env() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::info!("✓ Loaded environment from: {}", path.display());
            Ok(())
        }
        Err(dotenvy::Error::LineParse(line, pos)) => Err(SocioError::config(format!(
            "Failed to parse .env file at line {}, position {}",
            line, pos
        ))),
        Err(dotenvy::Error::Io(_)) => {
            tracing::warn!("No .env file found - using system environment variables only");
            Ok(())
        }
        Err(e) => Err(SocioError::config(format!(
            "Failed to load .env file: {}",
            e
        ))),
    }
}

/// Load environment variables from a specific file
pub fn load_env_from_path<P: AsRef<Path>>(path: P) -> Result<()> {
    match dotenvy::from_path(path.as_ref()) {
        Ok(_) => {
            tracing::info!("✓ Loaded environment from: {}", path.as_ref().display());
            Ok(())
        }
        Err(e) => Err(SocioError::config(format!(
            "Failed to load {} environment file: {}",
            path.as_ref().display(),
            e
        ))),
    }
}

/// Get required environment variable
///
/// Returns an error if the variable is not set
pub fn get_required_env(key: &str) -> Result<String> {
    env::var(key).map_err(|_| {
        SocioError::config(format!(
            "Required environment variable '{}' is not set. \
             Check your .env file or system environment.",
            key
        ))
    })
}

/// Get optional environment variable with default
pub fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get environment variable as boolean
pub fn get_env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|v| match v.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

/// Get environment variable as integer
pub fn get_env_int<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Get a comma-separated environment variable as a list
///
/// Items are trimmed and empty items dropped. Returns `None` when the variable
/// is unset or holds no items.
pub fn get_env_list(key: &str) -> Option<Vec<String>> {
    let items: Vec<String> = env::var(key)
        .ok()?
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Validate that required environment variables are set
pub fn validate_env(required_vars: &[&str]) -> Result<()> {
    let missing: Vec<&str> = required_vars
        .iter()
        .copied()
        .filter(|var| env::var(var).is_err())
        .collect();

    if !missing.is_empty() {
        return Err(SocioError::config(format!(
            "Missing required environment variables: {}",
            missing.join(", ")
        )));
    }

    Ok(())
}
