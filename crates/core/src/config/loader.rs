//! Configuration file loader for the `.agent-overlay/` directory.

use crate::config::error::{ConfigError, ConfigResult};
use ao_protocol::OverlayConfig;
use std::path::{Path, PathBuf};

/// Name of the per-project configuration directory.
pub const CONFIG_DIR: &str = ".agent-overlay";

/// Upper bound on `scroll.settle_passes`.
const MAX_SETTLE_PASSES: u8 = 20;

pub fn overlay_dir(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR)
}

/// Directory the log file is written to.
pub fn log_dir(root: &Path) -> PathBuf {
    overlay_dir(root).join("log")
}

/// Loads the widget configuration from `<root>/.agent-overlay/config.toml`.
///
/// A missing directory or file yields [`OverlayConfig::default`]; every key
/// in the file is optional.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - The file exists but cannot be read
/// - The file is not valid TOML or has mistyped keys
/// - A scroll interval is zero or `settle_passes` is out of range
///
/// # Example
///
/// ```rust,no_run
/// use ao_core::config::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Title: {}", config.title);
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<OverlayConfig> {
    let config_path = overlay_dir(root).join("config.toml");

    if !config_path.exists() {
        return Ok(OverlayConfig::default());
    }

    let content = tokio::fs::read_to_string(&config_path)
        .await
        .map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let config: OverlayConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path.clone(),
            source,
        })?;

    validate(&config).map_err(|reason| ConfigError::InvalidConfig {
        path: config_path,
        reason,
    })?;

    Ok(config)
}

fn validate(config: &OverlayConfig) -> Result<(), String> {
    let scroll = &config.scroll;
    let intervals = [
        ("mutation_delay_ms", scroll.mutation_delay_ms),
        ("reconcile_interval_ms", scroll.reconcile_interval_ms),
        ("settle_interval_ms", scroll.settle_interval_ms),
    ];
    if let Some((name, _)) = intervals.iter().find(|(_, value)| *value == 0) {
        return Err(format!("scroll.{name} must be greater than zero"));
    }
    if scroll.settle_passes > MAX_SETTLE_PASSES {
        return Err(format!(
            "scroll.settle_passes must be at most {MAX_SETTLE_PASSES}, got {}",
            scroll.settle_passes
        ));
    }
    Ok(())
}
