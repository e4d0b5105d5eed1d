//! Configuration loading.
//!
//! Everything lives under `.agent-overlay/` in the project root:
//! `config.toml` for widget settings and `log/` for the log file.

pub mod error;
pub mod loader;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, log_dir, overlay_dir, CONFIG_DIR};
