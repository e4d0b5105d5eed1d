//! Widget configuration models for `.agent-overlay/config.toml`.
//!
//! This module defines the structure of the configuration file that controls
//! the widget's texts, its initial state and its scroll timing.

use serde::Deserialize;
use serde::Serialize;
use ts_rs::TS;

/// Represents settings from `.agent-overlay/config.toml`.
///
/// Every key is optional; missing keys take the defaults shown below.
///
/// # Example
///
/// ```toml
/// # .agent-overlay/config.toml
/// title = "AutoScraper"
/// details_visible = false
///
/// [scroll]
/// settle_passes = 3
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(default)]
pub struct OverlayConfig {
    /// Title shown in the expanded panel's header.
    pub title: String,

    /// One-line disclaimer under the input row.
    pub disclaimer: String,

    /// Placeholder shown while the input accepts text.
    pub prompt_placeholder: String,

    /// Placeholder shown while a task is processing.
    pub working_placeholder: String,

    /// Initial value of the "Show Details" toggle.
    pub details_visible: bool,

    /// Mount the expanded panel instead of the badge on startup.
    pub start_expanded: bool,

    /// Scroll reconciliation timing.
    pub scroll: ScrollConfig,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            title: "AutoScraper".to_string(),
            disclaimer: "AutoScraper may make mistakes. Verify key info.".to_string(),
            prompt_placeholder: "What can I help you solve today?".to_string(),
            working_placeholder: "Processing...".to_string(),
            details_visible: true,
            start_expanded: false,
            scroll: ScrollConfig::default(),
        }
    }
}

/// Timing of the scroll keeper.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(default)]
pub struct ScrollConfig {
    /// Delay between a content mutation and its reconciliation.
    pub mutation_delay_ms: u64,

    /// Period of the reconciliation loop while the panel is expanded.
    pub reconcile_interval_ms: u64,

    /// Extra reconciliation passes right after expansion.
    pub settle_passes: u8,

    /// Spacing of the settle passes.
    pub settle_interval_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            mutation_delay_ms: 100,
            reconcile_interval_ms: 100,
            settle_passes: 5,
            settle_interval_ms: 1000,
        }
    }
}
