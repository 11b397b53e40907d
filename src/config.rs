//! Page configuration.
//!
//! Every field has a default, so the host page only needs to provide the
//! values it wants to override in a `<script id="site-config"
//! type="application/json">` block.

use serde::Deserialize;

use crate::carousel::CarouselMode;

/// Id of the optional JSON configuration element on the host page.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Local-storage key holding the selected shader id.
    pub storage_key: String,
    /// Canvas size as a fraction of `min(viewport width, viewport height)`.
    pub canvas_ratio: f64,
    pub display: DisplayRatios,
    pub carousel_mode: CarouselMode,
    pub autoplay_interval_ms: u32,
    pub reveal_delay_ms: u32,
    /// Delay before the shader canvas fades in.
    pub warmup_ms: u32,
    pub footer_delay_ms: u32,
    pub footer_visible_ms: u32,
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

/// Center display size relative to the canvas size, by viewport width.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayRatios {
    pub base: f64,
    pub moderate: f64,
    pub narrow: f64,
    /// Viewports narrower than this use `moderate`.
    pub moderate_below_px: f64,
    /// Viewports narrower than this use `narrow`.
    pub narrow_below_px: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            storage_key: "selectedShader".to_string(),
            canvas_ratio: 0.7,
            display: DisplayRatios::default(),
            carousel_mode: CarouselMode::default(),
            autoplay_interval_ms: 4000,
            reveal_delay_ms: 1000,
            warmup_ms: 1000,
            footer_delay_ms: 1500,
            footer_visible_ms: 3000,
            log_level: "info".to_string(),
        }
    }
}

impl Default for DisplayRatios {
    fn default() -> Self {
        Self {
            base: 0.7,
            moderate: 0.85,
            narrow: 0.95,
            moderate_below_px: 768.0,
            narrow_below_px: 480.0,
        }
    }
}

impl SiteConfig {
    /// Parse a configuration block. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Parse a configuration block, falling back to defaults when it is malformed.
    pub fn from_json_or_default(text: &str) -> Self {
        Self::from_json(text).unwrap_or_else(|e| {
            log::warn!("ignoring malformed site config: {e}");
            Self::default()
        })
    }

    /// Configured log level, `Info` when unrecognized.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
