//! Recorder configuration
//!
//! Can be built in code with the `with_*` methods or read from TOML:
//!
//! ```toml
//! initial_capacity = 8192
//!
//! [default_cull_rect]
//! left = 0.0
//! top = 0.0
//! right = 1920.0
//! bottom = 1080.0
//! ```

use pictura_core::Rect;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Cull rect used when a session is opened without one: large enough to
/// cover any realistic surface while staying finite under transforms
pub const MAX_CULL_RECT: Rect = Rect {
    left: -1.0e9,
    top: -1.0e9,
    right: 1.0e9,
    bottom: 1.0e9,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Cull rect for [`begin_recording`](crate::DisplayListRecorder::begin_recording)
    pub default_cull_rect: Rect,
    /// Encoded bytes reserved when a session opens (0 = reserve lazily)
    pub initial_capacity: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            default_cull_rect: MAX_CULL_RECT,
            initial_capacity: 0,
        }
    }
}

impl RecorderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cull_rect(mut self, rect: Rect) -> Self {
        self.default_cull_rect = rect;
        self
    }

    pub fn with_initial_capacity(mut self, bytes: usize) -> Self {
        self.initial_capacity = bytes;
        self
    }

    /// Parse a config; missing keys take their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}
