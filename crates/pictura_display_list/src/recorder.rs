//! Display list recorder - session lifecycle around a recording canvas
//!
//! ```ignore
//! let mut recorder = DisplayListRecorder::default();
//! let canvas = recorder.begin_recording_with_bounds(Rect::from_xywh(0.0, 0.0, 100.0, 100.0))?;
//! canvas.draw_rect(Rect::from_xywh(10.0, 10.0, 20.0, 20.0), &Color::RED.into());
//! let list = recorder.finish_recording()?;
//! list.draw(&mut surface);
//! ```

use pictura_core::Rect;

use crate::builder::DisplayListBuilder;
use crate::config::RecorderConfig;
use crate::display_list::DisplayList;
use crate::error::{RecorderError, Result};
use crate::recording::RecordingCanvas;

/// Owns one [`RecordingCanvas`] and opens and closes sessions on it
///
/// At most one session is open at a time. The canvas is reused across
/// sessions; each session gets a fresh builder.
#[derive(Debug, Default)]
pub struct DisplayListRecorder {
    config: RecorderConfig,
    canvas: RecordingCanvas,
}

impl DisplayListRecorder {
    pub fn new(config: RecorderConfig) -> Self {
        Self {
            config,
            canvas: RecordingCanvas::new(),
        }
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Open a session culled to the configured default rect
    pub fn begin_recording(&mut self) -> Result<&mut RecordingCanvas> {
        self.begin_recording_with_bounds(self.config.default_cull_rect)
    }

    /// Open a session culled to `bounds`
    pub fn begin_recording_with_bounds(&mut self, bounds: Rect) -> Result<&mut RecordingCanvas> {
        if self.canvas.is_bound() {
            return Err(RecorderError::AlreadyRecording);
        }
        let builder = DisplayListBuilder::with_capacity(bounds, self.config.initial_capacity);
        self.canvas.bind(builder);
        tracing::debug!(cull = ?bounds, "recording started");
        Ok(&mut self.canvas)
    }

    /// Canvas of the open session
    pub fn recording_canvas(&mut self) -> Option<&mut RecordingCanvas> {
        if self.canvas.is_bound() {
            Some(&mut self.canvas)
        } else {
            None
        }
    }

    pub fn is_recording(&self) -> bool {
        self.canvas.is_bound()
    }

    /// True when no session is open or the open session has recorded nothing
    pub fn is_empty(&self) -> bool {
        self.canvas
            .builder()
            .map_or(true, DisplayListBuilder::is_empty)
    }

    /// Close the session and hand back what it recorded
    pub fn finish_recording(&mut self) -> Result<DisplayList> {
        let builder = self.canvas.unbind().ok_or(RecorderError::NotRecording)?;
        let list = builder.build();
        tracing::debug!(
            ops = list.op_count(),
            bytes = list.byte_count(),
            "recording finished"
        );
        Ok(list)
    }
}
