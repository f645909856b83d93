//! Pictura display lists
//!
//! Record canvas calls once, replay them onto any [`Canvas`] many times.
//!
//! # Pieces
//!
//! - [`op`]: the catalog of recordable ops, one payload struct per call
//! - [`DisplayListBuilder`]: op storage and running bounds for one session
//! - [`RecordingCanvas`]: a [`Canvas`] that appends ops to a builder and
//!   tracks the device-space extent of what they draw
//! - [`DisplayList`]: the finished recording; replayable, with in-place paint
//!   edits addressed by [`OpIndex`]
//! - [`DisplayListRecorder`]: opens and closes sessions
//!
//! [`Canvas`]: pictura_core::Canvas

pub mod builder;
pub mod config;
pub mod display_list;
pub mod error;
pub mod op;
pub mod recorder;
pub mod recording;

pub use builder::{DisplayListBuilder, OpIndex, PAGE_SIZE};
pub use config::{RecorderConfig, MAX_CULL_RECT};
pub use display_list::DisplayList;
pub use error::{RecorderError, Result};
pub use op::{DisplayOp, Op, OpHeader, OpKind, OpPayload, OP_HEADER_SIZE};
pub use recorder::DisplayListRecorder;
pub use recording::RecordingCanvas;
