//! Host rendering layer.
//!
//! Geometry, paint commands, frames with alternate render targets, and the
//! small reactive pieces (channels, memos, surface handles) the drag-and-drop
//! participants are built from.

pub mod backend;
pub mod core;
