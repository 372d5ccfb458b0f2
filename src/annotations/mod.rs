//! Hit testing, the tool controller, and the text prompt
//!
//! This module provides:
//! - Element and resize-handle hit testing
//! - The `Editor` state machine that turns input events into scene changes
//! - The text prompt sub-flow that produces text labels

pub mod handlers;
pub mod text;
