//! Editing session plumbing
//!
//! This module contains:
//! - Input events the host forwards, and the outcome reported back
//! - Keyboard shortcut dispatch
//! - Interaction state of the tool controller

pub mod messages;
pub mod shortcuts;
pub mod state;
