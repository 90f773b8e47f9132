//! Foundation module - utilities shared by the window layers
//!
//! - Frame pacing against a monotonic clock
//! - Logging setup

pub mod logging;
pub mod time;
