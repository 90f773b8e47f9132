//! # quickwindow
//!
//! GLFW windows and OpenGL contexts for Rust, with a small loop layer on top.
//!
//! ## Features
//!
//! - **Checked binding**: every GLFW call reports failures as typed errors
//! - **Windows**: creation hints, properties, input state, per-window callbacks
//! - **Scoped contexts**: make a context current and restore the previous one
//! - **Event queue**: a managed window that collects every notification
//! - **Sessions**: context version negotiation plus a frame-paced loop
//! - **Runtime loading**: GLFW 3 is loaded from the system at startup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quickwindow::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let glfw = Glfw::load()?;
//!     let mut session = SessionBuilder::new(&glfw)
//!         .title("hello")
//!         .frame_limit(Some(60.0))
//!         .quit_key(Some(Key::Escape))
//!         .open()?;
//!
//!     session.run(|_, frame| {
//!         for event in &frame.events {
//!             println!("{event:?}");
//!         }
//!         println!("dt: {}", frame.dt);
//!     })?;
//!     Ok(())
//! }
//! ```
//!
//! Everything is confined to the thread that initialized GLFW; none of the
//! handle types are `Send`.

// Native layer
pub mod native;
pub(crate) mod binding;

// Core types
pub mod error;
pub mod input;
pub mod hints;
pub mod monitor;
pub mod glfw;
pub mod window;

// Convenience layers
pub mod events;
pub mod foundation;
pub mod config;
pub mod session;

pub use error::{GlfwError, UsageError, WindowError, WindowResult};
pub use events::{Event, EventQueue};
pub use glfw::Glfw;
pub use hints::{ClientApi, ContextRobustness, Hint, Hints, OpenGlProfile};
pub use input::{Action, CursorMode, Joystick, Key, Modifiers, MouseButton};
pub use monitor::{GammaRamp, Monitor, MonitorEvent, VideoMode};
pub use session::{ContextCandidate, Frame, Session, SessionBuilder};
pub use window::{CallbackKind, ContextGuard, ManagedWindow, Window, WindowBuilder, WindowId, WindowRef};

/// Common imports for applications
pub mod prelude {
    pub use crate::config::{Config, MonitorSelection, SessionConfig, WindowOptions};
    pub use crate::error::{WindowError, WindowResult};
    pub use crate::events::Event;
    pub use crate::glfw::Glfw;
    pub use crate::hints::{ClientApi, Hints, OpenGlProfile};
    pub use crate::input::{Action, Key, Modifiers, MouseButton};
    pub use crate::session::{ContextCandidate, Frame, Session, SessionBuilder};
    pub use crate::window::{ManagedWindow, Window, WindowBuilder, WindowRef};
}
