//! Window events and the queue they are collected in
//!
//! A [`ManagedWindow`](crate::window::ManagedWindow) turns every native
//! notification into one [`Event`] and appends it to an [`EventQueue`]. The
//! owner drains the queue once per frame; a drain returns everything queued
//! since the previous one, in delivery order.

use std::cell::RefCell;
use std::collections::vec_deque::IntoIter;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::input::{Action, Key, Modifiers, MouseButton};

/// One input or window notification
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A key was pressed, repeated or released
    Key {
        /// The key, [`Key::Unknown`] for keys without a name
        key: Key,
        /// Platform-specific scancode
        scancode: i32,
        /// What happened to the key
        action: Action,
        /// Modifier keys held at the time
        mods: Modifiers,
    },
    /// A Unicode character was typed
    Char(char),
    /// Scroll offsets
    Scroll {
        /// Horizontal offset
        dx: f64,
        /// Vertical offset
        dy: f64,
    },
    /// A mouse button was pressed or released
    MouseButton {
        /// The button
        button: MouseButton,
        /// Press or release
        action: Action,
        /// Modifier keys held at the time
        mods: Modifiers,
    },
    /// The cursor entered (`true`) or left (`false`) the client area
    CursorEnter(bool),
    /// The cursor moved, in screen coordinates relative to the client area
    CursorPos {
        /// Horizontal position
        x: f64,
        /// Vertical position
        y: f64,
    },
    /// The window was resized, in screen coordinates
    WindowSize {
        /// New width
        width: i32,
        /// New height
        height: i32,
    },
    /// The window moved
    WindowPos {
        /// New left edge
        x: i32,
        /// New top edge
        y: i32,
    },
    /// The user asked to close the window
    WindowClose,
    /// The client area needs to be redrawn
    WindowRefresh,
    /// The window gained (`true`) or lost (`false`) focus
    WindowFocus(bool),
    /// The window was minimized (`true`) or restored (`false`)
    WindowIconify(bool),
    /// The framebuffer was resized, in pixels
    FramebufferSize {
        /// New width
        width: i32,
        /// New height
        height: i32,
    },
}

impl Event {
    /// Whether this is a press of `key`
    pub fn is_key_press(&self, key: Key) -> bool {
        matches!(self, Self::Key { key: k, action: Action::Press, .. } if *k == key)
    }
}

/// Unbounded FIFO of events, shared between producer and owner
///
/// Clones refer to the same queue.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Rc<RefCell<VecDeque<Event>>>,
}

impl EventQueue {
    /// An empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event
    pub fn push(&self, event: Event) {
        self.events.borrow_mut().push_back(event);
    }

    /// Take every queued event, oldest first
    ///
    /// The queue is empty afterwards; events pushed while the returned
    /// iterator is alive land in the next drain.
    pub fn drain(&self) -> IntoIter<Event> {
        std::mem::take(&mut *self.events.borrow_mut()).into_iter()
    }

    /// Discard every queued event
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}
