//! A window that collects its notifications into an event queue

use std::fmt;
use std::ops::Deref;

use crate::error::WindowResult;
use crate::events::{Event, EventQueue};

use super::{Window, WindowBuilder, WindowRef};

/// A [`Window`] with every callback routed into an [`EventQueue`]
///
/// Events accumulate while the native library delivers them during
/// [`Glfw::poll_events`](crate::Glfw::poll_events) and are taken with
/// [`events`](Self::events).
pub struct ManagedWindow {
    window: Window,
    queue: EventQueue,
}

impl ManagedWindow {
    /// Build the window and install a queueing handler for every callback kind
    pub fn new(builder: WindowBuilder<'_>) -> WindowResult<Self> {
        let window = builder.build()?;
        let queue = EventQueue::new();

        let q = queue.clone();
        window.set_key_callback(move |_, key, scancode, action, mods| {
            q.push(Event::Key { key, scancode, action, mods });
        })?;
        let q = queue.clone();
        window.set_char_callback(move |_, c| q.push(Event::Char(c)))?;
        let q = queue.clone();
        window.set_scroll_callback(move |_, dx, dy| q.push(Event::Scroll { dx, dy }))?;
        let q = queue.clone();
        window.set_mouse_button_callback(move |_, button, action, mods| {
            q.push(Event::MouseButton { button, action, mods });
        })?;
        let q = queue.clone();
        window.set_cursor_enter_callback(move |_, entered| q.push(Event::CursorEnter(entered)))?;
        let q = queue.clone();
        window.set_cursor_pos_callback(move |_, x, y| q.push(Event::CursorPos { x, y }))?;
        let q = queue.clone();
        window.set_window_size_callback(move |_, width, height| q.push(Event::WindowSize { width, height }))?;
        let q = queue.clone();
        window.set_window_pos_callback(move |_, x, y| q.push(Event::WindowPos { x, y }))?;
        let q = queue.clone();
        window.set_window_close_callback(move |_| q.push(Event::WindowClose))?;
        let q = queue.clone();
        window.set_window_refresh_callback(move |_| q.push(Event::WindowRefresh))?;
        let q = queue.clone();
        window.set_window_focus_callback(move |_, focused| q.push(Event::WindowFocus(focused)))?;
        let q = queue.clone();
        window.set_window_iconify_callback(move |_, iconified| q.push(Event::WindowIconify(iconified)))?;
        let q = queue.clone();
        window.set_framebuffer_size_callback(move |_, width, height| {
            q.push(Event::FramebufferSize { width, height });
        })?;

        Ok(Self { window, queue })
    }

    /// Take every event queued since the previous call, oldest first
    pub fn events(&self) -> impl Iterator<Item = Event> {
        self.queue.drain()
    }

    /// Discard pending events
    pub fn clear_events(&self) {
        self.queue.clear();
    }

    /// Number of events waiting to be taken
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// The owned window
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Destroy the native window
    pub fn close(self) -> WindowResult<()> {
        self.window.close()
    }
}

impl Deref for ManagedWindow {
    type Target = WindowRef;

    fn deref(&self) -> &WindowRef {
        &self.window
    }
}

impl fmt::Debug for ManagedWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedWindow")
            .field("window", &self.window)
            .field("pending", &self.queue.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glfw::Glfw;
    use crate::input::{Action, Key, Modifiers, MouseButton};
    use crate::native::consts::{GLFW_MOD_SHIFT, GLFW_PRESS, GLFW_RELEASE};
    use crate::native::headless::{Headless, NativeEvent};
    use crate::window::CallbackKind;

    fn managed(headless: &Headless) -> (Glfw, ManagedWindow) {
        let glfw = Glfw::init(headless.clone()).unwrap();
        let window = ManagedWindow::new(WindowBuilder::new(&glfw, 320, 240, "managed")).unwrap();
        (glfw, window)
    }

    #[test]
    fn test_every_kind_installed() {
        let headless = Headless::new();
        let (_glfw, window) = managed(&headless);
        for kind in CallbackKind::ALL {
            assert!(window.has_callback(*kind), "{kind} not installed");
        }
        assert_eq!(headless.installed_callbacks(window.handle().unwrap()), CallbackKind::ALL.len());
    }

    #[test]
    fn test_events_in_delivery_order() {
        let headless = Headless::new();
        let (glfw, window) = managed(&headless);
        let handle = window.handle().unwrap();

        headless.queue_event(handle, NativeEvent::CursorEnter(true));
        headless.queue_event(handle, NativeEvent::CursorPos(10.5, 20.0));
        headless.queue_event(
            handle,
            NativeEvent::MouseButton { button: 0, action: GLFW_PRESS, mods: GLFW_MOD_SHIFT },
        );
        headless.queue_event(handle, NativeEvent::Key { key: 256, scancode: 9, action: GLFW_RELEASE, mods: 0 });
        headless.queue_event(handle, NativeEvent::Char(u32::from('q')));
        headless.queue_event(handle, NativeEvent::WindowClose);
        glfw.poll_events().unwrap();

        assert_eq!(window.pending(), 6);
        let events: Vec<_> = window.events().collect();
        assert_eq!(
            events,
            vec![
                Event::CursorEnter(true),
                Event::CursorPos { x: 10.5, y: 20.0 },
                Event::MouseButton { button: MouseButton::LEFT, action: Action::Press, mods: Modifiers::SHIFT },
                Event::Key { key: Key::Escape, scancode: 9, action: Action::Release, mods: Modifiers::empty() },
                Event::Char('q'),
                Event::WindowClose,
            ]
        );
        assert_eq!(window.events().count(), 0);
    }

    #[test]
    fn test_property_changes_are_queued() {
        let headless = Headless::new();
        let (glfw, window) = managed(&headless);

        window.set_size(640, 480).unwrap();
        window.set_pos(5, 7).unwrap();
        glfw.poll_events().unwrap();

        let events: Vec<_> = window.events().collect();
        assert!(events.contains(&Event::WindowSize { width: 640, height: 480 }));
        assert!(events.contains(&Event::FramebufferSize { width: 640, height: 480 }));
        assert!(events.contains(&Event::WindowPos { x: 5, y: 7 }));
    }

    #[test]
    fn test_clear_events() {
        let headless = Headless::new();
        let (glfw, window) = managed(&headless);
        headless.queue_event(window.handle().unwrap(), NativeEvent::WindowRefresh);
        glfw.poll_events().unwrap();

        window.clear_events();
        assert_eq!(window.pending(), 0);
        assert_eq!(window.events().next(), None);
    }

    #[test]
    fn test_close_stops_delivery() {
        let headless = Headless::new();
        let (glfw, window) = managed(&headless);
        let handle = window.handle().unwrap();
        window.close().unwrap();

        headless.queue_event(handle, NativeEvent::WindowFocus(true));
        glfw.poll_events().unwrap();
        assert_eq!(headless.window_count(), 0);
    }
}
