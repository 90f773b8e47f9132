//! Per-window callback slots
//!
//! Each window has one optional handler per [`CallbackKind`]. Installing a
//! handler also installs the matching native trampoline; the trampoline
//! resolves the native handle through the registry, decodes the C arguments
//! and calls the handler with the window. Notifications for windows that are
//! not registered, or kinds without a handler, are dropped.
//!
//! A handler is taken out of its slot while it runs, so it may freely set,
//! replace or remove callbacks on its own window. It is put back afterwards
//! unless the slot changed in the meantime.

use std::ffi::{c_double, c_int, c_uint};
use std::fmt;
use std::str::FromStr;

use crate::binding::slot;
use crate::error::{UsageError, WindowResult};
use crate::glfw;
use crate::input::{Action, Key, Modifiers, MouseButton};
use crate::native::{GLFWwindow, WindowHandle};

use super::WindowRef;

/// One handler plus a counter bumped on every change
pub(crate) struct Slot<F: ?Sized> {
    handler: Option<Box<F>>,
    generation: u64,
}

impl<F: ?Sized> Default for Slot<F> {
    fn default() -> Self {
        Self { handler: None, generation: 0 }
    }
}

impl<F: ?Sized> Slot<F> {
    fn set(&mut self, handler: Box<F>) -> Option<Box<F>> {
        self.generation += 1;
        self.handler.replace(handler)
    }

    fn clear(&mut self) -> Option<Box<F>> {
        self.generation += 1;
        self.handler.take()
    }

    fn is_set(&self) -> bool {
        self.handler.is_some()
    }

    fn take(&mut self) -> Option<(Box<F>, u64)> {
        self.handler.take().map(|handler| (handler, self.generation))
    }

    /// Put a taken handler back; returns it if the slot changed meanwhile
    fn restore(&mut self, handler: Box<F>, generation: u64) -> Option<Box<F>> {
        if self.generation == generation && self.handler.is_none() {
            self.handler = Some(handler);
            None
        } else {
            Some(handler)
        }
    }
}

macro_rules! callback_slots {
    ($(
        $(#[$meta:meta])*
        $kind:ident = $name:literal, $field:ident ($($arg:ty),*), $setter:ident => $native:ident($trampoline:ident);
    )*) => {
        /// The kinds of window callback
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum CallbackKind {
            $( $(#[$meta])* $kind, )*
        }

        impl CallbackKind {
            /// Every kind, in declaration order
            pub const ALL: &'static [CallbackKind] = &[$(CallbackKind::$kind,)*];

            /// The name accepted by [`FromStr`]
            pub fn name(self) -> &'static str {
                match self {
                    $( Self::$kind => $name, )*
                }
            }
        }

        #[derive(Default)]
        pub(crate) struct Callbacks {
            $( $field: Slot<dyn FnMut(&WindowRef $(, $arg)*)>, )*
        }

        impl Callbacks {
            $(
                fn $field(&mut self) -> &mut Slot<dyn FnMut(&WindowRef $(, $arg)*)> {
                    &mut self.$field
                }
            )*

            fn is_set(&self, kind: CallbackKind) -> bool {
                match kind {
                    $( CallbackKind::$kind => self.$field.is_set(), )*
                }
            }
        }

        impl WindowRef {
            $(
                $(#[$meta])*
                ///
                /// Replaces any previous handler of this kind.
                pub fn $setter(&self, handler: impl FnMut(&WindowRef $(, $arg)*) + 'static) -> WindowResult<()> {
                    let handle = self.handle()?;
                    let previous = self.inner().callbacks.borrow_mut().$field.set(Box::new(handler));
                    drop(previous);
                    Ok(self.glfw().api().$native(handle, Some($trampoline))?)
                }
            )*

            /// Remove the handler of `kind` and its native callback
            pub fn unset_callback(&self, kind: CallbackKind) -> WindowResult<()> {
                let handle = self.handle()?;
                match kind {
                    $(
                        CallbackKind::$kind => {
                            let previous = self.inner().callbacks.borrow_mut().$field.clear();
                            drop(previous);
                            self.glfw().api().$native(handle, None)?;
                        }
                    )*
                }
                Ok(())
            }
        }
    };
}

callback_slots! {
    /// A key was pressed, repeated or released
    Key = "key", key(Key, i32, Action, Modifiers), set_key_callback => set_key_callback(key_trampoline);
    /// A Unicode character was typed
    Char = "char", character(char), set_char_callback => set_char_callback(char_trampoline);
    /// The scroll wheel or touchpad scrolled
    Scroll = "scroll", scroll(f64, f64), set_scroll_callback => set_scroll_callback(scroll_trampoline);
    /// The cursor entered or left the client area
    CursorEnter = "cursor_enter", cursor_enter(bool), set_cursor_enter_callback => set_cursor_enter_callback(cursor_enter_trampoline);
    /// The cursor moved
    CursorPos = "cursor_pos", cursor_pos(f64, f64), set_cursor_pos_callback => set_cursor_pos_callback(cursor_pos_trampoline);
    /// A mouse button was pressed or released
    MouseButton = "mouse_button", mouse_button(MouseButton, Action, Modifiers), set_mouse_button_callback => set_mouse_button_callback(mouse_button_trampoline);
    /// The window moved
    WindowPos = "window_pos", window_pos(i32, i32), set_window_pos_callback => set_window_pos_callback(window_pos_trampoline);
    /// The window was resized
    WindowSize = "window_size", window_size(i32, i32), set_window_size_callback => set_window_size_callback(window_size_trampoline);
    /// The user asked to close the window
    WindowClose = "window_close", window_close(), set_window_close_callback => set_window_close_callback(window_close_trampoline);
    /// The client area needs to be redrawn
    WindowRefresh = "window_refresh", window_refresh(), set_window_refresh_callback => set_window_refresh_callback(window_refresh_trampoline);
    /// The window gained or lost focus
    WindowFocus = "window_focus", window_focus(bool), set_window_focus_callback => set_window_focus_callback(window_focus_trampoline);
    /// The window was minimized or restored
    WindowIconify = "window_iconify", window_iconify(bool), set_window_iconify_callback => set_window_iconify_callback(window_iconify_trampoline);
    /// The framebuffer was resized
    FramebufferSize = "framebuffer_size", framebuffer_size(i32, i32), set_framebuffer_size_callback => set_framebuffer_size_callback(framebuffer_size_trampoline);
}

impl fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CallbackKind {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UsageError::UnknownCallback(s.to_string()))
    }
}

impl WindowRef {
    /// Whether a handler of `kind` is installed
    pub fn has_callback(&self, kind: CallbackKind) -> bool {
        self.inner().callbacks.borrow().is_set(kind)
    }
}

/// Route one native notification to its handler
fn dispatch<F: ?Sized>(
    raw: *mut GLFWwindow,
    select: fn(&mut Callbacks) -> &mut Slot<F>,
    invoke: impl FnOnce(&mut F, &WindowRef),
) {
    let Some(handle) = WindowHandle::from_ptr(raw) else {
        return;
    };
    let Some(window) = glfw::with_active(|glfw| glfw.lookup(handle)).flatten() else {
        log::debug!("Dropping notification for unregistered window {:#x}", handle.addr());
        return;
    };

    let taken = select(&mut window.inner().callbacks.borrow_mut()).take();
    let Some((mut handler, generation)) = taken else {
        return;
    };
    slot::guard_callback(|| invoke(&mut *handler, &window));

    let replaced = select(&mut window.inner().callbacks.borrow_mut()).restore(handler, generation);
    drop(replaced);
}

extern "C" fn key_trampoline(window: *mut GLFWwindow, key: c_int, scancode: c_int, action: c_int, mods: c_int) {
    let Some(action) = Action::from_code(action) else {
        return;
    };
    let key = Key::from_code(key);
    let mods = Modifiers::from_code(mods);
    dispatch(window, Callbacks::key, |handler, w| handler(w, key, scancode, action, mods));
}

extern "C" fn char_trampoline(window: *mut GLFWwindow, codepoint: c_uint) {
    let Some(character) = char::from_u32(codepoint) else {
        return;
    };
    dispatch(window, Callbacks::character, |handler, w| handler(w, character));
}

extern "C" fn scroll_trampoline(window: *mut GLFWwindow, dx: c_double, dy: c_double) {
    dispatch(window, Callbacks::scroll, |handler, w| handler(w, dx, dy));
}

extern "C" fn cursor_enter_trampoline(window: *mut GLFWwindow, entered: c_int) {
    dispatch(window, Callbacks::cursor_enter, |handler, w| handler(w, entered != 0));
}

extern "C" fn cursor_pos_trampoline(window: *mut GLFWwindow, x: c_double, y: c_double) {
    dispatch(window, Callbacks::cursor_pos, |handler, w| handler(w, x, y));
}

extern "C" fn mouse_button_trampoline(window: *mut GLFWwindow, button: c_int, action: c_int, mods: c_int) {
    let (Some(button), Some(action)) = (MouseButton::from_code(button), Action::from_code(action)) else {
        return;
    };
    let mods = Modifiers::from_code(mods);
    dispatch(window, Callbacks::mouse_button, |handler, w| handler(w, button, action, mods));
}

extern "C" fn window_pos_trampoline(window: *mut GLFWwindow, x: c_int, y: c_int) {
    dispatch(window, Callbacks::window_pos, |handler, w| handler(w, x, y));
}

extern "C" fn window_size_trampoline(window: *mut GLFWwindow, width: c_int, height: c_int) {
    dispatch(window, Callbacks::window_size, |handler, w| handler(w, width, height));
}

extern "C" fn window_close_trampoline(window: *mut GLFWwindow) {
    dispatch(window, Callbacks::window_close, |handler, w| handler(w));
}

extern "C" fn window_refresh_trampoline(window: *mut GLFWwindow) {
    dispatch(window, Callbacks::window_refresh, |handler, w| handler(w));
}

extern "C" fn window_focus_trampoline(window: *mut GLFWwindow, focused: c_int) {
    dispatch(window, Callbacks::window_focus, |handler, w| handler(w, focused != 0));
}

extern "C" fn window_iconify_trampoline(window: *mut GLFWwindow, iconified: c_int) {
    dispatch(window, Callbacks::window_iconify, |handler, w| handler(w, iconified != 0));
}

extern "C" fn framebuffer_size_trampoline(window: *mut GLFWwindow, width: c_int, height: c_int) {
    dispatch(window, Callbacks::framebuffer_size, |handler, w| handler(w, width, height));
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::panic::{self, AssertUnwindSafe};
    use std::rc::Rc;

    use super::*;
    use crate::glfw::Glfw;
    use crate::native::consts::{GLFW_PRESS, GLFW_RELEASE, GLFW_MOD_CONTROL};
    use crate::native::headless::{Headless, NativeEvent};
    use crate::window::{Window, WindowBuilder};

    fn setup() -> (Headless, Glfw, Window) {
        let headless = Headless::new();
        let glfw = Glfw::init(headless.clone()).unwrap();
        let window = WindowBuilder::new(&glfw, 100, 100, "callbacks").build().unwrap();
        (headless, glfw, window)
    }

    #[test]
    fn test_names_parse() {
        for kind in CallbackKind::ALL {
            assert_eq!(kind.name().parse::<CallbackKind>(), Ok(*kind));
        }
        assert_eq!(CallbackKind::ALL.len(), 13);
        assert_eq!(
            "window_mvoe".parse::<CallbackKind>(),
            Err(UsageError::UnknownCallback("window_mvoe".to_string()))
        );
    }

    #[test]
    fn test_key_handler_receives_decoded_arguments() {
        let (headless, glfw, window) = setup();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let expected = window.to_ref();
        window
            .set_key_callback(move |w, key, scancode, action, mods| {
                assert_eq!(w, &expected);
                log.borrow_mut().push((key, scancode, action, mods));
            })
            .unwrap();

        let handle = window.handle().unwrap();
        headless.queue_event(handle, NativeEvent::Key { key: 65, scancode: 38, action: GLFW_PRESS, mods: GLFW_MOD_CONTROL });
        headless.queue_event(handle, NativeEvent::Key { key: 9999, scancode: 0, action: GLFW_RELEASE, mods: 0 });
        glfw.poll_events().unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                (Key::A, 38, Action::Press, Modifiers::CONTROL),
                (Key::Unknown, 0, Action::Release, Modifiers::empty()),
            ]
        );
    }

    #[test]
    fn test_char_and_flags_decoded() {
        let (headless, glfw, window) = setup();
        let chars = Rc::new(RefCell::new(String::new()));
        let focus = Rc::new(Cell::new(None));
        let typed = Rc::clone(&chars);
        let focused = Rc::clone(&focus);
        window.set_char_callback(move |_, c| typed.borrow_mut().push(c)).unwrap();
        window.set_window_focus_callback(move |_, f| focused.set(Some(f))).unwrap();

        let handle = window.handle().unwrap();
        headless.queue_event(handle, NativeEvent::Char(u32::from('é')));
        headless.queue_event(handle, NativeEvent::Char(0xD800));
        headless.queue_event(handle, NativeEvent::WindowFocus(false));
        glfw.poll_events().unwrap();

        assert_eq!(*chars.borrow(), "é");
        assert_eq!(focus.get(), Some(false));
    }

    #[test]
    fn test_replace_and_unset() {
        let (headless, glfw, window) = setup();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let a = Rc::clone(&first);
        let b = Rc::clone(&second);
        window.set_scroll_callback(move |_, _, _| a.set(a.get() + 1)).unwrap();
        window.set_scroll_callback(move |_, _, _| b.set(b.get() + 1)).unwrap();

        let handle = window.handle().unwrap();
        assert_eq!(headless.installed_callbacks(handle), 1);
        headless.queue_event(handle, NativeEvent::Scroll(0.0, 1.0));
        glfw.poll_events().unwrap();
        assert_eq!((first.get(), second.get()), (0, 1));

        window.unset_callback(CallbackKind::Scroll).unwrap();
        assert!(!window.has_callback(CallbackKind::Scroll));
        assert_eq!(headless.installed_callbacks(handle), 0);
        headless.queue_event(handle, NativeEvent::Scroll(0.0, 1.0));
        glfw.poll_events().unwrap();
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_handler_can_unset_itself() {
        let (headless, glfw, window) = setup();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        window
            .set_window_refresh_callback(move |w| {
                counter.set(counter.get() + 1);
                w.unset_callback(CallbackKind::WindowRefresh).unwrap();
            })
            .unwrap();

        let handle = window.handle().unwrap();
        headless.queue_event(handle, NativeEvent::WindowRefresh);
        headless.queue_event(handle, NativeEvent::WindowRefresh);
        glfw.poll_events().unwrap();

        assert_eq!(calls.get(), 1);
        assert!(!window.has_callback(CallbackKind::WindowRefresh));
    }

    #[test]
    fn test_handler_panic_resurfaces_and_handler_survives() {
        let (headless, glfw, window) = setup();
        window.set_window_close_callback(|_| panic!("close handler")).unwrap();
        headless.queue_event(window.handle().unwrap(), NativeEvent::WindowClose);

        let result = panic::catch_unwind(AssertUnwindSafe(|| glfw.poll_events()));
        assert!(result.is_err());
        assert!(window.has_callback(CallbackKind::WindowClose));
    }

    #[test]
    fn test_stale_handle_is_ignored() {
        // No library instance on this thread
        window_close_trampoline(0x40 as *mut GLFWwindow);

        let (_headless, _glfw, window) = setup();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        window.set_window_close_callback(move |_| counter.set(counter.get() + 1)).unwrap();
        let handle = window.handle().unwrap();
        window.close().unwrap();

        window_close_trampoline(handle.as_ptr());
        window_close_trampoline(std::ptr::null_mut());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_closed_window_rejects_setters() {
        let (_headless, _glfw, window) = setup();
        let reference = window.to_ref();
        window.close().unwrap();
        assert!(reference.set_window_pos_callback(|_, _, _| {}).is_err());
        assert!(reference.unset_callback(CallbackKind::WindowPos).is_err());
    }
}
