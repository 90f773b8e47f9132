//! Windows and their OpenGL contexts
//!
//! [`Window`] owns one native window and destroys it when closed or dropped.
//! [`WindowRef`] is a cheap, cloneable reference to the same window, handed
//! to callbacks and kept by anything that needs to refer back to it. Once the
//! owner is closed, every operation through a surviving `WindowRef` fails
//! with [`UsageError::WindowClosed`].

use std::cell::{Cell, RefCell};
use std::ffi::c_int;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::config::WindowOptions;
use crate::error::{GlfwError, UsageError, WindowResult};
use crate::glfw::Glfw;
use crate::hints::{ClientApi, ContextRobustness, Hints, OpenGlProfile};
use crate::input::{Action, CursorMode, Key, MouseButton};
use crate::monitor::Monitor;
use crate::native::consts::*;
use crate::native::WindowHandle;

pub mod callbacks;
pub mod context;
pub mod managed;
pub(crate) mod registry;

pub use callbacks::CallbackKind;
pub use context::ContextGuard;
pub use managed::ManagedWindow;
pub use registry::WindowId;

use callbacks::Callbacks;

pub(crate) struct WindowInner {
    glfw: Glfw,
    handle: Cell<Option<WindowHandle>>,
    id: WindowId,
    title: RefCell<String>,
    pub(crate) callbacks: RefCell<Callbacks>,
}

/// A shared reference to a window
///
/// Equality is identity: two references are equal when they refer to the
/// same window.
#[derive(Clone)]
pub struct WindowRef {
    inner: Rc<WindowInner>,
}

impl WindowRef {
    pub(crate) fn from_inner(inner: Rc<WindowInner>) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &WindowInner {
        &self.inner
    }

    /// Native handle, or [`UsageError::WindowClosed`]
    pub fn handle(&self) -> WindowResult<WindowHandle> {
        self.inner.handle.get().ok_or_else(|| UsageError::WindowClosed.into())
    }

    /// Identity that stays unique even when the native handle is reused
    pub fn id(&self) -> WindowId {
        self.inner.id
    }

    /// Whether the owning [`Window`] has been closed
    pub fn is_closed(&self) -> bool {
        self.inner.handle.get().is_none()
    }

    /// The library instance this window belongs to
    pub fn glfw(&self) -> &Glfw {
        &self.inner.glfw
    }

    fn api(&self) -> &crate::binding::Api {
        self.inner.glfw.api()
    }

    fn attrib(&self, attrib: c_int) -> WindowResult<c_int> {
        let handle = self.handle()?;
        Ok(self.api().window_attrib(handle, attrib)?)
    }

    fn attrib_bool(&self, attrib: c_int) -> WindowResult<bool> {
        Ok(self.attrib(attrib)? != GLFW_FALSE)
    }

    fn input_mode(&self, mode: c_int) -> WindowResult<c_int> {
        let handle = self.handle()?;
        Ok(self.api().input_mode(handle, mode)?)
    }

    fn set_input_mode(&self, mode: c_int, value: c_int) -> WindowResult<()> {
        let handle = self.handle()?;
        Ok(self.api().set_input_mode(handle, mode, value)?)
    }

    // ---- context ----

    /// Make this window's context current on the calling thread
    ///
    /// Not allowed while a [`ContextGuard`] is alive on this thread.
    pub fn make_current(&self) -> WindowResult<()> {
        context::ensure_unscoped()?;
        let handle = self.handle()?;
        Ok(self.api().make_context_current(Some(handle))?)
    }

    /// Make this window's context current until the guard is dropped
    pub fn make_current_scoped(&self) -> WindowResult<ContextGuard> {
        ContextGuard::enter(self)
    }

    /// Whether this window's context is current on the calling thread
    pub fn is_current(&self) -> WindowResult<bool> {
        let handle = self.handle()?;
        Ok(self.api().current_context()? == Some(handle))
    }

    /// Swap the front and back buffers
    pub fn swap_buffers(&self) -> WindowResult<()> {
        let handle = self.handle()?;
        Ok(self.api().swap_buffers(handle)?)
    }

    /// Number of screen updates to wait for before swapping
    ///
    /// Applies to this window's context, which is made current for the
    /// duration of the call.
    pub fn set_swap_interval(&self, interval: i32) -> WindowResult<()> {
        let _guard = self.make_current_scoped()?;
        Ok(self.api().swap_interval(interval)?)
    }

    /// `(major, minor, revision)` of the context
    pub fn context_version(&self) -> WindowResult<(i32, i32, i32)> {
        Ok((
            self.attrib(GLFW_CONTEXT_VERSION_MAJOR)?,
            self.attrib(GLFW_CONTEXT_VERSION_MINOR)?,
            self.attrib(GLFW_CONTEXT_REVISION)?,
        ))
    }

    /// API the context was created for
    pub fn client_api(&self) -> WindowResult<ClientApi> {
        let code = self.attrib(GLFW_CLIENT_API)?;
        ClientApi::from_code(code)
            .ok_or_else(|| GlfwError::InvalidEnum(format!("unexpected client API {code:#x}")).into())
    }

    /// Profile of the context
    pub fn opengl_profile(&self) -> WindowResult<OpenGlProfile> {
        let code = self.attrib(GLFW_OPENGL_PROFILE)?;
        OpenGlProfile::from_code(code)
            .ok_or_else(|| GlfwError::InvalidEnum(format!("unexpected OpenGL profile {code:#x}")).into())
    }

    /// Robustness strategy of the context
    pub fn context_robustness(&self) -> WindowResult<ContextRobustness> {
        let code = self.attrib(GLFW_CONTEXT_ROBUSTNESS)?;
        ContextRobustness::from_code(code)
            .ok_or_else(|| GlfwError::InvalidEnum(format!("unexpected context robustness {code:#x}")).into())
    }

    /// Whether the context is a debug context
    pub fn is_debug_context(&self) -> WindowResult<bool> {
        self.attrib_bool(GLFW_OPENGL_DEBUG_CONTEXT)
    }

    /// Whether the context is forward-compatible
    pub fn is_forward_compat(&self) -> WindowResult<bool> {
        self.attrib_bool(GLFW_OPENGL_FORWARD_COMPAT)
    }

    // ---- window state ----

    /// Whether the close flag is set
    pub fn should_close(&self) -> WindowResult<bool> {
        let handle = self.handle()?;
        Ok(self.api().window_should_close(handle)?)
    }

    /// Set or clear the close flag
    pub fn set_should_close(&self, value: bool) -> WindowResult<()> {
        let handle = self.handle()?;
        Ok(self.api().set_window_should_close(handle, value)?)
    }

    /// Ask the window to close at the end of the current frame
    pub fn quit(&self) -> WindowResult<()> {
        self.set_should_close(true)
    }

    /// The title last set through this binding
    pub fn title(&self) -> String {
        self.inner.title.borrow().clone()
    }

    /// Change the title
    pub fn set_title(&self, title: &str) -> WindowResult<()> {
        let handle = self.handle()?;
        self.api().set_window_title(handle, title)?;
        *self.inner.title.borrow_mut() = title.to_string();
        Ok(())
    }

    /// Position of the client area's top-left corner
    pub fn pos(&self) -> WindowResult<(i32, i32)> {
        let handle = self.handle()?;
        Ok(self.api().window_pos(handle)?)
    }

    /// Move the client area
    pub fn set_pos(&self, x: i32, y: i32) -> WindowResult<()> {
        let handle = self.handle()?;
        Ok(self.api().set_window_pos(handle, x, y)?)
    }

    /// Size of the client area in screen coordinates
    pub fn size(&self) -> WindowResult<(i32, i32)> {
        let handle = self.handle()?;
        Ok(self.api().window_size(handle)?)
    }

    /// Resize the client area
    pub fn set_size(&self, width: i32, height: i32) -> WindowResult<()> {
        let handle = self.handle()?;
        Ok(self.api().set_window_size(handle, width, height)?)
    }

    /// Size of the framebuffer in pixels
    pub fn framebuffer_size(&self) -> WindowResult<(i32, i32)> {
        let handle = self.handle()?;
        Ok(self.api().framebuffer_size(handle)?)
    }

    /// Minimize the window
    pub fn iconify(&self) -> WindowResult<()> {
        let handle = self.handle()?;
        Ok(self.api().iconify_window(handle)?)
    }

    /// Restore a minimized window
    pub fn restore(&self) -> WindowResult<()> {
        let handle = self.handle()?;
        Ok(self.api().restore_window(handle)?)
    }

    /// Whether the window is minimized
    pub fn is_iconified(&self) -> WindowResult<bool> {
        self.attrib_bool(GLFW_ICONIFIED)
    }

    /// Make the window visible
    pub fn show(&self) -> WindowResult<()> {
        let handle = self.handle()?;
        Ok(self.api().show_window(handle)?)
    }

    /// Hide the window
    pub fn hide(&self) -> WindowResult<()> {
        let handle = self.handle()?;
        Ok(self.api().hide_window(handle)?)
    }

    /// Whether the window is visible
    pub fn is_visible(&self) -> WindowResult<bool> {
        self.attrib_bool(GLFW_VISIBLE)
    }

    /// Whether the window has input focus
    pub fn has_focus(&self) -> WindowResult<bool> {
        self.attrib_bool(GLFW_FOCUSED)
    }

    /// Whether the user can resize the window
    pub fn is_resizable(&self) -> WindowResult<bool> {
        self.attrib_bool(GLFW_RESIZABLE)
    }

    /// Whether the window has decorations
    pub fn is_decorated(&self) -> WindowResult<bool> {
        self.attrib_bool(GLFW_DECORATED)
    }

    /// The monitor of a full screen window
    pub fn monitor(&self) -> WindowResult<Option<Monitor>> {
        let handle = self.handle()?;
        let monitor = self.api().window_monitor(handle)?;
        Ok(monitor.map(|m| Monitor::new(m, self.glfw().clone())))
    }

    // ---- clipboard ----

    /// Clipboard contents, `None` when it holds no text
    pub fn clipboard(&self) -> WindowResult<Option<String>> {
        let handle = self.handle()?;
        match self.api().clipboard(handle) {
            Ok(text) => Ok(text),
            Err(GlfwError::FormatUnavailable(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the clipboard contents
    pub fn set_clipboard(&self, text: &str) -> WindowResult<()> {
        let handle = self.handle()?;
        Ok(self.api().set_clipboard(handle, text)?)
    }

    // ---- input ----

    /// How the cursor behaves over this window
    pub fn cursor_mode(&self) -> WindowResult<CursorMode> {
        let code = self.input_mode(GLFW_CURSOR)?;
        CursorMode::from_code(code)
            .ok_or_else(|| GlfwError::InvalidEnum(format!("unexpected cursor mode {code:#x}")).into())
    }

    /// Change the cursor behaviour
    pub fn set_cursor_mode(&self, mode: CursorMode) -> WindowResult<()> {
        self.set_input_mode(GLFW_CURSOR, mode.code())
    }

    /// Whether key presses are remembered until polled
    pub fn sticky_keys(&self) -> WindowResult<bool> {
        Ok(self.input_mode(GLFW_STICKY_KEYS)? != GLFW_FALSE)
    }

    /// Enable or disable sticky keys
    pub fn set_sticky_keys(&self, value: bool) -> WindowResult<()> {
        self.set_input_mode(GLFW_STICKY_KEYS, c_int::from(value))
    }

    /// Whether button presses are remembered until polled
    pub fn sticky_mouse_buttons(&self) -> WindowResult<bool> {
        Ok(self.input_mode(GLFW_STICKY_MOUSE_BUTTONS)? != GLFW_FALSE)
    }

    /// Enable or disable sticky mouse buttons
    pub fn set_sticky_mouse_buttons(&self, value: bool) -> WindowResult<()> {
        self.set_input_mode(GLFW_STICKY_MOUSE_BUTTONS, c_int::from(value))
    }

    /// Cursor position relative to the client area
    pub fn cursor_pos(&self) -> WindowResult<(f64, f64)> {
        let handle = self.handle()?;
        Ok(self.api().cursor_pos(handle)?)
    }

    /// Move the cursor
    pub fn set_cursor_pos(&self, x: f64, y: f64) -> WindowResult<()> {
        let handle = self.handle()?;
        Ok(self.api().set_cursor_pos(handle, x, y)?)
    }

    /// Last reported state of a key, press or release
    pub fn key(&self, key: Key) -> WindowResult<Action> {
        let handle = self.handle()?;
        let state = self.api().key(handle, key.code())?;
        Ok(Action::from_code(state).unwrap_or(Action::Release))
    }

    /// Last reported state of a mouse button, press or release
    pub fn mouse_button(&self, button: MouseButton) -> WindowResult<Action> {
        let handle = self.handle()?;
        let state = self.api().mouse_button(handle, button.code())?;
        Ok(Action::from_code(state).unwrap_or(Action::Release))
    }

    /// Every mouse button currently held down
    pub fn pressed_mouse_buttons(&self) -> WindowResult<Vec<MouseButton>> {
        let mut pressed = Vec::new();
        for button in MouseButton::ALL {
            if self.mouse_button(button)?.is_down() {
                pressed.push(button);
            }
        }
        Ok(pressed)
    }
}

impl PartialEq for WindowRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for WindowRef {}

impl fmt::Debug for WindowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowRef")
            .field("id", &self.inner.id)
            .field("handle", &self.inner.handle.get())
            .field("title", &self.inner.title.borrow())
            .finish()
    }
}

/// An open window, destroyed when closed or dropped
pub struct Window {
    window: WindowRef,
}

impl Window {
    /// A reference that can outlive this owner
    pub fn to_ref(&self) -> WindowRef {
        self.window.clone()
    }

    /// Destroy the native window
    ///
    /// The window is unregistered before it is destroyed, so no callback
    /// can reach it while the library tears it down.
    pub fn close(self) -> WindowResult<()> {
        self.window.close_native()
    }
}

impl WindowRef {
    fn close_native(&self) -> WindowResult<()> {
        let Some(handle) = self.inner.handle.take() else {
            return Ok(());
        };
        self.glfw().registry().borrow_mut().remove(handle);
        // Handlers may hold references back to this window
        let handlers = std::mem::take(&mut *self.inner.callbacks.borrow_mut());
        let result = self.api().destroy_window(handle);
        drop(handlers);
        log::debug!("Closed window {:?} ({:#x})", self.inner.title.borrow(), handle.addr());
        Ok(result?)
    }
}

impl Deref for Window {
    type Target = WindowRef;

    fn deref(&self) -> &WindowRef {
        &self.window
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if let Err(e) = self.window.close_native() {
            log::warn!("Failed to destroy window: {e}");
        }
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Window").field(&self.window).finish()
    }
}

/// Configures and creates a [`Window`]
pub struct WindowBuilder<'g> {
    glfw: &'g Glfw,
    width: i32,
    height: i32,
    title: String,
    monitor: Option<Monitor>,
    share: Option<WindowRef>,
    hints: Hints,
}

impl<'g> WindowBuilder<'g> {
    /// A windowed-mode window with library default hints
    pub fn new(glfw: &'g Glfw, width: i32, height: i32, title: &str) -> Self {
        Self {
            glfw,
            width,
            height,
            title: title.to_string(),
            monitor: None,
            share: None,
            hints: Hints::new(),
        }
    }

    /// Create the window full screen on `monitor`
    pub fn monitor(mut self, monitor: Option<&Monitor>) -> Self {
        self.monitor = monitor.cloned();
        self
    }

    /// Share OpenGL objects with `window`'s context
    pub fn shared(mut self, window: Option<&WindowRef>) -> Self {
        self.share = window.cloned();
        self
    }

    /// Replace the creation hints
    pub fn hints(mut self, hints: Hints) -> Self {
        self.hints = hints;
        self
    }

    /// Apply window options on top of the current hints
    pub fn options(mut self, options: &WindowOptions) -> Self {
        self.hints.merge(&options.to_hints());
        self
    }

    /// The hints that will be applied
    pub fn hints_mut(&mut self) -> &mut Hints {
        &mut self.hints
    }

    /// Create the window and make its context current
    pub fn build(self) -> WindowResult<Window> {
        let api = self.glfw.api();
        self.hints.apply(api)?;

        let monitor = self.monitor.as_ref().map(Monitor::handle);
        let share = self.share.as_ref().map(WindowRef::handle).transpose()?;
        let handle = api
            .create_window(self.width, self.height, &self.title, monitor, share)?
            .ok_or(UsageError::NullWindow)?;

        let glfw = self.glfw.clone();
        let inner = Rc::new_cyclic(|weak| {
            let id = glfw.registry().borrow_mut().insert(handle, weak.clone());
            WindowInner {
                glfw: glfw.clone(),
                handle: Cell::new(Some(handle)),
                id,
                title: RefCell::new(self.title.clone()),
                callbacks: RefCell::new(Callbacks::default()),
            }
        });
        let window = Window { window: WindowRef::from_inner(inner) };

        api.make_context_current(Some(handle))?;
        log::debug!(
            "Created window {:?} {}x{} ({:#x})",
            self.title,
            self.width,
            self.height,
            handle.addr()
        );
        Ok(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WindowError;
    use crate::hints::Hint;
    use crate::native::headless::{Headless, NativeEvent};

    fn setup() -> (Headless, Glfw) {
        let headless = Headless::new();
        let glfw = Glfw::init(headless.clone()).unwrap();
        (headless, glfw)
    }

    #[test]
    fn test_build_registers_and_makes_current() {
        let (headless, glfw) = setup();
        let window = WindowBuilder::new(&glfw, 640, 480, "main").build().unwrap();

        assert_eq!(headless.window_count(), 1);
        assert_eq!(headless.current_window(), Some(window.handle().unwrap()));
        assert_eq!(glfw.lookup(window.handle().unwrap()).as_ref(), Some(&*window));
        assert_eq!(window.size().unwrap(), (640, 480));
        assert_eq!(window.title(), "main");
    }

    #[test]
    fn test_hints_applied_before_creation() {
        let (headless, glfw) = setup();
        let mut hints = Hints::new();
        hints.context_version(3, 2).opengl_profile(OpenGlProfile::Core).samples(4);
        let window = WindowBuilder::new(&glfw, 64, 64, "hinted").hints(hints).build().unwrap();

        let applied = headless.last_window_hints();
        assert_eq!(applied.get(&Hint::Samples.code()), Some(&4));
        assert_eq!(window.context_version().unwrap(), (3, 2, 0));
        assert_eq!(window.opengl_profile().unwrap(), OpenGlProfile::Core);
        assert_eq!(headless.hint_resets(), 1);
    }

    #[test]
    fn test_native_failure_propagates() {
        let (headless, glfw) = setup();
        headless.fail_next_window(GLFW_PLATFORM_ERROR);
        let error = WindowBuilder::new(&glfw, 64, 64, "broken").build().unwrap_err();
        assert!(matches!(error.as_glfw(), Some(GlfwError::PlatformError(_))));

        let error = WindowBuilder::new(&glfw, 0, 64, "empty").build().unwrap_err();
        assert!(matches!(error.as_glfw(), Some(GlfwError::InvalidValue(_))));
        assert_eq!(headless.window_count(), 0);
    }

    #[test]
    fn test_closed_window_reports_usage_error() {
        let (headless, glfw) = setup();
        let window = WindowBuilder::new(&glfw, 64, 64, "short").build().unwrap();
        let handle = window.handle().unwrap();
        let reference = window.to_ref();

        window.close().unwrap();
        assert_eq!(headless.window_count(), 0);
        assert!(reference.is_closed());
        assert!(glfw.lookup(handle).is_none());
        assert!(matches!(reference.size(), Err(WindowError::Usage(UsageError::WindowClosed))));
        assert!(matches!(reference.make_current(), Err(WindowError::Usage(UsageError::WindowClosed))));
    }

    #[test]
    fn test_drop_destroys() {
        let (headless, glfw) = setup();
        {
            let _window = WindowBuilder::new(&glfw, 64, 64, "scoped").build().unwrap();
            assert_eq!(headless.window_count(), 1);
        }
        assert_eq!(headless.window_count(), 0);
    }

    #[test]
    fn test_setters_then_getters() {
        let (headless, glfw) = setup();
        let window = WindowBuilder::new(&glfw, 64, 64, "props").build().unwrap();

        window.set_pos(10, 20).unwrap();
        window.set_pos(10, 20).unwrap();
        assert_eq!(window.pos().unwrap(), (10, 20));

        window.set_size(300, 200).unwrap();
        assert_eq!(window.size().unwrap(), (300, 200));
        assert_eq!(window.framebuffer_size().unwrap(), (300, 200));

        window.set_title("renamed").unwrap();
        assert_eq!(window.title(), "renamed");
        assert_eq!(headless.title_of(window.handle().unwrap()).as_deref(), Some("renamed"));

        window.set_should_close(true).unwrap();
        assert!(window.should_close().unwrap());
        window.set_should_close(false).unwrap();
        assert!(!window.should_close().unwrap());
        window.quit().unwrap();
        assert!(window.should_close().unwrap());
    }

    #[test]
    fn test_visibility_and_iconify() {
        let (_headless, glfw) = setup();
        let mut hints = Hints::new();
        hints.visible(false).resizable(false).decorated(false);
        let window = WindowBuilder::new(&glfw, 64, 64, "flags").hints(hints).build().unwrap();

        assert!(!window.is_visible().unwrap());
        assert!(!window.is_resizable().unwrap());
        assert!(!window.is_decorated().unwrap());
        window.show().unwrap();
        assert!(window.is_visible().unwrap());
        window.hide().unwrap();
        assert!(!window.is_visible().unwrap());

        window.iconify().unwrap();
        assert!(window.is_iconified().unwrap());
        window.restore().unwrap();
        assert!(!window.is_iconified().unwrap());
    }

    #[test]
    fn test_context_attributes() {
        let (_headless, glfw) = setup();
        let mut hints = Hints::new();
        hints
            .context_version(3, 3)
            .forward_compat(true)
            .debug_context(true)
            .context_robustness(ContextRobustness::LoseContextOnReset);
        let window = WindowBuilder::new(&glfw, 64, 64, "ctx").hints(hints).build().unwrap();

        assert_eq!(window.client_api().unwrap(), ClientApi::OpenGl);
        assert!(window.is_forward_compat().unwrap());
        assert!(window.is_debug_context().unwrap());
        assert_eq!(window.context_robustness().unwrap(), ContextRobustness::LoseContextOnReset);
        assert_eq!(window.opengl_profile().unwrap(), OpenGlProfile::Any);
        assert!(window.monitor().unwrap().is_none());
    }

    #[test]
    fn test_cursor_and_input_modes() {
        let (_headless, glfw) = setup();
        let window = WindowBuilder::new(&glfw, 64, 64, "input").build().unwrap();

        assert_eq!(window.cursor_mode().unwrap(), CursorMode::Normal);
        window.set_cursor_mode(CursorMode::Disabled).unwrap();
        assert_eq!(window.cursor_mode().unwrap(), CursorMode::Disabled);

        window.set_sticky_keys(true).unwrap();
        assert!(window.sticky_keys().unwrap());
        window.set_sticky_mouse_buttons(true).unwrap();
        assert!(window.sticky_mouse_buttons().unwrap());

        window.set_cursor_pos(12.5, 7.0).unwrap();
        assert_eq!(window.cursor_pos().unwrap(), (12.5, 7.0));
    }

    #[test]
    fn test_key_and_button_state() {
        let (headless, glfw) = setup();
        let window = WindowBuilder::new(&glfw, 64, 64, "keys").build().unwrap();
        let handle = window.handle().unwrap();

        headless.queue_event(handle, NativeEvent::Key { key: Key::W.code(), scancode: 25, action: GLFW_PRESS, mods: 0 });
        headless.queue_event(
            handle,
            NativeEvent::MouseButton { button: MouseButton::RIGHT.code(), action: GLFW_PRESS, mods: 0 },
        );
        assert_eq!(window.key(Key::W).unwrap(), Action::Release);
        glfw.poll_events().unwrap();

        assert_eq!(window.key(Key::W).unwrap(), Action::Press);
        assert_eq!(window.mouse_button(MouseButton::RIGHT).unwrap(), Action::Press);
        assert_eq!(window.pressed_mouse_buttons().unwrap(), vec![MouseButton::RIGHT]);

        let error = window.key(Key::Unknown).unwrap_err();
        assert!(matches!(error.as_glfw(), Some(GlfwError::InvalidEnum(_))));
    }

    #[test]
    fn test_clipboard() {
        let (_headless, glfw) = setup();
        let window = WindowBuilder::new(&glfw, 64, 64, "clip").build().unwrap();
        assert_eq!(window.clipboard().unwrap(), None);
        window.set_clipboard("copied").unwrap();
        assert_eq!(window.clipboard().unwrap().as_deref(), Some("copied"));
    }

    #[test]
    fn test_swap_interval_restores_context() {
        let (headless, glfw) = setup();
        let a = WindowBuilder::new(&glfw, 64, 64, "a").build().unwrap();
        let b = WindowBuilder::new(&glfw, 64, 64, "b").build().unwrap();
        assert!(b.is_current().unwrap());

        a.set_swap_interval(1).unwrap();
        assert_eq!(headless.current_swap_interval(), Some(1));
        assert!(b.is_current().unwrap());

        a.swap_buffers().unwrap();
        a.swap_buffers().unwrap();
        assert_eq!(headless.swap_count(a.handle().unwrap()), 2);
    }

    #[test]
    fn test_shared_context_requires_open_window() {
        let (_headless, glfw) = setup();
        let first = WindowBuilder::new(&glfw, 64, 64, "first").build().unwrap();
        let reference = first.to_ref();
        let second = WindowBuilder::new(&glfw, 64, 64, "second")
            .shared(Some(&reference))
            .build()
            .unwrap();
        assert_ne!(first.id(), second.id());

        first.close().unwrap();
        let error = WindowBuilder::new(&glfw, 64, 64, "third").shared(Some(&reference)).build().unwrap_err();
        assert!(matches!(error, WindowError::Usage(UsageError::WindowClosed)));
    }

    #[test]
    fn test_full_screen_on_monitor() {
        let (_headless, glfw) = setup();
        let monitor = glfw.primary_monitor().unwrap().unwrap();
        let window = WindowBuilder::new(&glfw, 1920, 1080, "full")
            .monitor(Some(&monitor))
            .build()
            .unwrap();
        assert_eq!(window.monitor().unwrap(), Some(monitor));
    }
}
