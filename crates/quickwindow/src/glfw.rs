//! The library instance
//!
//! [`Glfw`] owns the native function table for the lifetime of the library:
//! it initializes GLFW on creation and terminates it once the last clone and
//! the last window are gone. Everything native is confined to the thread
//! that created it.

use std::cell::RefCell;
use std::ffi::{c_int, c_void};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::binding::{slot, Api};
use crate::error::{GlfwError, UsageError, WindowResult};
use crate::input::Joystick;
use crate::monitor::{Monitor, MonitorEvent};
use crate::native::{GLFWmonitor, GlfwLibrary, MonitorHandle, NativeApi, WindowHandle};
use crate::window::context;
use crate::window::registry::Registry;
use crate::window::{WindowInner, WindowRef};

type MonitorHandler = Box<dyn FnMut(&Monitor, MonitorEvent)>;

pub(crate) struct GlfwInner {
    api: Api,
    pub(crate) registry: RefCell<Registry<WindowInner>>,
    monitor_handler: RefCell<Option<MonitorHandler>>,
}

thread_local! {
    static ACTIVE: RefCell<Weak<GlfwInner>> = const { RefCell::new(Weak::new()) };
}

/// Run `f` against the library instance initialized on this thread
pub(crate) fn with_active<R>(f: impl FnOnce(&Glfw) -> R) -> Option<R> {
    let inner = ACTIVE.with(|active| active.borrow().upgrade())?;
    Some(f(&Glfw { inner }))
}

/// An initialized GLFW library
///
/// Cloning is cheap and yields another handle to the same instance.
#[derive(Clone)]
pub struct Glfw {
    inner: Rc<GlfwInner>,
}

impl Glfw {
    /// Load the system GLFW library and initialize it
    pub fn load() -> WindowResult<Self> {
        Self::init(GlfwLibrary::load()?)
    }

    /// Initialize GLFW through an explicit native table
    ///
    /// Only one instance may be alive per thread.
    pub fn init(native: impl NativeApi + 'static) -> WindowResult<Self> {
        if with_active(|_| ()).is_some() {
            return Err(UsageError::AlreadyInitialized.into());
        }

        let api = Api::new(native);
        if !api.init()? {
            return Err(GlfwError::PlatformError("glfwInit failed".to_string()).into());
        }

        let inner = Rc::new(GlfwInner {
            api,
            registry: RefCell::new(Registry::new()),
            monitor_handler: RefCell::new(None),
        });
        ACTIVE.with(|active| *active.borrow_mut() = Rc::downgrade(&inner));

        let glfw = Self { inner };
        log::info!("GLFW {} initialized", glfw.version_string()?);
        Ok(glfw)
    }

    pub(crate) fn api(&self) -> &Api {
        &self.inner.api
    }

    pub(crate) fn registry(&self) -> &RefCell<Registry<WindowInner>> {
        &self.inner.registry
    }

    /// Whether two handles refer to the same instance
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// `(major, minor, revision)` of the loaded library
    pub fn version(&self) -> WindowResult<(i32, i32, i32)> {
        Ok(self.api().version()?)
    }

    /// Compile-time configuration string of the loaded library
    pub fn version_string(&self) -> WindowResult<String> {
        Ok(self.api().version_string()?)
    }

    /// Seconds since initialization, unless reset with [`Glfw::set_time`]
    pub fn time(&self) -> WindowResult<f64> {
        Ok(self.api().time()?)
    }

    /// Reset the library timer
    pub fn set_time(&self, time: f64) -> WindowResult<()> {
        Ok(self.api().set_time(time)?)
    }

    /// Process pending events and return immediately
    ///
    /// Window and monitor callbacks run inside this call.
    pub fn poll_events(&self) -> WindowResult<()> {
        Ok(self.api().poll_events()?)
    }

    /// Block until at least one event is available, then process it
    pub fn wait_events(&self) -> WindowResult<()> {
        Ok(self.api().wait_events()?)
    }

    /// Whether the current context supports an OpenGL extension
    pub fn extension_supported(&self, extension: &str) -> WindowResult<bool> {
        Ok(self.api().extension_supported(extension)?)
    }

    /// Address of an OpenGL function for the current context
    pub fn proc_address(&self, name: &str) -> WindowResult<*const c_void> {
        Ok(self.api().proc_address(name)?)
    }

    /// Every connected monitor, primary first
    pub fn monitors(&self) -> WindowResult<Vec<Monitor>> {
        Ok(self
            .api()
            .monitors()?
            .into_iter()
            .map(|handle| Monitor::new(handle, self.clone()))
            .collect())
    }

    /// The primary monitor, if any monitor is connected
    pub fn primary_monitor(&self) -> WindowResult<Option<Monitor>> {
        Ok(self.api().primary_monitor()?.map(|handle| Monitor::new(handle, self.clone())))
    }

    /// Be told when monitors are connected or disconnected
    pub fn set_monitor_callback(&self, handler: impl FnMut(&Monitor, MonitorEvent) + 'static) -> WindowResult<()> {
        *self.inner.monitor_handler.borrow_mut() = Some(Box::new(handler));
        Ok(self.api().set_monitor_callback(Some(monitor_trampoline))?)
    }

    /// Remove the monitor callback
    pub fn unset_monitor_callback(&self) -> WindowResult<()> {
        self.inner.monitor_handler.borrow_mut().take();
        Ok(self.api().set_monitor_callback(None)?)
    }

    /// The window whose context is current on this thread
    ///
    /// `None` when no context is current or the current context belongs to
    /// a window this instance does not own.
    pub fn find_current(&self) -> WindowResult<Option<WindowRef>> {
        Ok(self.api().current_context()?.and_then(|handle| self.lookup(handle)))
    }

    /// Make `window` current, or detach the context with `None`
    ///
    /// Returns the window that was current before. Fails while a scoped
    /// context is active on this thread.
    pub fn swap_current(&self, window: Option<&WindowRef>) -> WindowResult<Option<WindowRef>> {
        context::ensure_unscoped()?;
        let handle = window.map(WindowRef::handle).transpose()?;
        let previous = self.find_current()?;
        self.api().make_context_current(handle)?;
        Ok(previous)
    }

    /// Whether a joystick is plugged into `joystick`
    pub fn joystick_present(&self, joystick: Joystick) -> WindowResult<bool> {
        Ok(self.api().joystick_present(joystick.code())?)
    }

    /// Name of the joystick, `None` if nothing is plugged in
    pub fn joystick_name(&self, joystick: Joystick) -> WindowResult<Option<String>> {
        Ok(self.api().joystick_name(joystick.code())?)
    }

    /// Axis positions in `-1.0..=1.0`
    pub fn joystick_axes(&self, joystick: Joystick) -> WindowResult<Vec<f32>> {
        Ok(self.api().joystick_axes(joystick.code())?)
    }

    /// Button states, pressed or released
    pub fn joystick_buttons(&self, joystick: Joystick) -> WindowResult<Vec<bool>> {
        Ok(self
            .api()
            .joystick_buttons(joystick.code())?
            .into_iter()
            .map(|state| c_int::from(state) != 0)
            .collect())
    }

    /// Resolve a native handle to the window that owns it
    pub(crate) fn lookup(&self, handle: WindowHandle) -> Option<WindowRef> {
        self.registry().borrow().lookup(handle).map(WindowRef::from_inner)
    }
}

impl fmt::Debug for Glfw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Glfw")
            .field("windows", &self.inner.registry.borrow().len())
            .finish_non_exhaustive()
    }
}

impl Drop for GlfwInner {
    fn drop(&mut self) {
        let _ = ACTIVE.try_with(|active| {
            let mut active = active.borrow_mut();
            if std::ptr::eq(active.as_ptr(), self) {
                *active = Weak::new();
            }
        });
        if let Err(e) = self.api.terminate() {
            log::warn!("GLFW termination reported an error: {e}");
        } else {
            log::info!("GLFW terminated");
        }
    }
}

extern "C" fn monitor_trampoline(monitor: *mut GLFWmonitor, event: c_int) {
    let (Some(handle), Some(event)) = (MonitorHandle::from_ptr(monitor), MonitorEvent::from_code(event)) else {
        return;
    };
    with_active(|glfw| {
        let Some(mut handler) = glfw.inner.monitor_handler.borrow_mut().take() else {
            return;
        };
        let monitor = Monitor::new(handle, glfw.clone());
        slot::guard_callback(|| handler(&monitor, event));

        let mut current = glfw.inner.monitor_handler.borrow_mut();
        if current.is_none() {
            *current = Some(handler);
        }
    });
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::native::consts::GLFW_PLATFORM_ERROR;
    use crate::native::headless::Headless;
    use crate::window::WindowBuilder;

    #[test]
    fn test_init_and_terminate() {
        let headless = Headless::new();
        let glfw = Glfw::init(headless.clone()).unwrap();
        assert!(headless.is_initialized());
        assert_eq!(glfw.version().unwrap(), (3, 3, 8));

        drop(glfw);
        assert!(!headless.is_initialized());
    }

    #[test]
    fn test_second_instance_rejected() {
        let glfw = Glfw::init(Headless::new()).unwrap();
        let error = Glfw::init(Headless::new()).unwrap_err();
        assert!(matches!(error, crate::WindowError::Usage(UsageError::AlreadyInitialized)));

        drop(glfw);
        assert!(Glfw::init(Headless::new()).is_ok());
    }

    #[test]
    fn test_init_failure_propagates() {
        let headless = Headless::new();
        headless.fail_init(GLFW_PLATFORM_ERROR);
        let error = Glfw::init(headless).unwrap_err();
        assert!(matches!(error.as_glfw(), Some(GlfwError::PlatformError(_))));
    }

    #[test]
    fn test_windows_keep_library_alive() {
        let headless = Headless::new();
        let glfw = Glfw::init(headless.clone()).unwrap();
        let window = WindowBuilder::new(&glfw, 64, 64, "kept").build().unwrap();
        drop(glfw);

        assert!(headless.is_initialized());
        window.close().unwrap();
        assert!(!headless.is_initialized());
    }

    #[test]
    fn test_time_set_then_get() {
        let headless = Headless::new();
        let glfw = Glfw::init(headless.clone()).unwrap();
        glfw.set_time(2.5).unwrap();
        headless.advance_time(0.5);
        approx::assert_relative_eq!(glfw.time().unwrap(), 3.0);

        let error = glfw.set_time(-1.0).unwrap_err();
        assert!(matches!(error.as_glfw(), Some(GlfwError::InvalidValue(_))));
    }

    #[test]
    fn test_monitor_callback_receives_connections() {
        let headless = Headless::new();
        let glfw = Glfw::init(headless.clone()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        glfw.set_monitor_callback(move |monitor, event| {
            log.borrow_mut().push((monitor.handle(), event));
        })
        .unwrap();

        let added = headless.connect_monitor("Second").unwrap();
        glfw.poll_events().unwrap();
        assert!(headless.disconnect_monitor(added));
        glfw.poll_events().unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![(added, MonitorEvent::Connected), (added, MonitorEvent::Disconnected)]
        );

        glfw.unset_monitor_callback().unwrap();
        assert!(!headless.has_monitor_callback());
    }

    #[test]
    fn test_joysticks() {
        let headless = Headless::new();
        let glfw = Glfw::init(headless.clone()).unwrap();
        let pad = Joystick::new(1).unwrap();
        assert!(!glfw.joystick_present(pad).unwrap());
        assert_eq!(glfw.joystick_name(pad).unwrap(), None);

        headless.connect_joystick(1, "Pad", vec![0.5, -1.0], vec![1, 0, 1]);
        assert!(glfw.joystick_present(pad).unwrap());
        assert_eq!(glfw.joystick_name(pad).unwrap().as_deref(), Some("Pad"));
        assert_eq!(glfw.joystick_axes(pad).unwrap(), vec![0.5, -1.0]);
        assert_eq!(glfw.joystick_buttons(pad).unwrap(), vec![true, false, true]);
    }

    #[test]
    fn test_swap_current_returns_previous() {
        let glfw = Glfw::init(Headless::new()).unwrap();
        let a = WindowBuilder::new(&glfw, 32, 32, "a").build().unwrap();
        let b = WindowBuilder::new(&glfw, 32, 32, "b").build().unwrap();

        // Creation leaves the newest context current
        assert_eq!(glfw.find_current().unwrap().as_ref(), Some(&*b));

        let previous = glfw.swap_current(Some(&*a)).unwrap();
        assert_eq!(previous.as_ref(), Some(&*b));
        assert_eq!(glfw.find_current().unwrap().as_ref(), Some(&*a));

        let previous = glfw.swap_current(None).unwrap();
        assert_eq!(previous.as_ref(), Some(&*a));
        assert!(glfw.find_current().unwrap().is_none());
    }

    #[test]
    fn test_extensions_need_a_context() {
        let glfw = Glfw::init(Headless::new()).unwrap();
        let error = glfw.extension_supported("GL_ARB_debug_output").unwrap_err();
        assert!(matches!(error.as_glfw(), Some(GlfwError::NoCurrentContext(_))));

        let _window = WindowBuilder::new(&glfw, 32, 32, "gl").build().unwrap();
        assert!(glfw.extension_supported("GL_ARB_debug_output").unwrap());
        assert!(!glfw.extension_supported("GL_NV_nothing").unwrap());
        assert!(!glfw.proc_address("glClear").unwrap().is_null());
    }

    #[test]
    fn test_monitor_handler_panic_resurfaces() {
        let headless = Headless::new();
        let glfw = Glfw::init(headless.clone()).unwrap();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        glfw.set_monitor_callback(move |_, _| {
            counter.set(counter.get() + 1);
            panic!("monitor handler");
        })
        .unwrap();
        headless.connect_monitor("Panicky");

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| glfw.poll_events()));
        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }
}
