//! Native GLFW function table
//!
//! This module declares every GLFW entry point the binding consumes as one
//! fixed table, the [`NativeApi`] trait. Two implementations exist:
//!
//! - [`GlfwLibrary`]: the system GLFW 3 shared library, resolved at runtime
//! - [`headless::Headless`]: an in-memory stand-in used by tests
//!
//! The signatures are the C ones. Out-parameters are raw pointers, sequences
//! are returned as pointer + count and strings as NUL-terminated C strings.
//! Nothing in here checks errors; that is the job of [`crate::binding::Api`].

use std::ffi::{c_char, c_double, c_float, c_int, c_uchar, c_void};

pub mod consts;
pub mod types;
mod library;

#[cfg(any(test, feature = "headless"))]
pub mod headless;

pub use library::GlfwLibrary;
pub use types::*;

macro_rules! native_table {
    ($( $(#[$meta:meta])* fn $name:ident = $sym:literal ( $($arg:ident : $ty:ty),* ) $(-> $ret:ty)?; )*) => {
        /// The GLFW entry points, one method per C function
        ///
        /// # Safety
        ///
        /// Implementors must behave like GLFW 3: pointers returned from a
        /// method stay valid until the next call into the table, out-pointers
        /// are written before returning, and registered callbacks are only
        /// invoked synchronously from within a call on the calling thread.
        pub unsafe trait NativeApi {
            $(
                $(#[$meta])*
                ///
                /// # Safety
                ///
                /// Pointer arguments must satisfy the contract of the C function.
                unsafe fn $name(&self, $($arg: $ty),*) $(-> $ret)?;
            )*
        }

        /// Function pointers resolved from a loaded shared object
        #[cfg(unix)]
        pub(crate) struct GlfwFns {
            $( $name: unsafe extern "C" fn($($ty),*) $(-> $ret)?, )*
        }

        #[cfg(unix)]
        impl GlfwFns {
            /// Resolve every symbol, failing with the first missing name
            ///
            /// # Safety
            ///
            /// `lib` must be a live handle returned by `dlopen`.
            pub(crate) unsafe fn resolve(lib: *mut c_void) -> Result<Self, &'static str> {
                Ok(Self {
                    $(
                        $name: {
                            let sym = unsafe { libc::dlsym(lib, concat!($sym, "\0").as_ptr().cast()) };
                            if sym.is_null() {
                                return Err($sym);
                            }
                            unsafe {
                                std::mem::transmute::<*mut c_void, unsafe extern "C" fn($($ty),*) $(-> $ret)?>(sym)
                            }
                        },
                    )*
                })
            }
        }

        #[cfg(unix)]
        unsafe impl NativeApi for GlfwLibrary {
            $(
                unsafe fn $name(&self, $($arg: $ty),*) $(-> $ret)? {
                    unsafe { (self.fns.$name)($($arg),*) }
                }
            )*
        }

        #[cfg(not(unix))]
        unsafe impl NativeApi for GlfwLibrary {
            $(
                unsafe fn $name(&self, $($arg: $ty),*) $(-> $ret)? {
                    $( let _ = $arg; )*
                    match self.never {}
                }
            )*
        }
    };
}

native_table! {
    /// `glfwInit`, returns `GLFW_TRUE` on success
    fn init = "glfwInit"() -> c_int;
    fn terminate = "glfwTerminate"();
    fn get_version = "glfwGetVersion"(major: *mut c_int, minor: *mut c_int, rev: *mut c_int);
    fn get_version_string = "glfwGetVersionString"() -> *const c_char;
    /// Install the process-wide error callback, returning the previous one
    fn set_error_callback = "glfwSetErrorCallback"(cbfun: Option<GLFWerrorfun>) -> Option<GLFWerrorfun>;
    fn extension_supported = "glfwExtensionSupported"(extension: *const c_char) -> c_int;
    fn get_proc_address = "glfwGetProcAddress"(procname: *const c_char) -> *const c_void;
    fn get_time = "glfwGetTime"() -> c_double;
    fn set_time = "glfwSetTime"(time: c_double);
    fn get_clipboard_string = "glfwGetClipboardString"(window: *mut GLFWwindow) -> *const c_char;
    fn set_clipboard_string = "glfwSetClipboardString"(window: *mut GLFWwindow, string: *const c_char);

    /// Array of `count` monitor pointers owned by the library
    fn get_monitors = "glfwGetMonitors"(count: *mut c_int) -> *mut *mut GLFWmonitor;
    fn get_primary_monitor = "glfwGetPrimaryMonitor"() -> *mut GLFWmonitor;
    fn get_monitor_pos = "glfwGetMonitorPos"(monitor: *mut GLFWmonitor, xpos: *mut c_int, ypos: *mut c_int);
    fn get_monitor_physical_size = "glfwGetMonitorPhysicalSize"(monitor: *mut GLFWmonitor, width: *mut c_int, height: *mut c_int);
    fn get_monitor_name = "glfwGetMonitorName"(monitor: *mut GLFWmonitor) -> *const c_char;
    fn set_monitor_callback = "glfwSetMonitorCallback"(cbfun: Option<GLFWmonitorfun>) -> Option<GLFWmonitorfun>;
    fn get_video_mode = "glfwGetVideoMode"(monitor: *mut GLFWmonitor) -> *const GLFWvidmode;
    fn get_video_modes = "glfwGetVideoModes"(monitor: *mut GLFWmonitor, count: *mut c_int) -> *const GLFWvidmode;
    fn set_gamma = "glfwSetGamma"(monitor: *mut GLFWmonitor, gamma: c_float);
    fn get_gamma_ramp = "glfwGetGammaRamp"(monitor: *mut GLFWmonitor) -> *const GLFWgammaramp;
    fn set_gamma_ramp = "glfwSetGammaRamp"(monitor: *mut GLFWmonitor, ramp: *const GLFWgammaramp);

    /// Create a window and its context, null on failure
    fn create_window = "glfwCreateWindow"(width: c_int, height: c_int, title: *const c_char, monitor: *mut GLFWmonitor, share: *mut GLFWwindow) -> *mut GLFWwindow;
    fn destroy_window = "glfwDestroyWindow"(window: *mut GLFWwindow);
    fn make_context_current = "glfwMakeContextCurrent"(window: *mut GLFWwindow);
    fn get_current_context = "glfwGetCurrentContext"() -> *mut GLFWwindow;
    fn swap_buffers = "glfwSwapBuffers"(window: *mut GLFWwindow);
    fn swap_interval = "glfwSwapInterval"(interval: c_int);

    fn default_window_hints = "glfwDefaultWindowHints"();
    fn window_hint = "glfwWindowHint"(hint: c_int, value: c_int);
    fn get_window_monitor = "glfwGetWindowMonitor"(window: *mut GLFWwindow) -> *mut GLFWmonitor;
    fn get_window_attrib = "glfwGetWindowAttrib"(window: *mut GLFWwindow, attrib: c_int) -> c_int;
    fn window_should_close = "glfwWindowShouldClose"(window: *mut GLFWwindow) -> c_int;
    fn set_window_should_close = "glfwSetWindowShouldClose"(window: *mut GLFWwindow, value: c_int);

    fn set_window_title = "glfwSetWindowTitle"(window: *mut GLFWwindow, title: *const c_char);
    fn get_window_pos = "glfwGetWindowPos"(window: *mut GLFWwindow, xpos: *mut c_int, ypos: *mut c_int);
    fn set_window_pos = "glfwSetWindowPos"(window: *mut GLFWwindow, xpos: c_int, ypos: c_int);
    fn get_window_size = "glfwGetWindowSize"(window: *mut GLFWwindow, width: *mut c_int, height: *mut c_int);
    fn set_window_size = "glfwSetWindowSize"(window: *mut GLFWwindow, width: c_int, height: c_int);
    fn get_framebuffer_size = "glfwGetFramebufferSize"(window: *mut GLFWwindow, width: *mut c_int, height: *mut c_int);

    fn iconify_window = "glfwIconifyWindow"(window: *mut GLFWwindow);
    fn restore_window = "glfwRestoreWindow"(window: *mut GLFWwindow);
    fn show_window = "glfwShowWindow"(window: *mut GLFWwindow);
    fn hide_window = "glfwHideWindow"(window: *mut GLFWwindow);

    fn set_window_pos_callback = "glfwSetWindowPosCallback"(window: *mut GLFWwindow, cbfun: Option<GLFWwindowposfun>) -> Option<GLFWwindowposfun>;
    fn set_window_size_callback = "glfwSetWindowSizeCallback"(window: *mut GLFWwindow, cbfun: Option<GLFWwindowsizefun>) -> Option<GLFWwindowsizefun>;
    fn set_window_close_callback = "glfwSetWindowCloseCallback"(window: *mut GLFWwindow, cbfun: Option<GLFWwindowclosefun>) -> Option<GLFWwindowclosefun>;
    fn set_window_refresh_callback = "glfwSetWindowRefreshCallback"(window: *mut GLFWwindow, cbfun: Option<GLFWwindowrefreshfun>) -> Option<GLFWwindowrefreshfun>;
    fn set_window_focus_callback = "glfwSetWindowFocusCallback"(window: *mut GLFWwindow, cbfun: Option<GLFWwindowfocusfun>) -> Option<GLFWwindowfocusfun>;
    fn set_window_iconify_callback = "glfwSetWindowIconifyCallback"(window: *mut GLFWwindow, cbfun: Option<GLFWwindowiconifyfun>) -> Option<GLFWwindowiconifyfun>;
    fn set_framebuffer_size_callback = "glfwSetFramebufferSizeCallback"(window: *mut GLFWwindow, cbfun: Option<GLFWframebuffersizefun>) -> Option<GLFWframebuffersizefun>;

    /// Process pending events, invoking callbacks before returning
    fn poll_events = "glfwPollEvents"();
    fn wait_events = "glfwWaitEvents"();

    fn get_input_mode = "glfwGetInputMode"(window: *mut GLFWwindow, mode: c_int) -> c_int;
    fn set_input_mode = "glfwSetInputMode"(window: *mut GLFWwindow, mode: c_int, value: c_int);
    fn get_key = "glfwGetKey"(window: *mut GLFWwindow, key: c_int) -> c_int;
    fn get_mouse_button = "glfwGetMouseButton"(window: *mut GLFWwindow, button: c_int) -> c_int;
    fn get_cursor_pos = "glfwGetCursorPos"(window: *mut GLFWwindow, xpos: *mut c_double, ypos: *mut c_double);
    fn set_cursor_pos = "glfwSetCursorPos"(window: *mut GLFWwindow, xpos: c_double, ypos: c_double);

    fn joystick_present = "glfwJoystickPresent"(joy: c_int) -> c_int;
    fn get_joystick_axes = "glfwGetJoystickAxes"(joy: c_int, count: *mut c_int) -> *const c_float;
    fn get_joystick_buttons = "glfwGetJoystickButtons"(joy: c_int, count: *mut c_int) -> *const c_uchar;
    fn get_joystick_name = "glfwGetJoystickName"(joy: c_int) -> *const c_char;

    fn set_key_callback = "glfwSetKeyCallback"(window: *mut GLFWwindow, cbfun: Option<GLFWkeyfun>) -> Option<GLFWkeyfun>;
    fn set_char_callback = "glfwSetCharCallback"(window: *mut GLFWwindow, cbfun: Option<GLFWcharfun>) -> Option<GLFWcharfun>;
    fn set_mouse_button_callback = "glfwSetMouseButtonCallback"(window: *mut GLFWwindow, cbfun: Option<GLFWmousebuttonfun>) -> Option<GLFWmousebuttonfun>;
    fn set_cursor_pos_callback = "glfwSetCursorPosCallback"(window: *mut GLFWwindow, cbfun: Option<GLFWcursorposfun>) -> Option<GLFWcursorposfun>;
    fn set_cursor_enter_callback = "glfwSetCursorEnterCallback"(window: *mut GLFWwindow, cbfun: Option<GLFWcursorenterfun>) -> Option<GLFWcursorenterfun>;
    fn set_scroll_callback = "glfwSetScrollCallback"(window: *mut GLFWwindow, cbfun: Option<GLFWscrollfun>) -> Option<GLFWscrollfun>;
}
