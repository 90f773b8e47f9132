//! Checked binding over the native function table
//!
//! [`Api`] is the only place that calls into [`NativeApi`]. Every wrapper
//! follows the same pattern:
//!
//! 1. clear this thread's error slot
//! 2. perform the native call
//! 3. take the slot and surface a recorded error as [`GlfwError`]
//!
//! so no native call can leave a stale error behind for an unrelated call to
//! observe. The wrappers also translate the C calling conventions:
//! out-parameter pairs come back as tuples, pointer + count as `Vec`, C
//! strings as `String` and nullable pointers as `Option`.

use std::ffi::{c_char, c_int, c_void, CStr, CString};

use crate::error::GlfwError;
use crate::native::consts::{GLFW_FALSE, GLFW_TRUE};
use crate::native::{
    monitor_ptr, window_ptr, GLFWcharfun, GLFWcursorenterfun, GLFWcursorposfun,
    GLFWframebuffersizefun, GLFWgammaramp, GLFWkeyfun, GLFWmonitorfun, GLFWmousebuttonfun,
    GLFWscrollfun, GLFWvidmode, GLFWwindowclosefun, GLFWwindowfocusfun, GLFWwindowiconifyfun,
    GLFWwindowposfun, GLFWwindowrefreshfun, GLFWwindowsizefun, MonitorHandle, NativeApi,
    WindowHandle,
};

pub(crate) mod slot;

/// Result of a checked native call
pub type GlfwResult<T> = Result<T, GlfwError>;

/// Checked wrappers around one native function table
pub struct Api {
    native: Box<dyn NativeApi>,
}

fn to_cstring(value: &str) -> GlfwResult<CString> {
    CString::new(value).map_err(|_| GlfwError::InvalidValue(format!("string contains NUL: {value:?}")))
}

/// Copy a library-owned C string
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string.
unsafe fn string_from(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }
}

/// Copy a library-owned array
///
/// # Safety
///
/// `ptr` must be null or point to at least `count` initialized elements.
unsafe fn vec_from<T: Copy>(ptr: *const T, count: c_int) -> Vec<T> {
    match usize::try_from(count) {
        Ok(len) if !ptr.is_null() && len > 0 => unsafe { std::slice::from_raw_parts(ptr, len) }.to_vec(),
        _ => Vec::new(),
    }
}

impl Api {
    /// Wrap a native table
    pub fn new(native: impl NativeApi + 'static) -> Self {
        Self { native: Box::new(native) }
    }

    /// Run one native call with the error slot discipline
    fn call<T>(&self, f: impl FnOnce(&dyn NativeApi) -> T) -> GlfwResult<T> {
        slot::clear();
        let value = f(self.native.as_ref());
        let error = slot::take();
        slot::resume_panic();
        error.map_or(Ok(value), Err)
    }

    // ---- library ----

    /// Install the error callback and initialize the library
    pub fn init(&self) -> GlfwResult<bool> {
        self.call(|n| unsafe { n.set_error_callback(Some(slot::error_callback)) })?;
        self.call(|n| unsafe { n.init() } == GLFW_TRUE)
    }

    pub fn terminate(&self) -> GlfwResult<()> {
        self.call(|n| unsafe { n.terminate() })
    }

    /// `(major, minor, revision)` of the loaded library
    pub fn version(&self) -> GlfwResult<(i32, i32, i32)> {
        let (mut major, mut minor, mut rev) = (0, 0, 0);
        self.call(|n| unsafe { n.get_version(&mut major, &mut minor, &mut rev) })?;
        Ok((major, minor, rev))
    }

    pub fn version_string(&self) -> GlfwResult<String> {
        let s = self.call(|n| unsafe { string_from(n.get_version_string()) })?;
        Ok(s.unwrap_or_default())
    }

    pub fn extension_supported(&self, extension: &str) -> GlfwResult<bool> {
        let extension = to_cstring(extension)?;
        self.call(|n| unsafe { n.extension_supported(extension.as_ptr()) } == GLFW_TRUE)
    }

    pub fn proc_address(&self, name: &str) -> GlfwResult<*const c_void> {
        let name = to_cstring(name)?;
        self.call(|n| unsafe { n.get_proc_address(name.as_ptr()) })
    }

    pub fn time(&self) -> GlfwResult<f64> {
        self.call(|n| unsafe { n.get_time() })
    }

    pub fn set_time(&self, time: f64) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_time(time) })
    }

    pub fn clipboard(&self, window: WindowHandle) -> GlfwResult<Option<String>> {
        self.call(|n| unsafe { string_from(n.get_clipboard_string(window.as_ptr())) })
    }

    pub fn set_clipboard(&self, window: WindowHandle, contents: &str) -> GlfwResult<()> {
        let contents = to_cstring(contents)?;
        self.call(|n| unsafe { n.set_clipboard_string(window.as_ptr(), contents.as_ptr()) })
    }

    // ---- monitors ----

    pub fn monitors(&self) -> GlfwResult<Vec<MonitorHandle>> {
        let mut count = 0;
        let raw = self.call(|n| unsafe { vec_from(n.get_monitors(&mut count).cast_const(), count) })?;
        Ok(raw.into_iter().filter_map(MonitorHandle::from_ptr).collect())
    }

    pub fn primary_monitor(&self) -> GlfwResult<Option<MonitorHandle>> {
        self.call(|n| MonitorHandle::from_ptr(unsafe { n.get_primary_monitor() }))
    }

    pub fn monitor_pos(&self, monitor: MonitorHandle) -> GlfwResult<(i32, i32)> {
        let (mut x, mut y) = (0, 0);
        self.call(|n| unsafe { n.get_monitor_pos(monitor.as_ptr(), &mut x, &mut y) })?;
        Ok((x, y))
    }

    /// Physical size in millimetres
    pub fn monitor_physical_size(&self, monitor: MonitorHandle) -> GlfwResult<(i32, i32)> {
        let (mut w, mut h) = (0, 0);
        self.call(|n| unsafe { n.get_monitor_physical_size(monitor.as_ptr(), &mut w, &mut h) })?;
        Ok((w, h))
    }

    pub fn monitor_name(&self, monitor: MonitorHandle) -> GlfwResult<Option<String>> {
        self.call(|n| unsafe { string_from(n.get_monitor_name(monitor.as_ptr())) })
    }

    pub fn set_monitor_callback(&self, callback: Option<GLFWmonitorfun>) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_monitor_callback(callback) }).map(drop)
    }

    pub fn video_mode(&self, monitor: MonitorHandle) -> GlfwResult<Option<GLFWvidmode>> {
        self.call(|n| unsafe { n.get_video_mode(monitor.as_ptr()).as_ref().copied() })
    }

    pub fn video_modes(&self, monitor: MonitorHandle) -> GlfwResult<Vec<GLFWvidmode>> {
        let mut count = 0;
        self.call(|n| unsafe { vec_from(n.get_video_modes(monitor.as_ptr(), &mut count), count) })
    }

    pub fn set_gamma(&self, monitor: MonitorHandle, gamma: f32) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_gamma(monitor.as_ptr(), gamma) })
    }

    /// The current ramp as `(red, green, blue)`
    pub fn gamma_ramp(&self, monitor: MonitorHandle) -> GlfwResult<Option<(Vec<u16>, Vec<u16>, Vec<u16>)>> {
        self.call(|n| unsafe {
            n.get_gamma_ramp(monitor.as_ptr()).as_ref().map(|ramp| {
                let size = c_int::try_from(ramp.size).unwrap_or(0);
                (
                    vec_from(ramp.red.cast_const(), size),
                    vec_from(ramp.green.cast_const(), size),
                    vec_from(ramp.blue.cast_const(), size),
                )
            })
        })
    }

    pub fn set_gamma_ramp(&self, monitor: MonitorHandle, red: &[u16], green: &[u16], blue: &[u16]) -> GlfwResult<()> {
        if red.len() != green.len() || red.len() != blue.len() {
            return Err(GlfwError::InvalidValue(
                "gamma ramp channels must have the same length".to_string(),
            ));
        }
        let size = u32::try_from(red.len())
            .map_err(|_| GlfwError::InvalidValue("gamma ramp is too large".to_string()))?;
        // The library only reads through these pointers
        let ramp = GLFWgammaramp {
            red: red.as_ptr().cast_mut(),
            green: green.as_ptr().cast_mut(),
            blue: blue.as_ptr().cast_mut(),
            size,
        };
        self.call(|n| unsafe { n.set_gamma_ramp(monitor.as_ptr(), &ramp) })
    }

    // ---- windows and contexts ----

    pub fn create_window(
        &self,
        width: i32,
        height: i32,
        title: &str,
        monitor: Option<MonitorHandle>,
        share: Option<WindowHandle>,
    ) -> GlfwResult<Option<WindowHandle>> {
        let title = to_cstring(title)?;
        self.call(|n| {
            WindowHandle::from_ptr(unsafe {
                n.create_window(width, height, title.as_ptr(), monitor_ptr(monitor), window_ptr(share))
            })
        })
    }

    pub fn destroy_window(&self, window: WindowHandle) -> GlfwResult<()> {
        self.call(|n| unsafe { n.destroy_window(window.as_ptr()) })
    }

    pub fn make_context_current(&self, window: Option<WindowHandle>) -> GlfwResult<()> {
        self.call(|n| unsafe { n.make_context_current(window_ptr(window)) })
    }

    pub fn current_context(&self) -> GlfwResult<Option<WindowHandle>> {
        self.call(|n| WindowHandle::from_ptr(unsafe { n.get_current_context() }))
    }

    pub fn swap_buffers(&self, window: WindowHandle) -> GlfwResult<()> {
        self.call(|n| unsafe { n.swap_buffers(window.as_ptr()) })
    }

    pub fn swap_interval(&self, interval: i32) -> GlfwResult<()> {
        self.call(|n| unsafe { n.swap_interval(interval) })
    }

    pub fn default_window_hints(&self) -> GlfwResult<()> {
        self.call(|n| unsafe { n.default_window_hints() })
    }

    pub fn window_hint(&self, hint: c_int, value: c_int) -> GlfwResult<()> {
        self.call(|n| unsafe { n.window_hint(hint, value) })
    }

    pub fn window_monitor(&self, window: WindowHandle) -> GlfwResult<Option<MonitorHandle>> {
        self.call(|n| MonitorHandle::from_ptr(unsafe { n.get_window_monitor(window.as_ptr()) }))
    }

    pub fn window_attrib(&self, window: WindowHandle, attrib: c_int) -> GlfwResult<c_int> {
        self.call(|n| unsafe { n.get_window_attrib(window.as_ptr(), attrib) })
    }

    pub fn window_should_close(&self, window: WindowHandle) -> GlfwResult<bool> {
        self.call(|n| unsafe { n.window_should_close(window.as_ptr()) } != GLFW_FALSE)
    }

    pub fn set_window_should_close(&self, window: WindowHandle, value: bool) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_window_should_close(window.as_ptr(), c_int::from(value)) })
    }

    pub fn set_window_title(&self, window: WindowHandle, title: &str) -> GlfwResult<()> {
        let title = to_cstring(title)?;
        self.call(|n| unsafe { n.set_window_title(window.as_ptr(), title.as_ptr()) })
    }

    pub fn window_pos(&self, window: WindowHandle) -> GlfwResult<(i32, i32)> {
        let (mut x, mut y) = (0, 0);
        self.call(|n| unsafe { n.get_window_pos(window.as_ptr(), &mut x, &mut y) })?;
        Ok((x, y))
    }

    pub fn set_window_pos(&self, window: WindowHandle, x: i32, y: i32) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_window_pos(window.as_ptr(), x, y) })
    }

    pub fn window_size(&self, window: WindowHandle) -> GlfwResult<(i32, i32)> {
        let (mut w, mut h) = (0, 0);
        self.call(|n| unsafe { n.get_window_size(window.as_ptr(), &mut w, &mut h) })?;
        Ok((w, h))
    }

    pub fn set_window_size(&self, window: WindowHandle, width: i32, height: i32) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_window_size(window.as_ptr(), width, height) })
    }

    pub fn framebuffer_size(&self, window: WindowHandle) -> GlfwResult<(i32, i32)> {
        let (mut w, mut h) = (0, 0);
        self.call(|n| unsafe { n.get_framebuffer_size(window.as_ptr(), &mut w, &mut h) })?;
        Ok((w, h))
    }

    pub fn iconify_window(&self, window: WindowHandle) -> GlfwResult<()> {
        self.call(|n| unsafe { n.iconify_window(window.as_ptr()) })
    }

    pub fn restore_window(&self, window: WindowHandle) -> GlfwResult<()> {
        self.call(|n| unsafe { n.restore_window(window.as_ptr()) })
    }

    pub fn show_window(&self, window: WindowHandle) -> GlfwResult<()> {
        self.call(|n| unsafe { n.show_window(window.as_ptr()) })
    }

    pub fn hide_window(&self, window: WindowHandle) -> GlfwResult<()> {
        self.call(|n| unsafe { n.hide_window(window.as_ptr()) })
    }

    // ---- events and input ----

    /// Process pending events; callbacks run before this returns
    pub fn poll_events(&self) -> GlfwResult<()> {
        self.call(|n| unsafe { n.poll_events() })
    }

    pub fn wait_events(&self) -> GlfwResult<()> {
        self.call(|n| unsafe { n.wait_events() })
    }

    pub fn input_mode(&self, window: WindowHandle, mode: c_int) -> GlfwResult<c_int> {
        self.call(|n| unsafe { n.get_input_mode(window.as_ptr(), mode) })
    }

    pub fn set_input_mode(&self, window: WindowHandle, mode: c_int, value: c_int) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_input_mode(window.as_ptr(), mode, value) })
    }

    pub fn key(&self, window: WindowHandle, key: c_int) -> GlfwResult<c_int> {
        self.call(|n| unsafe { n.get_key(window.as_ptr(), key) })
    }

    pub fn mouse_button(&self, window: WindowHandle, button: c_int) -> GlfwResult<c_int> {
        self.call(|n| unsafe { n.get_mouse_button(window.as_ptr(), button) })
    }

    pub fn cursor_pos(&self, window: WindowHandle) -> GlfwResult<(f64, f64)> {
        let (mut x, mut y) = (0.0, 0.0);
        self.call(|n| unsafe { n.get_cursor_pos(window.as_ptr(), &mut x, &mut y) })?;
        Ok((x, y))
    }

    pub fn set_cursor_pos(&self, window: WindowHandle, x: f64, y: f64) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_cursor_pos(window.as_ptr(), x, y) })
    }

    pub fn joystick_present(&self, joy: c_int) -> GlfwResult<bool> {
        self.call(|n| unsafe { n.joystick_present(joy) } == GLFW_TRUE)
    }

    pub fn joystick_axes(&self, joy: c_int) -> GlfwResult<Vec<f32>> {
        let mut count = 0;
        self.call(|n| unsafe { vec_from(n.get_joystick_axes(joy, &mut count), count) })
    }

    pub fn joystick_buttons(&self, joy: c_int) -> GlfwResult<Vec<u8>> {
        let mut count = 0;
        self.call(|n| unsafe { vec_from(n.get_joystick_buttons(joy, &mut count), count) })
    }

    pub fn joystick_name(&self, joy: c_int) -> GlfwResult<Option<String>> {
        self.call(|n| unsafe { string_from(n.get_joystick_name(joy)) })
    }

    // ---- per-window callbacks ----

    pub fn set_key_callback(&self, window: WindowHandle, cb: Option<GLFWkeyfun>) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_key_callback(window.as_ptr(), cb) }).map(drop)
    }

    pub fn set_char_callback(&self, window: WindowHandle, cb: Option<GLFWcharfun>) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_char_callback(window.as_ptr(), cb) }).map(drop)
    }

    pub fn set_scroll_callback(&self, window: WindowHandle, cb: Option<GLFWscrollfun>) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_scroll_callback(window.as_ptr(), cb) }).map(drop)
    }

    pub fn set_mouse_button_callback(&self, window: WindowHandle, cb: Option<GLFWmousebuttonfun>) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_mouse_button_callback(window.as_ptr(), cb) }).map(drop)
    }

    pub fn set_cursor_enter_callback(&self, window: WindowHandle, cb: Option<GLFWcursorenterfun>) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_cursor_enter_callback(window.as_ptr(), cb) }).map(drop)
    }

    pub fn set_cursor_pos_callback(&self, window: WindowHandle, cb: Option<GLFWcursorposfun>) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_cursor_pos_callback(window.as_ptr(), cb) }).map(drop)
    }

    pub fn set_window_pos_callback(&self, window: WindowHandle, cb: Option<GLFWwindowposfun>) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_window_pos_callback(window.as_ptr(), cb) }).map(drop)
    }

    pub fn set_window_size_callback(&self, window: WindowHandle, cb: Option<GLFWwindowsizefun>) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_window_size_callback(window.as_ptr(), cb) }).map(drop)
    }

    pub fn set_window_close_callback(&self, window: WindowHandle, cb: Option<GLFWwindowclosefun>) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_window_close_callback(window.as_ptr(), cb) }).map(drop)
    }

    pub fn set_window_refresh_callback(&self, window: WindowHandle, cb: Option<GLFWwindowrefreshfun>) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_window_refresh_callback(window.as_ptr(), cb) }).map(drop)
    }

    pub fn set_window_focus_callback(&self, window: WindowHandle, cb: Option<GLFWwindowfocusfun>) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_window_focus_callback(window.as_ptr(), cb) }).map(drop)
    }

    pub fn set_window_iconify_callback(&self, window: WindowHandle, cb: Option<GLFWwindowiconifyfun>) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_window_iconify_callback(window.as_ptr(), cb) }).map(drop)
    }

    pub fn set_framebuffer_size_callback(&self, window: WindowHandle, cb: Option<GLFWframebuffersizefun>) -> GlfwResult<()> {
        self.call(|n| unsafe { n.set_framebuffer_size_callback(window.as_ptr(), cb) }).map(drop)
    }
}
