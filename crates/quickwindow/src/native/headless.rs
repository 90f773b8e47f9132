//! In-memory stand-in for the native library
//!
//! [`Headless`] implements [`NativeApi`] without a display server. It keeps
//! just enough state to behave like GLFW 3 from the binding's point of view:
//! windows with attributes and input state, creation hints, context version
//! limits, monitors, joysticks, the clipboard and the timer. Errors are
//! reported through the installed error callback and input is delivered
//! through the window callbacks during [`NativeApi::poll_events`], exactly
//! as the real library does.
//!
//! Window and monitor pointers are fake addresses derived from small ids.
//! Window ids are recycled, so a new window can receive the pointer of a
//! destroyed one.
//!
//! The handle is cheap to clone; clones share state, which lets a test keep
//! one clone for inspection and injection while the binding owns another.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::ffi::{c_char, c_double, c_float, c_int, c_uchar, c_void, CStr, CString};
use std::ptr::{self, NonNull};
use std::rc::Rc;

use super::consts::*;
use super::types::*;
use super::NativeApi;

const STRIDE: usize = 16;
const MONITOR_BASE: usize = 0x0010_0000;
const MAX_JOYSTICKS: usize = 16;
const GAMMA_RAMP_SIZE: usize = 256;

const KNOWN_HINTS: [c_int; 25] = [
    GLFW_RESIZABLE,
    GLFW_VISIBLE,
    GLFW_DECORATED,
    GLFW_RED_BITS,
    GLFW_GREEN_BITS,
    GLFW_BLUE_BITS,
    GLFW_ALPHA_BITS,
    GLFW_DEPTH_BITS,
    GLFW_STENCIL_BITS,
    GLFW_ACCUM_RED_BITS,
    GLFW_ACCUM_GREEN_BITS,
    GLFW_ACCUM_BLUE_BITS,
    GLFW_ACCUM_ALPHA_BITS,
    GLFW_AUX_BUFFERS,
    GLFW_SAMPLES,
    GLFW_REFRESH_RATE,
    GLFW_STEREO,
    GLFW_SRGB_CAPABLE,
    GLFW_CLIENT_API,
    GLFW_CONTEXT_VERSION_MAJOR,
    GLFW_CONTEXT_VERSION_MINOR,
    GLFW_CONTEXT_ROBUSTNESS,
    GLFW_OPENGL_FORWARD_COMPAT,
    GLFW_OPENGL_DEBUG_CONTEXT,
    GLFW_OPENGL_PROFILE,
];

const EXTENSIONS: [&str; 3] = ["GL_ARB_debug_output", "GL_ARB_vertex_array_object", "GL_EXT_framebuffer_sRGB"];

type Failure = (c_int, String);

fn failure(code: c_int, message: impl Into<String>) -> Failure {
    (code, message.into())
}

fn window_ptr_of(id: usize) -> *mut GLFWwindow {
    (id * STRIDE) as *mut GLFWwindow
}

fn window_id(ptr: *mut GLFWwindow) -> usize {
    ptr as usize / STRIDE
}

fn monitor_ptr_of(id: usize) -> *mut GLFWmonitor {
    (MONITOR_BASE + id * STRIDE) as *mut GLFWmonitor
}

fn glfw_bool(value: bool) -> c_int {
    if value { GLFW_TRUE } else { GLFW_FALSE }
}

/// Write through an out-pointer the caller may leave null
///
/// # Safety
///
/// `ptr` must be null or valid for writes.
unsafe fn put<T>(ptr: *mut T, value: T) {
    if !ptr.is_null() {
        unsafe { ptr.write(value) };
    }
}

/// Input or window notification waiting for the next event poll
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(missing_docs)]
pub enum NativeEvent {
    Key { key: c_int, scancode: c_int, action: c_int, mods: c_int },
    Char(u32),
    Scroll(f64, f64),
    MouseButton { button: c_int, action: c_int, mods: c_int },
    CursorEnter(bool),
    CursorPos(f64, f64),
    WindowPos(c_int, c_int),
    WindowSize(c_int, c_int),
    WindowClose,
    WindowRefresh,
    WindowFocus(bool),
    WindowIconify(bool),
    FramebufferSize(c_int, c_int),
}

#[derive(Clone, Copy, Default)]
struct WindowCallbacks {
    pos: Option<GLFWwindowposfun>,
    size: Option<GLFWwindowsizefun>,
    close: Option<GLFWwindowclosefun>,
    refresh: Option<GLFWwindowrefreshfun>,
    focus: Option<GLFWwindowfocusfun>,
    iconify: Option<GLFWwindowiconifyfun>,
    framebuffer_size: Option<GLFWframebuffersizefun>,
    key: Option<GLFWkeyfun>,
    character: Option<GLFWcharfun>,
    mouse_button: Option<GLFWmousebuttonfun>,
    cursor_pos: Option<GLFWcursorposfun>,
    cursor_enter: Option<GLFWcursorenterfun>,
    scroll: Option<GLFWscrollfun>,
}

impl WindowCallbacks {
    fn installed(&self) -> usize {
        [
            self.pos.is_some(),
            self.size.is_some(),
            self.close.is_some(),
            self.refresh.is_some(),
            self.focus.is_some(),
            self.iconify.is_some(),
            self.framebuffer_size.is_some(),
            self.key.is_some(),
            self.character.is_some(),
            self.mouse_button.is_some(),
            self.cursor_pos.is_some(),
            self.cursor_enter.is_some(),
            self.scroll.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

struct HeadlessWindow {
    title: String,
    pos: (c_int, c_int),
    size: (c_int, c_int),
    framebuffer: (c_int, c_int),
    visible: bool,
    focused: bool,
    iconified: bool,
    resizable: bool,
    decorated: bool,
    should_close: bool,
    monitor: *mut GLFWmonitor,
    client_api: c_int,
    version: (c_int, c_int),
    forward_compat: bool,
    debug_context: bool,
    profile: c_int,
    robustness: c_int,
    cursor_mode: c_int,
    sticky_keys: bool,
    sticky_mouse_buttons: bool,
    pressed_keys: BTreeSet<c_int>,
    pressed_buttons: [bool; 8],
    cursor: (f64, f64),
    swaps: u32,
    callbacks: WindowCallbacks,
}

impl HeadlessWindow {
    fn apply(&mut self, event: NativeEvent) {
        match event {
            NativeEvent::Key { key, action, .. } => {
                if action == GLFW_RELEASE {
                    self.pressed_keys.remove(&key);
                } else {
                    self.pressed_keys.insert(key);
                }
            }
            NativeEvent::MouseButton { button, action, .. } => {
                if let Some(pressed) = usize::try_from(button).ok().and_then(|i| self.pressed_buttons.get_mut(i)) {
                    *pressed = action != GLFW_RELEASE;
                }
            }
            NativeEvent::CursorPos(x, y) => self.cursor = (x, y),
            NativeEvent::WindowPos(x, y) => self.pos = (x, y),
            NativeEvent::WindowSize(w, h) => self.size = (w, h),
            NativeEvent::FramebufferSize(w, h) => self.framebuffer = (w, h),
            NativeEvent::WindowClose => self.should_close = true,
            NativeEvent::WindowFocus(focused) => self.focused = focused,
            NativeEvent::WindowIconify(iconified) => self.iconified = iconified,
            NativeEvent::Char(_) | NativeEvent::Scroll(..) | NativeEvent::CursorEnter(_) | NativeEvent::WindowRefresh => {}
        }
    }
}

struct HeadlessMonitor {
    id: usize,
    name: CString,
    pos: (c_int, c_int),
    physical: (c_int, c_int),
    modes: Vec<GLFWvidmode>,
    current_mode: usize,
    red: Vec<u16>,
    green: Vec<u16>,
    blue: Vec<u16>,
    view: GLFWgammaramp,
}

impl HeadlessMonitor {
    fn new(id: usize, name: &str, x: c_int) -> Self {
        let mode = |width, height| GLFWvidmode {
            width,
            height,
            redBits: 8,
            greenBits: 8,
            blueBits: 8,
            refreshRate: 60,
        };
        let identity = gamma_values(1.0);
        Self {
            id,
            name: CString::new(name).unwrap_or_default(),
            pos: (x, 0),
            physical: (520, 290),
            modes: vec![mode(640, 480), mode(1280, 720), mode(1920, 1080)],
            current_mode: 2,
            red: identity.clone(),
            green: identity.clone(),
            blue: identity,
            view: GLFWgammaramp {
                red: ptr::null_mut(),
                green: ptr::null_mut(),
                blue: ptr::null_mut(),
                size: 0,
            },
        }
    }
}

fn gamma_values(gamma: f32) -> Vec<u16> {
    let exponent = 1.0 / f64::from(gamma);
    (0..GAMMA_RAMP_SIZE)
        .map(|i| {
            let value = (i as f64 / (GAMMA_RAMP_SIZE - 1) as f64).powf(exponent) * 65535.0 + 0.5;
            value.min(65535.0) as u16
        })
        .collect()
}

struct HeadlessJoystick {
    name: CString,
    axes: Vec<f32>,
    buttons: Vec<u8>,
}

struct State {
    initialized: bool,
    init_failure: Option<c_int>,
    error_callback: Option<GLFWerrorfun>,
    monitor_callback: Option<GLFWmonitorfun>,
    pending_error: Option<Failure>,
    window_failures: VecDeque<c_int>,
    max_version: (c_int, c_int),
    hints: BTreeMap<c_int, c_int>,
    last_hints: BTreeMap<c_int, c_int>,
    hint_resets: usize,
    windows: BTreeMap<usize, HeadlessWindow>,
    current: Option<usize>,
    swap_interval: Option<c_int>,
    monitors: Vec<HeadlessMonitor>,
    next_monitor_id: usize,
    monitor_ptrs: Vec<*mut GLFWmonitor>,
    joysticks: [Option<HeadlessJoystick>; MAX_JOYSTICKS],
    clipboard: Option<CString>,
    time: f64,
    time_step: f64,
    version_string: CString,
    events: VecDeque<(usize, NativeEvent)>,
    monitor_events: VecDeque<(usize, c_int)>,
    polls: usize,
}

impl State {
    fn new() -> Self {
        Self {
            initialized: false,
            init_failure: None,
            error_callback: None,
            monitor_callback: None,
            pending_error: None,
            window_failures: VecDeque::new(),
            max_version: (3, 3),
            hints: BTreeMap::new(),
            last_hints: BTreeMap::new(),
            hint_resets: 0,
            windows: BTreeMap::new(),
            current: None,
            swap_interval: None,
            monitors: vec![HeadlessMonitor::new(0, "Headless 0", 0)],
            next_monitor_id: 1,
            monitor_ptrs: Vec::new(),
            joysticks: std::array::from_fn(|_| None),
            clipboard: None,
            time: 0.0,
            time_step: 0.0,
            version_string: CString::new("3.3.8 Headless").unwrap_or_default(),
            events: VecDeque::new(),
            monitor_events: VecDeque::new(),
            polls: 0,
        }
    }

    fn window(&mut self, ptr: *mut GLFWwindow) -> Result<&mut HeadlessWindow, Failure> {
        self.windows
            .get_mut(&window_id(ptr))
            .ok_or_else(|| failure(GLFW_PLATFORM_ERROR, format!("Unknown window {ptr:p}")))
    }

    fn monitor(&mut self, ptr: *mut GLFWmonitor) -> Result<&mut HeadlessMonitor, Failure> {
        self.monitors
            .iter_mut()
            .find(|m| monitor_ptr_of(m.id) == ptr)
            .ok_or_else(|| failure(GLFW_PLATFORM_ERROR, format!("Unknown monitor {ptr:p}")))
    }

    fn joystick(&mut self, joy: c_int) -> Result<&mut Option<HeadlessJoystick>, Failure> {
        usize::try_from(joy)
            .ok()
            .and_then(|i| self.joysticks.get_mut(i))
            .ok_or_else(|| failure(GLFW_INVALID_ENUM, format!("Invalid joystick {joy}")))
    }

    fn require_context(&self) -> Result<usize, Failure> {
        self.current
            .ok_or_else(|| failure(GLFW_NO_CURRENT_CONTEXT, "No context is current for this thread"))
    }

    fn create_window(
        &mut self,
        width: c_int,
        height: c_int,
        title: String,
        monitor: *mut GLFWmonitor,
        share: *mut GLFWwindow,
    ) -> Result<*mut GLFWwindow, Failure> {
        if let Some(code) = self.window_failures.pop_front() {
            return Err(failure(code, "Injected window creation failure"));
        }
        if width <= 0 || height <= 0 {
            return Err(failure(GLFW_INVALID_VALUE, format!("Invalid window size {width}x{height}")));
        }
        if !share.is_null() {
            self.window(share)?;
        }
        let pos = if monitor.is_null() { (0, 0) } else { self.monitor(monitor)?.pos };

        let hints = &self.hints;
        let hint = |code: c_int, default: c_int| hints.get(&code).copied().unwrap_or(default);
        let client_api = hint(GLFW_CLIENT_API, GLFW_OPENGL_API);
        let version = (hint(GLFW_CONTEXT_VERSION_MAJOR, 1), hint(GLFW_CONTEXT_VERSION_MINOR, 0));
        let forward_compat = hint(GLFW_OPENGL_FORWARD_COMPAT, GLFW_FALSE) != GLFW_FALSE;
        let profile = hint(GLFW_OPENGL_PROFILE, GLFW_OPENGL_ANY_PROFILE);
        let robustness = hint(GLFW_CONTEXT_ROBUSTNESS, GLFW_NO_ROBUSTNESS);
        let visible = hint(GLFW_VISIBLE, GLFW_TRUE) != GLFW_FALSE;
        let resizable = hint(GLFW_RESIZABLE, GLFW_TRUE) != GLFW_FALSE;
        let decorated = hint(GLFW_DECORATED, GLFW_TRUE) != GLFW_FALSE;
        let debug_context = hint(GLFW_OPENGL_DEBUG_CONTEXT, GLFW_FALSE) != GLFW_FALSE;

        if client_api != GLFW_OPENGL_API && client_api != GLFW_OPENGL_ES_API {
            return Err(failure(GLFW_INVALID_ENUM, format!("Invalid client API {client_api:#x}")));
        }
        if version.0 < 1 || version.1 < 0 {
            return Err(failure(GLFW_INVALID_VALUE, format!("Invalid OpenGL version {}.{}", version.0, version.1)));
        }
        if forward_compat && version.0 < 3 {
            return Err(failure(
                GLFW_INVALID_VALUE,
                "Forward-compatibility is only defined for OpenGL version 3.0 and above",
            ));
        }
        if profile != GLFW_OPENGL_ANY_PROFILE && version < (3, 2) {
            return Err(failure(
                GLFW_INVALID_VALUE,
                "Context profiles are only defined for OpenGL version 3.2 and above",
            ));
        }
        if version > self.max_version {
            return Err(failure(
                GLFW_VERSION_UNAVAILABLE,
                format!(
                    "Requested OpenGL version {}.{}, got version {}.{}",
                    version.0, version.1, self.max_version.0, self.max_version.1
                ),
            ));
        }

        let id = (1..=self.windows.len() + 1)
            .find(|id| !self.windows.contains_key(id))
            .unwrap_or(self.windows.len() + 1);
        self.last_hints = self.hints.clone();
        self.windows.insert(
            id,
            HeadlessWindow {
                title,
                pos,
                size: (width, height),
                framebuffer: (width, height),
                visible,
                focused: visible,
                iconified: false,
                resizable,
                decorated,
                should_close: false,
                monitor,
                client_api,
                version,
                forward_compat,
                debug_context,
                profile,
                robustness,
                cursor_mode: GLFW_CURSOR_NORMAL,
                sticky_keys: false,
                sticky_mouse_buttons: false,
                pressed_keys: BTreeSet::new(),
                pressed_buttons: [false; 8],
                cursor: (0.0, 0.0),
                swaps: 0,
                callbacks: WindowCallbacks::default(),
            },
        );
        Ok(window_ptr_of(id))
    }

    fn queue(&mut self, id: usize, event: NativeEvent) {
        self.events.push_back((id, event));
    }
}

/// A display-less implementation of the native table
#[derive(Clone)]
pub struct Headless {
    state: Rc<RefCell<State>>,
}

impl Default for Headless {
    fn default() -> Self {
        Self::new()
    }
}

impl Headless {
    /// A library with one 1920x1080 monitor, supporting contexts up to 3.3
    pub fn new() -> Self {
        Self { state: Rc::new(RefCell::new(State::new())) }
    }

    /// Run one call that requires initialization, reporting failures
    ///
    /// The state borrow is released before the error callback runs.
    fn run<T>(&self, fallback: T, f: impl FnOnce(&mut State) -> Result<T, Failure>) -> T {
        let (result, pending) = {
            let mut state = self.state.borrow_mut();
            let result = if state.initialized {
                f(&mut state)
            } else {
                Err(failure(GLFW_NOT_INITIALIZED, "The GLFW library is not initialized"))
            };
            (result, state.pending_error.take())
        };
        if let Some((code, message)) = pending {
            self.emit(code, &message);
        }
        match result {
            Ok(value) => value,
            Err((code, message)) => {
                self.emit(code, &message);
                fallback
            }
        }
    }

    fn emit(&self, code: c_int, message: &str) {
        let callback = self.state.borrow().error_callback;
        if let Some(callback) = callback {
            let message = CString::new(message).unwrap_or_default();
            callback(code, message.as_ptr());
        }
    }

    fn deliver(&self, id: usize, event: NativeEvent) {
        let callbacks = {
            let mut state = self.state.borrow_mut();
            let Some(window) = state.windows.get_mut(&id) else {
                return;
            };
            window.apply(event);
            window.callbacks
        };
        let ptr = window_ptr_of(id);
        match event {
            NativeEvent::Key { key, scancode, action, mods } => {
                if let Some(cb) = callbacks.key {
                    cb(ptr, key, scancode, action, mods);
                }
            }
            NativeEvent::Char(codepoint) => {
                if let Some(cb) = callbacks.character {
                    cb(ptr, codepoint);
                }
            }
            NativeEvent::Scroll(dx, dy) => {
                if let Some(cb) = callbacks.scroll {
                    cb(ptr, dx, dy);
                }
            }
            NativeEvent::MouseButton { button, action, mods } => {
                if let Some(cb) = callbacks.mouse_button {
                    cb(ptr, button, action, mods);
                }
            }
            NativeEvent::CursorEnter(entered) => {
                if let Some(cb) = callbacks.cursor_enter {
                    cb(ptr, glfw_bool(entered));
                }
            }
            NativeEvent::CursorPos(x, y) => {
                if let Some(cb) = callbacks.cursor_pos {
                    cb(ptr, x, y);
                }
            }
            NativeEvent::WindowPos(x, y) => {
                if let Some(cb) = callbacks.pos {
                    cb(ptr, x, y);
                }
            }
            NativeEvent::WindowSize(w, h) => {
                if let Some(cb) = callbacks.size {
                    cb(ptr, w, h);
                }
            }
            NativeEvent::WindowClose => {
                if let Some(cb) = callbacks.close {
                    cb(ptr);
                }
            }
            NativeEvent::WindowRefresh => {
                if let Some(cb) = callbacks.refresh {
                    cb(ptr);
                }
            }
            NativeEvent::WindowFocus(focused) => {
                if let Some(cb) = callbacks.focus {
                    cb(ptr, glfw_bool(focused));
                }
            }
            NativeEvent::WindowIconify(iconified) => {
                if let Some(cb) = callbacks.iconify {
                    cb(ptr, glfw_bool(iconified));
                }
            }
            NativeEvent::FramebufferSize(w, h) => {
                if let Some(cb) = callbacks.framebuffer_size {
                    cb(ptr, w, h);
                }
            }
        }
    }

    fn deliver_monitor(&self, id: usize, event: c_int) {
        let callback = self.state.borrow().monitor_callback;
        if let Some(callback) = callback {
            callback(monitor_ptr_of(id), event);
        }
    }

    // ---- test controls ----

    /// Highest context version window creation will satisfy
    pub fn set_max_version(&self, major: c_int, minor: c_int) {
        self.state.borrow_mut().max_version = (major, minor);
    }

    /// Make the next window creation fail with `code`
    pub fn fail_next_window(&self, code: c_int) {
        self.fail_next_windows(code, 1);
    }

    /// Make the next `count` window creations fail with `code`
    pub fn fail_next_windows(&self, code: c_int, count: usize) {
        self.state.borrow_mut().window_failures.extend(std::iter::repeat(code).take(count));
    }

    /// Make the next initialization fail with `code`
    pub fn fail_init(&self, code: c_int) {
        self.state.borrow_mut().init_failure = Some(code);
    }

    /// Report `code` during the next call that requires initialization
    pub fn raise(&self, code: c_int, message: &str) {
        self.state.borrow_mut().pending_error = Some(failure(code, message));
    }

    /// Queue a notification for `window`, delivered by the next event poll
    pub fn queue_event(&self, window: WindowHandle, event: NativeEvent) {
        self.state.borrow_mut().queue(window_id(window.as_ptr()), event);
    }

    /// Attach a monitor and queue its connection notification
    pub fn connect_monitor(&self, name: &str) -> Option<MonitorHandle> {
        let mut state = self.state.borrow_mut();
        let id = state.next_monitor_id;
        state.next_monitor_id += 1;
        let x = c_int::try_from(id).unwrap_or(0).saturating_mul(1920);
        state.monitors.push(HeadlessMonitor::new(id, name, x));
        state.monitor_events.push_back((id, GLFW_CONNECTED));
        MonitorHandle::from_ptr(monitor_ptr_of(id))
    }

    /// Detach a monitor and queue its disconnection notification
    pub fn disconnect_monitor(&self, monitor: MonitorHandle) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(index) = state.monitors.iter().position(|m| monitor_ptr_of(m.id) == monitor.as_ptr()) else {
            return false;
        };
        let removed = state.monitors.remove(index);
        state.monitor_events.push_back((removed.id, GLFW_DISCONNECTED));
        true
    }

    /// Plug a joystick into slot `joy`
    pub fn connect_joystick(&self, joy: usize, name: &str, axes: Vec<f32>, buttons: Vec<u8>) {
        if let Some(slot) = self.state.borrow_mut().joysticks.get_mut(joy) {
            *slot = Some(HeadlessJoystick {
                name: CString::new(name).unwrap_or_default(),
                axes,
                buttons,
            });
        }
    }

    /// Unplug the joystick in slot `joy`
    pub fn disconnect_joystick(&self, joy: usize) {
        if let Some(slot) = self.state.borrow_mut().joysticks.get_mut(joy) {
            *slot = None;
        }
    }

    /// Move the library timer forward
    pub fn advance_time(&self, seconds: f64) {
        self.state.borrow_mut().time += seconds;
    }

    /// Move the library timer forward by `seconds` on every read
    pub fn set_time_step(&self, seconds: f64) {
        self.state.borrow_mut().time_step = seconds;
    }

    // ---- inspection ----

    /// Whether the library is between `init` and `terminate`
    pub fn is_initialized(&self) -> bool {
        self.state.borrow().initialized
    }

    /// Number of live windows
    pub fn window_count(&self) -> usize {
        self.state.borrow().windows.len()
    }

    /// The window whose context is current
    pub fn current_window(&self) -> Option<WindowHandle> {
        self.state.borrow().current.and_then(|id| WindowHandle::from_ptr(window_ptr_of(id)))
    }

    /// How many times the buffers of `window` were swapped
    pub fn swap_count(&self, window: WindowHandle) -> u32 {
        self.state
            .borrow()
            .windows
            .get(&window_id(window.as_ptr()))
            .map_or(0, |w| w.swaps)
    }

    /// The last swap interval set
    pub fn current_swap_interval(&self) -> Option<c_int> {
        self.state.borrow().swap_interval
    }

    /// Title of a live window
    pub fn title_of(&self, window: WindowHandle) -> Option<String> {
        self.state
            .borrow()
            .windows
            .get(&window_id(window.as_ptr()))
            .map(|w| w.title.clone())
    }

    /// Hints in effect when the last window was created
    pub fn last_window_hints(&self) -> BTreeMap<c_int, c_int> {
        self.state.borrow().last_hints.clone()
    }

    /// How many times the hints were reset to defaults
    pub fn hint_resets(&self) -> usize {
        self.state.borrow().hint_resets
    }

    /// How many event polls have run
    pub fn poll_count(&self) -> usize {
        self.state.borrow().polls
    }

    /// Number of native callbacks installed on `window`
    pub fn installed_callbacks(&self, window: WindowHandle) -> usize {
        self.state
            .borrow()
            .windows
            .get(&window_id(window.as_ptr()))
            .map_or(0, |w| w.callbacks.installed())
    }

    /// Whether a monitor callback is installed
    pub fn has_monitor_callback(&self) -> bool {
        self.state.borrow().monitor_callback.is_some()
    }
}

unsafe impl NativeApi for Headless {
    unsafe fn init(&self) -> c_int {
        let failed = {
            let mut state = self.state.borrow_mut();
            match state.init_failure.take() {
                Some(code) => Some(code),
                None => {
                    state.initialized = true;
                    None
                }
            }
        };
        match failed {
            Some(code) => {
                self.emit(code, "Injected initialization failure");
                GLFW_FALSE
            }
            None => GLFW_TRUE,
        }
    }

    unsafe fn terminate(&self) {
        let mut state = self.state.borrow_mut();
        if !state.initialized {
            return;
        }
        state.initialized = false;
        state.windows.clear();
        state.current = None;
        state.swap_interval = None;
        state.hints.clear();
        state.events.clear();
        state.monitor_events.clear();
        state.monitor_callback = None;
    }

    unsafe fn get_version(&self, major: *mut c_int, minor: *mut c_int, rev: *mut c_int) {
        unsafe {
            put(major, 3);
            put(minor, 3);
            put(rev, 8);
        }
    }

    unsafe fn get_version_string(&self) -> *const c_char {
        self.state.borrow().version_string.as_ptr()
    }

    unsafe fn set_error_callback(&self, cbfun: Option<GLFWerrorfun>) -> Option<GLFWerrorfun> {
        std::mem::replace(&mut self.state.borrow_mut().error_callback, cbfun)
    }

    unsafe fn extension_supported(&self, extension: *const c_char) -> c_int {
        let name = if extension.is_null() {
            None
        } else {
            Some(unsafe { CStr::from_ptr(extension) }.to_string_lossy().into_owned())
        };
        self.run(GLFW_FALSE, |s| {
            s.require_context()?;
            match name {
                Some(name) if !name.is_empty() => Ok(glfw_bool(EXTENSIONS.contains(&name.as_str()))),
                _ => Err(failure(GLFW_INVALID_VALUE, "Extension name is empty string")),
            }
        })
    }

    unsafe fn get_proc_address(&self, procname: *const c_char) -> *const c_void {
        let known = !procname.is_null() && unsafe { CStr::from_ptr(procname) }.to_bytes().starts_with(b"gl");
        self.run(ptr::null(), |s| {
            s.require_context()?;
            Ok(if known { NonNull::<c_void>::dangling().as_ptr().cast_const() } else { ptr::null() })
        })
    }

    unsafe fn get_time(&self) -> c_double {
        self.run(0.0, |s| {
            s.time += s.time_step;
            Ok(s.time)
        })
    }

    unsafe fn set_time(&self, time: c_double) {
        self.run((), |s| {
            if time.is_finite() && time >= 0.0 {
                s.time = time;
                Ok(())
            } else {
                Err(failure(GLFW_INVALID_VALUE, format!("Invalid time {time}")))
            }
        });
    }

    unsafe fn get_clipboard_string(&self, window: *mut GLFWwindow) -> *const c_char {
        self.run(ptr::null(), |s| {
            s.window(window)?;
            s.clipboard
                .as_ref()
                .map(|text| text.as_ptr())
                .ok_or_else(|| failure(GLFW_FORMAT_UNAVAILABLE, "No string in the clipboard"))
        })
    }

    unsafe fn set_clipboard_string(&self, window: *mut GLFWwindow, string: *const c_char) {
        let text = (!string.is_null()).then(|| unsafe { CStr::from_ptr(string) }.to_owned());
        self.run((), |s| {
            s.window(window)?;
            let text = text.ok_or_else(|| failure(GLFW_INVALID_VALUE, "Clipboard string is null"))?;
            s.clipboard = Some(text);
            Ok(())
        });
    }

    unsafe fn get_monitors(&self, count: *mut c_int) -> *mut *mut GLFWmonitor {
        let (ptr, len) = self.run((ptr::null_mut(), 0), |s| {
            s.monitor_ptrs = s.monitors.iter().map(|m| monitor_ptr_of(m.id)).collect();
            let len = c_int::try_from(s.monitor_ptrs.len()).unwrap_or(0);
            Ok((s.monitor_ptrs.as_mut_ptr(), len))
        });
        unsafe { put(count, len) };
        ptr
    }

    unsafe fn get_primary_monitor(&self) -> *mut GLFWmonitor {
        self.run(ptr::null_mut(), |s| Ok(s.monitors.first().map_or(ptr::null_mut(), |m| monitor_ptr_of(m.id))))
    }

    unsafe fn get_monitor_pos(&self, monitor: *mut GLFWmonitor, xpos: *mut c_int, ypos: *mut c_int) {
        let (x, y) = self.run((0, 0), |s| Ok(s.monitor(monitor)?.pos));
        unsafe {
            put(xpos, x);
            put(ypos, y);
        }
    }

    unsafe fn get_monitor_physical_size(&self, monitor: *mut GLFWmonitor, width: *mut c_int, height: *mut c_int) {
        let (w, h) = self.run((0, 0), |s| Ok(s.monitor(monitor)?.physical));
        unsafe {
            put(width, w);
            put(height, h);
        }
    }

    unsafe fn get_monitor_name(&self, monitor: *mut GLFWmonitor) -> *const c_char {
        self.run(ptr::null(), |s| Ok(s.monitor(monitor)?.name.as_ptr()))
    }

    unsafe fn set_monitor_callback(&self, cbfun: Option<GLFWmonitorfun>) -> Option<GLFWmonitorfun> {
        self.run(None, |s| Ok(std::mem::replace(&mut s.monitor_callback, cbfun)))
    }

    unsafe fn get_video_mode(&self, monitor: *mut GLFWmonitor) -> *const GLFWvidmode {
        self.run(ptr::null(), |s| {
            let m = s.monitor(monitor)?;
            Ok(m.modes.get(m.current_mode).map_or(ptr::null(), ptr::from_ref))
        })
    }

    unsafe fn get_video_modes(&self, monitor: *mut GLFWmonitor, count: *mut c_int) -> *const GLFWvidmode {
        let (ptr, len) = self.run((ptr::null(), 0), |s| {
            let m = s.monitor(monitor)?;
            Ok((m.modes.as_ptr(), c_int::try_from(m.modes.len()).unwrap_or(0)))
        });
        unsafe { put(count, len) };
        ptr
    }

    unsafe fn set_gamma(&self, monitor: *mut GLFWmonitor, gamma: c_float) {
        self.run((), |s| {
            if !gamma.is_finite() || gamma <= 0.0 {
                return Err(failure(GLFW_INVALID_VALUE, format!("Invalid gamma value {gamma}")));
            }
            let m = s.monitor(monitor)?;
            let values = gamma_values(gamma);
            m.red = values.clone();
            m.green = values.clone();
            m.blue = values;
            Ok(())
        });
    }

    unsafe fn get_gamma_ramp(&self, monitor: *mut GLFWmonitor) -> *const GLFWgammaramp {
        self.run(ptr::null(), |s| {
            let m = s.monitor(monitor)?;
            m.view = GLFWgammaramp {
                red: m.red.as_mut_ptr(),
                green: m.green.as_mut_ptr(),
                blue: m.blue.as_mut_ptr(),
                size: u32::try_from(m.red.len()).unwrap_or(0),
            };
            Ok(ptr::from_ref(&m.view))
        })
    }

    unsafe fn set_gamma_ramp(&self, monitor: *mut GLFWmonitor, ramp: *const GLFWgammaramp) {
        let channels = unsafe { ramp.as_ref() }.map(|ramp| {
            let len = usize::try_from(ramp.size).unwrap_or(0);
            let read = |channel: *mut u16| {
                if channel.is_null() || len == 0 {
                    Vec::new()
                } else {
                    unsafe { std::slice::from_raw_parts(channel, len) }.to_vec()
                }
            };
            (read(ramp.red), read(ramp.green), read(ramp.blue))
        });
        self.run((), |s| {
            let (red, green, blue) = channels.ok_or_else(|| failure(GLFW_INVALID_VALUE, "Gamma ramp is null"))?;
            if red.is_empty() {
                return Err(failure(GLFW_INVALID_VALUE, "Invalid gamma ramp size"));
            }
            let m = s.monitor(monitor)?;
            m.red = red;
            m.green = green;
            m.blue = blue;
            Ok(())
        });
    }

    unsafe fn create_window(
        &self,
        width: c_int,
        height: c_int,
        title: *const c_char,
        monitor: *mut GLFWmonitor,
        share: *mut GLFWwindow,
    ) -> *mut GLFWwindow {
        let title = if title.is_null() {
            String::new()
        } else {
            unsafe { CStr::from_ptr(title) }.to_string_lossy().into_owned()
        };
        self.run(ptr::null_mut(), |s| s.create_window(width, height, title, monitor, share))
    }

    unsafe fn destroy_window(&self, window: *mut GLFWwindow) {
        self.run((), |s| {
            let id = window_id(window);
            if s.windows.remove(&id).is_none() {
                return Err(failure(GLFW_PLATFORM_ERROR, format!("Unknown window {window:p}")));
            }
            if s.current == Some(id) {
                s.current = None;
            }
            s.events.retain(|(target, _)| *target != id);
            Ok(())
        });
    }

    unsafe fn make_context_current(&self, window: *mut GLFWwindow) {
        self.run((), |s| {
            s.current = if window.is_null() {
                None
            } else {
                s.window(window)?;
                Some(window_id(window))
            };
            Ok(())
        });
    }

    unsafe fn get_current_context(&self) -> *mut GLFWwindow {
        self.run(ptr::null_mut(), |s| Ok(s.current.map_or(ptr::null_mut(), window_ptr_of)))
    }

    unsafe fn swap_buffers(&self, window: *mut GLFWwindow) {
        self.run((), |s| {
            s.window(window)?.swaps += 1;
            Ok(())
        });
    }

    unsafe fn swap_interval(&self, interval: c_int) {
        self.run((), |s| {
            s.require_context()?;
            s.swap_interval = Some(interval);
            Ok(())
        });
    }

    unsafe fn default_window_hints(&self) {
        self.run((), |s| {
            s.hints.clear();
            s.hint_resets += 1;
            Ok(())
        });
    }

    unsafe fn window_hint(&self, hint: c_int, value: c_int) {
        self.run((), |s| {
            if !KNOWN_HINTS.contains(&hint) {
                return Err(failure(GLFW_INVALID_ENUM, format!("Invalid window hint {hint:#x}")));
            }
            s.hints.insert(hint, value);
            Ok(())
        });
    }

    unsafe fn get_window_monitor(&self, window: *mut GLFWwindow) -> *mut GLFWmonitor {
        self.run(ptr::null_mut(), |s| Ok(s.window(window)?.monitor))
    }

    unsafe fn get_window_attrib(&self, window: *mut GLFWwindow, attrib: c_int) -> c_int {
        self.run(0, |s| {
            let w = s.window(window)?;
            Ok(match attrib {
                GLFW_FOCUSED => glfw_bool(w.focused),
                GLFW_ICONIFIED => glfw_bool(w.iconified),
                GLFW_RESIZABLE => glfw_bool(w.resizable),
                GLFW_VISIBLE => glfw_bool(w.visible),
                GLFW_DECORATED => glfw_bool(w.decorated),
                GLFW_CLIENT_API => w.client_api,
                GLFW_CONTEXT_VERSION_MAJOR => w.version.0,
                GLFW_CONTEXT_VERSION_MINOR => w.version.1,
                GLFW_CONTEXT_REVISION => 0,
                GLFW_CONTEXT_ROBUSTNESS => w.robustness,
                GLFW_OPENGL_FORWARD_COMPAT => glfw_bool(w.forward_compat),
                GLFW_OPENGL_DEBUG_CONTEXT => glfw_bool(w.debug_context),
                GLFW_OPENGL_PROFILE => w.profile,
                _ => return Err(failure(GLFW_INVALID_ENUM, format!("Invalid window attribute {attrib:#x}"))),
            })
        })
    }

    unsafe fn window_should_close(&self, window: *mut GLFWwindow) -> c_int {
        self.run(GLFW_FALSE, |s| Ok(glfw_bool(s.window(window)?.should_close)))
    }

    unsafe fn set_window_should_close(&self, window: *mut GLFWwindow, value: c_int) {
        self.run((), |s| {
            s.window(window)?.should_close = value != GLFW_FALSE;
            Ok(())
        });
    }

    unsafe fn set_window_title(&self, window: *mut GLFWwindow, title: *const c_char) {
        let title = (!title.is_null()).then(|| unsafe { CStr::from_ptr(title) }.to_string_lossy().into_owned());
        self.run((), |s| {
            s.window(window)?.title = title.unwrap_or_default();
            Ok(())
        });
    }

    unsafe fn get_window_pos(&self, window: *mut GLFWwindow, xpos: *mut c_int, ypos: *mut c_int) {
        let (x, y) = self.run((0, 0), |s| Ok(s.window(window)?.pos));
        unsafe {
            put(xpos, x);
            put(ypos, y);
        }
    }

    unsafe fn set_window_pos(&self, window: *mut GLFWwindow, xpos: c_int, ypos: c_int) {
        self.run((), |s| {
            s.window(window)?.pos = (xpos, ypos);
            s.queue(window_id(window), NativeEvent::WindowPos(xpos, ypos));
            Ok(())
        });
    }

    unsafe fn get_window_size(&self, window: *mut GLFWwindow, width: *mut c_int, height: *mut c_int) {
        let (w, h) = self.run((0, 0), |s| Ok(s.window(window)?.size));
        unsafe {
            put(width, w);
            put(height, h);
        }
    }

    unsafe fn set_window_size(&self, window: *mut GLFWwindow, width: c_int, height: c_int) {
        self.run((), |s| {
            if width <= 0 || height <= 0 {
                return Err(failure(GLFW_INVALID_VALUE, format!("Invalid window size {width}x{height}")));
            }
            let w = s.window(window)?;
            w.size = (width, height);
            w.framebuffer = (width, height);
            let id = window_id(window);
            s.queue(id, NativeEvent::WindowSize(width, height));
            s.queue(id, NativeEvent::FramebufferSize(width, height));
            Ok(())
        });
    }

    unsafe fn get_framebuffer_size(&self, window: *mut GLFWwindow, width: *mut c_int, height: *mut c_int) {
        let (w, h) = self.run((0, 0), |s| Ok(s.window(window)?.framebuffer));
        unsafe {
            put(width, w);
            put(height, h);
        }
    }

    unsafe fn iconify_window(&self, window: *mut GLFWwindow) {
        self.run((), |s| {
            let w = s.window(window)?;
            if !w.iconified {
                w.iconified = true;
                s.queue(window_id(window), NativeEvent::WindowIconify(true));
            }
            Ok(())
        });
    }

    unsafe fn restore_window(&self, window: *mut GLFWwindow) {
        self.run((), |s| {
            let w = s.window(window)?;
            if w.iconified {
                w.iconified = false;
                s.queue(window_id(window), NativeEvent::WindowIconify(false));
            }
            Ok(())
        });
    }

    unsafe fn show_window(&self, window: *mut GLFWwindow) {
        self.run((), |s| {
            s.window(window)?.visible = true;
            Ok(())
        });
    }

    unsafe fn hide_window(&self, window: *mut GLFWwindow) {
        self.run((), |s| {
            s.window(window)?.visible = false;
            Ok(())
        });
    }

    unsafe fn set_window_pos_callback(&self, window: *mut GLFWwindow, cbfun: Option<GLFWwindowposfun>) -> Option<GLFWwindowposfun> {
        self.run(None, |s| Ok(std::mem::replace(&mut s.window(window)?.callbacks.pos, cbfun)))
    }

    unsafe fn set_window_size_callback(&self, window: *mut GLFWwindow, cbfun: Option<GLFWwindowsizefun>) -> Option<GLFWwindowsizefun> {
        self.run(None, |s| Ok(std::mem::replace(&mut s.window(window)?.callbacks.size, cbfun)))
    }

    unsafe fn set_window_close_callback(&self, window: *mut GLFWwindow, cbfun: Option<GLFWwindowclosefun>) -> Option<GLFWwindowclosefun> {
        self.run(None, |s| Ok(std::mem::replace(&mut s.window(window)?.callbacks.close, cbfun)))
    }

    unsafe fn set_window_refresh_callback(&self, window: *mut GLFWwindow, cbfun: Option<GLFWwindowrefreshfun>) -> Option<GLFWwindowrefreshfun> {
        self.run(None, |s| Ok(std::mem::replace(&mut s.window(window)?.callbacks.refresh, cbfun)))
    }

    unsafe fn set_window_focus_callback(&self, window: *mut GLFWwindow, cbfun: Option<GLFWwindowfocusfun>) -> Option<GLFWwindowfocusfun> {
        self.run(None, |s| Ok(std::mem::replace(&mut s.window(window)?.callbacks.focus, cbfun)))
    }

    unsafe fn set_window_iconify_callback(&self, window: *mut GLFWwindow, cbfun: Option<GLFWwindowiconifyfun>) -> Option<GLFWwindowiconifyfun> {
        self.run(None, |s| Ok(std::mem::replace(&mut s.window(window)?.callbacks.iconify, cbfun)))
    }

    unsafe fn set_framebuffer_size_callback(&self, window: *mut GLFWwindow, cbfun: Option<GLFWframebuffersizefun>) -> Option<GLFWframebuffersizefun> {
        self.run(None, |s| Ok(std::mem::replace(&mut s.window(window)?.callbacks.framebuffer_size, cbfun)))
    }

    unsafe fn poll_events(&self) {
        let batch = self.run(None, |s| {
            s.polls += 1;
            Ok(Some((std::mem::take(&mut s.monitor_events), std::mem::take(&mut s.events))))
        });
        let Some((monitor_events, events)) = batch else {
            return;
        };
        for (id, event) in monitor_events {
            self.deliver_monitor(id, event);
        }
        for (id, event) in events {
            self.deliver(id, event);
        }
    }

    unsafe fn wait_events(&self) {
        // Nothing can arrive asynchronously, so waiting is polling
        unsafe { self.poll_events() };
    }

    unsafe fn get_input_mode(&self, window: *mut GLFWwindow, mode: c_int) -> c_int {
        self.run(0, |s| {
            let w = s.window(window)?;
            match mode {
                GLFW_CURSOR => Ok(w.cursor_mode),
                GLFW_STICKY_KEYS => Ok(glfw_bool(w.sticky_keys)),
                GLFW_STICKY_MOUSE_BUTTONS => Ok(glfw_bool(w.sticky_mouse_buttons)),
                _ => Err(failure(GLFW_INVALID_ENUM, format!("Invalid input mode {mode:#x}"))),
            }
        })
    }

    unsafe fn set_input_mode(&self, window: *mut GLFWwindow, mode: c_int, value: c_int) {
        self.run((), |s| {
            let w = s.window(window)?;
            match mode {
                GLFW_CURSOR => {
                    if ![GLFW_CURSOR_NORMAL, GLFW_CURSOR_HIDDEN, GLFW_CURSOR_DISABLED].contains(&value) {
                        return Err(failure(GLFW_INVALID_ENUM, format!("Invalid cursor mode {value:#x}")));
                    }
                    w.cursor_mode = value;
                }
                GLFW_STICKY_KEYS => w.sticky_keys = value != GLFW_FALSE,
                GLFW_STICKY_MOUSE_BUTTONS => w.sticky_mouse_buttons = value != GLFW_FALSE,
                _ => return Err(failure(GLFW_INVALID_ENUM, format!("Invalid input mode {mode:#x}"))),
            }
            Ok(())
        });
    }

    unsafe fn get_key(&self, window: *mut GLFWwindow, key: c_int) -> c_int {
        self.run(GLFW_RELEASE, |s| {
            if !(32..=GLFW_KEY_LAST).contains(&key) {
                return Err(failure(GLFW_INVALID_ENUM, format!("Invalid key {key}")));
            }
            let w = s.window(window)?;
            Ok(if w.pressed_keys.contains(&key) { GLFW_PRESS } else { GLFW_RELEASE })
        })
    }

    unsafe fn get_mouse_button(&self, window: *mut GLFWwindow, button: c_int) -> c_int {
        self.run(GLFW_RELEASE, |s| {
            let index = usize::try_from(button)
                .ok()
                .filter(|i| *i < 8)
                .ok_or_else(|| failure(GLFW_INVALID_ENUM, format!("Invalid mouse button {button}")))?;
            let w = s.window(window)?;
            Ok(if w.pressed_buttons[index] { GLFW_PRESS } else { GLFW_RELEASE })
        })
    }

    unsafe fn get_cursor_pos(&self, window: *mut GLFWwindow, xpos: *mut c_double, ypos: *mut c_double) {
        let (x, y) = self.run((0.0, 0.0), |s| Ok(s.window(window)?.cursor));
        unsafe {
            put(xpos, x);
            put(ypos, y);
        }
    }

    unsafe fn set_cursor_pos(&self, window: *mut GLFWwindow, xpos: c_double, ypos: c_double) {
        self.run((), |s| {
            s.window(window)?.cursor = (xpos, ypos);
            Ok(())
        });
    }

    unsafe fn joystick_present(&self, joy: c_int) -> c_int {
        self.run(GLFW_FALSE, |s| Ok(glfw_bool(s.joystick(joy)?.is_some())))
    }

    unsafe fn get_joystick_axes(&self, joy: c_int, count: *mut c_int) -> *const c_float {
        let (ptr, len) = self.run((ptr::null(), 0), |s| {
            Ok(s.joystick(joy)?.as_ref().map_or((ptr::null(), 0), |j| {
                (j.axes.as_ptr(), c_int::try_from(j.axes.len()).unwrap_or(0))
            }))
        });
        unsafe { put(count, len) };
        ptr
    }

    unsafe fn get_joystick_buttons(&self, joy: c_int, count: *mut c_int) -> *const c_uchar {
        let (ptr, len) = self.run((ptr::null(), 0), |s| {
            Ok(s.joystick(joy)?.as_ref().map_or((ptr::null(), 0), |j| {
                (j.buttons.as_ptr(), c_int::try_from(j.buttons.len()).unwrap_or(0))
            }))
        });
        unsafe { put(count, len) };
        ptr
    }

    unsafe fn get_joystick_name(&self, joy: c_int) -> *const c_char {
        self.run(ptr::null(), |s| Ok(s.joystick(joy)?.as_ref().map_or(ptr::null(), |j| j.name.as_ptr())))
    }

    unsafe fn set_key_callback(&self, window: *mut GLFWwindow, cbfun: Option<GLFWkeyfun>) -> Option<GLFWkeyfun> {
        self.run(None, |s| Ok(std::mem::replace(&mut s.window(window)?.callbacks.key, cbfun)))
    }

    unsafe fn set_char_callback(&self, window: *mut GLFWwindow, cbfun: Option<GLFWcharfun>) -> Option<GLFWcharfun> {
        self.run(None, |s| Ok(std::mem::replace(&mut s.window(window)?.callbacks.character, cbfun)))
    }

    unsafe fn set_mouse_button_callback(&self, window: *mut GLFWwindow, cbfun: Option<GLFWmousebuttonfun>) -> Option<GLFWmousebuttonfun> {
        self.run(None, |s| Ok(std::mem::replace(&mut s.window(window)?.callbacks.mouse_button, cbfun)))
    }

    unsafe fn set_cursor_pos_callback(&self, window: *mut GLFWwindow, cbfun: Option<GLFWcursorposfun>) -> Option<GLFWcursorposfun> {
        self.run(None, |s| Ok(std::mem::replace(&mut s.window(window)?.callbacks.cursor_pos, cbfun)))
    }

    unsafe fn set_cursor_enter_callback(&self, window: *mut GLFWwindow, cbfun: Option<GLFWcursorenterfun>) -> Option<GLFWcursorenterfun> {
        self.run(None, |s| Ok(std::mem::replace(&mut s.window(window)?.callbacks.cursor_enter, cbfun)))
    }

    unsafe fn set_scroll_callback(&self, window: *mut GLFWwindow, cbfun: Option<GLFWscrollfun>) -> Option<GLFWscrollfun> {
        self.run(None, |s| Ok(std::mem::replace(&mut s.window(window)?.callbacks.scroll, cbfun)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initialized() -> Headless {
        let headless = Headless::new();
        assert_eq!(unsafe { headless.init() }, GLFW_TRUE);
        headless
    }

    #[test]
    fn test_window_ids_are_recycled() {
        let headless = initialized();
        let first = unsafe { headless.create_window(10, 10, ptr::null(), ptr::null_mut(), ptr::null_mut()) };
        assert!(!first.is_null());
        unsafe { headless.destroy_window(first) };
        let second = unsafe { headless.create_window(10, 10, ptr::null(), ptr::null_mut(), ptr::null_mut()) };
        assert_eq!(first, second);
    }

    #[test]
    fn test_version_limit_applies() {
        let headless = initialized();
        headless.set_max_version(3, 2);
        unsafe {
            headless.window_hint(GLFW_CONTEXT_VERSION_MAJOR, 3);
            headless.window_hint(GLFW_CONTEXT_VERSION_MINOR, 3);
        }
        let window = unsafe { headless.create_window(10, 10, ptr::null(), ptr::null_mut(), ptr::null_mut()) };
        assert!(window.is_null());
        assert_eq!(headless.window_count(), 0);
    }

    #[test]
    fn test_calls_before_init_do_nothing() {
        let headless = Headless::new();
        let window = unsafe { headless.create_window(10, 10, ptr::null(), ptr::null_mut(), ptr::null_mut()) };
        assert!(window.is_null());
        assert!(!headless.is_initialized());
    }

    #[test]
    fn test_poll_applies_queued_state() {
        let headless = initialized();
        let raw = unsafe { headless.create_window(10, 10, ptr::null(), ptr::null_mut(), ptr::null_mut()) };
        let window = WindowHandle::from_ptr(raw).unwrap();
        headless.queue_event(window, NativeEvent::Key { key: 65, scancode: 0, action: GLFW_PRESS, mods: 0 });
        headless.queue_event(window, NativeEvent::WindowClose);

        assert_eq!(unsafe { headless.get_key(raw, 65) }, GLFW_RELEASE);
        unsafe { headless.poll_events() };
        assert_eq!(unsafe { headless.get_key(raw, 65) }, GLFW_PRESS);
        assert_eq!(unsafe { headless.window_should_close(raw) }, GLFW_TRUE);
        assert_eq!(headless.poll_count(), 1);
    }
}
