//! GLFW 3 constants
//!
//! Key codes live in [`crate::input::Key`]; everything else the binding
//! passes across the boundary is listed here.

#![allow(missing_docs)]

use std::ffi::c_int;

pub const GLFW_FALSE: c_int = 0;
pub const GLFW_TRUE: c_int = 1;

pub const GLFW_RELEASE: c_int = 0;
pub const GLFW_PRESS: c_int = 1;
pub const GLFW_REPEAT: c_int = 2;

// Error codes
pub const GLFW_NOT_INITIALIZED: c_int = 0x0001_0001;
pub const GLFW_NO_CURRENT_CONTEXT: c_int = 0x0001_0002;
pub const GLFW_INVALID_ENUM: c_int = 0x0001_0003;
pub const GLFW_INVALID_VALUE: c_int = 0x0001_0004;
pub const GLFW_OUT_OF_MEMORY: c_int = 0x0001_0005;
pub const GLFW_API_UNAVAILABLE: c_int = 0x0001_0006;
pub const GLFW_VERSION_UNAVAILABLE: c_int = 0x0001_0007;
pub const GLFW_PLATFORM_ERROR: c_int = 0x0001_0008;
pub const GLFW_FORMAT_UNAVAILABLE: c_int = 0x0001_0009;

// Window attributes
pub const GLFW_FOCUSED: c_int = 0x0002_0001;
pub const GLFW_ICONIFIED: c_int = 0x0002_0002;
pub const GLFW_RESIZABLE: c_int = 0x0002_0003;
pub const GLFW_VISIBLE: c_int = 0x0002_0004;
pub const GLFW_DECORATED: c_int = 0x0002_0005;

// Framebuffer hints
pub const GLFW_RED_BITS: c_int = 0x0002_1001;
pub const GLFW_GREEN_BITS: c_int = 0x0002_1002;
pub const GLFW_BLUE_BITS: c_int = 0x0002_1003;
pub const GLFW_ALPHA_BITS: c_int = 0x0002_1004;
pub const GLFW_DEPTH_BITS: c_int = 0x0002_1005;
pub const GLFW_STENCIL_BITS: c_int = 0x0002_1006;
pub const GLFW_ACCUM_RED_BITS: c_int = 0x0002_1007;
pub const GLFW_ACCUM_GREEN_BITS: c_int = 0x0002_1008;
pub const GLFW_ACCUM_BLUE_BITS: c_int = 0x0002_1009;
pub const GLFW_ACCUM_ALPHA_BITS: c_int = 0x0002_100A;
pub const GLFW_AUX_BUFFERS: c_int = 0x0002_100B;
pub const GLFW_STEREO: c_int = 0x0002_100C;
pub const GLFW_SAMPLES: c_int = 0x0002_100D;
pub const GLFW_SRGB_CAPABLE: c_int = 0x0002_100E;
pub const GLFW_REFRESH_RATE: c_int = 0x0002_100F;

// Context hints and attributes
pub const GLFW_CLIENT_API: c_int = 0x0002_2001;
pub const GLFW_CONTEXT_VERSION_MAJOR: c_int = 0x0002_2002;
pub const GLFW_CONTEXT_VERSION_MINOR: c_int = 0x0002_2003;
pub const GLFW_CONTEXT_REVISION: c_int = 0x0002_2004;
pub const GLFW_CONTEXT_ROBUSTNESS: c_int = 0x0002_2005;
pub const GLFW_OPENGL_FORWARD_COMPAT: c_int = 0x0002_2006;
pub const GLFW_OPENGL_DEBUG_CONTEXT: c_int = 0x0002_2007;
pub const GLFW_OPENGL_PROFILE: c_int = 0x0002_2008;

pub const GLFW_OPENGL_API: c_int = 0x0003_0001;
pub const GLFW_OPENGL_ES_API: c_int = 0x0003_0002;

pub const GLFW_NO_ROBUSTNESS: c_int = 0;
pub const GLFW_NO_RESET_NOTIFICATION: c_int = 0x0003_1001;
pub const GLFW_LOSE_CONTEXT_ON_RESET: c_int = 0x0003_1002;

pub const GLFW_OPENGL_ANY_PROFILE: c_int = 0;
pub const GLFW_OPENGL_CORE_PROFILE: c_int = 0x0003_2001;
pub const GLFW_OPENGL_COMPAT_PROFILE: c_int = 0x0003_2002;

// Input modes
pub const GLFW_CURSOR: c_int = 0x0003_3001;
pub const GLFW_STICKY_KEYS: c_int = 0x0003_3002;
pub const GLFW_STICKY_MOUSE_BUTTONS: c_int = 0x0003_3003;

pub const GLFW_CURSOR_NORMAL: c_int = 0x0003_4001;
pub const GLFW_CURSOR_HIDDEN: c_int = 0x0003_4002;
pub const GLFW_CURSOR_DISABLED: c_int = 0x0003_4003;

// Monitor events
pub const GLFW_CONNECTED: c_int = 0x0004_0001;
pub const GLFW_DISCONNECTED: c_int = 0x0004_0002;

pub const GLFW_MOUSE_BUTTON_LAST: c_int = 7;
pub const GLFW_JOYSTICK_LAST: c_int = 15;
pub const GLFW_KEY_LAST: c_int = 348;

pub const GLFW_MOD_SHIFT: c_int = 0x0001;
pub const GLFW_MOD_CONTROL: c_int = 0x0002;
pub const GLFW_MOD_ALT: c_int = 0x0004;
pub const GLFW_MOD_SUPER: c_int = 0x0008;
pub const GLFW_MOD_CAPS_LOCK: c_int = 0x0010;
pub const GLFW_MOD_NUM_LOCK: c_int = 0x0020;
