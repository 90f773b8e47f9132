//! C layouts, opaque handles and callback prototypes of the GLFW API

#![allow(missing_docs)]

use std::ffi::{c_char, c_double, c_int, c_uint, c_ushort};
use std::marker::{PhantomData, PhantomPinned};
use std::ptr::NonNull;

/// Opaque native window object
#[repr(C)]
pub struct GLFWwindow {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// Opaque native monitor object
#[repr(C)]
pub struct GLFWmonitor {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// Video mode as laid out by GLFW
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_snake_case)]
pub struct GLFWvidmode {
    pub width: c_int,
    pub height: c_int,
    pub redBits: c_int,
    pub greenBits: c_int,
    pub blueBits: c_int,
    pub refreshRate: c_int,
}

/// Gamma ramp as laid out by GLFW
///
/// The three channel pointers each reference `size` elements.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct GLFWgammaramp {
    pub red: *mut c_ushort,
    pub green: *mut c_ushort,
    pub blue: *mut c_ushort,
    pub size: c_uint,
}

pub type GLFWerrorfun = extern "C" fn(c_int, *const c_char);
pub type GLFWwindowposfun = extern "C" fn(*mut GLFWwindow, c_int, c_int);
pub type GLFWwindowsizefun = extern "C" fn(*mut GLFWwindow, c_int, c_int);
pub type GLFWwindowclosefun = extern "C" fn(*mut GLFWwindow);
pub type GLFWwindowrefreshfun = extern "C" fn(*mut GLFWwindow);
pub type GLFWwindowfocusfun = extern "C" fn(*mut GLFWwindow, c_int);
pub type GLFWwindowiconifyfun = extern "C" fn(*mut GLFWwindow, c_int);
pub type GLFWframebuffersizefun = extern "C" fn(*mut GLFWwindow, c_int, c_int);
pub type GLFWmousebuttonfun = extern "C" fn(*mut GLFWwindow, c_int, c_int, c_int);
pub type GLFWcursorposfun = extern "C" fn(*mut GLFWwindow, c_double, c_double);
pub type GLFWcursorenterfun = extern "C" fn(*mut GLFWwindow, c_int);
pub type GLFWscrollfun = extern "C" fn(*mut GLFWwindow, c_double, c_double);
pub type GLFWkeyfun = extern "C" fn(*mut GLFWwindow, c_int, c_int, c_int, c_int);
pub type GLFWcharfun = extern "C" fn(*mut GLFWwindow, c_uint);
pub type GLFWmonitorfun = extern "C" fn(*mut GLFWmonitor, c_int);

/// Non-null identity of a native window
///
/// Handle values are only meaningful while the window exists; the native
/// library is free to hand the same address to a later window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(NonNull<GLFWwindow>);

impl WindowHandle {
    /// Wrap a raw pointer, `None` for null
    pub fn from_ptr(ptr: *mut GLFWwindow) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    /// The raw pointer handed to the native library
    pub fn as_ptr(self) -> *mut GLFWwindow {
        self.0.as_ptr()
    }

    /// Address of the native object, useful for logging
    pub fn addr(self) -> usize {
        self.0.as_ptr() as usize
    }
}

/// Non-null identity of a native monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonitorHandle(NonNull<GLFWmonitor>);

impl MonitorHandle {
    /// Wrap a raw pointer, `None` for null
    pub fn from_ptr(ptr: *mut GLFWmonitor) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    /// The raw pointer handed to the native library
    pub fn as_ptr(self) -> *mut GLFWmonitor {
        self.0.as_ptr()
    }
}

/// Raw pointer of an optional window, null for `None`
pub fn window_ptr(handle: Option<WindowHandle>) -> *mut GLFWwindow {
    handle.map_or(std::ptr::null_mut(), WindowHandle::as_ptr)
}

/// Raw pointer of an optional monitor, null for `None`
pub fn monitor_ptr(handle: Option<MonitorHandle>) -> *mut GLFWmonitor {
    handle.map_or(std::ptr::null_mut(), MonitorHandle::as_ptr)
}
