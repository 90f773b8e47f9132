//! Runtime loading of the system GLFW 3 shared library

use crate::error::{WindowError, WindowResult};

/// Environment variable naming an explicit GLFW shared object to load
pub const LIBRARY_ENV: &str = "QUICKWINDOW_GLFW_LIBRARY";

#[cfg(target_os = "macos")]
const CANDIDATES: &[&str] = &["libglfw.3.dylib", "libglfw.dylib"];

#[cfg(all(unix, not(target_os = "macos")))]
const CANDIDATES: &[&str] = &["libglfw.so.3", "libglfw.so"];

/// The system GLFW library with every entry point resolved
///
/// The shared object stays loaded for the lifetime of this value.
#[cfg(unix)]
pub struct GlfwLibrary {
    handle: *mut libc::c_void,
    pub(super) fns: super::GlfwFns,
}

#[cfg(unix)]
impl GlfwLibrary {
    /// Load GLFW from [`LIBRARY_ENV`] or the platform's usual library names
    pub fn load() -> WindowResult<Self> {
        if let Ok(path) = std::env::var(LIBRARY_ENV) {
            return Self::open(&path);
        }

        let mut last_error = None;
        for name in CANDIDATES {
            match Self::open(name) {
                Ok(library) => return Ok(library),
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error.unwrap_or_else(|| WindowError::Library("no candidate library names".to_string())))
    }

    /// Load GLFW from an explicit file name or path
    pub fn open(name: &str) -> WindowResult<Self> {
        let c_name = std::ffi::CString::new(name)
            .map_err(|_| WindowError::Library(format!("library name contains NUL: {name:?}")))?;

        // SAFETY: `c_name` is a valid NUL-terminated string for the duration of the call.
        let handle = unsafe { libc::dlopen(c_name.as_ptr(), libc::RTLD_NOW | libc::RTLD_LOCAL) };
        if handle.is_null() {
            return Err(WindowError::Library(format!("{name}: {}", dlerror_message())));
        }

        // SAFETY: `handle` was just returned non-null by dlopen.
        match unsafe { super::GlfwFns::resolve(handle) } {
            Ok(fns) => {
                log::debug!("Loaded GLFW from {name}");
                Ok(Self { handle, fns })
            }
            Err(symbol) => {
                // SAFETY: nothing resolved from `handle` outlives this branch.
                unsafe { libc::dlclose(handle) };
                Err(WindowError::Library(format!("{name}: missing symbol {symbol}")))
            }
        }
    }
}

#[cfg(unix)]
impl Drop for GlfwLibrary {
    fn drop(&mut self) {
        // SAFETY: the handle came from dlopen and no function pointer is used after drop.
        unsafe { libc::dlclose(self.handle) };
    }
}

#[cfg(unix)]
fn dlerror_message() -> String {
    // SAFETY: dlerror returns null or a thread-local NUL-terminated message.
    let message = unsafe { libc::dlerror() };
    if message.is_null() {
        "unknown dlopen failure".to_string()
    } else {
        // SAFETY: checked non-null above.
        unsafe { std::ffi::CStr::from_ptr(message) }.to_string_lossy().into_owned()
    }
}

/// Placeholder on platforms without `dlopen`; it can never be constructed
#[cfg(not(unix))]
pub struct GlfwLibrary {
    pub(super) never: std::convert::Infallible,
}

#[cfg(not(unix))]
impl GlfwLibrary {
    /// Always fails: runtime loading is only implemented on unix
    pub fn load() -> WindowResult<Self> {
        Err(WindowError::Library("runtime loading of GLFW is only supported on unix".to_string()))
    }

    /// Always fails: runtime loading is only implemented on unix
    pub fn open(name: &str) -> WindowResult<Self> {
        Err(WindowError::Library(format!("{name}: runtime loading of GLFW is only supported on unix")))
    }
}
