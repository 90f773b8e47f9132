//! Thread-local slots filled from inside native callbacks
//!
//! GLFW reports errors through a single process-wide callback. The callback
//! records the failure for the calling thread; the checked wrappers in
//! [`super::Api`] clear the slot before each native call and take it after.
//!
//! Panics raised by user handlers cannot unwind through the C frames of the
//! native library, so they are parked here and resumed once the native call
//! has returned.

use std::any::Any;
use std::cell::RefCell;
use std::ffi::{c_char, c_int, CStr};
use std::panic::{self, AssertUnwindSafe};

use crate::error::GlfwError;

thread_local! {
    static ERROR: RefCell<Option<GlfwError>> = const { RefCell::new(None) };
    static PANIC: RefCell<Option<Box<dyn Any + Send + 'static>>> = const { RefCell::new(None) };
}

/// The error callback installed into the native library
pub(crate) extern "C" fn error_callback(code: c_int, description: *const c_char) {
    let message = if description.is_null() {
        String::new()
    } else {
        // SAFETY: GLFW passes a NUL-terminated description valid for the call.
        unsafe { CStr::from_ptr(description) }.to_string_lossy().into_owned()
    };
    log::debug!("GLFW error {code:#x}: {message}");
    ERROR.with(|slot| {
        let mut slot = slot.borrow_mut();
        // The first error of a call is the one that explains it
        if slot.is_none() {
            *slot = Some(GlfwError::from_code(code, message));
        }
    });
}

/// Forget any error recorded on this thread
pub(crate) fn clear() {
    ERROR.with(|slot| slot.borrow_mut().take());
}

/// Take the error recorded on this thread, leaving the slot empty
pub(crate) fn take() -> Option<GlfwError> {
    ERROR.with(|slot| slot.borrow_mut().take())
}

/// Whether an error is waiting on this thread
pub(crate) fn is_empty() -> bool {
    ERROR.with(|slot| slot.borrow().is_none())
}

/// Run user code from inside an `extern "C"` callback
///
/// A panic is stored instead of unwinding into the native library. Once a
/// panic is pending, later handlers of the same native call are skipped.
pub(crate) fn guard_callback(f: impl FnOnce()) {
    if PANIC.with(|p| p.borrow().is_some()) {
        return;
    }
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(f)) {
        PANIC.with(|p| *p.borrow_mut() = Some(payload));
    }
}

/// Re-raise a panic parked by [`guard_callback`]
pub(crate) fn resume_panic() {
    if let Some(payload) = PANIC.with(|p| p.borrow_mut().take()) {
        panic::resume_unwind(payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::consts::{GLFW_INVALID_VALUE, GLFW_PLATFORM_ERROR};

    #[test]
    fn test_callback_fills_slot_once() {
        clear();
        error_callback(GLFW_INVALID_VALUE, c"first".as_ptr());
        error_callback(GLFW_PLATFORM_ERROR, c"second".as_ptr());

        assert_eq!(take(), Some(GlfwError::InvalidValue("first".to_string())));
        assert!(is_empty());
    }

    #[test]
    fn test_null_description() {
        clear();
        error_callback(GLFW_PLATFORM_ERROR, std::ptr::null());
        assert_eq!(take(), Some(GlfwError::PlatformError(String::new())));
    }

    #[test]
    fn test_parked_panic_is_resumed() {
        guard_callback(|| panic!("handler failed"));
        // A second handler in the same native call does not run
        let mut ran = false;
        guard_callback(|| ran = true);
        assert!(!ran);

        let result = panic::catch_unwind(resume_panic);
        assert!(result.is_err());
        // Nothing left afterwards
        resume_panic();
    }
}
