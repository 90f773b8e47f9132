//! Scoped context switching
//!
//! [`ContextGuard`] makes a window's context current and restores whatever
//! was current before when it is dropped. Guards nest; the saved contexts
//! live on a per-thread stack and must be released in reverse order.

use std::cell::RefCell;

use crate::error::{UsageError, WindowResult};
use crate::glfw::Glfw;

use super::registry::WindowId;
use super::WindowRef;

thread_local! {
    static STACK: RefCell<Vec<Option<WindowId>>> = const { RefCell::new(Vec::new()) };
}

/// Number of scoped contexts active on this thread
pub fn depth() -> usize {
    STACK.with(|stack| stack.borrow().len())
}

/// Fail if a scoped context is active on this thread
pub(crate) fn ensure_unscoped() -> WindowResult<()> {
    if depth() > 0 {
        return Err(UsageError::ContextStackActive.into());
    }
    Ok(())
}

/// Restores the previously current context on drop
///
/// Created by [`WindowRef::make_current_scoped`].
#[must_use = "the previous context is restored as soon as the guard is dropped"]
pub struct ContextGuard {
    glfw: Glfw,
    depth: usize,
}

impl ContextGuard {
    pub(crate) fn enter(window: &WindowRef) -> WindowResult<Self> {
        let handle = window.handle()?;
        let glfw = window.glfw().clone();
        let previous = glfw
            .api()
            .current_context()?
            .and_then(|current| glfw.registry().borrow().id_of(current));

        glfw.api().make_context_current(Some(handle))?;
        let depth = STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(previous);
            stack.len()
        });
        Ok(Self { glfw, depth })
    }

    /// Nesting level of this guard, starting at 1
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let saved = STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.len() == self.depth {
                stack.pop()
            } else {
                None
            }
        });

        let Some(previous) = saved else {
            if !std::thread::panicking() {
                panic!("{}", UsageError::CorruptedContextStack);
            }
            return;
        };

        // A window closed in the meantime has no handle left to restore
        let handle = previous.and_then(|id| self.glfw.registry().borrow().handle_of(id));
        if let Err(e) = self.glfw.api().make_context_current(handle) {
            log::warn!("Failed to restore the previous context: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use super::*;
    use crate::error::WindowError;
    use crate::native::headless::Headless;
    use crate::window::{Window, WindowBuilder};

    fn windows(glfw: &Glfw, count: usize) -> Vec<Window> {
        (0..count)
            .map(|i| WindowBuilder::new(glfw, 32, 32, &format!("w{i}")).build().unwrap())
            .collect()
    }

    fn nest(remaining: &[Window], before: Option<&WindowRef>) {
        let glfw = remaining.first().map(|w| w.glfw().clone());
        if let (Some(window), Some(glfw)) = (remaining.first(), glfw) {
            {
                let guard = window.make_current_scoped().unwrap();
                assert_eq!(glfw.find_current().unwrap().as_ref(), Some(&**window));
                nest(&remaining[1..], Some(&**window));
                assert_eq!(guard.depth(), depth());
            }
            assert_eq!(glfw.find_current().unwrap().as_ref(), before);
        }
    }

    #[test]
    fn test_nested_guards_restore_in_order() {
        let glfw = Glfw::init(Headless::new()).unwrap();
        let all = windows(&glfw, 4);
        for n in 0..=all.len() {
            glfw.swap_current(None).unwrap();
            nest(&all[..n], None);
            assert_eq!(depth(), 0);
            assert!(glfw.find_current().unwrap().is_none());
        }
    }

    #[test]
    fn test_guard_restores_outer_window() {
        let glfw = Glfw::init(Headless::new()).unwrap();
        let all = windows(&glfw, 2);
        glfw.swap_current(Some(&*all[0])).unwrap();
        {
            let _guard = all[1].make_current_scoped().unwrap();
            assert!(all[1].is_current().unwrap());
        }
        assert!(all[0].is_current().unwrap());
    }

    #[test]
    fn test_make_current_rejected_while_scoped() {
        let glfw = Glfw::init(Headless::new()).unwrap();
        let all = windows(&glfw, 2);
        let guard = all[0].make_current_scoped().unwrap();

        let error = all[1].make_current().unwrap_err();
        assert!(matches!(error, WindowError::Usage(UsageError::ContextStackActive)));
        let error = glfw.swap_current(None).unwrap_err();
        assert!(matches!(error, WindowError::Usage(UsageError::ContextStackActive)));

        drop(guard);
        all[1].make_current().unwrap();
    }

    #[test]
    fn test_closed_saved_window_restores_nothing() {
        let glfw = Glfw::init(Headless::new()).unwrap();
        let mut all = windows(&glfw, 2);
        let second = all.pop().unwrap();
        let first = all.pop().unwrap();
        glfw.swap_current(Some(&*first)).unwrap();

        let guard = second.make_current_scoped().unwrap();
        first.close().unwrap();
        drop(guard);

        assert!(glfw.find_current().unwrap().is_none());
    }

    #[test]
    fn test_out_of_order_release_panics() {
        let glfw = Glfw::init(Headless::new()).unwrap();
        let all = windows(&glfw, 2);
        let outer = all[0].make_current_scoped().unwrap();
        let inner = all[1].make_current_scoped().unwrap();

        let result = panic::catch_unwind(AssertUnwindSafe(move || drop(outer)));
        assert!(result.is_err());

        drop(inner);
        assert_eq!(depth(), 1);
    }
}
