//! Single-window sessions
//!
//! A [`Session`] is the quickest way to a running loop: it negotiates an
//! OpenGL context from a list of candidate versions, opens a
//! [`ManagedWindow`] and paces frames with a [`FrameLimiter`]. Only one
//! session can exist in the process at a time.
//!
//! ```no_run
//! use quickwindow::prelude::*;
//!
//! let glfw = Glfw::load()?;
//! let mut session = SessionBuilder::new(&glfw).frame_limit(Some(60.0)).quit_key(Some(Key::Escape)).open()?;
//! session.run(|_, frame| {
//!     for event in &frame.events {
//!         println!("{event:?}");
//!     }
//! })?;
//! # Ok::<(), quickwindow::WindowError>(())
//! ```

use std::cell::RefCell;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::config::{MonitorSelection, SessionConfig, WindowOptions};
use crate::error::{GlfwError, UsageError, WindowError, WindowResult};
use crate::events::Event;
use crate::foundation::time::{FrameLimiter, GlfwClock};
use crate::glfw::Glfw;
use crate::hints::{Hint, Hints, OpenGlProfile};
use crate::input::Key;
use crate::monitor::Monitor;
use crate::window::{ManagedWindow, WindowBuilder, WindowRef};

/// Hints owned by the context candidates
const CANDIDATE_HINTS: [Hint; 4] =
    [Hint::ContextVersionMajor, Hint::ContextVersionMinor, Hint::OpenGlProfile, Hint::OpenGlForwardCompat];

static SESSION_ACTIVE: AtomicBool = AtomicBool::new(false);

thread_local! {
    static CURRENT: RefCell<Option<WindowRef>> = const { RefCell::new(None) };
}

/// The window of the session running on this thread
pub fn current_window() -> Option<WindowRef> {
    CURRENT.with(|current| current.borrow().clone())
}

/// Whether a session exists anywhere in the process
pub fn is_active() -> bool {
    SESSION_ACTIVE.load(Ordering::Acquire)
}

/// One context version to try
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextCandidate {
    /// Major version
    pub major: i32,
    /// Minor version
    pub minor: i32,
    /// Forward-compatible core profile
    pub core: bool,
}

impl ContextCandidate {
    /// A forward-compatible core profile context
    pub const fn core(major: i32, minor: i32) -> Self {
        Self { major, minor, core: true }
    }

    /// A context without profile requirements
    pub const fn compat(major: i32, minor: i32) -> Self {
        Self { major, minor, core: false }
    }

    /// 3.3 core, 3.2 core, 3.1, 3.0
    pub fn defaults() -> Vec<Self> {
        vec![Self::core(3, 3), Self::core(3, 2), Self::compat(3, 1), Self::compat(3, 0)]
    }

    fn hints(self) -> Hints {
        let mut hints = Hints::new();
        hints.context_version(self.major, self.minor);
        if self.core {
            hints.forward_compat(true).opengl_profile(OpenGlProfile::Core);
        }
        hints
    }
}

impl fmt::Display for ContextCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if self.core {
            f.write_str(" CORE")?;
        }
        Ok(())
    }
}

/// Why one candidate was rejected
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFailure {
    /// The version that was tried
    pub candidate: ContextCandidate,
    /// What the library reported
    pub error: GlfwError,
}

impl fmt::Display for CandidateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.candidate, self.error)
    }
}

/// Releases the process-wide session slot on drop
struct SessionClaim;

impl SessionClaim {
    fn acquire() -> WindowResult<Self> {
        SESSION_ACTIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| UsageError::SessionActive)?;
        Ok(Self)
    }
}

impl Drop for SessionClaim {
    fn drop(&mut self) {
        SESSION_ACTIVE.store(false, Ordering::Release);
    }
}

/// One iteration of the session loop
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Seconds since the previous frame
    pub dt: f64,
    /// Events delivered since the previous frame, oldest first
    pub events: Vec<Event>,
}

/// Configures and opens a [`Session`]
pub struct SessionBuilder<'g> {
    glfw: &'g Glfw,
    config: SessionConfig,
    monitor: Option<Monitor>,
    shared: Option<WindowRef>,
}

impl<'g> SessionBuilder<'g> {
    /// A 640x480 window titled "quickwindow", default candidates, no limit
    pub fn new(glfw: &'g Glfw) -> Self {
        Self { glfw, config: SessionConfig::default(), monitor: None, shared: None }
    }

    /// Replace every setting with `config`
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Window size in screen coordinates
    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Window title
    pub fn title(mut self, title: &str) -> Self {
        self.config.title = title.to_string();
        self
    }

    /// Frames per second, `None` for unlimited
    pub fn frame_limit(mut self, limit: Option<f64>) -> Self {
        self.config.frame_limit = limit;
        self
    }

    /// Context versions to try, in order
    pub fn candidates(mut self, candidates: Vec<ContextCandidate>) -> Self {
        self.config.candidates = candidates;
        self
    }

    /// Go full screen on `monitor`; overrides the configured selection
    pub fn monitor(mut self, monitor: Option<&Monitor>) -> Self {
        self.monitor = monitor.cloned();
        self
    }

    /// Share OpenGL objects with `window`
    pub fn shared(mut self, window: Option<&WindowRef>) -> Self {
        self.shared = window.cloned();
        self
    }

    /// A press of `key` asks the window to close
    pub fn quit_key(mut self, key: Option<Key>) -> Self {
        self.config.quit_key = key;
        self
    }

    /// Window options applied on top of each candidate's context hints
    ///
    /// Context version, profile and forward compatibility come from the
    /// candidates; those options are ignored.
    pub fn options(mut self, options: WindowOptions) -> Self {
        self.config.options = options;
        self
    }

    /// Negotiate a context and open the window
    ///
    /// Candidates that fail for a reason another version might not share
    /// are logged and skipped. Fails with [`WindowError::NoContext`] once
    /// every candidate has been rejected.
    pub fn open(self) -> WindowResult<Session> {
        let claim = SessionClaim::acquire()?;
        let limiter = FrameLimiter::with_clock(GlfwClock::new(self.glfw)?, self.config.frame_limit)?;
        let monitor = self.resolve_monitor()?;
        let options = self.option_hints();

        let mut failures = Vec::new();
        for &candidate in &self.config.candidates {
            let mut builder = WindowBuilder::new(self.glfw, self.config.width, self.config.height, &self.config.title)
                .monitor(monitor.as_ref())
                .shared(self.shared.as_ref())
                .hints(candidate.hints());
            builder.hints_mut().merge(&options);

            match ManagedWindow::new(builder) {
                Ok(window) => {
                    let (major, minor, revision) = window.context_version()?;
                    log::info!("Opened {:?} with OpenGL {major}.{minor}.{revision}", self.config.title);
                    CURRENT.with(|current| *current.borrow_mut() = Some(window.window().to_ref()));
                    return Ok(Session {
                        window,
                        limiter,
                        glfw: self.glfw.clone(),
                        quit_key: self.config.quit_key,
                        started: false,
                        _claim: claim,
                    });
                }
                Err(WindowError::Glfw(error)) if error.is_negotiable() => {
                    log::warn!("{candidate}: {error}");
                    failures.push(CandidateFailure { candidate, error });
                }
                Err(e) => return Err(e),
            }
        }
        Err(WindowError::NoContext(failures))
    }

    /// [`open`](Self::open), or print the failure and exit with status 1
    pub fn open_or_exit(self) -> Session {
        match self.open() {
            Ok(session) => session,
            Err(e) => {
                log::error!("{e}");
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }

    fn option_hints(&self) -> Hints {
        let mut hints = self.config.options.to_hints();
        for hint in CANDIDATE_HINTS {
            if hints.get(hint).is_some() {
                log::warn!("Ignoring window option {}: set by the context candidates", hint.name());
                hints.unset(hint);
            }
        }
        hints
    }

    fn resolve_monitor(&self) -> WindowResult<Option<Monitor>> {
        if self.monitor.is_some() {
            return Ok(self.monitor.clone());
        }
        match self.config.monitor {
            MonitorSelection::Windowed => Ok(None),
            MonitorSelection::Primary => self.glfw.primary_monitor(),
            MonitorSelection::Index(index) => {
                let monitor = self.glfw.monitors()?.into_iter().nth(index);
                if monitor.is_none() {
                    log::warn!("No monitor at index {index}, opening a regular window");
                }
                Ok(monitor)
            }
        }
    }
}

/// The one window of the process and its frame loop
pub struct Session {
    window: ManagedWindow,
    limiter: FrameLimiter<GlfwClock>,
    glfw: Glfw,
    quit_key: Option<Key>,
    started: bool,
    _claim: SessionClaim,
}

impl Session {
    /// The session window
    pub fn window(&self) -> &ManagedWindow {
        &self.window
    }

    /// The library the session runs on
    pub fn glfw(&self) -> &Glfw {
        &self.glfw
    }

    /// The frame pacer, to change the limit mid-run
    pub fn limiter_mut(&mut self) -> &mut FrameLimiter<GlfwClock> {
        &mut self.limiter
    }

    /// Ask the loop to finish after the current frame
    pub fn quit(&self) -> WindowResult<()> {
        self.window.quit()
    }

    /// Advance to the next frame
    ///
    /// Presents the previous frame, then returns `None` once the window
    /// should close. Otherwise polls events, waits out the frame limit and
    /// hands back the elapsed time with every event since the last frame.
    /// Once `None` has been returned nothing is presented until a frame
    /// starts again.
    pub fn next_frame(&mut self) -> WindowResult<Option<Frame>> {
        if self.started {
            self.window.swap_buffers()?;
        }
        if self.window.should_close()? {
            self.started = false;
            return Ok(None);
        }

        self.glfw.poll_events()?;
        let dt = self.limiter.tick();
        let events: Vec<Event> = self.window.events().collect();
        if let Some(key) = self.quit_key {
            if events.iter().any(|event| event.is_key_press(key)) {
                self.window.quit()?;
            }
        }
        self.started = true;
        Ok(Some(Frame { dt, events }))
    }

    /// Call `frame` for every frame until the window should close
    pub fn run(&mut self, mut frame: impl FnMut(&ManagedWindow, Frame)) -> WindowResult<()> {
        while let Some(next) = self.next_frame()? {
            frame(&self.window, next);
        }
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = CURRENT.try_with(|current| current.borrow_mut().take());
        log::debug!("Session closed");
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("window", &self.window)
            .field("frame_limit", &self.limiter.frame_limit())
            .field("quit_key", &self.quit_key)
            .finish()
    }
}
