//! Frame pacing
//!
//! [`FrameLimiter`] holds a loop to a target rate by spinning on a clock
//! until the frame period has passed. Spinning burns a core but wakes far
//! more precisely than a sleep; the wait cannot be interrupted.

use std::time::Instant;

use crate::error::{UsageError, WindowResult};
use crate::glfw::Glfw;

/// Source of monotonic time in seconds
pub trait Clock {
    /// Seconds since an arbitrary fixed origin
    fn now(&self) -> f64;
}

/// [`Clock`] backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Start counting from now
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// [`Clock`] backed by the library timer
///
/// Follows [`Glfw::set_time`] resets. If a read fails, time continues from
/// a local monotonic clock started alongside it.
#[derive(Debug, Clone)]
pub struct GlfwClock {
    glfw: Glfw,
    origin: f64,
    fallback: MonotonicClock,
}

impl GlfwClock {
    /// Read the timer of `glfw`
    pub fn new(glfw: &Glfw) -> WindowResult<Self> {
        let origin = glfw.time()?;
        Ok(Self { glfw: glfw.clone(), origin, fallback: MonotonicClock::new() })
    }
}

impl Clock for GlfwClock {
    fn now(&self) -> f64 {
        match self.glfw.time() {
            Ok(time) => time,
            Err(e) => {
                log::debug!("Library timer unavailable: {e}");
                self.origin + self.fallback.now()
            }
        }
    }
}

/// Busy-wait frame pacer
#[derive(Debug)]
pub struct FrameLimiter<C: Clock = MonotonicClock> {
    clock: C,
    limit: Option<f64>,
    step: f64,
    prev_time: f64,
    current_time: f64,
    accum: f64,
    frame_count: u64,
}

impl FrameLimiter {
    /// Pace to `limit` frames per second, `None` for unlimited
    pub fn new(limit: Option<f64>) -> WindowResult<Self> {
        Self::with_clock(MonotonicClock::new(), limit)
    }
}

impl<C: Clock> FrameLimiter<C> {
    /// Pace against `clock`
    pub fn with_clock(clock: C, limit: Option<f64>) -> WindowResult<Self> {
        let now = clock.now();
        let mut limiter = Self {
            clock,
            limit: None,
            step: 0.0,
            prev_time: now,
            current_time: now,
            accum: 0.0,
            frame_count: 0,
        };
        limiter.set_frame_limit(limit)?;
        Ok(limiter)
    }

    /// Change the target rate; takes effect on the next tick
    pub fn set_frame_limit(&mut self, limit: Option<f64>) -> WindowResult<()> {
        self.step = match limit {
            None => 0.0,
            Some(rate) if rate.is_finite() && rate > 0.0 => 1.0 / rate,
            Some(rate) => return Err(UsageError::InvalidFrameLimit(rate).into()),
        };
        self.limit = limit;
        Ok(())
    }

    /// Target rate in frames per second
    pub fn frame_limit(&self) -> Option<f64> {
        self.limit
    }

    /// Target frame period in seconds, 0 when unlimited
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Frames counted since the last whole second rolled over
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Mark the start of a frame and return the time since the previous one
    ///
    /// With a limit set, does not return before one frame period has passed
    /// since this tick began.
    pub fn tick(&mut self) -> f64 {
        self.prev_time = self.current_time;
        self.current_time = self.clock.now();
        let dt = self.current_time - self.prev_time;

        if self.limit.is_some() {
            self.accum += dt;
            self.frame_count += 1;
            if self.accum >= 1.0 {
                log::debug!("{} frames in the last second", self.frame_count);
                self.accum -= 1.0;
                self.frame_count = 0;
            }

            let deadline = self.current_time + self.step;
            while self.clock.now() < deadline {
                std::hint::spin_loop();
            }
        }
        dt
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use approx::assert_relative_eq;

    use super::*;
    use crate::error::WindowError;
    use crate::native::headless::Headless;

    /// Advances by a fixed amount on every read
    struct SteppingClock {
        time: Cell<f64>,
        increment: f64,
        reads: Cell<usize>,
    }

    impl SteppingClock {
        fn new(increment: f64) -> Self {
            Self { time: Cell::new(0.0), increment, reads: Cell::new(0) }
        }
    }

    impl Clock for &SteppingClock {
        fn now(&self) -> f64 {
            self.reads.set(self.reads.get() + 1);
            let t = self.time.get() + self.increment;
            self.time.set(t);
            t
        }
    }

    #[test]
    fn test_limited_tick_waits_a_full_step() {
        let clock = SteppingClock::new(0.001);
        let mut limiter = FrameLimiter::with_clock(&clock, Some(60.0)).unwrap();
        assert_relative_eq!(limiter.step(), 1.0 / 60.0);

        limiter.tick();
        let dt = limiter.tick();
        assert!(dt >= 1.0 / 60.0, "dt {dt} shorter than one frame");
        // Each tick spun on the clock rather than reading it once
        assert!(clock.reads.get() > 30);
    }

    #[test]
    fn test_unlimited_tick_returns_immediately() {
        let clock = SteppingClock::new(0.25);
        let mut limiter = FrameLimiter::with_clock(&clock, None).unwrap();
        let reads = clock.reads.get();

        let dt = limiter.tick();
        assert_relative_eq!(dt, 0.25);
        assert_eq!(clock.reads.get(), reads + 1);
        assert_eq!(limiter.frame_count(), 0);
    }

    #[test]
    fn test_frame_count_rolls_over_each_second() {
        let clock = SteppingClock::new(0.1);
        let mut limiter = FrameLimiter::with_clock(&clock, Some(10.0)).unwrap();
        let mut counts = Vec::new();
        for _ in 0..8 {
            limiter.tick();
            counts.push(limiter.frame_count());
        }
        assert!(counts.contains(&0), "count never rolled over: {counts:?}");
        assert!(counts.iter().all(|&count| count < 8));
    }

    #[test]
    fn test_invalid_limits_rejected() {
        for rate in [0.0, -30.0, f64::NAN, f64::INFINITY] {
            let error = FrameLimiter::new(Some(rate)).unwrap_err();
            assert!(matches!(error, WindowError::Usage(UsageError::InvalidFrameLimit(_))));
        }

        let mut limiter = FrameLimiter::new(Some(30.0)).unwrap();
        assert!(limiter.set_frame_limit(Some(-1.0)).is_err());
        assert_eq!(limiter.frame_limit(), Some(30.0));
        limiter.set_frame_limit(None).unwrap();
        assert_relative_eq!(limiter.step(), 0.0);
    }

    #[test]
    fn test_library_clock_paces_to_limit() {
        let headless = Headless::new();
        let glfw = Glfw::init(headless.clone()).unwrap();
        headless.set_time_step(0.002);

        let clock = GlfwClock::new(&glfw).unwrap();
        let mut limiter = FrameLimiter::with_clock(clock, Some(50.0)).unwrap();
        let start = glfw.time().unwrap();
        limiter.tick();
        let dt = limiter.tick();
        assert!(dt >= 0.02, "dt {dt} shorter than one frame");
        assert!(glfw.time().unwrap() - start >= 0.04);
    }

    #[test]
    fn test_library_clock_follows_timer_reset() {
        let headless = Headless::new();
        let glfw = Glfw::init(headless.clone()).unwrap();
        let clock = GlfwClock::new(&glfw).unwrap();

        glfw.set_time(10.0).unwrap();
        assert_relative_eq!(clock.now(), 10.0);
        headless.advance_time(0.5);
        assert_relative_eq!(clock.now(), 10.5);
    }

    #[test]
    fn test_real_clock_paces_to_limit() {
        let mut limiter = FrameLimiter::new(Some(60.0)).unwrap();
        let start = Instant::now();
        limiter.tick();
        limiter.tick();
        assert!(start.elapsed().as_secs_f64() >= 2.0 / 60.0);
    }
}
