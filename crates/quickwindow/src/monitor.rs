//! Monitors, video modes and gamma ramps

use std::fmt;

use crate::error::WindowResult;
use crate::glfw::Glfw;
use crate::native::consts::{GLFW_CONNECTED, GLFW_DISCONNECTED};
use crate::native::{GLFWvidmode, MonitorHandle};

/// A video mode supported by a monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VideoMode {
    /// Width in screen coordinates
    pub width: i32,
    /// Height in screen coordinates
    pub height: i32,
    /// Red, green and blue bit depth
    pub bits: (i32, i32, i32),
    /// Refresh rate in Hz
    pub refresh_rate: i32,
}

impl From<GLFWvidmode> for VideoMode {
    fn from(mode: GLFWvidmode) -> Self {
        Self {
            width: mode.width,
            height: mode.height,
            bits: (mode.redBits, mode.greenBits, mode.blueBits),
            refresh_rate: mode.refreshRate,
        }
    }
}

impl fmt::Display for VideoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} @ {} Hz", self.width, self.height, self.refresh_rate)
    }
}

/// Per-channel gamma lookup tables
///
/// All three channels must have the same length when handed to
/// [`Monitor::set_gamma_ramp`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GammaRamp {
    /// Red channel
    pub red: Vec<u16>,
    /// Green channel
    pub green: Vec<u16>,
    /// Blue channel
    pub blue: Vec<u16>,
}

impl GammaRamp {
    /// Number of entries per channel
    pub fn len(&self) -> usize {
        self.red.len()
    }

    /// Whether the ramp has no entries
    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }
}

/// Connection change reported by the monitor callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitorEvent {
    /// The monitor was connected
    Connected,
    /// The monitor was disconnected
    Disconnected,
}

impl MonitorEvent {
    /// Decode a native monitor event
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            GLFW_CONNECTED => Some(Self::Connected),
            GLFW_DISCONNECTED => Some(Self::Disconnected),
            _ => None,
        }
    }
}

/// A connected monitor
///
/// Every query goes to the library; nothing is cached.
#[derive(Clone)]
pub struct Monitor {
    handle: MonitorHandle,
    glfw: Glfw,
}

impl Monitor {
    pub(crate) fn new(handle: MonitorHandle, glfw: Glfw) -> Self {
        Self { handle, glfw }
    }

    /// Native identity
    pub fn handle(&self) -> MonitorHandle {
        self.handle
    }

    /// Human readable name
    pub fn name(&self) -> WindowResult<String> {
        Ok(self.glfw.api().monitor_name(self.handle)?.unwrap_or_default())
    }

    /// Position of the top-left corner on the virtual screen
    pub fn pos(&self) -> WindowResult<(i32, i32)> {
        Ok(self.glfw.api().monitor_pos(self.handle)?)
    }

    /// Physical size in millimetres
    pub fn physical_size(&self) -> WindowResult<(i32, i32)> {
        Ok(self.glfw.api().monitor_physical_size(self.handle)?)
    }

    /// The current video mode
    pub fn video_mode(&self) -> WindowResult<Option<VideoMode>> {
        Ok(self.glfw.api().video_mode(self.handle)?.map(VideoMode::from))
    }

    /// Every supported video mode
    pub fn video_modes(&self) -> WindowResult<Vec<VideoMode>> {
        Ok(self
            .glfw
            .api()
            .video_modes(self.handle)?
            .into_iter()
            .map(VideoMode::from)
            .collect())
    }

    /// Generate and apply a gamma ramp for the exponent `gamma`
    pub fn set_gamma(&self, gamma: f32) -> WindowResult<()> {
        Ok(self.glfw.api().set_gamma(self.handle, gamma)?)
    }

    /// The current gamma ramp
    pub fn gamma_ramp(&self) -> WindowResult<Option<GammaRamp>> {
        let ramp = self.glfw.api().gamma_ramp(self.handle)?;
        Ok(ramp.map(|(red, green, blue)| GammaRamp { red, green, blue }))
    }

    /// Apply a gamma ramp
    pub fn set_gamma_ramp(&self, ramp: &GammaRamp) -> WindowResult<()> {
        Ok(self.glfw.api().set_gamma_ramp(self.handle, &ramp.red, &ramp.green, &ramp.blue)?)
    }
}

impl PartialEq for Monitor {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for Monitor {}

impl fmt::Debug for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Monitor").field("handle", &self.handle).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GlfwError;
    use crate::native::headless::Headless;

    #[test]
    fn test_primary_monitor_queries() {
        let headless = Headless::new();
        let glfw = Glfw::init(headless.clone()).unwrap();
        let monitor = glfw.primary_monitor().unwrap().unwrap();

        assert_eq!(monitor.name().unwrap(), "Headless 0");
        assert_eq!(monitor.pos().unwrap(), (0, 0));
        assert_eq!(monitor.physical_size().unwrap(), (520, 290));

        let mode = monitor.video_mode().unwrap().unwrap();
        assert_eq!(mode.width, 1920);
        assert_eq!(mode.bits, (8, 8, 8));
        assert!(monitor.video_modes().unwrap().contains(&mode));
        assert_eq!(glfw.monitors().unwrap()[0], monitor);
    }

    #[test]
    fn test_gamma_ramp_set_then_get() {
        let headless = Headless::new();
        let glfw = Glfw::init(headless).unwrap();
        let monitor = glfw.primary_monitor().unwrap().unwrap();

        let ramp = GammaRamp {
            red: vec![0, 100, 65535],
            green: vec![0, 200, 65535],
            blue: vec![0, 300, 65535],
        };
        monitor.set_gamma_ramp(&ramp).unwrap();
        assert_eq!(monitor.gamma_ramp().unwrap(), Some(ramp));
    }

    #[test]
    fn test_mismatched_ramp_is_invalid() {
        let glfw = Glfw::init(Headless::new()).unwrap();
        let monitor = glfw.primary_monitor().unwrap().unwrap();

        let ramp = GammaRamp { red: vec![0; 4], green: vec![0; 3], blue: vec![0; 4] };
        let error = monitor.set_gamma_ramp(&ramp).unwrap_err();
        assert!(matches!(error.as_glfw(), Some(GlfwError::InvalidValue(_))));
    }

    #[test]
    fn test_set_gamma_builds_ramp() {
        let glfw = Glfw::init(Headless::new()).unwrap();
        let monitor = glfw.primary_monitor().unwrap().unwrap();

        monitor.set_gamma(1.0).unwrap();
        let ramp = monitor.gamma_ramp().unwrap().unwrap();
        assert_eq!(ramp.len(), 256);
        assert_eq!(ramp.red[0], 0);
        assert_eq!(ramp.red[255], 65535);
        assert_eq!(ramp.red, ramp.blue);
    }

    #[test]
    fn test_monitor_event_codes() {
        assert_eq!(MonitorEvent::from_code(GLFW_CONNECTED), Some(MonitorEvent::Connected));
        assert_eq!(MonitorEvent::from_code(GLFW_DISCONNECTED), Some(MonitorEvent::Disconnected));
        assert_eq!(MonitorEvent::from_code(0), None);
    }
}
