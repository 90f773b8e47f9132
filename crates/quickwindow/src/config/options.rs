//! Session and window settings

use serde::{Deserialize, Serialize};

use crate::hints::{ClientApi, ContextRobustness, Hint, Hints, OpenGlProfile};
use crate::input::Key;
use crate::session::ContextCandidate;

use super::Config;

/// Window creation options
///
/// Every field left as `None` keeps the library default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    /// Whether the user can resize the window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resizable: Option<bool>,
    /// Whether the window is shown on creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// Whether the window has a border and title bar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decorated: Option<bool>,
    /// Bits of the red channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red_bits: Option<i32>,
    /// Bits of the green channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub green_bits: Option<i32>,
    /// Bits of the blue channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blue_bits: Option<i32>,
    /// Bits of the alpha channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha_bits: Option<i32>,
    /// Bits of the depth buffer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_bits: Option<i32>,
    /// Bits of the stencil buffer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stencil_bits: Option<i32>,
    /// Multisampling sample count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<i32>,
    /// Refresh rate in full screen mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_rate: Option<i32>,
    /// Stereoscopic rendering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stereo: Option<bool>,
    /// sRGB capable framebuffer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srgb_capable: Option<bool>,
    /// OpenGL or OpenGL ES
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_api: Option<ClientApi>,
    /// `(major, minor)`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_version: Option<(i32, i32)>,
    /// Robustness strategy of the context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_robustness: Option<ContextRobustness>,
    /// Debug context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_context: Option<bool>,
    /// Forward-compatible context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_compat: Option<bool>,
    /// OpenGL profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opengl_profile: Option<OpenGlProfile>,
}

impl WindowOptions {
    /// The hints these options stand for
    pub fn to_hints(&self) -> Hints {
        let mut hints = Hints::new();
        if let Some(value) = self.resizable {
            hints.resizable(value);
        }
        if let Some(value) = self.visible {
            hints.visible(value);
        }
        if let Some(value) = self.decorated {
            hints.decorated(value);
        }
        let bits = [
            (Hint::RedBits, self.red_bits),
            (Hint::GreenBits, self.green_bits),
            (Hint::BlueBits, self.blue_bits),
            (Hint::AlphaBits, self.alpha_bits),
        ];
        for (hint, value) in bits {
            if let Some(value) = value {
                hints.set(hint, value);
            }
        }
        if let Some(bits) = self.depth_bits {
            hints.depth_bits(bits);
        }
        if let Some(bits) = self.stencil_bits {
            hints.stencil_bits(bits);
        }
        if let Some(samples) = self.samples {
            hints.samples(samples);
        }
        if let Some(rate) = self.refresh_rate {
            hints.refresh_rate(rate);
        }
        if let Some(value) = self.stereo {
            hints.stereo(value);
        }
        if let Some(value) = self.srgb_capable {
            hints.srgb_capable(value);
        }
        if let Some(api) = self.client_api {
            hints.client_api(api);
        }
        if let Some((major, minor)) = self.context_version {
            hints.context_version(major, minor);
        }
        if let Some(robustness) = self.context_robustness {
            hints.context_robustness(robustness);
        }
        if let Some(value) = self.debug_context {
            hints.debug_context(value);
        }
        if let Some(value) = self.forward_compat {
            hints.forward_compat(value);
        }
        if let Some(profile) = self.opengl_profile {
            hints.opengl_profile(profile);
        }
        hints
    }
}

/// Where a session window is placed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorSelection {
    /// A regular window
    #[default]
    Windowed,
    /// Full screen on the primary monitor
    Primary,
    /// Full screen on the monitor at this index of the connected list
    Index(usize),
}

/// Settings of a [`Session`](crate::session::Session)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Window width in screen coordinates
    pub width: i32,
    /// Window height in screen coordinates
    pub height: i32,
    /// Window title
    pub title: String,
    /// Frames per second, unlimited when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_limit: Option<f64>,
    /// Where the window goes
    pub monitor: MonitorSelection,
    /// A press of this key asks the window to close
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quit_key: Option<Key>,
    /// Context versions to try, in order
    pub candidates: Vec<ContextCandidate>,
    /// Applied after the context hints of each candidate
    pub options: WindowOptions,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "quickwindow".to_string(),
            frame_limit: None,
            monitor: MonitorSelection::Windowed,
            quit_key: None,
            candidates: ContextCandidate::defaults(),
            options: WindowOptions::default(),
        }
    }
}

impl Config for SessionConfig {}

impl Config for WindowOptions {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Format;

    #[test]
    fn test_empty_options_have_no_hints() {
        assert!(WindowOptions::default().to_hints().is_empty());
    }

    #[test]
    fn test_options_map_to_hints() {
        let options = WindowOptions {
            resizable: Some(false),
            alpha_bits: Some(0),
            samples: Some(4),
            context_version: Some((3, 2)),
            opengl_profile: Some(OpenGlProfile::Core),
            forward_compat: Some(true),
            ..WindowOptions::default()
        };
        let hints = options.to_hints();

        assert_eq!(hints.get(Hint::Resizable), Some(0));
        assert_eq!(hints.get(Hint::AlphaBits), Some(0));
        assert_eq!(hints.get(Hint::RedBits), None);
        assert_eq!(hints.get(Hint::Samples), Some(4));
        assert_eq!(hints.get(Hint::ContextVersionMajor), Some(3));
        assert_eq!(hints.get(Hint::ContextVersionMinor), Some(2));
        assert_eq!(hints.get(Hint::OpenGlProfile), Some(OpenGlProfile::Core.code()));
        assert_eq!(hints.get(Hint::OpenGlForwardCompat), Some(1));
        assert_eq!(hints.len(), 7);
    }

    #[test]
    fn test_session_config_from_toml() {
        let config: SessionConfig = Format::Toml
            .parse(
                r#"
                title = "demo"
                frame_limit = 60.0
                quit_key = "escape"
                monitor = "primary"

                [options]
                samples = 8
                client_api = "opengl_es"

                [[candidates]]
                major = 3
                minor = 1
                core = false
                "#,
            )
            .unwrap();

        assert_eq!(config.title, "demo");
        assert_eq!(config.width, 640);
        assert_eq!(config.frame_limit, Some(60.0));
        assert_eq!(config.quit_key, Some(Key::Escape));
        assert_eq!(config.monitor, MonitorSelection::Primary);
        assert_eq!(config.options.samples, Some(8));
        assert_eq!(config.options.client_api, Some(ClientApi::OpenGlEs));
        assert_eq!(config.candidates, vec![ContextCandidate::compat(3, 1)]);
    }

    #[test]
    fn test_session_config_from_ron() {
        let config: SessionConfig = Format::Ron
            .parse("(width: 800, height: 600, monitor: index(1), options: (context_version: Some((3, 3))))")
            .unwrap();
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.monitor, MonitorSelection::Index(1));
        assert_eq!(config.options.context_version, Some((3, 3)));
        assert_eq!(config.candidates, ContextCandidate::defaults());
    }
}
