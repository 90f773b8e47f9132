//! Window creation hints
//!
//! [`Hints`] collects the hints for the next window creation. Hints not
//! present keep the library defaults; every application starts from a
//! default reset so settings from earlier windows never leak into later
//! ones.

use std::collections::BTreeMap;
use std::ffi::c_int;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::binding::{Api, GlfwResult};
use crate::input::ParseNameError;
use crate::native::consts::*;

macro_rules! hint_table {
    ($( $(#[$meta:meta])* $variant:ident = $code:ident, $name:literal; )*) => {
        /// A window creation hint
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Hint {
            $( $(#[$meta])* $variant, )*
        }

        impl Hint {
            /// Every hint with its native code and name
            pub const TABLE: &'static [(Hint, c_int, &'static str)] = &[
                $( (Hint::$variant, $code, $name), )*
            ];

            /// Native hint code
            pub fn code(self) -> c_int {
                match self {
                    $( Self::$variant => $code, )*
                }
            }

            /// Lowercase hint name
            pub fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )*
                }
            }
        }
    };
}

hint_table! {
    /// Whether the window can be resized by the user
    Resizable = GLFW_RESIZABLE, "resizable";
    /// Whether the window is shown on creation
    Visible = GLFW_VISIBLE, "visible";
    /// Whether the window has borders and a title bar
    Decorated = GLFW_DECORATED, "decorated";
    /// Red bits of the default framebuffer
    RedBits = GLFW_RED_BITS, "red_bits";
    /// Green bits of the default framebuffer
    GreenBits = GLFW_GREEN_BITS, "green_bits";
    /// Blue bits of the default framebuffer
    BlueBits = GLFW_BLUE_BITS, "blue_bits";
    /// Alpha bits of the default framebuffer
    AlphaBits = GLFW_ALPHA_BITS, "alpha_bits";
    /// Depth buffer bits
    DepthBits = GLFW_DEPTH_BITS, "depth_bits";
    /// Stencil buffer bits
    StencilBits = GLFW_STENCIL_BITS, "stencil_bits";
    /// Red bits of the accumulation buffer
    AccumRedBits = GLFW_ACCUM_RED_BITS, "accum_red_bits";
    /// Green bits of the accumulation buffer
    AccumGreenBits = GLFW_ACCUM_GREEN_BITS, "accum_green_bits";
    /// Blue bits of the accumulation buffer
    AccumBlueBits = GLFW_ACCUM_BLUE_BITS, "accum_blue_bits";
    /// Alpha bits of the accumulation buffer
    AccumAlphaBits = GLFW_ACCUM_ALPHA_BITS, "accum_alpha_bits";
    /// Number of auxiliary buffers
    AuxBuffers = GLFW_AUX_BUFFERS, "aux_buffers";
    /// Multisampling sample count
    Samples = GLFW_SAMPLES, "samples";
    /// Refresh rate for full screen windows
    RefreshRate = GLFW_REFRESH_RATE, "refresh_rate";
    /// Stereoscopic rendering
    Stereo = GLFW_STEREO, "stereo";
    /// sRGB capable framebuffer
    SrgbCapable = GLFW_SRGB_CAPABLE, "srgb_capable";
    /// Client API, see [`ClientApi`]
    ClientApi = GLFW_CLIENT_API, "client_api";
    /// Requested context major version
    ContextVersionMajor = GLFW_CONTEXT_VERSION_MAJOR, "context_version_major";
    /// Requested context minor version
    ContextVersionMinor = GLFW_CONTEXT_VERSION_MINOR, "context_version_minor";
    /// Robustness strategy, see [`ContextRobustness`]
    ContextRobustness = GLFW_CONTEXT_ROBUSTNESS, "context_robustness";
    /// Forward-compatible context without deprecated functionality
    OpenGlForwardCompat = GLFW_OPENGL_FORWARD_COMPAT, "opengl_forward_compat";
    /// Debug context
    OpenGlDebugContext = GLFW_OPENGL_DEBUG_CONTEXT, "opengl_debug_context";
    /// OpenGL profile, see [`OpenGlProfile`]
    OpenGlProfile = GLFW_OPENGL_PROFILE, "opengl_profile";
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Hint {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::TABLE
            .iter()
            .find(|(_, _, name)| *name == s)
            .map(|(hint, _, _)| *hint)
            .ok_or_else(|| ParseNameError::new("hint", s))
    }
}

/// Which API the context is created for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientApi {
    /// Desktop OpenGL
    #[default]
    #[serde(rename = "opengl")]
    OpenGl,
    /// OpenGL ES
    #[serde(rename = "opengl_es")]
    OpenGlEs,
}

impl ClientApi {
    /// Decode a native client API value
    pub fn from_code(code: c_int) -> Option<Self> {
        match code {
            GLFW_OPENGL_API => Some(Self::OpenGl),
            GLFW_OPENGL_ES_API => Some(Self::OpenGlEs),
            _ => None,
        }
    }

    /// Native client API value
    pub fn code(self) -> c_int {
        match self {
            Self::OpenGl => GLFW_OPENGL_API,
            Self::OpenGlEs => GLFW_OPENGL_ES_API,
        }
    }
}

/// OpenGL profile of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenGlProfile {
    /// Unknown, or a version below 3.2
    #[default]
    Any,
    /// Core profile
    Core,
    /// Compatibility profile
    Compat,
}

impl OpenGlProfile {
    /// Decode a native profile value
    pub fn from_code(code: c_int) -> Option<Self> {
        match code {
            GLFW_OPENGL_ANY_PROFILE => Some(Self::Any),
            GLFW_OPENGL_CORE_PROFILE => Some(Self::Core),
            GLFW_OPENGL_COMPAT_PROFILE => Some(Self::Compat),
            _ => None,
        }
    }

    /// Native profile value
    pub fn code(self) -> c_int {
        match self {
            Self::Any => GLFW_OPENGL_ANY_PROFILE,
            Self::Core => GLFW_OPENGL_CORE_PROFILE,
            Self::Compat => GLFW_OPENGL_COMPAT_PROFILE,
        }
    }
}

/// Robustness strategy of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextRobustness {
    /// No robustness
    #[default]
    None,
    /// Robust, without reset notification
    NoResetNotification,
    /// Robust, losing the context on reset
    LoseContextOnReset,
}

impl ContextRobustness {
    /// Decode a native robustness value
    pub fn from_code(code: c_int) -> Option<Self> {
        match code {
            GLFW_NO_ROBUSTNESS => Some(Self::None),
            GLFW_NO_RESET_NOTIFICATION => Some(Self::NoResetNotification),
            GLFW_LOSE_CONTEXT_ON_RESET => Some(Self::LoseContextOnReset),
            _ => None,
        }
    }

    /// Native robustness value
    pub fn code(self) -> c_int {
        match self {
            Self::None => GLFW_NO_ROBUSTNESS,
            Self::NoResetNotification => GLFW_NO_RESET_NOTIFICATION,
            Self::LoseContextOnReset => GLFW_LOSE_CONTEXT_ON_RESET,
        }
    }
}

/// An ordered set of hint values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hints {
    values: BTreeMap<Hint, c_int>,
}

impl Hints {
    /// No hints: every value keeps the library default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a raw hint value, replacing any previous one
    pub fn set(&mut self, hint: Hint, value: c_int) -> &mut Self {
        self.values.insert(hint, value);
        self
    }

    /// Remove a hint so it falls back to the library default
    pub fn unset(&mut self, hint: Hint) -> &mut Self {
        self.values.remove(&hint);
        self
    }

    /// The value set for `hint`, if any
    pub fn get(&self, hint: Hint) -> Option<c_int> {
        self.values.get(&hint).copied()
    }

    /// Number of hints set
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no hint is set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Hints in code order
    pub fn iter(&self) -> impl Iterator<Item = (Hint, c_int)> + '_ {
        self.values.iter().map(|(hint, value)| (*hint, *value))
    }

    /// Copy every hint of `other` over this set
    pub fn merge(&mut self, other: &Self) -> &mut Self {
        self.values.extend(other.iter());
        self
    }

    fn set_bool(&mut self, hint: Hint, value: bool) -> &mut Self {
        self.set(hint, if value { GLFW_TRUE } else { GLFW_FALSE })
    }

    /// Whether the user can resize the window
    pub fn resizable(&mut self, value: bool) -> &mut Self {
        self.set_bool(Hint::Resizable, value)
    }

    /// Whether the window is shown on creation
    pub fn visible(&mut self, value: bool) -> &mut Self {
        self.set_bool(Hint::Visible, value)
    }

    /// Whether the window has decorations
    pub fn decorated(&mut self, value: bool) -> &mut Self {
        self.set_bool(Hint::Decorated, value)
    }

    /// Color channel bits of the default framebuffer
    pub fn rgba_bits(&mut self, red: c_int, green: c_int, blue: c_int, alpha: c_int) -> &mut Self {
        self.set(Hint::RedBits, red)
            .set(Hint::GreenBits, green)
            .set(Hint::BlueBits, blue)
            .set(Hint::AlphaBits, alpha)
    }

    /// Color channel bits of the accumulation buffer
    pub fn rgba_accum_bits(&mut self, red: c_int, green: c_int, blue: c_int, alpha: c_int) -> &mut Self {
        self.set(Hint::AccumRedBits, red)
            .set(Hint::AccumGreenBits, green)
            .set(Hint::AccumBlueBits, blue)
            .set(Hint::AccumAlphaBits, alpha)
    }

    /// Depth buffer bits
    pub fn depth_bits(&mut self, bits: c_int) -> &mut Self {
        self.set(Hint::DepthBits, bits)
    }

    /// Stencil buffer bits
    pub fn stencil_bits(&mut self, bits: c_int) -> &mut Self {
        self.set(Hint::StencilBits, bits)
    }

    /// Auxiliary buffer count
    pub fn aux_buffers(&mut self, count: c_int) -> &mut Self {
        self.set(Hint::AuxBuffers, count)
    }

    /// Multisampling sample count
    pub fn samples(&mut self, samples: c_int) -> &mut Self {
        self.set(Hint::Samples, samples)
    }

    /// Refresh rate for full screen windows
    pub fn refresh_rate(&mut self, rate: c_int) -> &mut Self {
        self.set(Hint::RefreshRate, rate)
    }

    /// Stereoscopic rendering
    pub fn stereo(&mut self, value: bool) -> &mut Self {
        self.set_bool(Hint::Stereo, value)
    }

    /// sRGB capable framebuffer
    pub fn srgb_capable(&mut self, value: bool) -> &mut Self {
        self.set_bool(Hint::SrgbCapable, value)
    }

    /// Client API of the context
    pub fn client_api(&mut self, api: ClientApi) -> &mut Self {
        self.set(Hint::ClientApi, api.code())
    }

    /// Requested context version
    pub fn context_version(&mut self, major: c_int, minor: c_int) -> &mut Self {
        self.set(Hint::ContextVersionMajor, major)
            .set(Hint::ContextVersionMinor, minor)
    }

    /// Robustness strategy
    pub fn context_robustness(&mut self, robustness: ContextRobustness) -> &mut Self {
        self.set(Hint::ContextRobustness, robustness.code())
    }

    /// Forward-compatible context
    pub fn forward_compat(&mut self, value: bool) -> &mut Self {
        self.set_bool(Hint::OpenGlForwardCompat, value)
    }

    /// Debug context
    pub fn debug_context(&mut self, value: bool) -> &mut Self {
        self.set_bool(Hint::OpenGlDebugContext, value)
    }

    /// OpenGL profile
    pub fn opengl_profile(&mut self, profile: OpenGlProfile) -> &mut Self {
        self.set(Hint::OpenGlProfile, profile.code())
    }

    /// Reset the library defaults, then set every hint in code order
    pub(crate) fn apply(&self, api: &Api) -> GlfwResult<()> {
        api.default_window_hints()?;
        for (hint, value) in self.iter() {
            api.window_hint(hint.code(), value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_complete_and_unique() {
        assert_eq!(Hint::TABLE.len(), 25);
        for (i, (hint, code, name)) in Hint::TABLE.iter().enumerate() {
            assert_eq!(hint.code(), *code);
            assert_eq!(hint.name(), *name);
            assert_eq!(name.parse::<Hint>(), Ok(*hint));
            assert!(Hint::TABLE[i + 1..].iter().all(|(_, other, _)| other != code));
        }
    }

    #[test]
    fn test_compound_setters() {
        let mut hints = Hints::new();
        hints.context_version(3, 2).rgba_bits(8, 8, 8, 0);
        assert_eq!(hints.get(Hint::ContextVersionMajor), Some(3));
        assert_eq!(hints.get(Hint::ContextVersionMinor), Some(2));
        assert_eq!(hints.get(Hint::AlphaBits), Some(0));
        assert_eq!(hints.len(), 6);

        hints.rgba_accum_bits(16, 16, 16, 16);
        assert_eq!(hints.get(Hint::AccumBlueBits), Some(16));
    }

    #[test]
    fn test_set_replaces_and_unset_removes() {
        let mut hints = Hints::new();
        hints.samples(4).samples(8);
        assert_eq!(hints.get(Hint::Samples), Some(8));
        assert_eq!(hints.len(), 1);

        hints.unset(Hint::Samples);
        assert!(hints.is_empty());
        assert_eq!(hints.get(Hint::Samples), None);
    }

    #[test]
    fn test_bool_hints_use_glfw_values() {
        let mut hints = Hints::new();
        hints.resizable(false).forward_compat(true);
        assert_eq!(hints.get(Hint::Resizable), Some(GLFW_FALSE));
        assert_eq!(hints.get(Hint::OpenGlForwardCompat), Some(GLFW_TRUE));
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = Hints::new();
        base.samples(2).visible(true);
        let mut user = Hints::new();
        user.samples(8);
        base.merge(&user);
        assert_eq!(base.get(Hint::Samples), Some(8));
        assert_eq!(base.get(Hint::Visible), Some(GLFW_TRUE));
    }

    #[test]
    fn test_context_enums_round_trip() {
        for api in [ClientApi::OpenGl, ClientApi::OpenGlEs] {
            assert_eq!(ClientApi::from_code(api.code()), Some(api));
        }
        for profile in [OpenGlProfile::Any, OpenGlProfile::Core, OpenGlProfile::Compat] {
            assert_eq!(OpenGlProfile::from_code(profile.code()), Some(profile));
        }
        for robustness in [
            ContextRobustness::None,
            ContextRobustness::NoResetNotification,
            ContextRobustness::LoseContextOnReset,
        ] {
            assert_eq!(ContextRobustness::from_code(robustness.code()), Some(robustness));
        }
        assert_eq!(ClientApi::from_code(7), None);
    }
}
