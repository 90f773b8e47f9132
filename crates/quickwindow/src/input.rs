//! Keyboard, mouse and joystick types
//!
//! Native input codes are decoded into these types at the callback boundary.
//! Codes the binding does not recognise map to [`Key::Unknown`] for keys and
//! to `None` everywhere else.

use std::ffi::c_int;
use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::native::consts::{
    GLFW_CURSOR_DISABLED, GLFW_CURSOR_HIDDEN, GLFW_CURSOR_NORMAL, GLFW_JOYSTICK_LAST,
    GLFW_MOD_ALT, GLFW_MOD_CAPS_LOCK, GLFW_MOD_CONTROL, GLFW_MOD_NUM_LOCK, GLFW_MOD_SHIFT,
    GLFW_MOD_SUPER, GLFW_MOUSE_BUTTON_LAST, GLFW_PRESS, GLFW_RELEASE, GLFW_REPEAT,
};

macro_rules! keys {
    ($( $variant:ident = $code:literal, $name:literal; )*) => {
        /// A keyboard key, identified by its layout-independent GLFW code
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[allow(missing_docs)]
        pub enum Key {
            $( #[serde(rename = $name)] $variant, )*
            /// A key GLFW could not identify
            #[serde(rename = "unknown")]
            Unknown,
        }

        impl Key {
            /// Every named key, in code order
            pub const ALL: &'static [Key] = &[$(Key::$variant,)*];

            /// Decode a native key code
            pub fn from_code(code: c_int) -> Self {
                match code {
                    $( $code => Self::$variant, )*
                    _ => Self::Unknown,
                }
            }

            /// The native key code, `-1` for [`Key::Unknown`]
            pub fn code(self) -> c_int {
                match self {
                    $( Self::$variant => $code, )*
                    Self::Unknown => -1,
                }
            }

            /// Lowercase name, also used by serde and [`FromStr`]
            pub fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )*
                    Self::Unknown => "unknown",
                }
            }
        }
    };
}

keys! {
    Space = 32, "space";
    Apostrophe = 39, "apostrophe";
    Comma = 44, "comma";
    Minus = 45, "minus";
    Period = 46, "period";
    Slash = 47, "slash";
    Num0 = 48, "0";
    Num1 = 49, "1";
    Num2 = 50, "2";
    Num3 = 51, "3";
    Num4 = 52, "4";
    Num5 = 53, "5";
    Num6 = 54, "6";
    Num7 = 55, "7";
    Num8 = 56, "8";
    Num9 = 57, "9";
    Semicolon = 59, "semicolon";
    Equal = 61, "equal";
    A = 65, "a";
    B = 66, "b";
    C = 67, "c";
    D = 68, "d";
    E = 69, "e";
    F = 70, "f";
    G = 71, "g";
    H = 72, "h";
    I = 73, "i";
    J = 74, "j";
    K = 75, "k";
    L = 76, "l";
    M = 77, "m";
    N = 78, "n";
    O = 79, "o";
    P = 80, "p";
    Q = 81, "q";
    R = 82, "r";
    S = 83, "s";
    T = 84, "t";
    U = 85, "u";
    V = 86, "v";
    W = 87, "w";
    X = 88, "x";
    Y = 89, "y";
    Z = 90, "z";
    LeftBracket = 91, "left_bracket";
    Backslash = 92, "backslash";
    RightBracket = 93, "right_bracket";
    GraveAccent = 96, "grave_accent";
    World1 = 161, "world_1";
    World2 = 162, "world_2";
    Escape = 256, "escape";
    Enter = 257, "enter";
    Tab = 258, "tab";
    Backspace = 259, "backspace";
    Insert = 260, "insert";
    Delete = 261, "delete";
    Right = 262, "right";
    Left = 263, "left";
    Down = 264, "down";
    Up = 265, "up";
    PageUp = 266, "page_up";
    PageDown = 267, "page_down";
    Home = 268, "home";
    End = 269, "end";
    CapsLock = 280, "caps_lock";
    ScrollLock = 281, "scroll_lock";
    NumLock = 282, "num_lock";
    PrintScreen = 283, "print_screen";
    Pause = 284, "pause";
    F1 = 290, "f1";
    F2 = 291, "f2";
    F3 = 292, "f3";
    F4 = 293, "f4";
    F5 = 294, "f5";
    F6 = 295, "f6";
    F7 = 296, "f7";
    F8 = 297, "f8";
    F9 = 298, "f9";
    F10 = 299, "f10";
    F11 = 300, "f11";
    F12 = 301, "f12";
    F13 = 302, "f13";
    F14 = 303, "f14";
    F15 = 304, "f15";
    F16 = 305, "f16";
    F17 = 306, "f17";
    F18 = 307, "f18";
    F19 = 308, "f19";
    F20 = 309, "f20";
    F21 = 310, "f21";
    F22 = 311, "f22";
    F23 = 312, "f23";
    F24 = 313, "f24";
    F25 = 314, "f25";
    Kp0 = 320, "kp_0";
    Kp1 = 321, "kp_1";
    Kp2 = 322, "kp_2";
    Kp3 = 323, "kp_3";
    Kp4 = 324, "kp_4";
    Kp5 = 325, "kp_5";
    Kp6 = 326, "kp_6";
    Kp7 = 327, "kp_7";
    Kp8 = 328, "kp_8";
    Kp9 = 329, "kp_9";
    KpDecimal = 330, "kp_decimal";
    KpDivide = 331, "kp_divide";
    KpMultiply = 332, "kp_multiply";
    KpSubtract = 333, "kp_subtract";
    KpAdd = 334, "kp_add";
    KpEnter = 335, "kp_enter";
    KpEqual = 336, "kp_equal";
    LeftShift = 340, "left_shift";
    LeftControl = 341, "left_control";
    LeftAlt = 342, "left_alt";
    LeftSuper = 343, "left_super";
    RightShift = 344, "right_shift";
    RightControl = 345, "right_control";
    RightAlt = 346, "right_alt";
    RightSuper = 347, "right_super";
    Menu = 348, "menu";
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unrecognised name
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} name \"{name}\"")]
pub struct ParseNameError {
    kind: &'static str,
    name: String,
}

impl ParseNameError {
    pub(crate) fn new(kind: &'static str, name: &str) -> Self {
        Self { kind, name: name.to_string() }
    }
}

impl FromStr for Key {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "unknown" {
            return Ok(Self::Unknown);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or_else(|| ParseNameError::new("key", s))
    }
}

/// State change reported for a key or mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// The key or button was released
    Release,
    /// The key or button was pressed
    Press,
    /// The key was held down until it repeated
    Repeat,
}

impl Action {
    /// Decode a native action code
    pub fn from_code(code: c_int) -> Option<Self> {
        match code {
            GLFW_RELEASE => Some(Self::Release),
            GLFW_PRESS => Some(Self::Press),
            GLFW_REPEAT => Some(Self::Repeat),
            _ => None,
        }
    }

    /// The native action code
    pub fn code(self) -> c_int {
        match self {
            Self::Release => GLFW_RELEASE,
            Self::Press => GLFW_PRESS,
            Self::Repeat => GLFW_REPEAT,
        }
    }

    /// Press or repeat
    pub fn is_down(self) -> bool {
        !matches!(self, Self::Release)
    }
}

bitflags! {
    /// Modifier keys held during a key or mouse button event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: c_int {
        /// Either shift key
        const SHIFT = GLFW_MOD_SHIFT;
        /// Either control key
        const CONTROL = GLFW_MOD_CONTROL;
        /// Either alt key
        const ALT = GLFW_MOD_ALT;
        /// Either super key
        const SUPER = GLFW_MOD_SUPER;
        /// Caps lock is enabled
        const CAPS_LOCK = GLFW_MOD_CAPS_LOCK;
        /// Num lock is enabled
        const NUM_LOCK = GLFW_MOD_NUM_LOCK;
    }
}

impl Modifiers {
    /// Decode a native modifier mask, ignoring unknown bits
    pub fn from_code(code: c_int) -> Self {
        Self::from_bits_truncate(code)
    }
}

/// One of the eight mouse buttons GLFW tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum MouseButton {
    Button1,
    Button2,
    Button3,
    Button4,
    Button5,
    Button6,
    Button7,
    Button8,
}

impl MouseButton {
    /// The primary button
    pub const LEFT: Self = Self::Button1;
    /// The secondary button
    pub const RIGHT: Self = Self::Button2;
    /// The wheel button
    pub const MIDDLE: Self = Self::Button3;

    /// All buttons in code order
    pub const ALL: [Self; 8] = [
        Self::Button1,
        Self::Button2,
        Self::Button3,
        Self::Button4,
        Self::Button5,
        Self::Button6,
        Self::Button7,
        Self::Button8,
    ];

    /// Decode a native button index
    pub fn from_code(code: c_int) -> Option<Self> {
        if (0..=GLFW_MOUSE_BUTTON_LAST).contains(&code) {
            usize::try_from(code).ok().map(|i| Self::ALL[i])
        } else {
            None
        }
    }

    /// The native button index
    pub fn code(self) -> c_int {
        self as c_int
    }
}

/// How the cursor behaves over a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorMode {
    /// Visible and unconstrained
    #[default]
    Normal,
    /// Hidden while over the client area
    Hidden,
    /// Hidden and locked to the window, reporting unbounded motion
    Disabled,
}

impl CursorMode {
    /// Decode a native cursor mode value
    pub fn from_code(code: c_int) -> Option<Self> {
        match code {
            GLFW_CURSOR_NORMAL => Some(Self::Normal),
            GLFW_CURSOR_HIDDEN => Some(Self::Hidden),
            GLFW_CURSOR_DISABLED => Some(Self::Disabled),
            _ => None,
        }
    }

    /// The native cursor mode value
    pub fn code(self) -> c_int {
        match self {
            Self::Normal => GLFW_CURSOR_NORMAL,
            Self::Hidden => GLFW_CURSOR_HIDDEN,
            Self::Disabled => GLFW_CURSOR_DISABLED,
        }
    }
}

/// A joystick slot, `0` through `15`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Joystick(u8);

impl Joystick {
    /// The slot at `index`, if it exists
    pub fn new(index: u8) -> Option<Self> {
        (c_int::from(index) <= GLFW_JOYSTICK_LAST).then_some(Self(index))
    }

    /// Every joystick slot
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=GLFW_JOYSTICK_LAST).filter_map(|i| u8::try_from(i).ok()).map(Self)
    }

    /// Slot index
    pub fn index(self) -> u8 {
        self.0
    }

    pub(crate) fn code(self) -> c_int {
        c_int::from(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes_round_trip() {
        for &key in Key::ALL {
            assert_eq!(Key::from_code(key.code()), key);
            assert_eq!(key.name().parse::<Key>(), Ok(key));
        }
        assert_eq!(Key::ALL.len(), 120);
    }

    #[test]
    fn test_unrecognised_key_code() {
        assert_eq!(Key::from_code(1000), Key::Unknown);
        assert_eq!(Key::Unknown.code(), -1);
        assert!("hyper".parse::<Key>().is_err());
    }

    #[test]
    fn test_key_serde_name_matches_display() {
        let text = ron::to_string(&Key::LeftShift).unwrap();
        assert_eq!(text, "left_shift");
        assert_eq!(Key::Escape.to_string(), "escape");
    }

    #[test]
    fn test_modifiers_ignore_unknown_bits() {
        let mods = Modifiers::from_code(GLFW_MOD_SHIFT | GLFW_MOD_ALT | 0x4000);
        assert_eq!(mods, Modifiers::SHIFT | Modifiers::ALT);
    }

    #[test]
    fn test_mouse_button_bounds() {
        assert_eq!(MouseButton::from_code(0), Some(MouseButton::LEFT));
        assert_eq!(MouseButton::from_code(2), Some(MouseButton::MIDDLE));
        assert_eq!(MouseButton::from_code(7), Some(MouseButton::Button8));
        assert_eq!(MouseButton::from_code(8), None);
        assert_eq!(MouseButton::from_code(-1), None);
        assert_eq!(MouseButton::RIGHT.code(), 1);
    }

    #[test]
    fn test_cursor_mode_codes() {
        for mode in [CursorMode::Normal, CursorMode::Hidden, CursorMode::Disabled] {
            assert_eq!(CursorMode::from_code(mode.code()), Some(mode));
        }
        assert_eq!(CursorMode::from_code(0), None);
    }

    #[test]
    fn test_joystick_slots() {
        assert_eq!(Joystick::all().count(), 16);
        assert!(Joystick::new(15).is_some());
        assert!(Joystick::new(16).is_none());
    }
}
