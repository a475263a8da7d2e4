//! Physical key codes
//!
//! Keyboard keys, mouse buttons and joystick buttons share a single code space
//! so that any of them can be bound to a button or digital axis. Joystick
//! buttons occupy a reserved range at the end of the enumeration.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::error::{InputError, check_range};

/// Number of joysticks the system can address
pub const MAX_JOYSTICKS: usize = 4;
/// Number of buttons per joystick
pub const MAX_JOYSTICK_BUTTONS: usize = 20;
/// Number of axis slots per joystick
pub const MAX_JOYSTICK_AXES: usize = 10;
/// Number of mouse axes (X, Y, wheel)
pub const MAX_MOUSE_AXES: usize = 3;

/// A physical input that is either up or down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KeyCode {
    /// Nothing bound
    #[default]
    None,

    // Editing / navigation
    Backspace,
    Tab,
    Enter,
    Escape,
    Space,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,

    // Arrows
    Up,
    Down,
    Left,
    Right,

    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Numbers
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Punctuation
    Minus,
    Equals,
    LeftBracket,
    RightBracket,
    Semicolon,
    Quote,
    Comma,
    Period,
    Slash,
    Backslash,
    Backquote,

    // Modifiers
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,

    // Mouse buttons
    Mouse0,
    Mouse1,
    Mouse2,
    Mouse3,
    Mouse4,
    Mouse5,
    Mouse6,

    /// Button `button` on joystick `joystick`
    JoystickButton { joystick: u8, button: u8 },
}

/// Named codes in enumeration order, paired with their textual form
const NAMED_KEYS: &[(KeyCode, &str)] = &[
    (KeyCode::Backspace, "Backspace"),
    (KeyCode::Tab, "Tab"),
    (KeyCode::Enter, "Enter"),
    (KeyCode::Escape, "Escape"),
    (KeyCode::Space, "Space"),
    (KeyCode::Delete, "Delete"),
    (KeyCode::Insert, "Insert"),
    (KeyCode::Home, "Home"),
    (KeyCode::End, "End"),
    (KeyCode::PageUp, "PageUp"),
    (KeyCode::PageDown, "PageDown"),
    (KeyCode::Up, "Up"),
    (KeyCode::Down, "Down"),
    (KeyCode::Left, "Left"),
    (KeyCode::Right, "Right"),
    (KeyCode::A, "A"),
    (KeyCode::B, "B"),
    (KeyCode::C, "C"),
    (KeyCode::D, "D"),
    (KeyCode::E, "E"),
    (KeyCode::F, "F"),
    (KeyCode::G, "G"),
    (KeyCode::H, "H"),
    (KeyCode::I, "I"),
    (KeyCode::J, "J"),
    (KeyCode::K, "K"),
    (KeyCode::L, "L"),
    (KeyCode::M, "M"),
    (KeyCode::N, "N"),
    (KeyCode::O, "O"),
    (KeyCode::P, "P"),
    (KeyCode::Q, "Q"),
    (KeyCode::R, "R"),
    (KeyCode::S, "S"),
    (KeyCode::T, "T"),
    (KeyCode::U, "U"),
    (KeyCode::V, "V"),
    (KeyCode::W, "W"),
    (KeyCode::X, "X"),
    (KeyCode::Y, "Y"),
    (KeyCode::Z, "Z"),
    (KeyCode::Num0, "Num0"),
    (KeyCode::Num1, "Num1"),
    (KeyCode::Num2, "Num2"),
    (KeyCode::Num3, "Num3"),
    (KeyCode::Num4, "Num4"),
    (KeyCode::Num5, "Num5"),
    (KeyCode::Num6, "Num6"),
    (KeyCode::Num7, "Num7"),
    (KeyCode::Num8, "Num8"),
    (KeyCode::Num9, "Num9"),
    (KeyCode::F1, "F1"),
    (KeyCode::F2, "F2"),
    (KeyCode::F3, "F3"),
    (KeyCode::F4, "F4"),
    (KeyCode::F5, "F5"),
    (KeyCode::F6, "F6"),
    (KeyCode::F7, "F7"),
    (KeyCode::F8, "F8"),
    (KeyCode::F9, "F9"),
    (KeyCode::F10, "F10"),
    (KeyCode::F11, "F11"),
    (KeyCode::F12, "F12"),
    (KeyCode::Minus, "Minus"),
    (KeyCode::Equals, "Equals"),
    (KeyCode::LeftBracket, "LeftBracket"),
    (KeyCode::RightBracket, "RightBracket"),
    (KeyCode::Semicolon, "Semicolon"),
    (KeyCode::Quote, "Quote"),
    (KeyCode::Comma, "Comma"),
    (KeyCode::Period, "Period"),
    (KeyCode::Slash, "Slash"),
    (KeyCode::Backslash, "Backslash"),
    (KeyCode::Backquote, "Backquote"),
    (KeyCode::LeftShift, "LeftShift"),
    (KeyCode::RightShift, "RightShift"),
    (KeyCode::LeftControl, "LeftControl"),
    (KeyCode::RightControl, "RightControl"),
    (KeyCode::LeftAlt, "LeftAlt"),
    (KeyCode::RightAlt, "RightAlt"),
    (KeyCode::LeftSuper, "LeftSuper"),
    (KeyCode::RightSuper, "RightSuper"),
    (KeyCode::Mouse0, "Mouse0"),
    (KeyCode::Mouse1, "Mouse1"),
    (KeyCode::Mouse2, "Mouse2"),
    (KeyCode::Mouse3, "Mouse3"),
    (KeyCode::Mouse4, "Mouse4"),
    (KeyCode::Mouse5, "Mouse5"),
    (KeyCode::Mouse6, "Mouse6"),
];

static ALL_KEY_CODES: LazyLock<Vec<KeyCode>> = LazyLock::new(|| {
    let joystick_buttons = (0..MAX_JOYSTICKS).flat_map(|joystick| {
        (0..MAX_JOYSTICK_BUTTONS).map(move |button| KeyCode::JoystickButton {
            joystick: joystick as u8,
            button: button as u8,
        })
    });

    NAMED_KEYS
        .iter()
        .map(|(code, _)| *code)
        .chain(joystick_buttons)
        .collect()
});

impl KeyCode {
    /// Every bindable code in enumeration order
    ///
    /// Keyboard and mouse codes come first, followed by the joystick-button
    /// range (joystick-major).
    pub fn all() -> &'static [KeyCode] {
        &ALL_KEY_CODES
    }

    /// Keyboard and mouse codes only
    pub fn keyboard_and_mouse() -> &'static [KeyCode] {
        &ALL_KEY_CODES[..NAMED_KEYS.len()]
    }

    /// The joystick-button range only
    pub fn joystick_buttons() -> &'static [KeyCode] {
        &ALL_KEY_CODES[NAMED_KEYS.len()..]
    }

    /// Creates a joystick button code, validating both indices
    pub fn joystick_button(joystick: usize, button: usize) -> Result<Self, InputError> {
        check_range("joystick", joystick, MAX_JOYSTICKS)?;
        check_range("joystick button", button, MAX_JOYSTICK_BUTTONS)?;
        Ok(Self::JoystickButton {
            joystick: joystick as u8,
            button: button as u8,
        })
    }

    /// Returns true for codes in the joystick-button range
    pub fn is_joystick_button(self) -> bool {
        matches!(self, Self::JoystickButton { .. })
    }

    /// Returns true for the unbound placeholder
    pub fn is_none(self) -> bool {
        self == Self::None
    }

    /// Checks that a joystick button code addresses real hardware
    pub fn validate(self) -> Result<(), InputError> {
        if let Self::JoystickButton { joystick, button } = self {
            check_range("joystick", joystick as usize, MAX_JOYSTICKS)?;
            check_range("joystick button", button as usize, MAX_JOYSTICK_BUTTONS)?;
        }
        Ok(())
    }

    /// Maps a winit mouse button onto `Mouse0..Mouse6`
    pub fn from_mouse_button(button: winit::event::MouseButton) -> Option<Self> {
        use winit::event::MouseButton as WB;
        match button {
            WB::Left => Some(Self::Mouse0),
            WB::Right => Some(Self::Mouse1),
            WB::Middle => Some(Self::Mouse2),
            WB::Back => Some(Self::Mouse3),
            WB::Forward => Some(Self::Mouse4),
            WB::Other(5) => Some(Self::Mouse5),
            WB::Other(6) => Some(Self::Mouse6),
            WB::Other(_) => None,
        }
    }

    /// Maps a winit physical key code, returning `None` for keys without a binding
    pub fn from_winit(key: winit::keyboard::KeyCode) -> Option<Self> {
        use winit::keyboard::KeyCode as WK;
        let code = match key {
            WK::Backspace => Self::Backspace,
            WK::Tab => Self::Tab,
            WK::Enter => Self::Enter,
            WK::Escape => Self::Escape,
            WK::Space => Self::Space,
            WK::Delete => Self::Delete,
            WK::Insert => Self::Insert,
            WK::Home => Self::Home,
            WK::End => Self::End,
            WK::PageUp => Self::PageUp,
            WK::PageDown => Self::PageDown,

            WK::ArrowUp => Self::Up,
            WK::ArrowDown => Self::Down,
            WK::ArrowLeft => Self::Left,
            WK::ArrowRight => Self::Right,

            WK::KeyA => Self::A,
            WK::KeyB => Self::B,
            WK::KeyC => Self::C,
            WK::KeyD => Self::D,
            WK::KeyE => Self::E,
            WK::KeyF => Self::F,
            WK::KeyG => Self::G,
            WK::KeyH => Self::H,
            WK::KeyI => Self::I,
            WK::KeyJ => Self::J,
            WK::KeyK => Self::K,
            WK::KeyL => Self::L,
            WK::KeyM => Self::M,
            WK::KeyN => Self::N,
            WK::KeyO => Self::O,
            WK::KeyP => Self::P,
            WK::KeyQ => Self::Q,
            WK::KeyR => Self::R,
            WK::KeyS => Self::S,
            WK::KeyT => Self::T,
            WK::KeyU => Self::U,
            WK::KeyV => Self::V,
            WK::KeyW => Self::W,
            WK::KeyX => Self::X,
            WK::KeyY => Self::Y,
            WK::KeyZ => Self::Z,

            WK::Digit0 => Self::Num0,
            WK::Digit1 => Self::Num1,
            WK::Digit2 => Self::Num2,
            WK::Digit3 => Self::Num3,
            WK::Digit4 => Self::Num4,
            WK::Digit5 => Self::Num5,
            WK::Digit6 => Self::Num6,
            WK::Digit7 => Self::Num7,
            WK::Digit8 => Self::Num8,
            WK::Digit9 => Self::Num9,

            WK::F1 => Self::F1,
            WK::F2 => Self::F2,
            WK::F3 => Self::F3,
            WK::F4 => Self::F4,
            WK::F5 => Self::F5,
            WK::F6 => Self::F6,
            WK::F7 => Self::F7,
            WK::F8 => Self::F8,
            WK::F9 => Self::F9,
            WK::F10 => Self::F10,
            WK::F11 => Self::F11,
            WK::F12 => Self::F12,

            WK::Minus => Self::Minus,
            WK::Equal => Self::Equals,
            WK::BracketLeft => Self::LeftBracket,
            WK::BracketRight => Self::RightBracket,
            WK::Semicolon => Self::Semicolon,
            WK::Quote => Self::Quote,
            WK::Comma => Self::Comma,
            WK::Period => Self::Period,
            WK::Slash => Self::Slash,
            WK::Backslash => Self::Backslash,
            WK::Backquote => Self::Backquote,

            WK::ShiftLeft => Self::LeftShift,
            WK::ShiftRight => Self::RightShift,
            WK::ControlLeft => Self::LeftControl,
            WK::ControlRight => Self::RightControl,
            WK::AltLeft => Self::LeftAlt,
            WK::AltRight => Self::RightAlt,
            WK::SuperLeft => Self::LeftSuper,
            WK::SuperRight => Self::RightSuper,

            _ => return None,
        };
        Some(code)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::JoystickButton { joystick, button } => {
                write!(f, "Joystick{joystick}Button{button}")
            }
            named => {
                let name = NAMED_KEYS
                    .iter()
                    .find(|(code, _)| code == named)
                    .map(|(_, name)| *name)
                    .unwrap_or("None");
                f.write_str(name)
            }
        }
    }
}

impl FromStr for KeyCode {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("none") {
            return Ok(Self::None);
        }

        if let Some(rest) = s.strip_prefix("Joystick")
            && let Some((joystick, button)) = rest.split_once("Button")
            && let (Ok(joystick), Ok(button)) = (joystick.parse(), button.parse())
        {
            return Self::joystick_button(joystick, button);
        }

        NAMED_KEYS
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(s))
            .map(|(code, _)| *code)
            .ok_or_else(|| InputError::invalid(format!("unknown key code '{s}'")))
    }
}

impl TryFrom<String> for KeyCode {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyCode> for String {
    fn from(code: KeyCode) -> Self {
        code.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_order() {
        let all = KeyCode::all();
        assert_eq!(all.len(), NAMED_KEYS.len() + MAX_JOYSTICKS * MAX_JOYSTICK_BUTTONS);
        assert_eq!(all[0], KeyCode::Backspace);
        assert!(!all.contains(&KeyCode::None));

        // Joystick buttons form one contiguous tail
        let first_joystick = all.iter().position(|c| c.is_joystick_button()).unwrap();
        assert_eq!(first_joystick, NAMED_KEYS.len());
        assert!(all[first_joystick..].iter().all(|c| c.is_joystick_button()));
        assert_eq!(
            KeyCode::joystick_buttons()[MAX_JOYSTICK_BUTTONS],
            KeyCode::JoystickButton {
                joystick: 1,
                button: 0
            }
        );
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(KeyCode::Space.to_string(), "Space");
        assert_eq!("space".parse::<KeyCode>().unwrap(), KeyCode::Space);
        assert_eq!("".parse::<KeyCode>().unwrap(), KeyCode::None);

        let code: KeyCode = "Joystick2Button7".parse().unwrap();
        assert_eq!(
            code,
            KeyCode::JoystickButton {
                joystick: 2,
                button: 7
            }
        );
        assert_eq!(code.to_string(), "Joystick2Button7");
    }

    #[test]
    fn test_parse_rejects_unknown_and_out_of_range() {
        assert!("Banana".parse::<KeyCode>().is_err());
        assert!("Joystick4Button0".parse::<KeyCode>().is_err());
        assert!("Joystick0Button20".parse::<KeyCode>().is_err());
    }

    #[test]
    fn test_from_winit() {
        assert_eq!(
            KeyCode::from_winit(winit::keyboard::KeyCode::KeyW),
            Some(KeyCode::W)
        );
        assert_eq!(
            KeyCode::from_winit(winit::keyboard::KeyCode::ArrowLeft),
            Some(KeyCode::Left)
        );
        assert_eq!(KeyCode::from_winit(winit::keyboard::KeyCode::NumLock), None);
        assert_eq!(
            KeyCode::from_mouse_button(winit::event::MouseButton::Left),
            Some(KeyCode::Mouse0)
        );
    }
}
