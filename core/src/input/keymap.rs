//! USB HID keyboard usage IDs and their translation to engine key codes.
//!
//! Usage values follow the HID Usage Tables, keyboard/keypad page (0x07).

use super::keys::KeyCode;

pub mod usage {
    pub const A: u8 = 0x04;
    pub const D: u8 = 0x07;
    pub const S: u8 = 0x16;
    pub const W: u8 = 0x1A;
    pub const Z: u8 = 0x1D;
    pub const N1: u8 = 0x1E;
    pub const N9: u8 = 0x26;
    pub const N0: u8 = 0x27;
    pub const ENTER: u8 = 0x28;
    pub const ESC: u8 = 0x29;
    pub const BACKSPACE: u8 = 0x2A;
    pub const TAB: u8 = 0x2B;
    pub const SPACE: u8 = 0x2C;
    pub const MINUS: u8 = 0x2D;
    pub const EQUAL: u8 = 0x2E;
    pub const CAPSLOCK: u8 = 0x39;
    pub const F1: u8 = 0x3A;
    pub const F12: u8 = 0x45;
    pub const SYSRQ: u8 = 0x46;
    pub const SCROLLLOCK: u8 = 0x47;
    pub const PAUSE: u8 = 0x48;
    pub const INSERT: u8 = 0x49;
    pub const HOME: u8 = 0x4A;
    pub const PAGEUP: u8 = 0x4B;
    pub const DELETE: u8 = 0x4C;
    pub const END: u8 = 0x4D;
    pub const PAGEDOWN: u8 = 0x4E;
    pub const RIGHT: u8 = 0x4F;
    pub const LEFT: u8 = 0x50;
    pub const DOWN: u8 = 0x51;
    pub const UP: u8 = 0x52;
    pub const NUMLOCK: u8 = 0x53;
    pub const KP_SLASH: u8 = 0x54;
    pub const KP_ASTERISK: u8 = 0x55;
    pub const KP_MINUS: u8 = 0x56;
    pub const KP_PLUS: u8 = 0x57;
    pub const KP_ENTER: u8 = 0x58;
    pub const KP_1: u8 = 0x59;
    pub const KP_9: u8 = 0x61;
    pub const KP_0: u8 = 0x62;
    pub const KP_DOT: u8 = 0x63;
    pub const LEFT_CTRL: u8 = 0xE0;
    pub const LEFT_SHIFT: u8 = 0xE1;
    pub const LEFT_ALT: u8 = 0xE2;
    pub const LEFT_GUI: u8 = 0xE3;
    pub const RIGHT_CTRL: u8 = 0xE4;
    pub const RIGHT_SHIFT: u8 = 0xE5;
    pub const RIGHT_ALT: u8 = 0xE6;
    pub const RIGHT_GUI: u8 = 0xE7;
}

/// Which key table to translate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Standard,
    /// Standard, except W/S move and A/D strafe.
    Wasd,
}

const F_KEYS: [KeyCode; 12] = [
    KeyCode::F1,
    KeyCode::F2,
    KeyCode::F3,
    KeyCode::F4,
    KeyCode::F5,
    KeyCode::F6,
    KeyCode::F7,
    KeyCode::F8,
    KeyCode::F9,
    KeyCode::F10,
    KeyCode::F11,
    KeyCode::F12,
];

const KEYPAD_DIGITS: [KeyCode; 10] = [
    KeyCode::KEYP_1,
    KeyCode::KEYP_2,
    KeyCode::KEYP_3,
    KeyCode::KEYP_4,
    KeyCode::KEYP_5,
    KeyCode::KEYP_6,
    KeyCode::KEYP_7,
    KeyCode::KEYP_8,
    KeyCode::KEYP_9,
    KeyCode::KEYP_0,
];

/// Translate a HID usage ID into an engine key code.
///
/// Returns `None` for usages with no engine meaning, including those whose
/// table entry is the zero code.
pub fn translate(layout: Layout, hid: u8) -> Option<KeyCode> {
    if layout == Layout::Wasd {
        let movement = match hid {
            usage::W => Some(KeyCode::UP_ARROW),
            usage::S => Some(KeyCode::DOWN_ARROW),
            usage::A => Some(KeyCode::STRAFE_L),
            usage::D => Some(KeyCode::STRAFE_R),
            _ => None,
        };
        if movement.is_some() {
            return movement;
        }
    }

    let code = match hid {
        usage::A..=usage::Z => KeyCode::ascii(b'a' + (hid - usage::A)),
        usage::N1..=usage::N9 => KeyCode::ascii(b'1' + (hid - usage::N1)),
        usage::N0 => KeyCode::ascii(b'0'),
        usage::F1..=usage::F12 => F_KEYS[(hid - usage::F1) as usize],
        usage::KP_1..=usage::KP_0 => KEYPAD_DIGITS[(hid - usage::KP_1) as usize],

        usage::RIGHT => KeyCode::RIGHT_ARROW,
        usage::LEFT => KeyCode::LEFT_ARROW,
        usage::DOWN => KeyCode::DOWN_ARROW,
        usage::UP => KeyCode::UP_ARROW,

        usage::ENTER => KeyCode::ENTER,
        usage::ESC => KeyCode::ESCAPE,
        usage::BACKSPACE => KeyCode::BACKSPACE,
        usage::TAB => KeyCode::TAB,
        usage::SPACE => KeyCode::USE,
        usage::MINUS => KeyCode::MINUS,
        usage::EQUAL => KeyCode::EQUALS,
        usage::SYSRQ => KeyCode::PRTSCR,
        usage::SCROLLLOCK => KeyCode::SCRLCK,
        usage::PAUSE => KeyCode::PAUSE,
        usage::CAPSLOCK => KeyCode::CAPSLOCK,

        usage::LEFT_CTRL => KeyCode::FIRE,
        usage::RIGHT_CTRL => KeyCode::RCTRL,
        usage::LEFT_SHIFT | usage::RIGHT_SHIFT => KeyCode::RSHIFT,
        usage::LEFT_ALT => KeyCode::LALT,
        usage::RIGHT_ALT => KeyCode::RALT,

        usage::INSERT => KeyCode::INS,
        usage::HOME => KeyCode::HOME,
        usage::PAGEUP => KeyCode::PGUP,
        usage::DELETE => KeyCode::DEL,
        usage::END => KeyCode::END,
        usage::PAGEDOWN => KeyCode::PGDN,

        usage::NUMLOCK => KeyCode::NUMLOCK,
        usage::KP_SLASH => KeyCode::KEYP_DIVIDE,
        usage::KP_ASTERISK => KeyCode::KEYP_MULTIPLY,
        usage::KP_MINUS => KeyCode::KEYP_MINUS,
        usage::KP_PLUS => KeyCode::KEYP_PLUS,
        usage::KP_ENTER => KeyCode::KEYP_ENTER,
        usage::KP_DOT => KeyCode::KEYP_PERIOD,

        _ => return None,
    };

    (!code.is_none()).then_some(code)
}
