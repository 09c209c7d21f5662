//! Logical key codes understood by the engine.
//!
//! Printable keys use their lowercase ASCII value; everything else lives
//! in the 0x80+ range. Keypad 0 and keypad period have no code of their own
//! (value 0) and are therefore never reported.

/// A logical engine key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u8);

impl KeyCode {
    pub const RIGHT_ARROW: Self = Self(0xAE);
    pub const LEFT_ARROW: Self = Self(0xAC);
    pub const UP_ARROW: Self = Self(0xAD);
    pub const DOWN_ARROW: Self = Self(0xAF);
    pub const STRAFE_L: Self = Self(0xA0);
    pub const STRAFE_R: Self = Self(0xA1);
    pub const USE: Self = Self(0xA2);
    pub const FIRE: Self = Self(0xA3);
    pub const ESCAPE: Self = Self(27);
    pub const ENTER: Self = Self(13);
    pub const TAB: Self = Self(9);
    pub const BACKSPACE: Self = Self(0x7F);
    pub const PAUSE: Self = Self(0xFF);
    pub const EQUALS: Self = Self(0x3D);
    pub const MINUS: Self = Self(0x2D);

    pub const F1: Self = Self(0x80 + 0x3B);
    pub const F2: Self = Self(0x80 + 0x3C);
    pub const F3: Self = Self(0x80 + 0x3D);
    pub const F4: Self = Self(0x80 + 0x3E);
    pub const F5: Self = Self(0x80 + 0x3F);
    pub const F6: Self = Self(0x80 + 0x40);
    pub const F7: Self = Self(0x80 + 0x41);
    pub const F8: Self = Self(0x80 + 0x42);
    pub const F9: Self = Self(0x80 + 0x43);
    pub const F10: Self = Self(0x80 + 0x44);
    pub const F11: Self = Self(0x80 + 0x57);
    pub const F12: Self = Self(0x80 + 0x58);

    pub const RSHIFT: Self = Self(0x80 + 0x36);
    pub const RCTRL: Self = Self(0x80 + 0x1D);
    pub const RALT: Self = Self(0x80 + 0x38);
    pub const LALT: Self = Self::RALT;

    pub const CAPSLOCK: Self = Self(0x80 + 0x3A);
    pub const NUMLOCK: Self = Self(0x80 + 0x45);
    pub const SCRLCK: Self = Self(0x80 + 0x46);
    pub const PRTSCR: Self = Self(0x80 + 0x59);

    pub const HOME: Self = Self(0x80 + 0x47);
    pub const END: Self = Self(0x80 + 0x4F);
    pub const PGUP: Self = Self(0x80 + 0x49);
    pub const PGDN: Self = Self(0x80 + 0x51);
    pub const INS: Self = Self(0x80 + 0x52);
    pub const DEL: Self = Self(0x80 + 0x53);

    pub const KEYP_0: Self = Self(0);
    pub const KEYP_1: Self = Self::END;
    pub const KEYP_2: Self = Self::DOWN_ARROW;
    pub const KEYP_3: Self = Self::PGDN;
    pub const KEYP_4: Self = Self::LEFT_ARROW;
    pub const KEYP_5: Self = Self(b'5');
    pub const KEYP_6: Self = Self::RIGHT_ARROW;
    pub const KEYP_7: Self = Self::HOME;
    pub const KEYP_8: Self = Self::UP_ARROW;
    pub const KEYP_9: Self = Self::PGUP;
    pub const KEYP_DIVIDE: Self = Self(b'/');
    pub const KEYP_PLUS: Self = Self(b'+');
    pub const KEYP_MINUS: Self = Self(b'-');
    pub const KEYP_MULTIPLY: Self = Self(b'*');
    pub const KEYP_PERIOD: Self = Self(0);
    pub const KEYP_ENTER: Self = Self::ENTER;

    /// Code for a printable ASCII key.
    pub const fn ascii(ch: u8) -> Self {
        Self(ch)
    }

    /// True for the "no key" value.
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// A translated key transition ready for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub pressed: bool,
    pub code: KeyCode,
}

impl KeyEvent {
    pub fn pressed(code: KeyCode) -> Self {
        Self {
            pressed: true,
            code,
        }
    }

    pub fn released(code: KeyCode) -> Self {
        Self {
            pressed: false,
            code,
        }
    }
}
