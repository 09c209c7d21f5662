//! Boot-protocol keyboard reports and the edge detector between two of them.
//!
//! Report layout (8 bytes):
//! - byte 0: modifier bitmask, bit 0..7 = LCtrl, LShift, LAlt, LGUI,
//!   RCtrl, RShift, RAlt, RGUI
//! - byte 1: reserved
//! - bytes 2..8: up to six pressed usage IDs; 0 is an empty slot and
//!   1..=3 are rollover/error sentinels

use super::keymap::usage;

pub const REPORT_LEN: usize = 8;
pub const MAX_KEYS: usize = 6;

/// Highest usage ID that is a sentinel rather than a key.
pub const LAST_SENTINEL: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BootReport {
    pub modifiers: u8,
    pub reserved: u8,
    pub keys: [u8; MAX_KEYS],
}

impl BootReport {
    /// All-zero report: nothing pressed.
    pub const EMPTY: Self = Self {
        modifiers: 0,
        reserved: 0,
        keys: [0; MAX_KEYS],
    };

    pub fn from_bytes(bytes: &[u8; REPORT_LEN]) -> Self {
        Self {
            modifiers: bytes[0],
            reserved: bytes[1],
            keys: [bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7]],
        }
    }

    /// Interpret one transport chunk.
    ///
    /// Exactly 8 bytes is a bare report; 9 or more bytes carry a leading
    /// report ID which is skipped. Anything shorter is not a report.
    pub fn from_chunk(chunk: &[u8]) -> Option<Self> {
        let body = match chunk.len() {
            n if n < REPORT_LEN => return None,
            REPORT_LEN => chunk,
            _ => &chunk[1..],
        };
        let bytes: &[u8; REPORT_LEN] = body[..REPORT_LEN].try_into().ok()?;
        Some(Self::from_bytes(bytes))
    }

    pub fn to_bytes(&self) -> [u8; REPORT_LEN] {
        let k = self.keys;
        [self.modifiers, self.reserved, k[0], k[1], k[2], k[3], k[4], k[5]]
    }

    /// True if `hid` occupies any slot.
    pub fn contains(&self, hid: u8) -> bool {
        self.keys.contains(&hid)
    }

    /// Real keys in slot order, each reported once.
    pub fn pressed_keys(&self) -> impl Iterator<Item = u8> + '_ {
        self.keys
            .iter()
            .enumerate()
            .filter(move |&(i, &k)| k > LAST_SENTINEL && !self.keys[..i].contains(&k))
            .map(|(_, &k)| k)
    }
}

/// A raw edge between two reports, still in HID usage space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub pressed: bool,
    pub usage: u8,
}

/// Edges from `previous` to `current`: modifier changes (bit 0 first),
/// then newly pressed keys, then released keys.
///
/// Slot positions do not matter; a key that only moved slots yields
/// nothing.
pub fn diff(previous: BootReport, current: BootReport) -> impl Iterator<Item = Transition> {
    let changed = previous.modifiers ^ current.modifiers;
    let modifiers = (0..8u8)
        .filter(move |bit| changed & (1 << bit) != 0)
        .map(move |bit| Transition {
            pressed: current.modifiers & (1 << bit) != 0,
            usage: usage::LEFT_CTRL + bit,
        });

    let downs = edges(current, previous, true);
    let ups = edges(previous, current, false);

    modifiers.chain(downs).chain(ups)
}

/// Keys held in `from` and absent from `other`.
fn edges(from: BootReport, other: BootReport, pressed: bool) -> impl Iterator<Item = Transition> {
    let mut out = [0u8; MAX_KEYS];
    let mut n = 0;
    for k in from.pressed_keys() {
        if !other.contains(k) {
            out[n] = k;
            n += 1;
        }
    }
    out.into_iter()
        .take(n)
        .map(move |usage| Transition { pressed, usage })
}
