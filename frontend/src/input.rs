use std::collections::VecDeque;
use std::io::{self, Read};

use kobra_core::input::BootReport;
use kobra_core::input::keymap::usage;
use kobra_core::input::report::{MAX_KEYS, REPORT_LEN};

/// Usage placed in every key slot when more than six keys are held.
const ERROR_ROLLOVER: u8 = 0x01;

/// Build the boot report a real keyboard would send for the given set of
/// held HID usages.
pub fn synthesize_report<I: IntoIterator<Item = u8>>(held: I) -> BootReport {
    let mut report = BootReport::EMPTY;
    let mut slots = 0;
    let mut overflow = false;

    for hid in held {
        match hid {
            usage::LEFT_CTRL..=usage::RIGHT_GUI => {
                report.modifiers |= 1 << (hid - usage::LEFT_CTRL);
            }
            0..=3 => {}
            _ if report.contains(hid) => {}
            _ if slots == MAX_KEYS => overflow = true,
            _ => {
                report.keys[slots] = hid;
                slots += 1;
            }
        }
    }

    if overflow {
        report.keys = [ERROR_ROLLOVER; MAX_KEYS];
    }
    report
}

/// In-process stand-in for a hidraw node: feed it the held key set each
/// frame and it yields a report whenever that set changes.
pub struct SyntheticKeyboard {
    last: BootReport,
    pending: VecDeque<[u8; REPORT_LEN]>,
}

impl SyntheticKeyboard {
    pub fn new() -> Self {
        Self {
            last: BootReport::EMPTY,
            pending: VecDeque::new(),
        }
    }

    /// Record the currently held usages.
    pub fn update<I: IntoIterator<Item = u8>>(&mut self, held: I) {
        let report = synthesize_report(held);
        if report != self.last {
            self.pending.push_back(report.to_bytes());
            self.last = report;
        }
    }
}

impl Default for SyntheticKeyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Read for SyntheticKeyboard {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(bytes) = self.pending.pop_front() else {
            return Err(io::ErrorKind::WouldBlock.into());
        };
        let n = bytes.len().min(buf.len());
        buf[..n].copy_from_slice(&bytes[..n]);
        Ok(n)
    }
}
