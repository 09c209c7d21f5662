use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use anyhow::Context;
use tracing::info;

/// Open a hidraw node for non-blocking reads. Each `read` returns one
/// input report, or `WouldBlock` when none is pending.
pub fn open(path: &Path) -> anyhow::Result<File> {
    let file = open_nonblocking(path)
        .with_context(|| format!("cannot open HID device {}", path.display()))?;
    info!(device = %path.display(), "keyboard opened");
    Ok(file)
}

fn open_nonblocking(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_NONBLOCK)
        .open(path)
}
