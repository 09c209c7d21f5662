//! Linux framebuffer device (`/dev/fbN`): geometry query and shared mapping.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use kobra_core::video::{Surface, SurfaceError};
use thiserror::Error;
use tracing::info;

const FBIOGET_VSCREENINFO: u32 = 0x4600;
const FBIOGET_FSCREENINFO: u32 = 0x4602;

/// Cells are 32-bit; anything else would need format conversion.
const BITS_PER_PIXEL: u32 = 32;

#[repr(C)]
#[allow(dead_code)]
#[derive(Debug, Default, Clone, Copy)]
struct FbBitfield {
    offset: u32,
    length: u32,
    msb_right: u32,
}

/// `struct fb_var_screeninfo` from `<linux/fb.h>`.
#[repr(C)]
#[allow(dead_code)]
#[derive(Debug, Default, Clone, Copy)]
struct VarScreenInfo {
    xres: u32,
    yres: u32,
    xres_virtual: u32,
    yres_virtual: u32,
    xoffset: u32,
    yoffset: u32,
    bits_per_pixel: u32,
    grayscale: u32,
    red: FbBitfield,
    green: FbBitfield,
    blue: FbBitfield,
    transp: FbBitfield,
    nonstd: u32,
    activate: u32,
    height: u32,
    width: u32,
    accel_flags: u32,
    pixclock: u32,
    left_margin: u32,
    right_margin: u32,
    upper_margin: u32,
    lower_margin: u32,
    hsync_len: u32,
    vsync_len: u32,
    sync: u32,
    vmode: u32,
    rotate: u32,
    colorspace: u32,
    reserved: [u32; 4],
}

/// `struct fb_fix_screeninfo` from `<linux/fb.h>`.
#[repr(C)]
#[allow(dead_code)]
#[derive(Debug, Default, Clone, Copy)]
struct FixScreenInfo {
    id: [u8; 16],
    smem_start: libc::c_ulong,
    smem_len: u32,
    type_: u32,
    type_aux: u32,
    visual: u32,
    xpanstep: u16,
    ypanstep: u16,
    ywrapstep: u16,
    line_length: u32,
    mmio_start: libc::c_ulong,
    mmio_len: u32,
    accel: u32,
    capabilities: u16,
    reserved: [u16; 2],
}

#[derive(Debug, Error)]
pub enum FramebufferError {
    #[error("cannot open framebuffer device {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("cannot query framebuffer geometry: {0}")]
    Query(io::Error),

    #[error("framebuffer is {0} bpp, only {BITS_PER_PIXEL} bpp is supported")]
    Depth(u32),

    #[error("cannot memory map framebuffer: {0}")]
    Map(io::Error),

    #[error("framebuffer geometry is unusable: {0}")]
    Geometry(#[from] SurfaceError),
}

/// Visible geometry of a framebuffer, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    /// Cells per row, from the driver's line length in bytes.
    pub stride: u32,
}

/// An open, mapped framebuffer. Unmapped on drop.
pub struct Framebuffer {
    _file: File,
    map: NonNull<u32>,
    map_bytes: usize,
    geometry: Geometry,
}

impl Framebuffer {
    pub fn open(path: &Path) -> Result<Self, FramebufferError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| FramebufferError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        let fd = file.as_raw_fd();

        let mut var = VarScreenInfo::default();
        let mut fix = FixScreenInfo::default();
        // SAFETY: both requests fill a caller-owned struct of the matching
        // kernel layout.
        unsafe {
            if libc::ioctl(fd, FBIOGET_VSCREENINFO as _, &mut var as *mut VarScreenInfo) < 0 {
                return Err(FramebufferError::Query(io::Error::last_os_error()));
            }
            if libc::ioctl(fd, FBIOGET_FSCREENINFO as _, &mut fix as *mut FixScreenInfo) < 0 {
                return Err(FramebufferError::Query(io::Error::last_os_error()));
            }
        }

        if var.bits_per_pixel != BITS_PER_PIXEL {
            return Err(FramebufferError::Depth(var.bits_per_pixel));
        }

        let geometry = Geometry {
            width: var.xres,
            height: var.yres,
            stride: fix.line_length / 4,
        };
        let map_bytes = fix.smem_len as usize;

        // SAFETY: mapping a device file we hold open; the result is checked
        // against MAP_FAILED before use.
        let addr = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                map_bytes,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                fd,
                0,
            )
        };
        if addr == libc::MAP_FAILED {
            return Err(FramebufferError::Map(io::Error::last_os_error()));
        }
        let Some(map) = NonNull::new(addr.cast::<u32>()) else {
            return Err(FramebufferError::Map(io::Error::other("mmap returned null")));
        };

        let mut fb = Self {
            _file: file,
            map,
            map_bytes,
            geometry,
        };
        // Validate once so later calls cannot fail.
        fb.surface()?;

        info!(
            device = %path.display(),
            width = geometry.width,
            height = geometry.height,
            stride = geometry.stride,
            "framebuffer mapped"
        );
        Ok(fb)
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// The visible area as a strided surface.
    pub fn surface(&mut self) -> Result<Surface<'_>, SurfaceError> {
        // SAFETY: the mapping is live for as long as `self`, page aligned,
        // and `&mut self` guarantees this is the only view into it.
        let cells = unsafe {
            std::slice::from_raw_parts_mut(self.map.as_ptr(), self.map_bytes / 4)
        };
        Surface::new(
            cells,
            self.geometry.width,
            self.geometry.height,
            self.geometry.stride,
        )
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        // SAFETY: unmapping exactly the region mapped in `open`.
        unsafe {
            libc::munmap(self.map.as_ptr().cast(), self.map_bytes);
        }
    }
}
