//! Fixed-point sampling schedule for the rotating nearest-neighbour blit.
//!
//! Steps carry 16 fraction bits. The destination is the source turned
//! 180 degrees, so both accumulators start at the far edge and walk
//! downward, with a half-step bias so each destination cell samples the
//! source cell nearest its centre.

use thiserror::Error;

/// Number of fraction bits in every fixed-point value of the schedule.
pub const FRACTION_BITS: u32 = 16;

/// Largest source extent whose `extent << 16` still fits a `u32`.
pub const MAX_SOURCE_EXTENT: u32 = 0xFFFF;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("zero extent: source {src_w}x{src_h}, destination {dst_w}x{dst_h}")]
    ZeroExtent {
        src_w: u32,
        src_h: u32,
        dst_w: u32,
        dst_h: u32,
    },

    #[error("source extent {width}x{height} exceeds the 16.16 range")]
    SourceTooLarge { width: u32, height: u32 },
}

/// Per-axis step values plus lookup tables mapping every destination
/// column (and row) to the source column (row) it samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingSchedule {
    src_w: u32,
    src_h: u32,
    dst_w: u32,
    dst_h: u32,
    x_step: u32,
    y_step: u32,
    column_lut: Vec<u32>,
    row_lut: Vec<u32>,
}

impl SamplingSchedule {
    pub fn new(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> Result<Self, GeometryError> {
        if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
            return Err(GeometryError::ZeroExtent {
                src_w,
                src_h,
                dst_w,
                dst_h,
            });
        }
        if src_w > MAX_SOURCE_EXTENT || src_h > MAX_SOURCE_EXTENT {
            return Err(GeometryError::SourceTooLarge {
                width: src_w,
                height: src_h,
            });
        }

        let x_step = (src_w << FRACTION_BITS) / dst_w;
        let y_step = (src_h << FRACTION_BITS) / dst_h;

        Ok(Self {
            src_w,
            src_h,
            dst_w,
            dst_h,
            x_step,
            y_step,
            column_lut: mirrored_lut(dst_w, x_step),
            row_lut: mirrored_lut(dst_h, y_step),
        })
    }

    pub fn source_size(&self) -> (u32, u32) {
        (self.src_w, self.src_h)
    }

    pub fn dest_size(&self) -> (u32, u32) {
        (self.dst_w, self.dst_h)
    }

    /// Horizontal step in 16.16 fixed point.
    pub fn x_step(&self) -> u32 {
        self.x_step
    }

    /// Vertical step in 16.16 fixed point.
    pub fn y_step(&self) -> u32 {
        self.y_step
    }

    /// Accumulator value for destination column 0.
    pub fn x_start(&self) -> u32 {
        start_fixed(self.dst_w, self.x_step)
    }

    /// Accumulator value for destination row 0.
    pub fn y_start(&self) -> u32 {
        start_fixed(self.dst_h, self.y_step)
    }

    /// Source column sampled by each destination column.
    pub fn column_lut(&self) -> &[u32] {
        &self.column_lut
    }

    /// Source row sampled by each destination row.
    pub fn row_lut(&self) -> &[u32] {
        &self.row_lut
    }
}

/// `(extent - 1) * step + step / 2`: the accumulator for index 0.
fn start_fixed(extent: u32, step: u32) -> u32 {
    (extent - 1) * step + step / 2
}

/// Index `i` holds `((extent-1-i) * step + step/2) >> 16`, the same value
/// the decrementing accumulator reaches after `i` steps.
fn mirrored_lut(extent: u32, step: u32) -> Vec<u32> {
    let mut fixed = start_fixed(extent, step);
    let mut lut = Vec::with_capacity(extent as usize);
    for _ in 0..extent {
        lut.push(fixed >> FRACTION_BITS);
        fixed = fixed.wrapping_sub(step);
    }
    lut
}
