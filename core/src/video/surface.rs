use thiserror::Error;

/// Errors raised when wrapping raw pixel memory in a [`PixelBuffer`] or [`Surface`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("zero extent: {width}x{height}")]
    ZeroExtent { width: u32, height: u32 },

    #[error("stride {stride} is narrower than width {width}")]
    StrideTooSmall { width: u32, stride: u32 },

    #[error("pixel memory holds {actual} cells, {required} required")]
    TooSmall { required: usize, actual: usize },
}

/// Read-only view of a packed frame: `width * height` cells, row-major,
/// one 32-bit color per pixel and no row padding.
#[derive(Clone, Copy)]
pub struct PixelBuffer<'a> {
    pixels: &'a [u32],
    width: u32,
    height: u32,
}

impl<'a> PixelBuffer<'a> {
    pub fn new(pixels: &'a [u32], width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::ZeroExtent { width, height });
        }
        let required = width as usize * height as usize;
        if pixels.len() < required {
            return Err(SurfaceError::TooSmall {
                required,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels: &pixels[..required],
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The `y`th row, exactly `width` cells long.
    pub fn row(&self, y: u32) -> &'a [u32] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }

    pub fn pixels(&self) -> &'a [u32] {
        self.pixels
    }
}

/// Mutable view of destination pixel memory whose rows may be padded.
///
/// Row `y` starts at cell `y * stride` and is `width` cells long. Cells
/// between `width` and `stride` belong to the display and are never written.
pub struct Surface<'a> {
    pixels: &'a mut [u32],
    width: u32,
    height: u32,
    stride: u32,
}

impl<'a> Surface<'a> {
    /// Wrap `pixels` as a `width x height` surface with `stride` cells per row.
    pub fn new(
        pixels: &'a mut [u32],
        width: u32,
        height: u32,
        stride: u32,
    ) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::ZeroExtent { width, height });
        }
        if stride < width {
            return Err(SurfaceError::StrideTooSmall { width, stride });
        }
        let required = (height as usize - 1) * stride as usize + width as usize;
        if pixels.len() < required {
            return Err(SurfaceError::TooSmall {
                required,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            stride,
        })
    }

    /// Wrap a packed buffer (stride equals width).
    pub fn packed(pixels: &'a mut [u32], width: u32, height: u32) -> Result<Self, SurfaceError> {
        Self::new(pixels, width, height, width)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn row(&self, y: u32) -> &[u32] {
        let start = y as usize * self.stride as usize;
        &self.pixels[start..start + self.width as usize]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let start = y as usize * self.stride as usize;
        &mut self.pixels[start..start + self.width as usize]
    }
}
