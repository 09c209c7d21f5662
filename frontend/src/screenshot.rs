use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use kobra_core::video::Surface;

/// Encode the visible area of `surface` (XRGB8888 cells) as an RGB8 PNG.
pub fn write_png<W: Write>(surface: &Surface<'_>, out: W) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(out, surface.width(), surface.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    let mut data = Vec::with_capacity(surface.width() as usize * surface.height() as usize * 3);
    for y in 0..surface.height() {
        for &cell in surface.row(y) {
            data.extend_from_slice(&[(cell >> 16) as u8, (cell >> 8) as u8, cell as u8]);
        }
    }
    writer.write_image_data(&data)
}

pub fn save(surface: &Surface<'_>, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_png(surface, BufWriter::new(file))
        .with_context(|| format!("writing {}", path.display()))
}
