use anyhow::anyhow;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};

/// An SDL window standing in for the framebuffer. The presenter draws into
/// `staging`, which is uploaded as an XRGB8888 texture each frame.
pub struct Video {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    width: u32,
    height: u32,
    staging: Vec<u32>,
    bytes: Vec<u8>,
}

impl Video {
    /// Create a window of `width x height` physical pixels.
    pub fn new(
        sdl_video: &sdl2::VideoSubsystem,
        title: &str,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let window = sdl_video
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| anyhow!("cannot create window: {e}"))?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| anyhow!("cannot create canvas: {e}"))?;

        let texture_creator = canvas.texture_creator();
        let cells = width as usize * height as usize;

        Ok(Self {
            canvas,
            texture_creator,
            width,
            height,
            staging: vec![0; cells],
            bytes: vec![0; cells * 4],
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Packed destination cells the presenter writes into.
    pub fn staging_mut(&mut self) -> &mut [u32] {
        &mut self.staging
    }

    pub fn staging(&self) -> &[u32] {
        &self.staging
    }

    pub fn set_title(&mut self, title: &str) {
        // Titles come from the engine; an interior NUL is its bug, not ours.
        let _ = self.canvas.window_mut().set_title(title);
    }

    /// Upload the staging buffer and flip.
    pub fn present(&mut self) -> anyhow::Result<()> {
        for (out, cell) in self.bytes.chunks_exact_mut(4).zip(&self.staging) {
            out.copy_from_slice(&cell.to_ne_bytes());
        }

        let mut texture = self
            .texture_creator
            .create_texture_streaming(PixelFormatEnum::RGB888, self.width, self.height)
            .map_err(|e| anyhow!("cannot create texture: {e}"))?;

        texture
            .update(None, &self.bytes, (self.width * 4) as usize)
            .map_err(|e| anyhow!("cannot update texture: {e}"))?;

        self.canvas.clear();
        self.canvas
            .copy(&texture, None, None)
            .map_err(|e| anyhow!("cannot copy texture: {e}"))?;
        self.canvas.present();
        Ok(())
    }
}
