use std::fs::File;
use std::path::Path;

use anyhow::Context;
use kobra_core::core::{Clock, Platform};
use kobra_core::input::{InputDecoder, KeyEvent};
use kobra_core::video::{PixelBuffer, Presenter};
use tracing::{debug, error};

use crate::config::Settings;
use crate::fbdev::Framebuffer;
use crate::hidraw;
use crate::screenshot;

/// Framebuffer console plus hidraw keyboard.
pub struct FbdevPlatform {
    framebuffer: Framebuffer,
    presenter: Presenter,
    keyboard: File,
    decoder: InputDecoder,
    clock: Clock,
}

impl FbdevPlatform {
    /// Open both devices and build the sampling schedule for the measured
    /// screen. Any failure here is fatal to the caller.
    pub fn init(settings: &Settings, source_size: (u32, u32)) -> anyhow::Result<Self> {
        let framebuffer = Framebuffer::open(&settings.fbdev)?;
        let g = framebuffer.geometry();
        let presenter = Presenter::new(source_size, (g.width, g.height), settings.strategy)
            .context("cannot build sampling schedule")?;
        let keyboard = hidraw::open(&settings.kbdev)?;

        debug!(strategy = ?presenter.strategy(), layout = ?settings.layout, "fbdev platform ready");
        Ok(Self {
            framebuffer,
            presenter,
            keyboard,
            decoder: InputDecoder::new(settings.layout),
            clock: Clock::new(),
        })
    }

    /// Save what is currently on screen.
    pub fn save_screenshot(&mut self, path: &Path) -> anyhow::Result<()> {
        let surface = self.framebuffer.surface()?;
        screenshot::save(&surface, path)
    }
}

impl Platform for FbdevPlatform {
    fn present_frame(&mut self, frame: &PixelBuffer<'_>) {
        match self.framebuffer.surface() {
            Ok(mut surface) => self.presenter.present(frame, &mut surface),
            Err(e) => error!(error = %e, "framebuffer surface unavailable"),
        }
    }

    fn poll_key(&mut self) -> Option<KeyEvent> {
        self.decoder.ingest_available(&mut self.keyboard);
        self.decoder.pop()
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.clock.sleep_ms(ms);
    }

    fn ticks_ms(&self) -> u32 {
        self.clock.ticks_ms()
    }
}
