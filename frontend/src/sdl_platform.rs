use std::path::Path;

use anyhow::anyhow;
use kobra_core::core::{Clock, Platform};
use kobra_core::input::{InputDecoder, KeyEvent};
use kobra_core::video::{PixelBuffer, Presenter, Surface};
use sdl2::EventPump;
use sdl2::event::Event;
use tracing::{info, warn};

use crate::config::Settings;
use crate::input::SyntheticKeyboard;
use crate::screenshot;
use crate::video::Video;

/// Desktop backend: an SDL window for the display, SDL keyboard state
/// re-encoded as boot reports for the decoder.
pub struct SdlPlatform {
    _context: sdl2::Sdl,
    video: Video,
    event_pump: EventPump,
    presenter: Presenter,
    keyboard: SyntheticKeyboard,
    decoder: InputDecoder,
    clock: Clock,
    quit: bool,
}

impl SdlPlatform {
    pub fn init(settings: &Settings, source_size: (u32, u32)) -> anyhow::Result<Self> {
        let context = sdl2::init().map_err(|e| anyhow!("cannot initialize SDL: {e}"))?;
        let sdl_video = context
            .video()
            .map_err(|e| anyhow!("cannot initialize SDL video: {e}"))?;

        let dest = (source_size.0 * settings.scale, source_size.1 * settings.scale);
        let video = Video::new(&sdl_video, "kobra", dest.0, dest.1)?;
        let event_pump = context
            .event_pump()
            .map_err(|e| anyhow!("cannot get SDL event pump: {e}"))?;
        let presenter = Presenter::new(source_size, video.size(), settings.strategy)?;

        info!(width = dest.0, height = dest.1, "sdl window opened");
        Ok(Self {
            _context: context,
            video,
            event_pump,
            presenter,
            keyboard: SyntheticKeyboard::new(),
            decoder: InputDecoder::new(settings.layout),
            clock: Clock::new(),
            quit: false,
        })
    }

    pub fn save_screenshot(&mut self, path: &Path) -> anyhow::Result<()> {
        let (w, h) = self.video.size();
        let mut cells = self.video.staging().to_vec();
        let surface = Surface::packed(&mut cells, w, h)?;
        screenshot::save(&surface, path)
    }

    /// Pump window events and snapshot the keyboard.
    fn pump(&mut self) {
        for event in self.event_pump.poll_iter() {
            if let Event::Quit { .. } = event {
                self.quit = true;
            }
        }
        let held = self
            .event_pump
            .keyboard_state()
            .pressed_scancodes()
            .filter_map(|sc| u8::try_from(sc as i32).ok())
            .collect::<Vec<_>>();
        self.keyboard.update(held);
    }
}

impl Platform for SdlPlatform {
    fn present_frame(&mut self, frame: &PixelBuffer<'_>) {
        let (w, h) = self.video.size();
        match Surface::packed(self.video.staging_mut(), w, h) {
            Ok(mut surface) => self.presenter.present(frame, &mut surface),
            Err(e) => {
                warn!(error = %e, "window surface unavailable");
                return;
            }
        }
        if let Err(e) = self.video.present() {
            warn!(error = %e, "present failed");
        }
    }

    fn poll_key(&mut self) -> Option<KeyEvent> {
        self.pump();
        self.decoder.ingest_available(&mut self.keyboard);
        self.decoder.pop()
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.clock.sleep_ms(ms);
    }

    fn ticks_ms(&self) -> u32 {
        self.clock.ticks_ms()
    }

    fn set_title(&mut self, title: &str) {
        self.video.set_title(title);
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}
