use std::ops::ControlFlow;

use crate::input::KeyEvent;
use crate::video::PixelBuffer;

/// Services a platform backend provides to the engine.
///
/// The engine calls these from its own loop on a single thread. None of
/// them fail: I/O trouble is handled (and logged) inside the backend.
pub trait Platform {
    /// Scale, rotate and show one frame.
    fn present_frame(&mut self, frame: &PixelBuffer<'_>);

    /// Next key transition, or `None` when nothing is pending. Pulls in
    /// any input that arrived since the last call first.
    fn poll_key(&mut self) -> Option<KeyEvent>;

    /// Sleep for at least `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u32);

    /// Milliseconds since the platform was initialized.
    fn ticks_ms(&self) -> u32;

    /// Label the display, where the display has anywhere to put one.
    fn set_title(&mut self, _title: &str) {}

    /// True once the user has asked the backend itself to shut down
    /// (e.g. closed the window).
    fn quit_requested(&self) -> bool {
        false
    }
}

/// A game (or demo) driven by a [`Platform`].
///
/// Mirrors the backend contract from the other side: the engine owns its
/// frame buffer and pulls everything else from the platform.
pub trait Engine {
    /// Native frame size as (width, height) in pixels.
    fn resolution(&self) -> (u32, u32);

    /// Advance one tick: drain input, update, present.
    /// Returns `Break` when the engine wants to quit.
    fn tick(&mut self, platform: &mut dyn Platform) -> ControlFlow<()>;
}

/// Run `engine` until it or the platform asks to stop.
pub fn run(engine: &mut dyn Engine, platform: &mut dyn Platform) {
    while !platform.quit_requested() && engine.tick(platform).is_continue() {}
}
