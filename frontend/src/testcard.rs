//! Built-in engine: a test card for checking orientation, scaling and key
//! handling on a new display/keyboard combination.

use std::ops::ControlFlow;

use kobra_core::core::{Engine, Platform};
use kobra_core::input::{KeyCode, KeyEvent};
use kobra_core::video::PixelBuffer;
use tracing::{info, warn};

pub const WIDTH: u32 = 640;
pub const HEIGHT: u32 = 400;

/// Ticks per second the card paces itself to.
const TICK_RATE: u32 = 35;
const CURSOR: u32 = 16;
const CURSOR_SPEED: i32 = 4;
const ORIGIN_MARK: u32 = 24;

const BARS: [u32; 8] = [
    0x00FF_FFFF,
    0x00FF_FF00,
    0x0000_FFFF,
    0x0000_FF00,
    0x00FF_00FF,
    0x00FF_0000,
    0x0000_00FF,
    0x0000_0000,
];

pub struct TestCard {
    frame: Vec<u32>,
    cursor: (i32, i32),
    held: Held,
    frames: u32,
    fps_window_start: u32,
    last_tick: Option<u32>,
}

#[derive(Default)]
struct Held {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl TestCard {
    pub fn new() -> Self {
        Self {
            frame: vec![0; (WIDTH * HEIGHT) as usize],
            cursor: ((WIDTH / 2) as i32, (HEIGHT / 2) as i32),
            held: Held::default(),
            frames: 0,
            fps_window_start: 0,
            last_tick: None,
        }
    }

    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    /// Apply one key event. Returns `Break` on Escape.
    pub fn handle_key(&mut self, event: KeyEvent) -> ControlFlow<()> {
        info!(pressed = event.pressed, code = event.code.0, "key");
        match event.code {
            KeyCode::ESCAPE if event.pressed => return ControlFlow::Break(()),
            KeyCode::LEFT_ARROW | KeyCode::STRAFE_L => self.held.left = event.pressed,
            KeyCode::RIGHT_ARROW | KeyCode::STRAFE_R => self.held.right = event.pressed,
            KeyCode::UP_ARROW => self.held.up = event.pressed,
            KeyCode::DOWN_ARROW => self.held.down = event.pressed,
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn update(&mut self) {
        let dx = i32::from(self.held.right) - i32::from(self.held.left);
        let dy = i32::from(self.held.down) - i32::from(self.held.up);
        let max_x = (WIDTH - CURSOR) as i32;
        let max_y = (HEIGHT - CURSOR) as i32;
        self.cursor.0 = (self.cursor.0 + dx * CURSOR_SPEED).clamp(0, max_x);
        self.cursor.1 = (self.cursor.1 + dy * CURSOR_SPEED).clamp(0, max_y);
    }

    /// Redraw the whole card.
    pub fn render(&mut self) {
        let bar_w = WIDTH / BARS.len() as u32;
        let bars_h = HEIGHT * 2 / 3;
        for y in 0..HEIGHT {
            let row = &mut self.frame[(y * WIDTH) as usize..((y + 1) * WIDTH) as usize];
            for (x, cell) in row.iter_mut().enumerate() {
                let x = x as u32;
                *cell = if y < bars_h {
                    BARS[((x / bar_w) as usize).min(BARS.len() - 1)]
                } else {
                    let level = x * 255 / (WIDTH - 1);
                    (level << 16) | (level << 8) | level
                };
            }
        }

        self.fill(0, 0, ORIGIN_MARK, ORIGIN_MARK, 0x00FF_0000);
        let (cx, cy) = self.cursor;
        self.fill(cx as u32, cy as u32, CURSOR, CURSOR, 0x00FF_FFFF);
        self.fill(cx as u32 + 4, cy as u32 + 4, CURSOR - 8, CURSOR - 8, 0);
    }

    fn fill(&mut self, x0: u32, y0: u32, w: u32, h: u32, color: u32) {
        for y in y0..(y0 + h).min(HEIGHT) {
            let start = (y * WIDTH + x0) as usize;
            let end = (y * WIDTH + (x0 + w).min(WIDTH)) as usize;
            self.frame[start..end].fill(color);
        }
    }

    fn count_frame(&mut self, now: u32, platform: &mut dyn Platform) {
        self.frames += 1;
        let elapsed = now.wrapping_sub(self.fps_window_start);
        if elapsed >= 1000 {
            let fps = self.frames as f32 * 1000.0 / elapsed as f32;
            info!("frame rate {fps:.1}");
            platform.set_title(&format!("kobra test card - {fps:.1} fps"));
            self.frames = 0;
            self.fps_window_start = now;
        }
    }
}

impl Default for TestCard {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for TestCard {
    fn resolution(&self) -> (u32, u32) {
        (WIDTH, HEIGHT)
    }

    fn tick(&mut self, platform: &mut dyn Platform) -> ControlFlow<()> {
        let start = platform.ticks_ms();
        if self.last_tick.is_none() {
            platform.set_title("kobra test card");
            self.fps_window_start = start;
        }
        self.last_tick = Some(start);

        while let Some(event) = platform.poll_key() {
            if self.handle_key(event).is_break() {
                return ControlFlow::Break(());
            }
        }

        self.update();
        self.render();
        match PixelBuffer::new(&self.frame, WIDTH, HEIGHT) {
            Ok(frame) => platform.present_frame(&frame),
            Err(e) => warn!(error = %e, "test card frame rejected"),
        }
        self.count_frame(platform.ticks_ms(), platform);

        let budget = 1000 / TICK_RATE;
        let spent = platform.ticks_ms().wrapping_sub(start);
        if spent < budget {
            platform.sleep_ms(budget - spent);
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Records presents and hands out scripted key events.
    struct RecordingPlatform {
        keys: VecDeque<KeyEvent>,
        presents: usize,
        first_cell: Option<u32>,
        now: u32,
        titles: Vec<String>,
    }

    impl RecordingPlatform {
        fn new(keys: &[KeyEvent]) -> Self {
            Self {
                keys: keys.iter().copied().collect(),
                presents: 0,
                first_cell: None,
                now: 0,
                titles: Vec::new(),
            }
        }
    }

    impl Platform for RecordingPlatform {
        fn present_frame(&mut self, frame: &PixelBuffer<'_>) {
            self.presents += 1;
            self.first_cell = Some(frame.pixels()[0]);
        }

        fn poll_key(&mut self) -> Option<KeyEvent> {
            self.keys.pop_front()
        }

        fn sleep_ms(&mut self, ms: u32) {
            self.now += ms;
        }

        fn ticks_ms(&self) -> u32 {
            self.now
        }

        fn set_title(&mut self, title: &str) {
            self.titles.push(title.to_string());
        }
    }

    #[test]
    fn escape_stops_the_loop() {
        let mut card = TestCard::new();
        let mut platform = RecordingPlatform::new(&[KeyEvent::pressed(KeyCode::ESCAPE)]);
        assert_eq!(card.tick(&mut platform), ControlFlow::Break(()));
        assert_eq!(platform.presents, 0);
    }

    #[test]
    fn tick_presents_and_paces() {
        let mut card = TestCard::new();
        let mut platform = RecordingPlatform::new(&[]);
        assert_eq!(card.tick(&mut platform), ControlFlow::Continue(()));
        assert_eq!(platform.presents, 1);
        assert_eq!(platform.first_cell, Some(0x00FF_0000));
        assert_eq!(platform.now, 1000 / TICK_RATE);
        assert_eq!(platform.titles, vec!["kobra test card".to_string()]);
    }

    #[test]
    fn held_arrow_moves_cursor_until_released() {
        let mut card = TestCard::new();
        let (x0, y0) = card.cursor();
        let mut platform = RecordingPlatform::new(&[KeyEvent::pressed(KeyCode::RIGHT_ARROW)]);
        let _ = card.tick(&mut platform);
        let _ = card.tick(&mut platform);
        assert_eq!(card.cursor(), (x0 + 2 * CURSOR_SPEED, y0));

        platform.keys.push_back(KeyEvent::released(KeyCode::RIGHT_ARROW));
        let _ = card.tick(&mut platform);
        assert_eq!(card.cursor(), (x0 + 2 * CURSOR_SPEED, y0));
    }

    #[test]
    fn cursor_is_clamped() {
        let mut card = TestCard::new();
        let mut platform = RecordingPlatform::new(&[KeyEvent::pressed(KeyCode::UP_ARROW)]);
        for _ in 0..200 {
            let _ = card.tick(&mut platform);
        }
        assert_eq!(card.cursor().1, 0);
    }

    #[test]
    fn core_run_drives_until_escape() {
        let mut card = TestCard::new();
        let mut platform = RecordingPlatform::new(&[]);
        for _ in 0..3 {
            let _ = card.tick(&mut platform);
        }
        platform.keys.push_back(KeyEvent::pressed(KeyCode::ESCAPE));
        kobra_core::core::run(&mut card, &mut platform);
        assert_eq!(platform.presents, 3);
    }
}
