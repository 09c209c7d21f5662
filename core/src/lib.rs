pub mod core;
pub mod input;
pub mod video;

pub mod prelude {
    pub use crate::core::{Clock, Engine, Platform};
    pub use crate::input::{InputDecoder, KeyCode, KeyEvent, Layout};
    pub use crate::video::{PixelBuffer, Presenter, Strategy, Surface};
}
