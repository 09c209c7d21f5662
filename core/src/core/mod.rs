pub mod clock;
pub mod platform;

pub use clock::Clock;
pub use platform::{Engine, Platform, run};
