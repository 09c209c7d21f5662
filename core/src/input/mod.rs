pub mod decoder;
pub mod keymap;
pub mod keys;
pub mod queue;
pub mod report;

pub use decoder::{ChunkOutcome, IngestSummary, InputDecoder};
pub use keymap::{Layout, translate};
pub use keys::{KeyCode, KeyEvent};
pub use queue::EventQueue;
pub use report::{BootReport, Transition};
