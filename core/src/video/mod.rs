pub mod presenter;
pub mod schedule;
pub mod surface;

pub use presenter::{Presenter, Strategy};
pub use schedule::{GeometryError, SamplingSchedule};
pub use surface::{PixelBuffer, Surface, SurfaceError};
