// wobble_core: CPU-side state shared by the renderer and the viewer.

pub mod camera;
pub mod color;
pub mod params;
pub mod time;

#[cfg(feature = "gpu")]
pub mod context;

#[cfg(feature = "input")]
pub mod input;

pub use camera::Camera;
pub use color::Color;
pub use params::SimParams;
pub use time::{Time, TimeClock};

#[cfg(feature = "gpu")]
pub use context::GpuContext;

#[cfg(feature = "input")]
pub use input::{InputState, KeyCode, MouseButton};
