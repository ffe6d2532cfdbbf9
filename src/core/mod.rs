//! Frame timing, input plumbing and GPU presentation for the windowed app.

pub mod clock;
pub mod controller;
pub mod gpu_context;
pub mod input_adapter;
pub mod surface_renderer;
pub mod timer;

pub use clock::Clock;
pub use controller::{Button, Controller};
pub use gpu_context::GpuContext;
pub use input_adapter::WinitController;
pub use surface_renderer::{Overlay, SurfaceRenderer};
pub use timer::{Countdown, FixedHz, Throttled};
