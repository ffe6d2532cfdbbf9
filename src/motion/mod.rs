//! Procedural avatar motion: the scroll-driven flight path and the
//! drag-to-spin turntable.

pub mod controller;
pub mod orientation;
pub mod target;
pub mod turntable;

pub use controller::{
    AvatarState, DampingMode, FlightController, FlightTuning, Transform, ACCELERATION, DAMPING,
};
pub use orientation::{euler_to_quat, look_at_euler, Wobble};
pub use target::compute_target;
pub use turntable::{pulse, Turntable, TurntableMode, TurntableTuning};
