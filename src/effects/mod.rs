//! Small time-driven UI effects for the overlay.

pub mod easing;
pub mod terminal;
pub mod typing;

pub use easing::{power2_in, power2_out, Reveal, RevealFrom};
pub use terminal::{PackageTicker, Terminal};
pub use typing::Typewriter;
