pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod effects;
pub mod frame;
pub mod headless;
pub mod motion;
pub mod render;
pub mod scroll;
pub mod state;

pub use config::AppConfig;
pub use motion::{FlightController, FlightTuning, Transform};
pub use scroll::{ScrollMetrics, ScrollSource, ScrollTracker};
