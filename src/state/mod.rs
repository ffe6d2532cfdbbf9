pub mod audio;
pub mod portfolio;

pub use audio::{AudioSink, AudioState, Clip, LogSink, PlaybackError, SinkEvent};
pub use portfolio::{PageLayout, PortfolioState, Section};
