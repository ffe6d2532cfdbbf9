use glam::Vec3;
use serde::Serialize;
use std::io::Write;

use crate::config::AppConfig;
use crate::frame::{FixedStepFrames, FrameInfo};
use crate::motion::FlightController;
use crate::scroll::{ScrollSource, ScrollTracker};
use crate::state::Section;

/// One line of headless output
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraceRecord {
    #[serde(flatten)]
    pub frame: FrameInfo,
    pub progress: f32,
    pub section: Section,
    pub target: Vec3,
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Vec3,
}

/// Fly a scripted top-to-bottom scroll sweep at a fixed frame rate
pub fn run(config: &AppConfig, fps: f32, frames: u64) -> Vec<TraceRecord> {
    let layout = config.page.resolve();
    let mut scroll = ScrollTracker::new(layout.total_height(), config.window.height as f32);
    let range = scroll.metrics().range();
    let mut controller = FlightController::new(config.flight);
    let last = frames.saturating_sub(1).max(1) as f32;

    log::info!("headless run: {frames} frames at {fps} Hz, scroll range {range}px");

    let records = FixedStepFrames::new(fps, frames)
        .map(|frame| {
            scroll.scroll_to(range * frame.number as f32 / last);
            let progress = scroll.progress();
            controller.step(progress, frame.time, frame.delta);
            let state = controller.state();
            TraceRecord {
                frame,
                progress,
                section: layout.section_at(scroll.offset()),
                target: controller.target(),
                position: state.position,
                velocity: state.velocity,
                rotation: state.rotation,
            }
        })
        .collect();

    controller.teardown();
    records
}

/// Write records as JSON lines
pub fn write_trace<W: Write>(records: &[TraceRecord], mut out: W) -> anyhow::Result<()> {
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
