use super::typing::{Typewriter, CHAR_INTERVAL};
use crate::core::timer::FixedHz;

pub const BOOT_TEXT: &str = "> Initializing J.A.R.V.I.S interface\n\
> Loading frontend modules... done\n\
> Calibrating 3D renderer... done\n\
> Establishing neural network... done\n\
> System ready for interaction";

pub const PACKAGES: [&str; 12] = [
    "winit",
    "wgpu",
    "glam",
    "egui",
    "egui-wgpu",
    "egui-winit",
    "bytemuck",
    "pollster",
    "serde",
    "clap",
    "log",
    "anyhow",
];

/// Seconds between simulated package installs
pub const PACKAGE_INTERVAL: f32 = 0.6;

/// Cycles through a package list, one install per tick, forever
#[derive(Debug, Clone)]
pub struct PackageTicker {
    packages: Vec<String>,
    installed: usize,
    timer: FixedHz,
}

impl PackageTicker {
    pub fn new<I, S>(packages: I, interval: f32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            packages: packages.into_iter().map(Into::into).collect(),
            installed: 0,
            timer: FixedHz::every(interval),
        }
    }

    pub fn update(&mut self, delta: f32) {
        for _ in 0..self.timer.ticks(delta) {
            if self.installed < self.packages.len() {
                self.installed += 1;
            } else {
                self.installed = 0;
            }
        }
    }

    pub fn installed(&self) -> &[String] {
        &self.packages[..self.installed]
    }

    /// Whole percent of the list installed
    pub fn percentage(&self) -> u32 {
        if self.packages.is_empty() {
            return 0;
        }
        (self.installed * 100 / self.packages.len()) as u32
    }
}

/// Hero terminal: types the boot text, then loops the package installer
#[derive(Debug, Clone)]
pub struct Terminal {
    boot: Typewriter,
    ticker: PackageTicker,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            boot: Typewriter::new(BOOT_TEXT, CHAR_INTERVAL),
            ticker: PackageTicker::new(PACKAGES, PACKAGE_INTERVAL),
        }
    }

    pub fn update(&mut self, delta: f32) {
        if self.boot.is_done() {
            self.ticker.update(delta);
        } else {
            self.boot.update(delta);
        }
    }

    pub fn text(&self) -> &str {
        self.boot.visible()
    }

    /// Package installer, once the boot text has finished
    pub fn installer(&self) -> Option<&PackageTicker> {
        self.boot.is_done().then_some(&self.ticker)
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}
