use glam::{Vec2, Vec3};

use super::avatar::{self, AvatarModel, Splat, Trails, ARMOR_GOLD};
use super::canvas::{Canvas, DrawOp, Rgba};
use super::projection::Camera;
use crate::effects::{power2_in, Reveal, RevealFrom};
use crate::motion::Transform;

const BACKGROUND: Rgba = Rgba::opaque(10, 10, 14);
const GRID_LINE: Rgba = Rgba::new(246, 190, 0, 18);
pub const GRID_SPACING: i32 = 30;

/// World position of the hero turntable before scrolling
const VIEWER_ORIGIN: Vec3 = Vec3::new(2.2, -0.6, 0.0);
const VIEWER_SCALE: f32 = 0.8;

/// Everything the scene needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct SceneFrame {
    pub flight: Transform,
    /// Turntable (pitch, yaw)
    pub turntable: Vec2,
    /// Emissive intensity for the turntable model
    pub glow: f32,
    /// Scroll offset in viewport heights
    pub scroll_pages: f32,
    /// Normalized scroll progress for the scroll bar
    pub progress: f32,
    /// Loading screen progress, when still loading
    pub loading: Option<f32>,
    /// Seconds since the loading screen closed, drives the hero entrance
    pub revealed: f32,
}

/// CPU-rendered backdrop plus both avatars
pub struct Scene {
    canvas: Canvas,
    camera: Camera,
    flying: AvatarModel,
    viewer: AvatarModel,
    trails: Trails,
    viewer_reveal: Reveal,
    flying_splats: Vec<Splat>,
    viewer_splats: Vec<Splat>,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            camera: Camera::overlay(width, height),
            flying: AvatarModel::flying(),
            viewer: AvatarModel::viewer(),
            trails: Trails::new(),
            viewer_reveal: Reveal::new(RevealFrom::Right),
            flying_splats: Vec::new(),
            viewer_splats: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == self.canvas.dimensions() {
            return;
        }
        log::debug!("scene resized to {width}x{height}");
        self.canvas.resize(width, height);
        self.camera.resize(width, height);
    }

    pub fn render(&mut self, frame: &SceneFrame) -> &Canvas {
        let (width, height) = self.canvas.dimensions();

        if let Some(progress) = frame.loading {
            self.draw_loading(progress, width, height);
            self.canvas.execute();
            return &self.canvas;
        }

        self.draw_backdrop(frame.scroll_pages, width, height);

        // the turntable lives in the hero section and scrolls away with it
        let viewer_fade =
            (1.0 - power2_in(frame.scroll_pages)) * self.viewer_reveal.opacity(frame.revealed);
        let world_height = 2.0 * self.camera.eye.z * (self.camera.fov_y * 0.5).tan();
        let viewer = Transform {
            position: VIEWER_ORIGIN + Vec3::Y * (frame.scroll_pages * world_height),
            rotation: Vec3::new(frame.turntable.x, frame.turntable.y, 0.0),
            scale: VIEWER_SCALE,
        };
        self.viewer.project(&viewer, &self.camera, &mut self.viewer_splats);
        let slide = self.viewer_reveal.offset(frame.revealed);
        for splat in &mut self.viewer_splats {
            splat.center += slide;
        }
        avatar::paint(&self.viewer_splats, frame.glow, viewer_fade, &mut self.canvas);

        self.trails.record(&frame.flight);
        self.trails.paint(&self.camera, &mut self.canvas);
        self.flying.project(&frame.flight, &self.camera, &mut self.flying_splats);
        avatar::paint(&self.flying_splats, 1.0, 1.0, &mut self.canvas);

        self.draw_scroll_bar(frame.progress, width, height);

        self.canvas.execute();
        &self.canvas
    }

    /// Screen circle around the turntable model, for pointer hit tests
    pub fn viewer_bounds(&self) -> Option<(Vec2, f32)> {
        avatar::bounds(&self.viewer_splats)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn trails(&self) -> &Trails {
        &self.trails
    }

    fn draw_backdrop(&mut self, scroll_pages: f32, width: u32, height: u32) {
        self.canvas.push(DrawOp::Clear(BACKGROUND));

        // grid drifts at half the page speed
        let shift = ((scroll_pages * height as f32 * 0.5) as i32).rem_euclid(GRID_SPACING);
        for x in (0..width as i32).step_by(GRID_SPACING as usize) {
            self.canvas.push(DrawOp::Line {
                x1: x,
                y1: 0,
                x2: x,
                y2: height as i32,
                color: GRID_LINE,
            });
        }
        for y in (-shift..height as i32).step_by(GRID_SPACING as usize) {
            self.canvas.push(DrawOp::Line {
                x1: 0,
                y1: y,
                x2: width as i32,
                y2: y,
                color: GRID_LINE,
            });
        }
    }

    fn draw_scroll_bar(&mut self, progress: f32, width: u32, height: u32) {
        let track = height.saturating_sub(20);
        let filled = (track as f32 * progress.clamp(0.0, 1.0)).round() as u32;
        let x = width as i32 - 6;
        self.canvas.push(DrawOp::Rect {
            x,
            y: 10,
            width: 2,
            height: track,
            color: Rgba::new(255, 255, 255, 30),
        });
        self.canvas.push(DrawOp::Rect { x, y: 10, width: 2, height: filled, color: ARMOR_GOLD });
    }

    fn draw_loading(&mut self, progress: f32, width: u32, height: u32) {
        self.canvas.push(DrawOp::Clear(Rgba::BLACK));

        let cx = width as i32 / 2;
        let cy = height as i32 / 2;
        self.canvas.push(DrawOp::Circle {
            cx,
            cy: cy - 40,
            radius: 24,
            color: ARMOR_GOLD.fade(0.4),
        });
        self.canvas.push(DrawOp::FilledCircle {
            cx,
            cy: cy - 40,
            radius: (8.0 + 12.0 * progress.clamp(0.0, 1.0)) as u32,
            color: ARMOR_GOLD,
        });

        let bar = (width / 3).max(1);
        let x = cx - bar as i32 / 2;
        self.canvas.push(DrawOp::Rect {
            x,
            y: cy,
            width: bar,
            height: 4,
            color: Rgba::new(255, 255, 255, 40),
        });
        self.canvas.push(DrawOp::Rect {
            x,
            y: cy,
            width: (bar as f32 * progress.clamp(0.0, 1.0)).round() as u32,
            height: 4,
            color: ARMOR_GOLD,
        });
    }
}
