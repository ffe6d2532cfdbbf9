use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

pub const DEFAULT_FOV_DEGREES: f32 = 75.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

/// A world point mapped onto the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// Pixel position, origin top-left
    pub position: Vec2,
    /// Distance along the view axis; larger is further away
    pub depth: f32,
}

/// Fixed perspective camera looking down -Z
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vec3,
    pub fov_y: f32,
    viewport: Vec2,
    view_proj: Mat4,
}

impl Camera {
    pub fn new(eye: Vec3, fov_degrees: f32, width: u32, height: u32) -> Self {
        let mut camera = Self {
            eye,
            fov_y: fov_degrees.to_radians(),
            viewport: Vec2::ONE,
            view_proj: Mat4::IDENTITY,
        };
        camera.resize(width, height);
        camera
    }

    /// The page overlay camera: five units back from the origin, 75° fov
    pub fn overlay(width: u32, height: u32) -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), DEFAULT_FOV_DEGREES, width, height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        let aspect = self.viewport.x / self.viewport.y;
        let view = Mat4::look_to_rh(self.eye, Vec3::NEG_Z, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov_y, aspect, NEAR_PLANE, FAR_PLANE);
        self.view_proj = proj * view;
    }

    /// Screen position of `world`, or None when it is behind the near plane
    pub fn project(&self, world: Vec3) -> Option<ScreenPoint> {
        let clip = self.view_proj * world.extend(1.0);
        if clip.w <= NEAR_PLANE {
            return None;
        }
        let ndc = clip.xy() / clip.w;
        Some(ScreenPoint {
            position: Vec2::new(
                (ndc.x + 1.0) * 0.5 * self.viewport.x,
                (1.0 - ndc.y) * 0.5 * self.viewport.y,
            ),
            depth: clip.w,
        })
    }

    /// On-screen radius in pixels of a sphere of `radius` at view depth `depth`
    pub fn pixel_radius(&self, radius: f32, depth: f32) -> f32 {
        if depth <= 0.0 {
            return 0.0;
        }
        radius * self.viewport.y * 0.5 / (depth * (self.fov_y * 0.5).tan())
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }
}
