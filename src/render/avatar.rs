use glam::{Vec2, Vec3};
use std::collections::VecDeque;

use super::canvas::{Canvas, DrawOp, Rgba};
use super::projection::Camera;
use crate::motion::{euler_to_quat, Transform};

pub const ARMOR_RED: Rgba = Rgba::opaque(158, 27, 50);
pub const ARMOR_GOLD: Rgba = Rgba::opaque(246, 190, 0);

/// One sphere of the avatar, in model space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Part {
    pub center: Vec3,
    pub radius: f32,
    pub color: Rgba,
    /// Emissive parts get a halo scaled by the glow intensity
    pub glow: bool,
}

/// A part projected to the screen, ready to paint
#[derive(Debug, Clone, Copy)]
pub struct Splat {
    pub center: Vec2,
    pub radius: f32,
    pub depth: f32,
    pub color: Rgba,
    pub glow: bool,
}

/// Primitive humanoid built from spheres; capsules become sphere chains
#[derive(Debug, Clone, Default)]
pub struct AvatarModel {
    parts: Vec<Part>,
}

impl AvatarModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sphere(mut self, center: Vec3, radius: f32, color: Rgba) -> Self {
        self.parts.push(Part { center, radius, color, glow: false });
        self
    }

    pub fn glowing(mut self, center: Vec3, radius: f32, color: Rgba) -> Self {
        self.parts.push(Part { center, radius, color, glow: true });
        self
    }

    /// Vertical capsule centred on `center`; `length` excludes the end caps
    pub fn capsule(mut self, center: Vec3, radius: f32, length: f32, color: Rgba) -> Self {
        let steps = ((length / radius).ceil() as usize).max(1);
        let bottom = center - Vec3::Y * (length * 0.5);
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.parts.push(Part {
                center: bottom + Vec3::Y * (length * t),
                radius,
                color,
                glow: false,
            });
        }
        self
    }

    /// Avatar that flies along the scroll path
    pub fn flying() -> Self {
        Self::new()
            .capsule(Vec3::ZERO, 0.5, 1.2, ARMOR_RED)
            .sphere(Vec3::new(0.0, 1.0, 0.0), 0.4, ARMOR_RED)
            .glowing(Vec3::new(0.15, 1.05, 0.3), 0.08, ARMOR_GOLD)
            .glowing(Vec3::new(-0.15, 1.05, 0.3), 0.08, ARMOR_GOLD)
            .capsule(Vec3::new(0.7, 0.2, 0.0), 0.2, 1.0, ARMOR_RED)
            .capsule(Vec3::new(-0.7, 0.2, 0.0), 0.2, 1.0, ARMOR_RED)
            .capsule(Vec3::new(0.3, -1.0, 0.0), 0.25, 1.0, ARMOR_RED)
            .capsule(Vec3::new(-0.3, -1.0, 0.0), 0.25, 1.0, ARMOR_RED)
            .glowing(Vec3::new(0.0, 0.3, 0.5), 0.2, ARMOR_GOLD)
    }

    /// Larger, more detailed avatar shown in the hero turntable
    pub fn viewer() -> Self {
        Self::new()
            .sphere(Vec3::new(0.0, 1.6, 0.0), 0.4, ARMOR_RED)
            .sphere(Vec3::new(0.0, 1.6, 0.2), 0.38, ARMOR_GOLD)
            .glowing(Vec3::new(0.15, 1.7, 0.3), 0.05, ARMOR_GOLD)
            .glowing(Vec3::new(-0.15, 1.7, 0.3), 0.05, ARMOR_GOLD)
            .capsule(Vec3::new(0.0, 0.9, 0.0), 0.5, 0.8, ARMOR_RED)
            .glowing(Vec3::new(0.0, 1.1, 0.4), 0.15, ARMOR_GOLD)
            .sphere(Vec3::new(-0.5, 1.2, 0.0), 0.2, ARMOR_RED)
            .sphere(Vec3::new(0.5, 1.2, 0.0), 0.2, ARMOR_RED)
            .capsule(Vec3::new(-0.65, 0.9, 0.0), 0.15, 0.5, ARMOR_RED)
            .capsule(Vec3::new(-0.75, 0.4, 0.0), 0.12, 0.4, ARMOR_GOLD)
            .capsule(Vec3::new(0.65, 0.9, 0.0), 0.15, 0.5, ARMOR_RED)
            .capsule(Vec3::new(0.75, 0.4, 0.0), 0.12, 0.4, ARMOR_GOLD)
            .glowing(Vec3::new(-0.75, 0.1, 0.0), 0.1, ARMOR_GOLD)
            .glowing(Vec3::new(0.75, 0.1, 0.0), 0.1, ARMOR_GOLD)
            .capsule(Vec3::new(-0.3, 0.0, 0.0), 0.2, 0.8, ARMOR_RED)
            .capsule(Vec3::new(-0.3, -0.6, 0.0), 0.15, 0.6, ARMOR_GOLD)
            .capsule(Vec3::new(0.3, 0.0, 0.0), 0.2, 0.8, ARMOR_RED)
            .capsule(Vec3::new(0.3, -0.6, 0.0), 0.15, 0.6, ARMOR_GOLD)
            .glowing(Vec3::new(-0.3, -1.1, 0.0), 0.12, ARMOR_GOLD)
            .glowing(Vec3::new(0.3, -1.1, 0.0), 0.12, ARMOR_GOLD)
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Project every part into `out` (cleared first), sorted far to near
    pub fn project(&self, transform: &Transform, camera: &Camera, out: &mut Vec<Splat>) {
        out.clear();
        let rotation = euler_to_quat(transform.rotation);

        for part in &self.parts {
            let world = transform.position + rotation * (part.center * transform.scale);
            let Some(p) = camera.project(world) else {
                continue;
            };
            out.push(Splat {
                center: p.position,
                radius: camera.pixel_radius(part.radius * transform.scale, p.depth),
                depth: p.depth,
                color: part.color,
                glow: part.glow,
            });
        }

        out.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    }
}

/// Queue draw ops for projected splats. `glow` scales emissive halos,
/// `fade` scales overall opacity.
pub fn paint(splats: &[Splat], glow: f32, fade: f32, canvas: &mut Canvas) {
    if fade <= 0.0 {
        return;
    }

    for s in splats {
        let cx = s.center.x.round() as i32;
        let cy = s.center.y.round() as i32;
        let radius = s.radius.max(1.0);

        if s.glow {
            canvas.push(DrawOp::FilledCircle {
                cx,
                cy,
                radius: (radius * (1.0 + glow)).round() as u32,
                color: s.color.fade(0.35 * glow * fade),
            });
        }

        canvas.push(DrawOp::FilledCircle {
            cx,
            cy,
            radius: radius.round() as u32,
            color: s.color.fade(fade),
        });

        // specular highlight toward an upper-left light
        if radius >= 4.0 && !s.glow {
            let offset = radius * 0.35;
            canvas.push(DrawOp::FilledCircle {
                cx: (s.center.x - offset).round() as i32,
                cy: (s.center.y - offset).round() as i32,
                radius: (radius * 0.3).round() as u32,
                color: s.color.shade(1.6).fade(0.6 * fade),
            });
        }
    }
}

/// Screen-space circle enclosing all splats
pub fn bounds(splats: &[Splat]) -> Option<(Vec2, f32)> {
    let first = splats.first()?;
    let (mut min, mut max) = (first.center - first.radius, first.center + first.radius);
    for s in splats {
        min = min.min(s.center - s.radius);
        max = max.max(s.center + s.radius);
    }
    let center = (min + max) * 0.5;
    Some((center, (max - min).length() * 0.5))
}

/// Repulsor emitters on the flying avatar, with max trail samples
pub const EMITTERS: [(Vec3, usize); 4] = [
    (Vec3::new(0.7, -0.3, 0.0), 12),
    (Vec3::new(-0.7, -0.3, 0.0), 12),
    (Vec3::new(0.3, -1.6, 0.0), 20),
    (Vec3::new(-0.3, -1.6, 0.0), 20),
];

/// Fading world-space trails behind the repulsors
#[derive(Debug, Clone)]
pub struct Trails {
    history: Vec<(Vec3, VecDeque<Vec3>, usize)>,
}

impl Trails {
    pub fn new() -> Self {
        Self {
            history: EMITTERS
                .iter()
                .map(|&(local, len)| (local, VecDeque::with_capacity(len), len))
                .collect(),
        }
    }

    /// Record where each emitter is this frame
    pub fn record(&mut self, transform: &Transform) {
        let rotation = euler_to_quat(transform.rotation);
        for (local, samples, max_len) in &mut self.history {
            if samples.len() == *max_len {
                samples.pop_back();
            }
            samples.push_front(transform.position + rotation * (*local * transform.scale));
        }
    }

    pub fn clear(&mut self) {
        for (_, samples, _) in &mut self.history {
            samples.clear();
        }
    }

    /// Samples for each emitter, newest first
    pub fn samples(&self) -> impl Iterator<Item = &VecDeque<Vec3>> {
        self.history.iter().map(|(_, samples, _)| samples)
    }

    pub fn paint(&self, camera: &Camera, canvas: &mut Canvas) {
        for samples in self.samples() {
            let len = samples.len().max(1) as f32;
            let mut previous: Option<Vec2> = None;
            for (i, point) in samples.iter().enumerate() {
                let Some(p) = camera.project(*point) else {
                    previous = None;
                    continue;
                };
                if let Some(prev) = previous {
                    let fade = 1.0 - i as f32 / len;
                    canvas.push(DrawOp::Line {
                        x1: prev.x.round() as i32,
                        y1: prev.y.round() as i32,
                        x2: p.position.x.round() as i32,
                        y2: p.position.y.round() as i32,
                        color: ARMOR_GOLD.fade(0.8 * fade * 0.5),
                    });
                }
                previous = Some(p.position);
            }
        }
    }
}

impl Default for Trails {
    fn default() -> Self {
        Self::new()
    }
}
