use avatar_flight::motion::{FlightController, Transform};
use avatar_flight::render::{AvatarModel, Camera, Canvas, DrawOp, Rgba, Scene, SceneFrame, Trails};
use glam::{Vec2, Vec3};

fn frame(flight: Transform) -> SceneFrame {
    SceneFrame {
        flight,
        turntable: Vec2::ZERO,
        glow: 0.8,
        scroll_pages: 0.0,
        progress: 0.0,
        loading: None,
        revealed: 10.0,
    }
}

#[cfg(test)]
mod render_tests {
    use super::*;

    #[test]
    fn test_canvas_bytes_match_dimensions() {
        let canvas = Canvas::new(64, 32)
            .draw(DrawOp::Clear(Rgba::opaque(1, 2, 3)))
            .execute_ops();
        assert_eq!(canvas.as_bytes().len(), 64 * 32 * 4);
        assert_eq!(&canvas.as_bytes()[..4], &[1, 2, 3, 255]);
    }

    #[test]
    fn test_later_ops_draw_on_top() {
        let red = Rgba::opaque(255, 0, 0);
        let blue = Rgba::opaque(0, 0, 255);
        let canvas = Canvas::new(20, 20)
            .draw(DrawOp::FilledCircle { cx: 10, cy: 10, radius: 5, color: red })
            .draw(DrawOp::Rect { x: 8, y: 8, width: 4, height: 4, color: blue })
            .execute_ops();
        assert_eq!(canvas.pixel(10, 10), Some(blue));
        assert_eq!(canvas.pixel(10, 6), Some(red));
    }

    #[test]
    fn test_avatar_tracks_its_transform_on_screen() {
        let camera = Camera::overlay(800, 600);
        let model = AvatarModel::flying();
        let mut splats = Vec::new();

        let place = |x: f32| Transform {
            position: Vec3::new(x, 0.0, -5.0),
            rotation: Vec3::ZERO,
            scale: 0.5,
        };

        model.project(&place(-2.0), &camera, &mut splats);
        let left = avatar_flight::render::avatar::bounds(&splats).unwrap().0;
        model.project(&place(2.0), &camera, &mut splats);
        let right = avatar_flight::render::avatar::bounds(&splats).unwrap().0;

        assert!(left.x < 400.0);
        assert!(right.x > 400.0);
    }

    #[test]
    fn test_trails_follow_motion() {
        let mut controller = FlightController::default();
        let mut trails = Trails::new();
        for i in 0..30 {
            let t = controller.step(1.0, i as f32 / 60.0, 1.0 / 60.0);
            trails.record(&t);
        }
        for samples in trails.samples() {
            let newest = samples.front().unwrap();
            let oldest = samples.back().unwrap();
            // flying toward the bottom of the page
            assert!(newest.y < oldest.y);
        }
    }

    #[test]
    fn test_scene_draws_avatar_over_backdrop() {
        let mut scene = Scene::new(400, 300);
        let flight = Transform {
            position: Vec3::new(0.0, 0.0, -5.0),
            rotation: Vec3::ZERO,
            scale: 0.5,
        };
        let canvas = scene.render(&frame(flight));
        let center = canvas.pixel(200, 150).unwrap();
        let corner = canvas.pixel(1, 1).unwrap();
        assert_ne!(center, corner);
        assert_eq!(corner.a, 255);
    }
}
