use glam::Vec3;
use wgpu::{CommandEncoder, TextureView};
use winit::event::WindowEvent;
use winit::window::Window;

use crate::core::gpu_context::GpuContext;
use crate::core::surface_renderer::Overlay;
use crate::state::Section;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(246, 190, 0);
const ARMOR: egui::Color32 = egui::Color32::from_rgb(158, 27, 50);

/// Per-frame snapshot of what the HUD shows
#[derive(Debug, Clone, Default)]
pub struct HudModel {
    pub fps: f32,
    pub progress: f32,
    pub section: Section,
    pub position: Vec3,
    pub velocity: Vec3,
    pub muted: bool,
    pub music_playing: bool,
    pub nav_open: bool,
    pub terminal: String,
    pub install_percentage: Option<u32>,
}

/// Requests raised by HUD buttons, handled by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudAction {
    ToggleMute,
    ToggleMusic,
    ToggleNav,
    Jump(Section),
}

/// Lay out the HUD windows, pushing any clicked actions
pub fn build_ui(ctx: &egui::Context, model: &HudModel, actions: &mut Vec<HudAction>) {
    egui::Window::new("Flight")
        .title_bar(true)
        .resizable(false)
        .fixed_pos(egui::pos2(10.0, 10.0))
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("{:.0} FPS", model.fps))
                        .size(18.0)
                        .color(ACCENT),
                );
                ui.label(
                    egui::RichText::new(chrono::Local::now().format("%H:%M:%S").to_string())
                        .color(egui::Color32::GRAY),
                );
            });

            ui.add(egui::ProgressBar::new(model.progress).text(format!(
                "{:.0}% · {}",
                model.progress * 100.0,
                model.section.label()
            )));

            ui.separator();
            ui.label(egui::RichText::new("Avatar").strong().color(ARMOR));
            ui.monospace(format!(
                "pos ({:>6.2}, {:>6.2}, {:>6.2})",
                model.position.x, model.position.y, model.position.z
            ));
            ui.monospace(format!(
                "vel ({:>6.3}, {:>6.3}, {:>6.3})",
                model.velocity.x, model.velocity.y, model.velocity.z
            ));

            ui.separator();
            ui.horizontal(|ui| {
                let mute = if model.muted { "Unmute" } else { "Mute" };
                if ui.button(mute).clicked() {
                    actions.push(HudAction::ToggleMute);
                }
                let music = if model.music_playing { "Pause music" } else { "Play music" };
                if ui.button(music).clicked() {
                    actions.push(HudAction::ToggleMusic);
                }
                let nav = if model.nav_open { "Close menu" } else { "Menu" };
                if ui.button(nav).clicked() {
                    actions.push(HudAction::ToggleNav);
                }
            });
        });

    if model.nav_open {
        egui::Window::new("Navigate")
            .title_bar(false)
            .resizable(false)
            .fixed_pos(egui::pos2(10.0, 230.0))
            .show(ctx, |ui| {
                for section in Section::NAV {
                    let text = egui::RichText::new(section.label());
                    let text = if section == model.section { text.color(ACCENT) } else { text };
                    if ui.button(text).clicked() {
                        actions.push(HudAction::Jump(section));
                    }
                }
            });
    }

    if model.section == Section::Hero {
        egui::Window::new("terminal")
            .title_bar(false)
            .resizable(false)
            .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(10.0, -10.0))
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(&model.terminal)
                        .monospace()
                        .color(egui::Color32::from_rgb(100, 220, 120)),
                );
                if let Some(pct) = model.install_percentage {
                    ui.add(egui::ProgressBar::new(pct as f32 / 100.0).show_percentage());
                }
            });
    }
}

/// egui overlay drawn on top of the canvas
pub struct Hud {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    model: HudModel,
    actions: Vec<HudAction>,
}

impl Hud {
    pub fn new(window: &Window, gpu: &GpuContext, format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(
            gpu.device(),
            format,
            egui_wgpu::RendererOptions::default(),
        );

        Self {
            ctx,
            state,
            renderer,
            model: HudModel::default(),
            actions: Vec::new(),
        }
    }

    /// Returns true when egui consumed the event
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    pub fn wants_pointer(&self) -> bool {
        self.ctx.wants_pointer_input()
    }

    pub fn set_model(&mut self, model: HudModel) {
        self.model = model;
    }

    /// Actions clicked since the last call
    pub fn take_actions(&mut self) -> Vec<HudAction> {
        std::mem::take(&mut self.actions)
    }
}

impl Overlay for Hud {
    fn paint(
        &mut self,
        gpu: &GpuContext,
        encoder: &mut CommandEncoder,
        target: &TextureView,
        window: &Window,
        size: (u32, u32),
    ) {
        let raw_input = self.state.take_egui_input(window);
        let model = &self.model;
        let actions = &mut self.actions;
        let full_output = self.ctx.run(raw_input, |ctx| build_ui(ctx, model, actions));

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(gpu.device(), gpu.queue(), *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.0, size.1],
            pixels_per_point: full_output.pixels_per_point,
        };

        self.renderer
            .update_buffers(gpu.device(), gpu.queue(), encoder, &tris, &screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("HUD Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.renderer
                .render(&mut render_pass.forget_lifetime(), &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_frame_raises_no_actions() {
        let ctx = egui::Context::default();
        let model = HudModel {
            nav_open: true,
            terminal: "> boot".into(),
            install_percentage: Some(50),
            ..Default::default()
        };
        let mut actions = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| build_ui(ctx, &model, &mut actions));
        assert!(actions.is_empty());
    }
}
