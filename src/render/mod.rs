//! Drawing: a software canvas for the scene and an egui HUD on top.

pub mod avatar;
pub mod canvas;
pub mod hud;
pub mod projection;
pub mod scene;

pub use avatar::{AvatarModel, Trails};
pub use canvas::{Canvas, DrawOp, Rgba};
pub use hud::{Hud, HudAction, HudModel};
pub use projection::{Camera, ScreenPoint};
pub use scene::{Scene, SceneFrame};
