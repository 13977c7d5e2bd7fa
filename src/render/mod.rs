//! Canvas rendering module
//!
//! `scene` describes what to draw as plain data; `canvas` replays it onto a
//! browser 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{DrawCmd, avatar_tilt, build_scene};
