//! Browser 2D canvas backend

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::DrawCmd;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Grab the canvas's 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    /// Replay a scene. Stops at the first failing canvas call.
    pub fn draw(&self, cmds: &[DrawCmd]) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        for cmd in cmds {
            match cmd {
                DrawCmd::VerticalGradient {
                    x,
                    y,
                    w,
                    h,
                    top,
                    bottom,
                } => {
                    let gradient = ctx.create_linear_gradient(
                        *x as f64,
                        *y as f64,
                        *x as f64,
                        (*y + *h) as f64,
                    );
                    gradient.add_color_stop(0.0, top)?;
                    gradient.add_color_stop(1.0, bottom)?;
                    ctx.set_fill_style_canvas_gradient(&gradient);
                    ctx.fill_rect(*x as f64, *y as f64, *w as f64, *h as f64);
                }
                DrawCmd::Rect { x, y, w, h, color } => {
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(*x as f64, *y as f64, *w as f64, *h as f64);
                }
                DrawCmd::Circle {
                    center,
                    radius,
                    color,
                } => {
                    ctx.set_fill_style_str(color);
                    ctx.begin_path();
                    ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                    ctx.fill();
                }
                DrawCmd::Ellipse {
                    center,
                    radii,
                    rotation,
                    color,
                } => {
                    ctx.set_fill_style_str(color);
                    ctx.begin_path();
                    ctx.ellipse(
                        center.x as f64,
                        center.y as f64,
                        radii.x as f64,
                        radii.y as f64,
                        *rotation as f64,
                        0.0,
                        TAU,
                    )?;
                    ctx.fill();
                }
                DrawCmd::Triangle { points, color } => {
                    ctx.set_fill_style_str(color);
                    ctx.begin_path();
                    ctx.move_to(points[0].x as f64, points[0].y as f64);
                    ctx.line_to(points[1].x as f64, points[1].y as f64);
                    ctx.line_to(points[2].x as f64, points[2].y as f64);
                    ctx.close_path();
                    ctx.fill();
                }
                DrawCmd::PushTransform { origin, rotation } => {
                    ctx.save();
                    ctx.translate(origin.x as f64, origin.y as f64)?;
                    ctx.rotate(*rotation as f64)?;
                }
                DrawCmd::PopTransform => ctx.restore(),
            }
        }
        Ok(())
    }
}
