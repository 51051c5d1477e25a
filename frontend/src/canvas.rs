//! Browser canvas backend for [`DrawSurface`].

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::log_sheet::{DrawCommand, DrawSurface};
use crate::logging;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_element(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }
}

impl DrawSurface for CanvasSurface {
    fn draw(&mut self, command: &DrawCommand) {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
            DrawCommand::FillRect { rect, color } => {
                ctx.set_fill_style_str(&color.to_string());
                ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
            }
            DrawCommand::StrokeRect { rect, stroke } => {
                ctx.set_stroke_style_str(&stroke.color.to_string());
                ctx.set_line_width(stroke.width);
                ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
            }
            DrawCommand::Line { from, to, stroke } => {
                ctx.begin_path();
                ctx.set_stroke_style_str(&stroke.color.to_string());
                ctx.set_line_width(stroke.width);
                ctx.move_to(from.x, from.y);
                ctx.line_to(to.x, to.y);
                ctx.stroke();
            }
            DrawCommand::Text {
                text,
                at,
                font,
                align,
                color,
            } => {
                ctx.set_font(&font.css());
                ctx.set_text_align(align.as_str());
                ctx.set_fill_style_str(&color.to_string());
                if let Err(err) = ctx.fill_text(text, at.x, at.y) {
                    logging::error(&format!("fill_text failed: {err:?}"));
                }
            }
        }
    }
}
