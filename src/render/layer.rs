use crate::{
    assets::font::{GlyphInk, ShapedGlyph},
    foundation::{
        core::{Affine, BezPath, Canvas, Point, Rgba8},
        error::{SmudgeError, SmudgeResult},
    },
    render::composite,
};

/// Transparent vector layer the size of a canvas.
///
/// Shapes are recorded into a `vello_cpu` context, rasterized on [`Layer::composite_onto`] and
/// blended source-over onto the canvas. Every draw sets its own transform, so no state carries
/// over between draws.
pub(crate) struct Layer {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl Layer {
    pub(crate) fn for_canvas(canvas: &Canvas) -> SmudgeResult<Self> {
        let width: u16 = canvas
            .width()
            .try_into()
            .map_err(|_| SmudgeError::validation("layer width exceeds u16"))?;
        let height: u16 = canvas
            .height()
            .try_into()
            .map_err(|_| SmudgeError::validation("layer height exceeds u16"))?;
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
        })
    }

    /// Fill a shaped glyph with `color` under `transform` (layout-box space to canvas space).
    pub(crate) fn fill_glyph(&mut self, glyph: &ShapedGlyph, transform: Affine, color: Rgba8) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));

        match &glyph.ink {
            GlyphInk::Run {
                font,
                font_size,
                glyphs,
            } => {
                let glyphs = glyphs.iter().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(font)
                    .font_size(*font_size)
                    .fill_glyphs(glyphs);
            }
            GlyphInk::Outline(path) => {
                self.ctx.fill_path(&bezpath_to_cpu(path));
            }
        }
    }

    /// Stroke `path` (canvas space) with `color` at `line_width`.
    pub(crate) fn stroke_path(&mut self, path: &BezPath, color: Rgba8, line_width: f64) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(line_width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    /// Rasterize everything recorded so far and blend it over `canvas`.
    pub(crate) fn composite_onto(mut self, canvas: &mut Canvas) -> SmudgeResult<()> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        composite::over_in_place(canvas.data_mut(), pixmap.data_as_u8_slice())
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/layer.rs"]
mod tests;
