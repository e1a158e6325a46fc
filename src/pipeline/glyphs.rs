use crate::{
    assets::font::GlyphFace,
    config::model::ResolvedConfig,
    foundation::{
        core::{Affine, Canvas, Point, Rgba8, Vec2},
        error::SmudgeResult,
        rng::RandomStream,
    },
    render::layer::Layer,
};

/// Rotation range in degrees, symmetric around zero.
pub const MAX_GLYPH_ROTATION_DEG: f64 = 30.0;
/// Font size jitter in pixels, symmetric around the configured size.
pub const MAX_GLYPH_SIZE_JITTER: f32 = 5.0;
/// Jittered sizes never drop below this.
pub const MIN_GLYPH_SIZE_PX: f32 = 1.0;

/// Where and how one character was drawn.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GlyphPlacement {
    /// Character drawn.
    pub ch: char,
    /// Center of the glyph's layout box and its rotation pivot.
    pub anchor: Point,
    /// Rotation in degrees.
    pub angle_deg: f64,
    /// Jittered font size in pixels.
    pub size_px: f32,
    /// Fill color.
    pub color: Rgba8,
}

/// Anchor of glyph `index` among `len` glyphs: `len` glyphs split the width into `len + 1`
/// equal gaps, vertically centered.
pub fn glyph_anchor(width: u32, height: u32, len: usize, index: usize) -> Point {
    let spacing = f64::from(width) / (len as f64 + 1.0);
    Point::new(spacing * (index as f64 + 1.0), f64::from(height) / 2.0)
}

/// Draw every character of the text onto the canvas.
///
/// Per glyph the stream is consumed as: angle, size jitter, R, G, B. A glyph that cannot be
/// shaped fails the whole call.
pub fn render_glyphs(
    canvas: &mut Canvas,
    config: &ResolvedConfig,
    face: &mut dyn GlyphFace,
    rng: &mut dyn RandomStream,
) -> SmudgeResult<Vec<GlyphPlacement>> {
    let len = config.glyph_count();
    if len == 0 {
        return Ok(Vec::new());
    }

    let mut layer = if canvas.is_empty() {
        None
    } else {
        Some(Layer::for_canvas(canvas)?)
    };

    let mut placements = Vec::with_capacity(len);
    for (i, ch) in config.text.chars().enumerate() {
        let angle_deg = rng.next_f64_01() * (2.0 * MAX_GLYPH_ROTATION_DEG) - MAX_GLYPH_ROTATION_DEG;
        let jitter =
            (rng.next_f64_01() as f32) * (2.0 * MAX_GLYPH_SIZE_JITTER) - MAX_GLYPH_SIZE_JITTER;
        let size_px = (config.font_size + jitter).max(MIN_GLYPH_SIZE_PX);
        let drawn = rng.opaque_color();
        let color = if config.randomize_glyph_colors {
            drawn
        } else {
            config.char_color
        };

        let anchor = glyph_anchor(config.width, config.height, len, i);
        let shaped = face.shape(ch, size_px)?;

        if let Some(layer) = layer.as_mut() {
            let center = Vec2::new(shaped.width / 2.0, shaped.height / 2.0);
            let transform = Affine::rotate_about(angle_deg.to_radians(), anchor)
                * Affine::translate(anchor.to_vec2() - center);
            layer.fill_glyph(&shaped, transform, color);
        }

        placements.push(GlyphPlacement {
            ch,
            anchor,
            angle_deg,
            size_px,
            color,
        });
    }

    if let Some(layer) = layer {
        layer.composite_onto(canvas)?;
    }
    tracing::debug!(glyphs = placements.len(), "rendered glyphs");
    Ok(placements)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/glyphs.rs"]
mod tests;
