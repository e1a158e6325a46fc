use crate::{
    foundation::{
        core::Canvas,
        error::{SmudgeError, SmudgeResult},
    },
    pipeline::{curves::OverlayStats, glyphs::GlyphPlacement},
};

/// Finished captcha raster plus the text it encodes.
///
/// Immutable once produced. Export calls borrow it, so a failed export leaves it usable for
/// another format or path.
#[derive(Clone, Debug)]
pub struct Captcha {
    raster: Canvas,
    text: String,
    glyphs: Vec<GlyphPlacement>,
    overlay: OverlayStats,
}

#[derive(serde::Serialize)]
struct Transcript<'a> {
    text: &'a str,
    width: u32,
    height: u32,
    glyphs: &'a [GlyphPlacement],
}

impl Captcha {
    pub(crate) fn new(
        raster: Canvas,
        text: String,
        glyphs: Vec<GlyphPlacement>,
        overlay: OverlayStats,
    ) -> Self {
        Self {
            raster,
            text,
            glyphs,
            overlay,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Text the image encodes.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Premultiplied RGBA8 raster.
    pub fn raster(&self) -> &Canvas {
        &self.raster
    }

    /// Placement of every glyph, in text order.
    pub fn glyphs(&self) -> &[GlyphPlacement] {
        &self.glyphs
    }

    /// Curve budget and per-segment lengths.
    pub fn overlay(&self) -> &OverlayStats {
        &self.overlay
    }

    /// JSON transcript: text, canvas size and glyph placements.
    pub fn transcript_json(&self) -> SmudgeResult<String> {
        serde_json::to_string_pretty(&Transcript {
            text: &self.text,
            width: self.width(),
            height: self.height(),
            glyphs: &self.glyphs,
        })
        .map_err(|e| SmudgeError::encode(format!("serialize transcript: {e}")))
    }
}
