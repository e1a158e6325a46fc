use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::foundation::{
    core::Rgba8,
    error::{SmudgeError, SmudgeResult},
};

/// Font size in pixels when none is configured.
pub const DEFAULT_FONT_SIZE: f32 = 36.0;
/// Glyph color used when random glyph colors are turned off.
pub const DEFAULT_CHAR_COLOR: Rgba8 = Rgba8::RED;
/// Canvas fill when no background image is given.
pub const DEFAULT_BACKGROUND_COLOR: Rgba8 = Rgba8::WHITE;
/// Noise dots per image.
pub const DEFAULT_NOISE_COUNT: u32 = 100;
/// Overlay curves per image.
pub const DEFAULT_CURVE_COUNT: u32 = 2;
/// Curve stroke width in pixels.
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

/// Font used for every glyph of a challenge.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRef {
    /// The platform's default sans-serif face.
    #[default]
    SystemDefault,
    /// Font file on disk (`.ttf`, `.otf` or `.ttc`).
    Path(PathBuf),
    /// Raw font file bytes.
    #[serde(skip)]
    Bytes(Arc<Vec<u8>>),
}

/// Background raster drawn at the canvas origin.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRef {
    /// Raster or SVG file on disk.
    Path(PathBuf),
    /// Encoded raster or SVG bytes.
    #[serde(skip)]
    Bytes(Arc<Vec<u8>>),
}

/// Caller-facing, partially populated render settings.
///
/// Absent fields fall back to defaults in [`RenderConfig::resolve`]. Nothing is validated here:
/// zero sizes and empty text pass through and yield degenerate images.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Font for every glyph; the system default when absent.
    pub font: Option<FontRef>,
    /// Base glyph size in pixels before jitter.
    pub font_size: Option<f32>,
    /// Glyph color when random glyph colors are turned off.
    pub char_color: Option<Rgba8>,
    /// Canvas fill when no background image is given.
    pub background_color: Option<Rgba8>,
    /// Image placed at the canvas origin instead of the fill.
    pub background_image: Option<ImageRef>,
    /// Challenge text; may be empty.
    pub text: String,
    /// Number of noise dots.
    pub noise_count: Option<u32>,
    /// Maximum number of overlay curves.
    pub curve_count: Option<u32>,
    /// Curve stroke width in pixels.
    pub line_width: Option<f64>,
    /// When `false`, glyphs are painted with `char_color` instead of random colors.
    pub randomize_glyph_colors: Option<bool>,
}

/// Fully populated settings for one generation call.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Font for every glyph.
    pub font: FontRef,
    /// Base glyph size in pixels before jitter.
    pub font_size: f32,
    /// Glyph color when random glyph colors are turned off.
    pub char_color: Rgba8,
    /// Canvas fill when no background image is given.
    pub background_color: Rgba8,
    /// Image placed at the canvas origin instead of the fill.
    pub background_image: Option<ImageRef>,
    /// Challenge text; may be empty.
    pub text: String,
    /// Number of noise dots.
    pub noise_count: u32,
    /// Maximum number of overlay curves.
    pub curve_count: u32,
    /// Curve stroke width in pixels.
    pub line_width: f64,
    /// Paint glyphs with random colors instead of `char_color`.
    pub randomize_glyph_colors: bool,
}

impl RenderConfig {
    /// Convenience constructor for the three fields every challenge needs.
    pub fn new(width: u32, height: u32, text: impl Into<String>) -> Self {
        Self {
            width,
            height,
            text: text.into(),
            ..Self::default()
        }
    }

    /// Parse a JSON config.
    pub fn from_reader<R: std::io::Read>(r: R) -> SmudgeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SmudgeError::validation(format!("parse render config JSON: {e}")))
    }

    /// Parse a JSON config from a string.
    pub fn from_json_str(s: &str) -> SmudgeResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a JSON config file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SmudgeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SmudgeError::validation(format!("open render config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Apply fallbacks to every absent field.
    ///
    /// Non-positive or non-finite sizes count as absent, as does an empty font path.
    pub fn resolve(self) -> ResolvedConfig {
        let font = match self.font {
            Some(FontRef::Path(p)) if p.as_os_str().is_empty() => FontRef::SystemDefault,
            Some(f) => f,
            None => FontRef::SystemDefault,
        };

        ResolvedConfig {
            width: self.width,
            height: self.height,
            font,
            font_size: positive_or_f32(self.font_size, DEFAULT_FONT_SIZE),
            char_color: self.char_color.unwrap_or(DEFAULT_CHAR_COLOR),
            background_color: self.background_color.unwrap_or(DEFAULT_BACKGROUND_COLOR),
            background_image: self.background_image,
            text: self.text,
            noise_count: self.noise_count.unwrap_or(DEFAULT_NOISE_COUNT),
            curve_count: self.curve_count.unwrap_or(DEFAULT_CURVE_COUNT),
            line_width: positive_or_f64(self.line_width, DEFAULT_LINE_WIDTH),
            randomize_glyph_colors: self.randomize_glyph_colors.unwrap_or(true),
        }
    }
}

impl ResolvedConfig {
    /// Canvas dimensions as the rasterizer's `u16` sizes.
    pub fn canvas_size_u16(&self) -> SmudgeResult<(u16, u16)> {
        let w: u16 = self.width.try_into().map_err(|_| {
            SmudgeError::validation(format!("canvas width {} exceeds u16", self.width))
        })?;
        let h: u16 = self.height.try_into().map_err(|_| {
            SmudgeError::validation(format!("canvas height {} exceeds u16", self.height))
        })?;
        Ok((w, h))
    }

    /// Number of glyphs (Unicode scalar values) in the text.
    pub fn glyph_count(&self) -> usize {
        self.text.chars().count()
    }
}

fn positive_or_f32(v: Option<f32>, fallback: f32) -> f32 {
    v.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(fallback)
}

fn positive_or_f64(v: Option<f64>, fallback: f64) -> f64 {
    v.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(fallback)
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
