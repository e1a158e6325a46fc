//! Smudge renders distorted-text challenge images ("captchas").
//!
//! One call to [`generate`] runs a single linear pipeline over an exclusively owned canvas:
//!
//! 1. **Resolve**: [`RenderConfig`] -> [`ResolvedConfig`] (defaults for anything left out)
//! 2. **Canvas**: fill with the background color, or place the background image at the origin
//! 3. **Glyphs**: spread the characters across the width, each with its own rotation, size
//!    jitter and color
//! 4. **Noise**: overwrite random pixels with random opaque colors
//! 5. **Curves**: stroke random quadratic curves under a shared `width + height` length budget
//!
//! The finished [`Captcha`] exports PNG, JPEG and base64-PNG, and can be saved to disk.
//!
//! Every random decision pulls from one [`RandomStream`] in a fixed order. [`generate`] seeds
//! it from the clock; [`generate_with`] takes an injected stream, so a seeded [`Rng64`]
//! reproduces a raster exactly.
//!
//! Canvas pixels are premultiplied RGBA8; exporters convert to straight alpha.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod export;
mod foundation;
mod pipeline;
mod render;

pub use assets::background::{PreparedBackground, load_background};
pub use assets::font::{
    FontBytes, FontFace, GlyphFace, GlyphInk, PositionedGlyph, ShapedGlyph, load_font_bytes,
};
pub use config::model::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_CHAR_COLOR, DEFAULT_CURVE_COUNT, DEFAULT_FONT_SIZE,
    DEFAULT_LINE_WIDTH, DEFAULT_NOISE_COUNT, FontRef, ImageRef, RenderConfig, ResolvedConfig,
};
pub use export::captcha::Captcha;
pub use export::persist::{DEFAULT_OUTPUT_DIR, OutputFormat, default_file_name};
pub use foundation::core::{Affine, BezPath, Canvas, Point, Rgba8, Vec2};
pub use foundation::error::{SmudgeError, SmudgeResult};
pub use foundation::rng::{RandomStream, Rng64};
pub use pipeline::canvas_init::init_canvas;
pub use pipeline::curves::{
    CurvePlan, OverlayStats, SEGMENTS_PER_CURVE, plan_curves, render_curves,
};
pub use pipeline::generate::{generate, generate_with, generate_with_face};
pub use pipeline::glyphs::{
    GlyphPlacement, MAX_GLYPH_ROTATION_DEG, MAX_GLYPH_SIZE_JITTER, MIN_GLYPH_SIZE_PX,
    glyph_anchor, render_glyphs,
};
pub use pipeline::noise::inject_noise;
