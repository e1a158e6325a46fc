use crate::{
    assets::font::{GlyphFace, LazyFontFace},
    config::model::{RenderConfig, ResolvedConfig},
    export::captcha::Captcha,
    foundation::{
        error::SmudgeResult,
        rng::{RandomStream, Rng64},
    },
    pipeline::{
        canvas_init::init_canvas, curves::render_curves, glyphs::render_glyphs,
        noise::inject_noise,
    },
};

/// Generate a captcha with a fresh clock-seeded random stream.
pub fn generate(config: RenderConfig) -> SmudgeResult<Captcha> {
    let config = config.resolve();
    generate_with(&config, &mut Rng64::from_clock())
}

/// Generate a captcha from a resolved config and an injected random stream.
///
/// The configured font is loaded on the first glyph, so empty text never needs one.
pub fn generate_with(config: &ResolvedConfig, rng: &mut dyn RandomStream) -> SmudgeResult<Captcha> {
    let mut face = LazyFontFace::new(&config.font);
    generate_with_face(config, &mut face, rng)
}

/// Run the full pipeline: canvas, glyphs, noise, curves.
///
/// All-or-nothing: any failure returns an error and no partially drawn raster.
#[tracing::instrument(
    skip(config, face, rng),
    fields(width = config.width, height = config.height, glyphs = config.glyph_count())
)]
pub fn generate_with_face(
    config: &ResolvedConfig,
    face: &mut dyn GlyphFace,
    rng: &mut dyn RandomStream,
) -> SmudgeResult<Captcha> {
    config.canvas_size_u16()?;

    let mut canvas = init_canvas(config)?;
    let glyphs = render_glyphs(&mut canvas, config, face, rng)?;
    inject_noise(&mut canvas, config.noise_count, rng);
    let overlay = render_curves(&mut canvas, config, rng)?;

    tracing::debug!(
        noise = config.noise_count,
        curves = overlay.curves_drawn,
        "generated captcha"
    );
    Ok(Captcha::new(canvas, config.text.clone(), glyphs, overlay))
}
