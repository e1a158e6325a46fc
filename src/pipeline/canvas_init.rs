use crate::{
    assets::background::load_background,
    config::model::ResolvedConfig,
    foundation::{core::Canvas, error::SmudgeResult},
};

/// Create the canvas for one call.
///
/// With a background image, the decoded image is placed unscaled at the origin and cropped to
/// the canvas; pixels it does not cover stay transparent. Without one, the whole canvas is
/// filled with the background color.
pub fn init_canvas(config: &ResolvedConfig) -> SmudgeResult<Canvas> {
    match &config.background_image {
        Some(image) => {
            let bg = load_background(image)?;
            let mut canvas = Canvas::new(config.width, config.height);
            canvas.blit_premul_at_origin(&bg.rgba8_premul, bg.width, bg.height);
            Ok(canvas)
        }
        None => Ok(Canvas::filled(
            config.width,
            config.height,
            config.background_color,
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/canvas_init.rs"]
mod tests;
