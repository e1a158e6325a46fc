use crate::foundation::{core::Canvas, rng::RandomStream};

/// Overwrite `count` random pixels with random opaque colors.
///
/// Each dot consumes x, y, R, G, B from the stream. Positions may repeat; a later dot simply
/// overwrites an earlier one. Nothing is drawn or consumed on an empty canvas.
pub fn inject_noise(canvas: &mut Canvas, count: u32, rng: &mut dyn RandomStream) {
    if canvas.is_empty() {
        return;
    }
    let (w, h) = (canvas.width(), canvas.height());
    for _ in 0..count {
        let x = rng.below(w);
        let y = rng.below(h);
        let color = rng.opaque_color();
        canvas.set_pixel(x, y, color);
    }
    tracing::debug!(count, "injected noise");
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/noise.rs"]
mod tests;
