use std::path::Path;

use anyhow::Context;

use crate::{
    config::model::ImageRef,
    foundation::{
        core::premultiply_rgba8_in_place,
        error::{SmudgeError, SmudgeResult},
    },
};

/// Decoded background in premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedBackground {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Vec<u8>,
}

/// Load and decode a background image.
///
/// Raster formats go through `image`; SVG documents are rasterized at their intrinsic size.
/// Every failure maps to [`SmudgeError::BackgroundLoad`].
#[tracing::instrument(skip(source))]
pub fn load_background(source: &ImageRef) -> SmudgeResult<PreparedBackground> {
    let decoded = match source {
        ImageRef::Path(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read background image '{}'", path.display()))
                .map_err(|e| SmudgeError::background_load(format!("{e:#}")))?;
            decode_any(&bytes, has_svg_extension(path))
        }
        ImageRef::Bytes(bytes) => decode_any(bytes, false),
    };
    decoded.map_err(|e| SmudgeError::background_load(format!("{e:#}")))
}

fn decode_any(bytes: &[u8], svg_hint: bool) -> anyhow::Result<PreparedBackground> {
    if svg_hint || looks_like_svg(bytes) {
        decode_svg(bytes)
    } else {
        decode_raster(bytes)
    }
}

fn decode_raster(bytes: &[u8]) -> anyhow::Result<PreparedBackground> {
    let dyn_img = image::load_from_memory(bytes).context("decode background image")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedBackground {
        width,
        height,
        rgba8_premul,
    })
}

fn decode_svg(bytes: &[u8]) -> anyhow::Result<PreparedBackground> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse background svg")?;

    let size = tree.size();
    let to_px = |v: f32| -> anyhow::Result<u32> {
        anyhow::ensure!(v.is_finite() && v > 0.0, "svg has invalid width/height");
        Ok((v.ceil() as u32).max(1))
    };
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .context("allocate background svg pixmap")?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    // tiny-skia pixmaps are already premultiplied RGBA8.
    Ok(PreparedBackground {
        width,
        height,
        rgba8_premul: pixmap.data().to_vec(),
    })
}

fn has_svg_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("svg") || ext.eq_ignore_ascii_case("svgz"))
        .unwrap_or(false)
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(256)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/background.rs"]
mod tests;
