use base64::Engine as _;
use image::ImageEncoder as _;

use crate::{
    export::captcha::Captcha,
    foundation::error::{SmudgeError, SmudgeResult},
};

impl Captcha {
    /// PNG bytes of the raster, straight alpha.
    #[tracing::instrument(skip(self), fields(width = self.width(), height = self.height()))]
    pub fn to_png(&self) -> SmudgeResult<Vec<u8>> {
        self.ensure_encodable("png")?;
        let rgba = self.raster().to_straight_rgba8();
        let mut buf = Vec::new();
        image::codecs::png::PngEncoder::new(&mut buf)
            .write_image(
                &rgba,
                self.width(),
                self.height(),
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| SmudgeError::encode(format!("png: {e}")))?;
        tracing::debug!(bytes = buf.len(), "encoded png");
        Ok(buf)
    }

    /// JPEG bytes at the encoder's default quality. Alpha is dropped; transparent pixels come
    /// out black.
    #[tracing::instrument(skip(self), fields(width = self.width(), height = self.height()))]
    pub fn to_jpg(&self) -> SmudgeResult<Vec<u8>> {
        self.ensure_encodable("jpeg")?;
        let rgba = image::RgbaImage::from_raw(
            self.width(),
            self.height(),
            self.raster().to_straight_rgba8(),
        )
        .ok_or_else(|| SmudgeError::encode("jpeg: raster size does not match dimensions"))?;
        let rgb = image::DynamicImage::ImageRgba8(rgba).to_rgb8();

        let mut buf = Vec::new();
        image::codecs::jpeg::JpegEncoder::new(&mut buf)
            .write_image(
                rgb.as_raw(),
                self.width(),
                self.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| SmudgeError::encode(format!("jpeg: {e}")))?;
        tracing::debug!(bytes = buf.len(), "encoded jpeg");
        Ok(buf)
    }

    /// Standard-alphabet base64 of [`Captcha::to_png`].
    pub fn to_base64_png(&self) -> SmudgeResult<String> {
        Ok(base64::engine::general_purpose::STANDARD.encode(self.to_png()?))
    }

    fn ensure_encodable(&self, format: &str) -> SmudgeResult<()> {
        if self.raster().is_empty() {
            return Err(SmudgeError::encode(format!(
                "{format}: cannot encode a {}x{} image",
                self.width(),
                self.height()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/encode.rs"]
mod tests;
