/// Convenience result type used across smudge.
pub type SmudgeResult<T> = Result<T, SmudgeError>;

/// Error taxonomy for generation and export calls.
///
/// Every variant is terminal for the call that raised it. Export failures ([`SmudgeError::Encode`],
/// [`SmudgeError::Persist`]) leave an already generated [`crate::Captcha`] intact.
#[derive(thiserror::Error, Debug)]
pub enum SmudgeError {
    /// Configuration that cannot be parsed or rasterized.
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing or undecodable background image.
    #[error("background load error: {0}")]
    BackgroundLoad(String),

    /// Missing or unusable font resource.
    #[error("font load error: {0}")]
    FontLoad(String),

    /// A glyph could not be shaped at its jittered size.
    #[error("glyph render error: {0}")]
    GlyphRender(String),

    /// PNG/JPEG serialization failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Filesystem write failure.
    #[error("persist error: {0}")]
    Persist(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SmudgeError {
    /// Build a [`SmudgeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SmudgeError::BackgroundLoad`] value.
    pub fn background_load(msg: impl Into<String>) -> Self {
        Self::BackgroundLoad(msg.into())
    }

    /// Build a [`SmudgeError::FontLoad`] value.
    pub fn font_load(msg: impl Into<String>) -> Self {
        Self::FontLoad(msg.into())
    }

    /// Build a [`SmudgeError::GlyphRender`] value.
    pub fn glyph_render(msg: impl Into<String>) -> Self {
        Self::GlyphRender(msg.into())
    }

    /// Build a [`SmudgeError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SmudgeError::Persist`] value.
    pub fn persist(msg: impl Into<String>) -> Self {
        Self::Persist(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
