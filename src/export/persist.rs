use std::{
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context;

use crate::{
    export::captcha::Captcha,
    foundation::error::{SmudgeError, SmudgeResult},
};

/// Directory used when no path is given.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Encoded container written by [`Captcha::save`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Lossless PNG with alpha.
    Png,
    /// JPEG at default quality, no alpha.
    Jpeg,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// `{text}_{unix_millis}.{ext}`, with every character of `text` that is not ASCII
/// alphanumeric replaced by `_`.
pub fn default_file_name(text: &str, unix_millis: u128, format: OutputFormat) -> String {
    let stem: String = text
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}_{unix_millis}.{}", format.extension())
}

impl Captcha {
    /// Encode and write the captcha.
    ///
    /// With `path`, writes exactly there (creating parent directories). Without, writes a
    /// derived name into [`DEFAULT_OUTPUT_DIR`]. Returns the written path.
    pub fn save(&self, format: OutputFormat, path: Option<&Path>) -> SmudgeResult<PathBuf> {
        match path {
            Some(path) => {
                self.write_to(format, path)?;
                Ok(path.to_path_buf())
            }
            None => self.save_in(DEFAULT_OUTPUT_DIR, format),
        }
    }

    /// Encode and write under `dir` with a derived file name.
    pub fn save_in(&self, dir: impl AsRef<Path>, format: OutputFormat) -> SmudgeResult<PathBuf> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let path = dir
            .as_ref()
            .join(default_file_name(self.text(), millis, format));
        self.write_to(format, &path)?;
        Ok(path)
    }

    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    fn write_to(&self, format: OutputFormat, path: &Path) -> SmudgeResult<()> {
        let bytes = match format {
            OutputFormat::Png => self.to_png()?,
            OutputFormat::Jpeg => self.to_jpg()?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))
                .map_err(|e| SmudgeError::persist(format!("{e:#}")))?;
        }
        std::fs::write(path, &bytes)
            .with_context(|| format!("write {} '{}'", format.extension(), path.display()))
            .map_err(|e| SmudgeError::persist(format!("{e:#}")))?;
        tracing::debug!(bytes = bytes.len(), "saved captcha");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/persist.rs"]
mod tests;
