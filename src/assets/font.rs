use std::sync::Arc;

use anyhow::Context;

use crate::{
    config::model::FontRef,
    foundation::{
        core::BezPath,
        error::{SmudgeError, SmudgeResult},
    },
};

/// Raw font file bytes plus the face index inside a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontBytes {
    /// Whole font file.
    pub data: Arc<Vec<u8>>,
    /// Face index, `0` for single-face files.
    pub index: u32,
}

/// Glyph positioned relative to the top-left corner of its layout box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionedGlyph {
    /// Glyph id in the font.
    pub id: u32,
    /// Pen x in pixels.
    pub x: f32,
    /// Baseline y in pixels.
    pub y: f32,
}

/// Paintable form of one shaped character.
pub enum GlyphInk {
    /// Glyph ids drawn from font outlines.
    Run {
        /// Face the glyph ids belong to.
        font: vello_cpu::peniko::FontData,
        /// Size the glyphs were shaped at, in pixels.
        font_size: f32,
        /// Glyphs relative to the layout box.
        glyphs: Vec<PositionedGlyph>,
    },
    /// Pre-built outline in layout-box coordinates.
    Outline(BezPath),
}

/// One character shaped at a specific size.
///
/// The layout box spans `[0, width] x [0, height]`; the glyph renderer centers this box on
/// the glyph anchor.
pub struct ShapedGlyph {
    /// Layout box width in pixels.
    pub width: f64,
    /// Layout box height in pixels.
    pub height: f64,
    /// What to paint.
    pub ink: GlyphInk,
}

/// Font collaborator: turns a character and pixel size into paintable ink.
pub trait GlyphFace {
    /// Shape `ch` at `size_px`; characters the font cannot draw fail with [`SmudgeError::GlyphRender`].
    fn shape(&mut self, ch: char, size_px: f32) -> SmudgeResult<ShapedGlyph>;
}

/// Resolve a [`FontRef`] to font bytes.
pub fn load_font_bytes(font: &FontRef) -> SmudgeResult<FontBytes> {
    match font {
        FontRef::SystemDefault => system_default_font(),
        FontRef::Path(path) => {
            let data = std::fs::read(path)
                .with_context(|| format!("read font file '{}'", path.display()))
                .map_err(|e| SmudgeError::font_load(format!("{e:#}")))?;
            Ok(FontBytes {
                data: Arc::new(data),
                index: 0,
            })
        }
        FontRef::Bytes(data) => Ok(FontBytes {
            data: data.clone(),
            index: 0,
        }),
    }
}

fn system_default_font() -> SmudgeResult<FontBytes> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let query = usvg::fontdb::Query {
        families: &[usvg::fontdb::Family::SansSerif],
        ..Default::default()
    };
    let id = db
        .query(&query)
        .or_else(|| db.faces().next().map(|f| f.id))
        .ok_or_else(|| SmudgeError::font_load("no system fonts available for the default font"))?;

    let (data, index) = db
        .with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| SmudgeError::font_load("system default font data is unavailable"))?;
    Ok(FontBytes {
        data: Arc::new(data),
        index,
    })
}

/// Parley-backed [`GlyphFace`] over a single registered font.
///
/// Shaping may fall back to other installed fonts for characters the registered font lacks;
/// such glyphs are rejected, never painted with the registered font.
pub struct FontFace {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
    blob: parley::fontique::Blob<u8>,
    paint_blob: vello_cpu::peniko::Blob<u8>,
}

impl FontFace {
    /// Register `bytes` and shape with the family holding face `bytes.index`.
    pub fn new(bytes: FontBytes) -> SmudgeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let blob = parley::fontique::Blob::from(bytes.data.to_vec());
        let families = font_ctx.collection.register_fonts(blob.clone(), None);
        let family_id = families
            .iter()
            .find(|(_, fonts)| fonts.iter().any(|f| f.index() == bytes.index))
            .map(|(id, _)| *id)
            .ok_or_else(|| {
                SmudgeError::font_load(format!(
                    "no font face at index {} in font bytes",
                    bytes.index
                ))
            })?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SmudgeError::font_load("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            blob,
            paint_blob: vello_cpu::peniko::Blob::from(bytes.data.to_vec()),
        })
    }

    /// Resolve `font` and register it.
    pub fn load(font: &FontRef) -> SmudgeResult<Self> {
        Self::new(load_font_bytes(font)?)
    }

    /// Family name the registered font was shaped under.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    fn is_registered_blob(&self, blob_id: u64) -> bool {
        blob_id == self.blob.id()
    }
}

impl GlyphFace for FontFace {
    fn shape(&mut self, ch: char, size_px: f32) -> SmudgeResult<ShapedGlyph> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SmudgeError::glyph_render(format!(
                "glyph size must be finite and > 0, got {size_px}"
            )));
        }

        let text = ch.to_string();
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(&text);
        layout.break_all_lines(None);

        let mut glyphs = Vec::new();
        let mut face_index = None;
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let run_font = run.run().font();
                if !self.is_registered_blob(run_font.data.id()) {
                    return Err(SmudgeError::glyph_render(format!(
                        "font '{}' has no glyph for {ch:?}; shaping fell back to another font",
                        self.family_name
                    )));
                }
                face_index = Some(run_font.index);
                glyphs.extend(run.positioned_glyphs().map(|g| PositionedGlyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                }));
            }
        }

        let face_index = match face_index {
            Some(index) if !glyphs.is_empty() && glyphs.iter().all(|g| g.id != 0) => index,
            _ => {
                return Err(SmudgeError::glyph_render(format!(
                    "font '{}' has no glyph for {ch:?} at {size_px:.2}px",
                    self.family_name
                )));
            }
        };

        Ok(ShapedGlyph {
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
            ink: GlyphInk::Run {
                font: vello_cpu::peniko::FontData::new(self.paint_blob.clone(), face_index),
                font_size: size_px,
                glyphs,
            },
        })
    }
}

/// Loads the configured font on first use, so empty text never touches the font collaborator.
pub(crate) struct LazyFontFace<'a> {
    font: &'a FontRef,
    face: Option<FontFace>,
}

impl<'a> LazyFontFace<'a> {
    pub(crate) fn new(font: &'a FontRef) -> Self {
        Self { font, face: None }
    }
}

impl GlyphFace for LazyFontFace<'_> {
    fn shape(&mut self, ch: char, size_px: f32) -> SmudgeResult<ShapedGlyph> {
        let face = match self.face.take() {
            Some(face) => face,
            None => FontFace::load(self.font)?,
        };
        self.face.insert(face).shape(ch, size_px)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
