// File: src/import.rs
//! Read-only import of TrueType/OpenType binaries.
//!
//! Only what the rest of the crate needs is carried over: the name records,
//! the character map restricted to a charset, and the outlines and advance
//! widths of the mapped glyphs.

use crate::core::types::{GlyphId, Outline, PathCommand};
use crate::error::{FastFontError, Result};
use crate::font::{FontDocument, GlyphStore, NameKind};
use log::{debug, warn};
use std::collections::BTreeSet;
use ttf_parser::{Face, OutlineBuilder};

/// sfnt version tags of TrueType, CFF-flavoured OpenType and collections.
const SFNT_TAGS: [[u8; 4]; 4] = [[0, 1, 0, 0], *b"OTTO", *b"true", *b"ttcf"];

pub fn is_font_binary(data: &[u8]) -> bool {
    data.len() >= 4 && SFNT_TAGS.iter().any(|tag| data[..4] == tag[..])
}

struct OutlineCollector {
    commands: Vec<PathCommand>,
}

impl OutlineBuilder for OutlineCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::MoveTo([x, y]));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::LineTo([x, y]));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::QuadTo([x1, y1], [x, y]));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::CurveTo([x1, y1], [x2, y2], [x, y]));
    }

    fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }
}

fn glyph_name(face: &Face<'_>, id: ttf_parser::GlyphId) -> GlyphId {
    match face.glyph_name(id) {
        Some(name) => GlyphId::new(name),
        None => GlyphId::new(format!("glyph{:05}", id.0)),
    }
}

/// Builds a document from a font binary, importing the glyphs of `charset`.
pub fn from_font_bytes(data: &[u8], charset: &BTreeSet<char>) -> Result<FontDocument> {
    let face = Face::parse(data, 0).map_err(|e| FastFontError::FontParse(e.to_string()))?;
    let mut document = FontDocument::new(face.units_per_em());

    for name in face.names() {
        let Some(kind) = NameKind::from_name_id(name.name_id) else {
            continue;
        };
        if !name.is_unicode() || document.names.get(kind).is_some() {
            continue;
        }
        if let Some(value) = name.to_string() {
            document.names.set(kind, value);
        }
    }

    for &c in charset {
        let Some(id) = face.glyph_index(c) else {
            debug!("no glyph for {:?}", c);
            continue;
        };
        let glyph = glyph_name(&face, id);
        let mut collector = OutlineCollector { commands: Vec::new() };
        // Blank glyphs have no outline; they still get an (empty) entry.
        face.outline_glyph(id, &mut collector);
        let advance = match face.glyph_hor_advance(id) {
            Some(advance) => u32::from(advance),
            None => {
                warn!("glyph '{}' has no horizontal advance, skipping", glyph);
                continue;
            }
        };
        document.glyphs.map_char(c, glyph.clone());
        document.glyphs.insert(glyph, Outline::new(collector.commands), advance);
    }

    debug!(
        "imported {} glyphs at {} units per em",
        document.glyphs.len(),
        document.units_per_em
    );
    Ok(document)
}
