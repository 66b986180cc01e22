// File: src/font.rs
//! Font-side collaborators: glyph storage, name records and the font resource
//! that carries both plus the installed layout rules.

use crate::core::compiler::RuleSet;
use crate::core::types::{GlyphId, Outline};
use crate::error::Result;
use crate::{config, import, persistence};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Read/write access to glyph outlines and advance widths.
/// Lookups return `None` on a miss; callers decide whether that matters.
pub trait GlyphStore {
    fn glyph_for(&self, c: char) -> Option<GlyphId>;
    fn outline_of(&self, glyph: &GlyphId) -> Option<&Outline>;
    fn advance_width_of(&self, glyph: &GlyphId) -> Option<u32>;
    fn insert(&mut self, glyph: GlyphId, outline: Outline, advance_width: u32);
    fn contains(&self, glyph: &GlyphId) -> bool {
        self.outline_of(glyph).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphData {
    pub outline: Outline,
    pub advance_width: u32,
}

/// In-memory glyph store: a character map plus glyph data keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryGlyphStore {
    cmap: BTreeMap<char, GlyphId>,
    glyphs: BTreeMap<GlyphId, GlyphData>,
}

impl MemoryGlyphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map_char(&mut self, c: char, glyph: GlyphId) {
        self.cmap.insert(c, glyph);
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyph_ids(&self) -> impl Iterator<Item = &GlyphId> {
        self.glyphs.keys()
    }

    pub fn get(&self, glyph: &GlyphId) -> Option<&GlyphData> {
        self.glyphs.get(glyph)
    }
}

impl GlyphStore for MemoryGlyphStore {
    fn glyph_for(&self, c: char) -> Option<GlyphId> {
        self.cmap.get(&c).cloned()
    }

    fn outline_of(&self, glyph: &GlyphId) -> Option<&Outline> {
        self.glyphs.get(glyph).map(|d| &d.outline)
    }

    fn advance_width_of(&self, glyph: &GlyphId) -> Option<u32> {
        self.glyphs.get(glyph).map(|d| d.advance_width)
    }

    fn insert(&mut self, glyph: GlyphId, outline: Outline, advance_width: u32) {
        self.glyphs.insert(glyph, GlyphData { outline, advance_width });
    }
}

/// The name records this system reads or edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NameKind {
    Family,
    Subfamily,
    FullName,
    PostScriptName,
}

impl NameKind {
    pub const ALL: [NameKind; 4] =
        [NameKind::Family, NameKind::Subfamily, NameKind::FullName, NameKind::PostScriptName];

    /// OpenType `name` table id.
    pub fn name_id(self) -> u16 {
        match self {
            NameKind::Family => 1,
            NameKind::Subfamily => 2,
            NameKind::FullName => 4,
            NameKind::PostScriptName => 6,
        }
    }

    pub fn from_name_id(id: u16) -> Option<Self> {
        NameKind::ALL.into_iter().find(|k| k.name_id() == id)
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NameKind::Family => "Family",
            NameKind::Subfamily => "Subfamily",
            NameKind::FullName => "Full",
            NameKind::PostScriptName => "PostScript",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTable {
    records: BTreeMap<NameKind, String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: NameKind) -> Option<&str> {
        self.records.get(&kind).map(String::as_str)
    }

    pub fn set(&mut self, kind: NameKind, value: impl Into<String>) {
        self.records.insert(kind, value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (NameKind, &str)> {
        self.records.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// A font resource held exclusively by whoever is editing it.
pub trait FontResource {
    type Glyphs: GlyphStore;

    fn load(path: &Path) -> Result<Self>
    where
        Self: Sized;
    fn glyph_store(&self) -> &Self::Glyphs;
    fn glyph_store_mut(&mut self) -> &mut Self::Glyphs;
    fn name_table(&self) -> &NameTable;
    fn name_table_mut(&mut self) -> &mut NameTable;
    fn install_rules(&mut self, rules: RuleSet);
    fn save(&self, path: &Path) -> Result<()>;
}

/// Summary of a font's identity, as printed by `fastfont info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FontInfo {
    pub family: Option<String>,
    pub subfamily: Option<String>,
    pub full_name: Option<String>,
    pub postscript_name: Option<String>,
    pub glyph_count: usize,
    pub rule_count: usize,
}

/// The crate's concrete font resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontDocument {
    pub units_per_em: u16,
    pub names: NameTable,
    pub glyphs: MemoryGlyphStore,
    pub rules: Option<RuleSet>,
}

impl FontDocument {
    pub fn new(units_per_em: u16) -> Self {
        Self { units_per_em, ..Self::default() }
    }

    pub fn info(&self) -> FontInfo {
        FontInfo {
            family: self.names.get(NameKind::Family).map(str::to_string),
            subfamily: self.names.get(NameKind::Subfamily).map(str::to_string),
            full_name: self.names.get(NameKind::FullName).map(str::to_string),
            postscript_name: self.names.get(NameKind::PostScriptName).map(str::to_string),
            glyph_count: self.glyphs.len(),
            rule_count: self.rules.as_ref().map_or(0, |r| r.rules.len()),
        }
    }
}

impl FontResource for FontDocument {
    type Glyphs = MemoryGlyphStore;

    /// Accepts a TrueType/OpenType binary or a saved document.
    fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        if import::is_font_binary(&data) {
            import::from_font_bytes(&data, &config::default_charset())
        } else {
            persistence::from_bytes(&data, path)
        }
    }

    fn glyph_store(&self) -> &MemoryGlyphStore {
        &self.glyphs
    }

    fn glyph_store_mut(&mut self) -> &mut MemoryGlyphStore {
        &mut self.glyphs
    }

    fn name_table(&self) -> &NameTable {
        &self.names
    }

    fn name_table_mut(&mut self) -> &mut NameTable {
        &mut self.names
    }

    fn install_rules(&mut self, rules: RuleSet) {
        self.rules = Some(rules);
    }

    fn save(&self, path: &Path) -> Result<()> {
        persistence::save_to_disk(self, path)
    }
}
