// src/core/types.rs
use crate::error::{FastFontError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Tag appended to a base glyph name to name its emphasized variant.
pub const DEFAULT_EMPHASIS_TAG: &str = "bold";

/// Identifier of a glyph inside a font resource. Glyph names are used
/// directly, so `a` and `a.bold` are both valid ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GlyphId(String);

impl GlyphId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id of this glyph's emphasized variant, e.g. `a` -> `a.bold`.
    /// Pure function of `self` and `tag`, so repeated runs agree.
    pub fn emphasized(&self, tag: &str) -> GlyphId {
        GlyphId(format!("{}.{}", self.0, tag))
    }
}

impl fmt::Display for GlyphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GlyphId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A named, ordered set of glyphs matched as one unit by the layout rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphClass {
    pub name: String,
    pub glyphs: Vec<GlyphId>,
}

impl GlyphClass {
    pub fn new(name: impl Into<String>, glyphs: Vec<GlyphId>) -> Self {
        Self { name: name.into(), glyphs }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn contains(&self, glyph: &GlyphId) -> bool {
        self.glyphs.contains(glyph)
    }
}

/// Base alphabet and emphasized alphabet, paired position by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClassPair")]
pub struct ClassPair {
    base: GlyphClass,
    emphasized: GlyphClass,
    #[serde(skip)]
    lookup: HashMap<GlyphId, usize>,
    #[serde(skip)]
    emphasized_set: HashSet<GlyphId>,
}

#[derive(Deserialize)]
struct RawClassPair {
    base: GlyphClass,
    emphasized: GlyphClass,
}

impl TryFrom<RawClassPair> for ClassPair {
    type Error = FastFontError;

    fn try_from(raw: RawClassPair) -> Result<Self> {
        ClassPair::new(raw.base, raw.emphasized)
    }
}

impl ClassPair {
    /// Validates the pairing: equal non-zero cardinality, no duplicates and
    /// no glyph in both classes.
    pub fn new(base: GlyphClass, emphasized: GlyphClass) -> Result<Self> {
        let mismatch = |detail: String| FastFontError::ConfigMismatch {
            base: base.name.clone(),
            emphasized: emphasized.name.clone(),
            detail,
        };

        if base.len() != emphasized.len() {
            return Err(mismatch(format!(
                "{} base glyphs against {} emphasized glyphs",
                base.len(),
                emphasized.len()
            )));
        }
        if base.is_empty() {
            return Err(mismatch("both classes are empty".to_string()));
        }

        let mut lookup = HashMap::with_capacity(base.len());
        for (i, glyph) in base.glyphs.iter().enumerate() {
            if lookup.insert(glyph.clone(), i).is_some() {
                return Err(mismatch(format!("base glyph '{}' listed twice", glyph)));
            }
        }
        let mut emphasized_set = HashSet::with_capacity(emphasized.len());
        for glyph in &emphasized.glyphs {
            if lookup.contains_key(glyph) {
                return Err(mismatch(format!("glyph '{}' is in both classes", glyph)));
            }
            if !emphasized_set.insert(glyph.clone()) {
                return Err(mismatch(format!("emphasized glyph '{}' listed twice", glyph)));
            }
        }

        Ok(Self { base, emphasized, lookup, emphasized_set })
    }

    /// Builds a pair from explicit `(base, emphasized)` tuples.
    pub fn from_pairs(
        base_name: &str,
        emphasized_name: &str,
        pairs: impl IntoIterator<Item = (GlyphId, GlyphId)>,
    ) -> Result<Self> {
        let (base, emphasized): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self::new(
            GlyphClass::new(base_name, base),
            GlyphClass::new(emphasized_name, emphasized),
        )
    }

    pub fn base(&self) -> &GlyphClass {
        &self.base
    }

    pub fn emphasized(&self) -> &GlyphClass {
        &self.emphasized
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn is_base(&self, glyph: &GlyphId) -> bool {
        self.lookup.contains_key(glyph)
    }

    pub fn is_emphasized(&self, glyph: &GlyphId) -> bool {
        self.emphasized_set.contains(glyph)
    }

    /// Membership in the union of both classes (`@all` in rule text).
    pub fn is_alphabet(&self, glyph: &GlyphId) -> bool {
        self.is_base(glyph) || self.is_emphasized(glyph)
    }

    /// The emphasized counterpart of a base glyph.
    pub fn counterpart(&self, glyph: &GlyphId) -> Option<&GlyphId> {
        self.lookup.get(glyph).map(|&i| &self.emphasized.glyphs[i])
    }
}

/// A point in font units.
pub type Point = [f32; 2];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CurveTo(Point, Point, Point),
    Close,
}

/// Glyph outline as a flat list of path commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub commands: Vec<PathCommand>,
}

impl Outline {
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// One synthesized emphasized glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphVariantRecord {
    pub base_id: GlyphId,
    pub emphasized_id: GlyphId,
    pub outline: Outline,
    pub advance_width: u32,
}

/// Outcome of one synthesis batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisReport {
    pub attempted: usize,
    pub succeeded: usize,
    /// Characters that could not be synthesized, in ascending code point order.
    pub missing: Vec<char>,
}

impl SynthesisReport {
    /// Something was attempted but nothing came out. Callers must surface
    /// this, the batch itself still succeeded.
    pub fn is_empty_result(&self) -> bool {
        self.attempted > 0 && self.succeeded == 0
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}
