// src/core/synth.rs
use crate::core::types::{ClassPair, GlyphVariantRecord, SynthesisReport, DEFAULT_EMPHASIS_TAG};
use crate::error::Result;
use crate::font::{GlyphStore, MemoryGlyphStore};
use log::{debug, info, warn};
use std::collections::{BTreeSet, HashSet};

/// Result of one synthesis batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    /// Emphasized glyphs only, keyed by their derived ids.
    pub glyphs: MemoryGlyphStore,
    /// One record per synthesized glyph, in ascending character order.
    pub variants: Vec<GlyphVariantRecord>,
    pub report: SynthesisReport,
}

impl Synthesis {
    pub fn into_parts(self) -> (MemoryGlyphStore, SynthesisReport) {
        (self.glyphs, self.report)
    }

    /// Base class and emphasized class in synthesis order. A glyph shared by
    /// several characters is paired once.
    pub fn class_pair(&self) -> Result<ClassPair> {
        let mut seen = HashSet::new();
        ClassPair::from_pairs(
            "base",
            "emphasized",
            self.variants
                .iter()
                .filter(|v| seen.insert(v.base_id.clone()))
                .map(|v| (v.base_id.clone(), v.emphasized_id.clone())),
        )
    }
}

/// Derives emphasized glyphs from a second font (typically the bold cut).
pub struct VariantSynthesizer {
    tag: String,
}

impl VariantSynthesizer {
    pub fn new() -> Self {
        Self::with_tag(DEFAULT_EMPHASIS_TAG)
    }

    pub fn with_tag(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Copies the emphasis source's outline and advance for every character
    /// both stores map. Misses are recorded in the report, never raised.
    /// Neither source store is modified.
    pub fn synthesize<B, E>(&self, base: &B, emphasis: &E, charset: &BTreeSet<char>) -> Synthesis
    where
        B: GlyphStore + ?Sized,
        E: GlyphStore + ?Sized,
    {
        let mut glyphs = MemoryGlyphStore::new();
        let mut variants = Vec::new();
        let mut report = SynthesisReport::default();

        // BTreeSet iterates in ascending code point order.
        for &c in charset {
            report.attempted += 1;

            let (Some(base_id), Some(source_id)) = (base.glyph_for(c), emphasis.glyph_for(c)) else {
                debug!("{:?} is not mapped in both fonts", c);
                report.missing.push(c);
                continue;
            };
            let (Some(outline), Some(advance_width)) =
                (emphasis.outline_of(&source_id), emphasis.advance_width_of(&source_id))
            else {
                debug!("emphasis glyph '{}' for {:?} has no outline or metrics", source_id, c);
                report.missing.push(c);
                continue;
            };

            let emphasized_id = base_id.emphasized(&self.tag);
            glyphs.insert(emphasized_id.clone(), outline.clone(), advance_width);
            variants.push(GlyphVariantRecord {
                base_id,
                emphasized_id,
                outline: outline.clone(),
                advance_width,
            });
            report.succeeded += 1;
        }

        if report.is_empty_result() {
            warn!("no emphasized glyphs were produced from {} characters", report.attempted);
        } else if !report.is_complete() {
            warn!(
                "{} of {} characters had no emphasized counterpart: {:?}",
                report.missing.len(),
                report.attempted,
                report.missing
            );
        }
        info!("added {} emphasized glyph variants", report.succeeded);

        Synthesis { glyphs, variants, report }
    }
}

impl Default for VariantSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}
