// File: src/core/context.rs
use crate::core::compiler::{RuleSet, RuleStatement};
use crate::core::types::GlyphId;

/// Executes a compiled rule set over a glyph stream the way a contextual
/// substitution engine does: only fixed-width windows are inspected, plus a
/// one-glyph look-behind that decides whether a position starts a word.
pub struct ContextEvaluator<'a> {
    rules: &'a RuleSet,
    statements: Vec<RuleStatement>,
}

impl<'a> ContextEvaluator<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules, statements: rules.statements() }
    }

    /// A base glyph not preceded by a letter.
    fn is_anchor(&self, glyphs: &[GlyphId], pos: usize) -> bool {
        let classes = &self.rules.classes;
        classes.is_base(&glyphs[pos]) && (pos == 0 || !classes.is_alphabet(&glyphs[pos - 1]))
    }

    fn window_matches(&self, glyphs: &[GlyphId], start: usize, window: u32) -> bool {
        let end = start + window as usize;
        end <= glyphs.len()
            && glyphs[start..end].iter().all(|g| self.rules.classes.is_alphabet(g))
    }

    /// Indices of the rules whose substitution fires at `pos`, each rule
    /// judged on its own window and exclusion window only.
    pub fn firing_at(&self, glyphs: &[GlyphId], pos: usize) -> Vec<usize> {
        if !self.is_anchor(glyphs, pos) {
            return Vec::new();
        }
        self.rules
            .rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| {
                self.window_matches(glyphs, pos, rule.window_size)
                    && !rule
                        .exclusion_window
                        .map_or(false, |x| self.window_matches(glyphs, pos, x))
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Statements are tried in order at each anchor; the first that matches
    /// decides. A matching `Ignore` leaves the position untouched.
    fn bold_count_at(&self, glyphs: &[GlyphId], pos: usize) -> Option<u32> {
        if !self.is_anchor(glyphs, pos) {
            return None;
        }
        for statement in &self.statements {
            match *statement {
                RuleStatement::Ignore { window } => {
                    if self.window_matches(glyphs, pos, window) {
                        return None;
                    }
                }
                RuleStatement::Substitute { window, bold_count, .. } => {
                    if self.window_matches(glyphs, pos, window) {
                        return Some(bold_count);
                    }
                }
            }
        }
        None
    }

    /// Runs the rules over `glyphs` and returns the rewritten stream.
    pub fn apply(&self, glyphs: &[GlyphId]) -> Vec<GlyphId> {
        let mut out = glyphs.to_vec();
        let mut pos = 0;
        while pos < glyphs.len() {
            match self.bold_count_at(glyphs, pos) {
                Some(count) => {
                    let end = (pos + count as usize).min(glyphs.len());
                    for slot in &mut out[pos..end] {
                        if let Some(emph) = self.rules.classes.counterpart(slot) {
                            *slot = emph.clone();
                        }
                    }
                    pos = end;
                }
                None => pos += 1,
            }
        }
        out
    }

    /// For each glyph, whether it ends up emphasized.
    pub fn emphasis_mask(&self, glyphs: &[GlyphId]) -> Vec<bool> {
        self.apply(glyphs)
            .iter()
            .map(|g| self.rules.classes.is_emphasized(g))
            .collect()
    }
}
