// src/core/compiler.rs
use crate::core::policy::{Tier, TierPolicy};
use crate::core::types::{ClassPair, GlyphClass};
use crate::error::Result;
use log::debug;
use serde::{Deserialize, Serialize};

/// One tier's rule. A word whose first `window_size` glyphs are all letters
/// and which is *not* at least `exclusion_window` letters long gets glyphs
/// `[0, bold_count)` emphasized. `target_offset` is the last rewritten glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRule {
    pub window_size: u32,
    pub exclusion_window: Option<u32>,
    pub target_offset: u32,
    pub bold_count: u32,
}

impl ContextRule {
    fn for_tier(tier: &Tier) -> Self {
        Self {
            window_size: tier.min_len,
            exclusion_window: tier.max_len.map(|max| max + 1),
            target_offset: tier.bold_count - 1,
            bold_count: tier.bold_count,
        }
    }

    /// Exclusion first (if any), then the substitution.
    pub fn statements(&self) -> impl Iterator<Item = RuleStatement> {
        let ignore = self.exclusion_window.map(|window| RuleStatement::Ignore { window });
        let substitute = RuleStatement::Substitute {
            window: self.window_size,
            target_offset: self.target_offset,
            bold_count: self.bold_count,
        };
        ignore.into_iter().chain(std::iter::once(substitute))
    }

    /// Whether this rule rewrites a word of `len` letters.
    pub fn fires_for(&self, len: u32) -> bool {
        len >= self.window_size && self.exclusion_window.map_or(true, |x| len < x)
    }
}

/// A flat rule statement as handed to the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleStatement {
    /// A run of `window` letters here suppresses the following substitution.
    Ignore { window: u32 },
    /// A run of `window` letters here has its first `bold_count` glyphs emphasized.
    Substitute { window: u32, target_offset: u32, bold_count: u32 },
}

/// Compiled rules together with the classes they operate on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub classes: ClassPair,
    pub rules: Vec<ContextRule>,
}

impl RuleSet {
    pub fn statements(&self) -> Vec<RuleStatement> {
        self.rules.iter().flat_map(|r| r.statements()).collect()
    }

    /// Indices of every rule that fires for a word of `len` letters.
    pub fn firing_rules(&self, len: u32) -> Vec<usize> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, r)| r.fires_for(len))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Turns a tier policy into an ordered, mutually exclusive rule list.
pub struct RuleCompiler;

impl RuleCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Validates the class pairing, then compiles.
    pub fn compile(
        &self,
        policy: &TierPolicy,
        base: GlyphClass,
        emphasized: GlyphClass,
    ) -> Result<RuleSet> {
        let classes = ClassPair::new(base, emphasized)?;
        Ok(self.compile_pair(policy, classes))
    }

    /// Longest tier first. Each bounded tier's exclusion window equals the
    /// next longer tier's window, so at most one substitution matches a word.
    pub fn compile_pair(&self, policy: &TierPolicy, classes: ClassPair) -> RuleSet {
        let rules: Vec<ContextRule> = policy
            .tiers_longest_first()
            .map(ContextRule::for_tier)
            .inspect(|rule| debug!("compiled {:?}", rule))
            .collect();
        RuleSet { classes, rules }
    }
}

impl Default for RuleCompiler {
    fn default() -> Self {
        Self::new()
    }
}
