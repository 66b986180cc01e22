// File: src/config.rs

//! Run configuration, read from a JSON file.
//!
//! Every field has a default, so `{}` is a valid configuration that
//! reproduces the stock fast-reading font: the built-in tier table, the
//! ASCII letters and the ` Fast` name suffix.

use crate::core::policy::{Tier, TierPolicy, DEFAULT_TIERS};
use crate::core::types::{ClassPair, GlyphId, DEFAULT_EMPHASIS_TAG};
use crate::error::Result;
use crate::persistence::DOCUMENT_EXTENSION;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub const DEFAULT_NAME_SUFFIX: &str = "Fast";
/// Suffix of the name-only variant.
pub const DOTTED_NAME_SUFFIX: &str = "Dotted";
/// Where `generate` writes when no output directory is given.
pub const DEFAULT_OUTPUT_DIR: &str = "fonts";

/// `a-z` then `A-Z`.
pub fn default_charset() -> BTreeSet<char> {
    ('a'..='z').chain('A'..='Z').collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FastFontConfig {
    /// Validated when the policy is built, not when the file is parsed, so
    /// the error names the offending tier.
    pub tiers: Vec<Tier>,
    /// Characters that get emphasized variants.
    pub charset: String,
    pub name_suffix: String,
    pub emphasis_tag: String,
}

impl Default for FastFontConfig {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_TIERS.to_vec(),
            charset: default_charset().into_iter().collect(),
            name_suffix: DEFAULT_NAME_SUFFIX.to_string(),
            emphasis_tag: DEFAULT_EMPHASIS_TAG.to_string(),
        }
    }
}

impl FastFontConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Loads `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn policy(&self) -> Result<TierPolicy> {
        Ok(TierPolicy::new(self.tiers.clone())?)
    }

    pub fn charset(&self) -> BTreeSet<char> {
        self.charset.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Classes for fonts whose letter glyphs are named after the letters
    /// themselves (`a`, `B`), paired with `<letter>.<tag>`.
    pub fn letter_classes(&self) -> Result<ClassPair> {
        ClassPair::from_pairs(
            "base",
            "emphasized",
            self.charset().into_iter().map(|c| {
                let base = GlyphId::new(c.to_string());
                let emphasized = base.emphasized(&self.emphasis_tag);
                (base, emphasized)
            }),
        )
    }
}

fn output_file_name(input: &Path, suffix: &str) -> String {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("font");
    format!("{}_{}.{}", stem, suffix, DOCUMENT_EXTENSION)
}

/// `<stem>_<suffix>.ffnt` next to the input.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    input.with_file_name(output_file_name(input, suffix))
}

/// `<stem>_<suffix>.ffnt` inside `dir`.
pub fn output_path_in(dir: &Path, input: &Path, suffix: &str) -> PathBuf {
    dir.join(output_file_name(input, suffix))
}
