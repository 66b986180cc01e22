// File: src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// A malformed tier table. Tier indices refer to the policy after it has been
/// sorted by ascending `min_len`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("tier policy is empty")]
    Empty,

    #[error("tier {tier} starts at length {min_len}, the first tier must start at 1")]
    DoesNotStartAtOne { tier: usize, min_len: u32 },

    #[error("tier {tier} has an inverted range {min_len}-{max_len}")]
    InvertedRange { tier: usize, min_len: u32, max_len: u32 },

    #[error("tier {tier} ends at {max_len}, use an open-ended tier for unbounded lengths")]
    MaxLenTooLarge { tier: usize, max_len: u32 },

    #[error("tier {tier} starts at {min_len} but the previous tier ends at {previous_max}, lengths in between are not covered")]
    Gap { tier: usize, min_len: u32, previous_max: u32 },

    #[error("tier {tier} starts at {min_len} which overlaps the previous tier ending at {previous_max}")]
    Overlap { tier: usize, min_len: u32, previous_max: u32 },

    #[error("tier {tier} is open-ended but is followed by another tier")]
    UnboundedNotLast { tier: usize },

    #[error("tier {tier} has a bold count of zero")]
    ZeroBold { tier: usize },

    #[error("tier {tier} bolds {bold_count} glyphs but applies to words as short as {min_len}")]
    BoldExceedsMinLen { tier: usize, bold_count: u32, min_len: u32 },

    #[error("no tier covers words of length {len} (policy ends at {covered_up_to})")]
    Uncovered { len: u32, covered_up_to: u32 },
}

#[derive(Error, Debug)]
pub enum FastFontError {
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error("Glyph classes '{base}' and '{emphasized}' cannot be paired: {detail}")]
    ConfigMismatch {
        base: String,
        emphasized: String,
        detail: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse font: {0}")]
    FontParse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("{0} is neither a font binary nor a saved font document")]
    NotAFontDocument(PathBuf),
}

pub type Result<T> = std::result::Result<T, FastFontError>;
