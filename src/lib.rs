// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod fea;
pub mod font;
pub mod import;
pub mod naming;
pub mod persistence;

pub use crate::core::compiler::{ContextRule, RuleCompiler, RuleSet, RuleStatement};
pub use crate::core::engine::{generate_variants, GeneratedVariant, Pipeline, PipelineOutcome, Variant};
pub use crate::core::policy::{Tier, TierPolicy};
pub use crate::core::synth::VariantSynthesizer;
pub use crate::error::{FastFontError, PolicyError, Result};
pub use crate::font::{FontDocument, FontResource, GlyphStore};
