use crate::config::{output_path_in, FastFontConfig, DEFAULT_NAME_SUFFIX, DOTTED_NAME_SUFFIX};
use crate::core::compiler::RuleCompiler;
use crate::core::policy::TierPolicy;
use crate::core::synth::VariantSynthesizer;
use crate::core::types::{ClassPair, GlyphId, SynthesisReport};
use crate::error::Result;
use crate::font::{FontDocument, FontResource, GlyphStore};
use crate::naming;
use log::{debug, info, warn};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

/// The flavours of font a run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Emphasized word starts: glyphs, rules and the configured suffix.
    Fast,
    /// Name records only, suffixed ` Dotted`.
    Dotted,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Fast, Variant::Dotted];

    pub fn name_suffix<'a>(&self, config: &'a FastFontConfig) -> &'a str {
        match self {
            Variant::Fast => &config.name_suffix,
            Variant::Dotted => DOTTED_NAME_SUFFIX,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Fast => write!(f, "fast"),
            Variant::Dotted => write!(f, "dotted"),
        }
    }
}

/// What a pipeline run did to the font.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutcome {
    /// `None` when no emphasis source was supplied.
    pub report: Option<SynthesisReport>,
    pub rule_count: usize,
    pub statement_count: usize,
    pub names_updated: usize,
}

/// One file written by [`generate_variants`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedVariant {
    pub variant: Variant,
    pub path: PathBuf,
    pub outcome: PipelineOutcome,
}

// The pipeline owns the compiler and synthesizer; fonts are passed through it.
pub struct Pipeline {
    policy: TierPolicy,
    charset: BTreeSet<char>,
    name_suffix: String,
    emphasize: bool,
    compiler: RuleCompiler,
    synthesizer: VariantSynthesizer,
}

impl Pipeline {
    pub fn new(policy: TierPolicy, charset: BTreeSet<char>) -> Self {
        Self {
            policy,
            charset,
            name_suffix: DEFAULT_NAME_SUFFIX.to_string(),
            emphasize: true,
            compiler: RuleCompiler::new(),
            synthesizer: VariantSynthesizer::new(),
        }
    }

    pub fn from_config(config: &FastFontConfig) -> Result<Self> {
        Ok(Self {
            policy: config.policy()?,
            charset: config.charset(),
            name_suffix: config.name_suffix.clone(),
            emphasize: true,
            compiler: RuleCompiler::new(),
            synthesizer: VariantSynthesizer::with_tag(config.emphasis_tag.clone()),
        })
    }

    pub fn for_variant(config: &FastFontConfig, variant: Variant) -> Result<Self> {
        let pipeline = Self::from_config(config)?.with_name_suffix(variant.name_suffix(config));
        Ok(match variant {
            Variant::Fast => pipeline,
            Variant::Dotted => pipeline.names_only(),
        })
    }

    pub fn with_name_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.name_suffix = suffix.into();
        self
    }

    /// Skips glyphs and rules; only the name records change.
    pub fn names_only(mut self) -> Self {
        self.emphasize = false;
        self
    }

    /// Pairs each charset glyph with an emphasized glyph the font already has.
    fn existing_pairs<S: GlyphStore + ?Sized>(&self, store: &S) -> Vec<(GlyphId, GlyphId)> {
        let mut seen = HashSet::new();
        self.charset
            .iter()
            .filter_map(|&c| store.glyph_for(c))
            .filter(|base| seen.insert(base.clone()))
            .map(|base| {
                let emph = base.emphasized(self.synthesizer.tag());
                (base, emph)
            })
            .filter(|(_, emph)| store.contains(emph))
            .collect()
    }

    fn install_emphasis<F: FontResource>(
        &self,
        font: &mut F,
        emphasis: Option<&dyn GlyphStore>,
        outcome: &mut PipelineOutcome,
    ) -> Result<()> {
        self.policy.require_open_ended()?;

        let classes = match emphasis {
            Some(source) => {
                let synthesis = self.synthesizer.synthesize(font.glyph_store(), source, &self.charset);
                let classes = synthesis.class_pair()?;
                let store = font.glyph_store_mut();
                for variant in synthesis.variants {
                    store.insert(variant.emphasized_id, variant.outline, variant.advance_width);
                }
                outcome.report = Some(synthesis.report);
                classes
            }
            None => {
                let pairs = self.existing_pairs(font.glyph_store());
                if pairs.is_empty() {
                    warn!("no emphasis source and no emphasized glyphs, updating names only");
                    return Ok(());
                }
                info!("using {} emphasized glyphs already in the font", pairs.len());
                ClassPair::from_pairs("base", "emphasized", pairs)?
            }
        };

        let rules = self.compiler.compile_pair(&self.policy, classes);
        outcome.rule_count = rules.rules.len();
        outcome.statement_count = rules.statements().len();
        info!(
            "installing {} rules ({} statements) for {} glyph pairs",
            outcome.rule_count,
            outcome.statement_count,
            rules.classes.len()
        );
        font.install_rules(rules);
        Ok(())
    }

    /// Adds emphasized glyphs, installs the rules and renames the font.
    ///
    /// Without an emphasis source the font's own `<glyph>.<tag>` glyphs are
    /// used; if it has none, only the names change. A policy that does not
    /// cover every length, or an emphasis source sharing no characters with
    /// the font, is fatal. A names-only pipeline ignores the emphasis source.
    pub fn transform<F: FontResource>(
        &self,
        mut font: F,
        emphasis: Option<&dyn GlyphStore>,
    ) -> Result<(F, PipelineOutcome)> {
        let mut outcome = PipelineOutcome::default();
        if self.emphasize {
            self.install_emphasis(&mut font, emphasis, &mut outcome)?;
        } else {
            debug!("names-only run, leaving glyphs and rules untouched");
        }
        outcome.names_updated = naming::append_suffix(font.name_table_mut(), &self.name_suffix);
        Ok((font, outcome))
    }

    /// `transform`, then save to `output`. Save errors are returned as-is.
    pub fn run<F: FontResource>(
        &self,
        font: F,
        emphasis: Option<&dyn GlyphStore>,
        output: &Path,
    ) -> Result<PipelineOutcome> {
        let (font, outcome) = self.transform(font, emphasis)?;
        info!("saving to {}", output.display());
        font.save(output)?;
        Ok(outcome)
    }

    /// Loads both fonts from disk and runs the pipeline.
    pub fn run_files(&self, base: &Path, emphasis: Option<&Path>, output: &Path) -> Result<PipelineOutcome> {
        let (font, source) = load_fonts(base, emphasis)?;
        self.run(font, source.as_ref().map(|doc| &doc.glyphs as &dyn GlyphStore), output)
    }
}

fn load_fonts(base: &Path, emphasis: Option<&Path>) -> Result<(FontDocument, Option<FontDocument>)> {
    info!("loading {}", base.display());
    let font = FontDocument::load(base)?;
    let source = match emphasis {
        Some(path) => {
            info!("loading {}", path.display());
            Some(FontDocument::load(path)?)
        }
        None => None,
    };
    Ok((font, source))
}

/// Builds each requested variant of `base` into `output_dir` as
/// `<stem>_<suffix>.ffnt`. The fonts are read once; the first failure stops
/// the batch.
pub fn generate_variants(
    config: &FastFontConfig,
    base: &Path,
    emphasis: Option<&Path>,
    variants: &[Variant],
    output_dir: &Path,
) -> Result<Vec<GeneratedVariant>> {
    let (font, source) = load_fonts(base, emphasis)?;
    let source = source.as_ref().map(|doc| &doc.glyphs as &dyn GlyphStore);

    let mut generated = Vec::with_capacity(variants.len());
    for &variant in variants {
        info!("generating {} variant", variant);
        let pipeline = Pipeline::for_variant(config, variant)?;
        let path = output_path_in(output_dir, base, variant.name_suffix(config));
        let outcome = pipeline.run(font.clone(), source, &path)?;
        generated.push(GeneratedVariant { variant, path, outcome });
    }
    Ok(generated)
}
