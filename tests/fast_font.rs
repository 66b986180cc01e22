use fastfont_core::core::context::ContextEvaluator;
use fastfont_core::core::types::{GlyphClass, GlyphId, Outline, PathCommand};
use fastfont_core::font::{FontDocument, FontResource, GlyphStore, MemoryGlyphStore, NameKind};
use fastfont_core::config::FastFontConfig;
use fastfont_core::{
    fea, generate_variants, FastFontError, Pipeline, PolicyError, RuleCompiler, RuleStatement, Tier,
    TierPolicy, Variant, VariantSynthesizer,
};
use std::collections::BTreeSet;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn letters() -> BTreeSet<char> {
    ('a'..='z').chain('A'..='Z').collect()
}

fn lowercase_classes() -> (GlyphClass, GlyphClass) {
    let base: Vec<GlyphId> = ('a'..='z').map(|c| GlyphId::new(c.to_string())).collect();
    let emph = base.iter().map(|g| GlyphId::new(format!("{}'", g))).collect();
    (GlyphClass::new("az", base), GlyphClass::new("az'", emph))
}

fn glyph_store(chars: impl IntoIterator<Item = char>, width: u32) -> MemoryGlyphStore {
    let mut store = MemoryGlyphStore::new();
    for c in chars {
        let id = GlyphId::new(format!("uni{:04X}", c as u32));
        let x = (c as u32 % 7) as f32 * 10.0;
        store.map_char(c, id.clone());
        store.insert(
            id,
            Outline::new(vec![
                PathCommand::MoveTo([x, 0.0]),
                PathCommand::CurveTo([x, 300.0], [x + 200.0, 300.0], [x + 200.0, 0.0]),
                PathCommand::Close,
            ]),
            width,
        );
    }
    store
}

fn word(len: usize) -> Vec<GlyphId> {
    let mut glyphs = vec![GlyphId::from("space")];
    glyphs.extend((0..len).map(|i| GlyphId::new(((b'a' + (i % 26) as u8) as char).to_string())));
    glyphs.push(GlyphId::from("period"));
    glyphs
}

#[test]
fn end_to_end_rule_order() {
    let (base, emph) = lowercase_classes();
    let policy = TierPolicy::new(vec![Tier::new(1, 3, 1), Tier::new(4, 6, 2), Tier::open(7, 3)]).unwrap();
    let rules = RuleCompiler::new().compile(&policy, base, emph).unwrap();

    assert_eq!(
        rules.statements(),
        vec![
            RuleStatement::Substitute { window: 7, target_offset: 2, bold_count: 3 },
            RuleStatement::Ignore { window: 7 },
            RuleStatement::Substitute { window: 4, target_offset: 1, bold_count: 2 },
            RuleStatement::Ignore { window: 4 },
            RuleStatement::Substitute { window: 1, target_offset: 0, bold_count: 1 },
        ]
    );
}

#[test]
fn every_length_gets_exactly_one_rule() {
    let (base, emph) = lowercase_classes();
    let policy = TierPolicy::default();
    let rules = RuleCompiler::new().compile(&policy, base, emph).unwrap();
    let evaluator = ContextEvaluator::new(&rules);

    for len in 1..=30 {
        let glyphs = word(len);
        let fired: Vec<usize> = (0..glyphs.len())
            .flat_map(|pos| evaluator.firing_at(&glyphs, pos))
            .collect();
        assert_eq!(fired.len(), 1, "length {}", len);

        let out = evaluator.apply(&glyphs);
        let emphasized = out.iter().filter(|g| rules.classes.is_emphasized(g)).count();
        assert_eq!(emphasized as u32, policy.bold_count_for(len as u32).unwrap(), "length {}", len);
    }
}

#[test]
fn overlapping_policy_is_rejected_before_compiling() {
    let err = TierPolicy::new(vec![Tier::new(1, 5, 2), Tier::new(4, 8, 3)]).unwrap_err();
    assert!(matches!(err, PolicyError::BoldExceedsMinLen { .. } | PolicyError::Overlap { .. }));
}

#[test]
fn synthesis_tolerates_two_missing_letters() {
    init_logging();
    let base = glyph_store(letters(), 500);
    let bold = glyph_store(letters().into_iter().filter(|c| !matches!(c, 'j' | 'K')), 580);

    let synthesizer = VariantSynthesizer::new();
    let (store, report) = synthesizer.synthesize(&base, &bold, &letters()).into_parts();
    assert_eq!(report.attempted, 52);
    assert_eq!(report.succeeded, 50);
    assert_eq!(report.missing, vec!['K', 'j']);
    assert_eq!(store.advance_width_of(&GlyphId::from("uni0061.bold")), Some(580));

    let again = synthesizer.synthesize(&base, &bold, &letters());
    let ids: Vec<&GlyphId> = store.glyph_ids().collect();
    let ids_again: Vec<&GlyphId> = again.glyphs.glyph_ids().collect();
    assert_eq!(ids, ids_again);
    assert_eq!(store, again.glyphs);
}

#[test]
fn make_rename_and_export_a_font() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let regular_path = dir.path().join("Sample-Regular.ffnt");
    let bold_path = dir.path().join("Sample-Bold.ffnt");
    let output = dir.path().join("out").join("Sample_Fast.ffnt");

    let mut regular = FontDocument::new(1000);
    regular.names.set(NameKind::Family, "Sample");
    regular.names.set(NameKind::FullName, "Sample Regular");
    regular.names.set(NameKind::PostScriptName, "Sample-Regular");
    regular.glyphs = glyph_store(letters(), 500);
    regular.save(&regular_path).unwrap();

    let mut bold = FontDocument::new(1000);
    bold.glyphs = glyph_store(letters(), 600);
    bold.save(&bold_path).unwrap();

    let pipeline = Pipeline::new(TierPolicy::default(), letters());
    let outcome = pipeline.run_files(&regular_path, Some(&bold_path), &output).unwrap();
    assert_eq!(outcome.report.map(|r| r.succeeded), Some(52));
    assert_eq!(outcome.statement_count, 13);

    let made = FontDocument::load(&output).unwrap();
    assert_eq!(made.names.get(NameKind::FullName), Some("Sample Regular Fast"));
    assert_eq!(made.glyphs.len(), 104);
    let rules = made.rules.clone().unwrap();
    assert_eq!(rules.classes.len(), 52);

    let source = fea::render(&rules);
    assert!(source.contains("sub @base' lookup EMPHASIZE;"));
    assert_eq!(source.matches("ignore sub @base'").count(), 6);

    // Re-running on the output adds nothing new to the names.
    let (again, outcome) = pipeline
        .transform(made, Some(&bold.glyphs as &dyn GlyphStore))
        .unwrap();
    assert_eq!(outcome.names_updated, 0);
    assert_eq!(again.glyphs.len(), 104);
}

#[test]
fn save_errors_surface_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, b"x").unwrap();

    let mut font = FontDocument::new(1000);
    font.glyphs = glyph_store("ab".chars(), 500);
    let err = Pipeline::new(TierPolicy::default(), "ab".chars().collect())
        .run(font, None, &blocker.join("out.ffnt"))
        .unwrap_err();
    assert!(matches!(err, FastFontError::Io(_)));
}

#[test]
fn dotted_variant_skips_glyphs_the_font_already_has() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Sample.ffnt");

    let mut font = FontDocument::new(1000);
    font.names.set(NameKind::Family, "Sample");
    font.names.set(NameKind::FullName, "Sample Regular");
    font.glyphs = glyph_store(letters(), 500);
    font.glyphs.insert(GlyphId::from("uni0061.bold"), Outline::default(), 600);
    font.save(&input).unwrap();

    let out_dir = dir.path().join("fonts");
    let generated =
        generate_variants(&FastFontConfig::default(), &input, None, &[Variant::Dotted], &out_dir).unwrap();
    assert_eq!(generated.len(), 1);
    assert_eq!(generated[0].outcome.rule_count, 0);
    assert_eq!(generated[0].path, out_dir.join("Sample_Dotted.ffnt"));

    let dotted = FontDocument::load(&generated[0].path).unwrap();
    assert!(dotted.rules.is_none());
    assert_eq!(dotted.glyphs.len(), 53);
    assert_eq!(dotted.names.get(NameKind::FullName), Some("Sample Regular Dotted"));
}
