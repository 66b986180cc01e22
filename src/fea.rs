// File: src/fea.rs
//! Export of a compiled rule set as OpenType feature file source.

use crate::core::compiler::{RuleSet, RuleStatement};
use crate::core::types::GlyphClass;
use std::fmt::{self, Write};

const LOOKUP_NAME: &str = "EMPHASIZE";

fn class_body(class: &GlyphClass) -> String {
    class
        .glyphs
        .iter()
        .map(|g| g.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn repeat(token: &str, count: u32) -> String {
    let mut out = String::new();
    for _ in 0..count {
        out.push_str(token);
        out.push(' ');
    }
    out
}

/// One line of feature syntax per statement.
pub fn statement_source(statement: &RuleStatement) -> String {
    match *statement {
        RuleStatement::Ignore { window } => {
            format!("ignore sub @base' {}", repeat("@all", window - 1)).trim_end().to_string() + ";"
        }
        RuleStatement::Substitute { window, bold_count, .. } => {
            let marked = repeat(&format!("@base' lookup {}", LOOKUP_NAME), bold_count);
            let lookahead = repeat("@all", window - bold_count);
            format!("sub {}{}", marked, lookahead).trim_end().to_string() + ";"
        }
    }
}

fn render_into(out: &mut String, rules: &RuleSet) -> fmt::Result {
    writeln!(out, "@base = [{}];", class_body(rules.classes.base()))?;
    writeln!(out, "@emph = [{}];", class_body(rules.classes.emphasized()))?;
    writeln!(out, "@all = [@base @emph];")?;
    writeln!(out)?;
    writeln!(out, "lookup {} {{", LOOKUP_NAME)?;
    writeln!(out, "    sub @base by @emph;")?;
    writeln!(out, "}} {};", LOOKUP_NAME)?;
    writeln!(out)?;
    writeln!(out, "feature calt {{")?;
    writeln!(out, "    ignore sub @all @base';")?;
    for rule in &rules.rules {
        writeln!(out, "    # words of {}+ glyphs, {} emphasized", rule.window_size, rule.bold_count)?;
        for statement in rule.statements() {
            writeln!(out, "    {}", statement_source(&statement))?;
        }
    }
    writeln!(out, "}} calt;")
}

/// Renders the single-substitution lookup and the `calt` feature. Statements
/// keep the compiled order; a leading guard keeps rules to word starts.
pub fn render(rules: &RuleSet) -> String {
    let mut out = String::new();
    render_into(&mut out, rules).expect("writing to a String cannot fail");
    out
}
