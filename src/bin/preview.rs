// Interactive preview of the emphasis rules.
// Run with: cargo run --bin fastfont_preview [config.json]
use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use fastfont_core::config::FastFontConfig;
use fastfont_core::core::context::ContextEvaluator;
use fastfont_core::core::types::GlyphId;
use fastfont_core::RuleCompiler;
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Glyph stand-in for every character outside the charset.
const OTHER: &str = ".other";

fn render_line(evaluator: &ContextEvaluator, line: &str, stdout: &mut io::Stdout) -> io::Result<()> {
    let chars: Vec<char> = line.chars().collect();
    let glyphs: Vec<GlyphId> = chars
        .iter()
        .map(|c| if c.is_whitespace() { GlyphId::new(OTHER) } else { GlyphId::new(c.to_string()) })
        .collect();
    let mask = evaluator.emphasis_mask(&glyphs);

    for (c, emphasized) in chars.iter().zip(mask) {
        if emphasized {
            queue!(stdout, PrintStyledContent(c.to_string().bold()))?;
        } else {
            queue!(stdout, Print(c))?;
        }
    }
    queue!(stdout, Print("\n"))?;
    stdout.flush()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match FastFontConfig::load_or_default(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let rules = match config
        .policy()
        .and_then(|policy| Ok(RuleCompiler::new().compile_pair(&policy, config.letter_classes()?)))
    {
        Ok(rules) => rules,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let evaluator = ContextEvaluator::new(&rules);

    info!("{} rules compiled. Type text, Ctrl-D to quit.", rules.rules.len());
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let result = line.and_then(|line| render_line(&evaluator, &line, &mut stdout));
        if let Err(e) = result {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
