use clap::{Parser, Subcommand};
use fastfont_core::config::{default_output_path, FastFontConfig, DEFAULT_OUTPUT_DIR};
use fastfont_core::font::{FontDocument, FontResource};
use fastfont_core::persistence::DOCUMENT_EXTENSION;
use fastfont_core::{fea, generate_variants, naming, Pipeline, RuleCompiler, Variant};
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fastfont")]
#[command(about = "Create speed reading fonts that emphasize the start of every word")]
#[command(version)]
struct Cli {
    /// JSON configuration file (tiers, charset, name suffix, emphasis tag)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a fast font from a regular font and, optionally, its bold cut
    Make {
        /// Regular font (.ttf, .otf or a saved document)
        regular: PathBuf,

        /// Bold font supplying the emphasized glyphs
        #[arg(short, long)]
        bold: Option<PathBuf>,

        /// Output file (default: adds the name suffix to the input name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build several variants of one font into a directory
    Generate {
        /// Base font (.ttf, .otf or a saved document)
        font: PathBuf,

        /// Bold font supplying the emphasized glyphs of the fast variant
        #[arg(short, long)]
        bold: Option<PathBuf>,

        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Fast reading variant (emphasized word starts)
        #[arg(long)]
        fast: bool,

        /// Dotted variant (names only)
        #[arg(long)]
        dotted: bool,

        /// Every variant
        #[arg(long)]
        all: bool,
    },

    /// Rename the font family, full and PostScript names
    Rename {
        font: PathBuf,
        new_name: String,

        /// Output file (default: the input with a .ffnt extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the font's names and contents
    Info {
        font: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the feature file for the configured tiers
    Features {
        /// Take the classes from this font's installed rules instead
        #[arg(short, long)]
        font: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> fastfont_core::Result<()> {
    let config = FastFontConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Make { regular, bold, output } => {
            let output = output.unwrap_or_else(|| default_output_path(&regular, &config.name_suffix));
            let pipeline = Pipeline::from_config(&config)?;
            let outcome = pipeline.run_files(&regular, bold.as_deref(), &output)?;
            if let Some(report) = &outcome.report {
                if report.is_empty_result() {
                    warn!("No bold glyphs were added");
                }
            }
            info!(
                "Fast font written to {} ({} rules, {} name records updated)",
                output.display(),
                outcome.rule_count,
                outcome.names_updated
            );
        }
        Commands::Generate { font, bold, output_dir, fast, dotted, all } => {
            let variants: Vec<Variant> = Variant::ALL
                .into_iter()
                .filter(|v| all || matches!(v, Variant::Fast if fast) || matches!(v, Variant::Dotted if dotted))
                .collect();
            if variants.is_empty() {
                warn!("No variants specified, pass --fast, --dotted or --all");
                return Ok(());
            }
            for generated in generate_variants(&config, &font, bold.as_deref(), &variants, &output_dir)? {
                info!("Generated {} variant: {}", generated.variant, generated.path.display());
            }
        }
        Commands::Rename { font, new_name, output } => {
            let mut document = FontDocument::load(&font)?;
            let updated = naming::rename_family(document.name_table_mut(), &new_name);
            info!("Updated {} name records", updated);
            let output = output.unwrap_or_else(|| font.with_extension(DOCUMENT_EXTENSION));
            document.save(&output)?;
            info!("Saved to {}", output.display());
        }
        Commands::Info { font, json } => {
            let document = FontDocument::load(&font)?;
            let info = document.info();
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Font information for {}:", font.display());
                for (kind, value) in document.names.iter() {
                    println!("  {}: {}", kind, value);
                }
                println!("  Glyphs: {}", info.glyph_count);
                println!("  Rules: {}", info.rule_count);
            }
        }
        Commands::Features { font } => {
            let rules = match font {
                Some(path) => FontDocument::load(&path)?.rules,
                None => Some(RuleCompiler::new().compile_pair(&config.policy()?, config.letter_classes()?)),
            };
            match rules {
                Some(rules) => print!("{}", fea::render(&rules)),
                None => warn!("The font has no installed rules"),
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
