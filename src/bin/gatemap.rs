//! Gatemap CLI: parse generated text into a graph and replay gated sessions.
//!
//! Usage:
//!   gatemap parse <file|-> --center <label> [--format json|mermaid|radial]
//!   gatemap session <file|-> --center <label> [--unlock <level>]...
//!   gatemap grammar show [preset] | gatemap grammar check <path>

use clap::{Parser, Subcommand, ValueEnum};
use gatemap::{
    mermaid, parse_document, AnalysisSession, DetailView, Grammar, Layout, UnlockOutcome,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gatemap",
    version,
    about = "Generated text to knowledge graph, with gated detail"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Grammar file (YAML)
    #[arg(long, global = true)]
    grammar: Option<PathBuf>,
    /// Built-in grammar: causal or tiered
    #[arg(long, global = true, conflicts_with = "grammar")]
    preset: Option<String>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Mermaid,
    Radial,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse raw text and print the graph
    Parse {
        /// File with generated text, or - for stdin
        input: PathBuf,
        /// Label of the center node (the queried concept)
        #[arg(long)]
        center: String,
        #[arg(long, value_enum, default_value = "json")]
        format: Format,
    },
    /// Run a scan from a file, apply unlock requests, print visible detail
    Session {
        /// File with generated text, or - for stdin
        input: PathBuf,
        #[arg(long)]
        center: String,
        /// Level to unlock, in order (repeatable)
        #[arg(long)]
        unlock: Vec<String>,
        /// Justification recorded with each unlock
        #[arg(long, default_value = "")]
        because: String,
    },
    /// Inspect grammars
    Grammar {
        #[command(subcommand)]
        action: GrammarAction,
    },
}

#[derive(Subcommand)]
enum GrammarAction {
    /// Print a built-in grammar as YAML
    Show {
        #[arg(default_value = "causal")]
        preset: String,
    },
    /// Validate a grammar file
    Check { path: PathBuf },
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Default grammar location (~/.config/gatemap/grammar.yaml)
fn default_grammar_path() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("gatemap").join("grammar.yaml");
    path.exists().then_some(path)
}

fn resolve_grammar(path: Option<&Path>, preset: Option<&str>) -> Result<Grammar, String> {
    if let Some(path) = path {
        return Grammar::load(path).map_err(|e| e.to_string());
    }
    if let Some(name) = preset {
        return Grammar::preset(name).ok_or_else(|| format!("unknown preset '{}'", name));
    }
    match default_grammar_path() {
        Some(path) => Grammar::load(&path).map_err(|e| e.to_string()),
        None => Ok(Grammar::causal()),
    }
}

fn read_input(input: &Path) -> Result<String, String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("cannot read stdin: {}", e))?;
        return Ok(text);
    }
    std::fs::read_to_string(input).map_err(|e| format!("cannot read '{}': {}", input.display(), e))
}

fn cmd_parse(grammar: &Grammar, input: &Path, center: &str, format: Format) -> Result<(), String> {
    let text = read_input(input)?;
    let doc = parse_document(&text, center.trim(), grammar).map_err(|e| e.to_string())?;
    for skipped in &doc.report.skipped {
        eprintln!(
            "Skipped {} line {}: {}",
            skipped.section, skipped.line, skipped.reason
        );
    }
    match format {
        Format::Json => {
            let json = serde_json::to_string_pretty(&doc.graph).map_err(|e| e.to_string())?;
            println!("{}", json);
        }
        Format::Mermaid => print!("{}", mermaid(&doc.graph, Layout::Hierarchical)),
        Format::Radial => print!("{}", mermaid(&doc.graph, Layout::Radial)),
    }
    Ok(())
}

fn cmd_session(
    grammar: Grammar,
    input: &Path,
    center: &str,
    unlock: &[String],
    because: &str,
) -> Result<(), String> {
    let text = read_input(input)?;
    let mut session = AnalysisSession::new(grammar).map_err(|e| e.to_string())?;
    if let Err(e) = session.submit_scan(center, &text) {
        eprintln!("--- raw text ---\n{}", text);
        return Err(e.to_string());
    }

    for level in unlock {
        match session.request_unlock(level, because) {
            UnlockOutcome::Unlocked { level } => println!("Unlocked {}", level),
            UnlockOutcome::AlreadyUnlocked => println!("{} already unlocked", level),
            UnlockOutcome::NotEligible { prerequisite } => {
                println!("{} needs {} first", level, prerequisite)
            }
            UnlockOutcome::UnknownLevel => eprintln!("Warning: unknown level '{}'", level),
        }
    }

    for view in session.levels() {
        match view.view {
            DetailView::Unlocked { text } => {
                println!("\n[{}]\n{}", view.level, text.unwrap_or("(no detail)"));
            }
            DetailView::Locked { question } => {
                println!("\n[{}] locked", view.level);
                if let Some(question) = question {
                    println!("  {}", question);
                }
            }
        }
    }
    Ok(())
}

fn cmd_grammar(action: GrammarAction) -> Result<(), String> {
    match action {
        GrammarAction::Show { preset } => {
            let grammar =
                Grammar::preset(&preset).ok_or_else(|| format!("unknown preset '{}'", preset))?;
            print!("{}", grammar.to_yaml().map_err(|e| e.to_string())?);
        }
        GrammarAction::Check { path } => {
            let grammar = Grammar::load(&path).map_err(|e| e.to_string())?;
            println!(
                "{}: ok ({} sections, {} categories, {} levels)",
                path.display(),
                grammar.sections.len(),
                grammar.categories.len(),
                grammar.levels.len()
            );
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let grammar = || resolve_grammar(cli.grammar.as_deref(), cli.preset.as_deref());
    let result = match cli.command {
        Commands::Grammar { action } => cmd_grammar(action),
        Commands::Parse {
            input,
            center,
            format,
        } => grammar().and_then(|g| cmd_parse(&g, &input, &center, format)),
        Commands::Session {
            input,
            center,
            unlock,
            because,
        } => grammar().and_then(|g| cmd_session(g, &input, &center, &unlock, &because)),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
