//! rsecma: parse ECMAScript and TypeScript files.
//!
//! Usage:
//!   rsecma [options] <file>...
//!
//! Reports each file that fails to parse with a labelled source excerpt,
//! and can dump the token stream or the tree as JSON.

mod report;

use clap::{ArgAction, Parser as ClapParser};
use report::SyntaxDiagnostic;
use rsecma_ast::{Program, SourceType};
use rsecma_parser::ParseOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Deeply nested input recurses deeply; parse on a thread with room for it.
const PARSE_STACK_SIZE: usize = 64 * 1024 * 1024;

#[derive(ClapParser, Debug)]
#[command(name = "rsecma", version, about = "Parse ECMAScript and TypeScript source files")]
struct Cli {
    /// Files to parse.
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Parse as modules rather than scripts.
    #[arg(short, long)]
    module: bool,

    /// Accept TypeScript syntax. Implied for .ts, .mts and .cts files.
    #[arg(short, long)]
    typescript: bool,

    /// Print every token, trivia included.
    #[arg(long)]
    tokens: bool,

    /// Print the tree as JSON.
    #[arg(long)]
    ast: bool,

    /// Only report failures.
    #[arg(short, long)]
    quiet: bool,

    /// Nesting limit for statements, expressions, patterns and types.
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Parse options as JSON; flags given on the command line win.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = match base_options(&cli) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {}", message);
            return ExitCode::from(2);
        }
    };

    let worker = thread::Builder::new()
        .name("rsecma-parse".into())
        .stack_size(PARSE_STACK_SIZE)
        .spawn(move || run(&cli, options));
    match worker {
        Ok(handle) => handle.join().unwrap_or(ExitCode::from(101)),
        Err(err) => {
            eprintln!("error: failed to start parser thread: {}", err);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Options from `--config`, then the command-line flags.
fn base_options(cli: &Cli) -> Result<ParseOptions, String> {
    let mut options = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read config '{}': {}", path.display(), e))?;
            serde_json::from_str(&text)
                .map_err(|e| format!("invalid config '{}': {}", path.display(), e))?
        }
        None => ParseOptions::default(),
    };
    if cli.module {
        options = options.module();
    }
    if cli.typescript {
        options = options.with_typescript(true);
    }
    if let Some(depth) = cli.max_depth {
        options = options.with_max_depth(depth);
    }
    debug!(?options, "base options");
    Ok(options)
}

/// TypeScript extensions turn on the TypeScript layer and module goal.
fn options_for(path: &Path, base: ParseOptions) -> ParseOptions {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("ts" | "mts" | "cts") => base.with_typescript(true).with_source_type(SourceType::Module),
        Some("mjs") => base.with_source_type(SourceType::Module),
        _ => base,
    }
}

fn run(cli: &Cli, base: ParseOptions) -> ExitCode {
    let mut failures = 0usize;
    for path in &cli.files {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("error: cannot read '{}': {}", path.display(), err);
                failures += 1;
                continue;
            }
        };
        let options = options_for(path, base);
        let name = path.display().to_string();
        match rsecma_parser::parse(&text, &options) {
            Ok(program) => {
                info!(file = %name, statements = program.body.len(), "parsed");
                if !print_program(cli, &name, &program) {
                    failures += 1;
                }
            }
            Err(err) => {
                warn!(file = %name, error = %err, "parse failed");
                let diagnostic = SyntaxDiagnostic::new(&name, &text, &err);
                eprintln!("{:?}", miette::Report::new(diagnostic));
                failures += 1;
            }
        }
    }

    if failures > 0 {
        if !cli.quiet {
            let total = cli.files.len();
            eprintln!("{} of {} file{} failed.", failures, total, if total == 1 { "" } else { "s" });
        }
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Print whatever was asked for. False if the tree could not be serialized.
fn print_program(cli: &Cli, name: &str, program: &Program<'_>) -> bool {
    if cli.tokens {
        for (index, token) in program.tokens.tokens().iter().enumerate() {
            println!("{:>6} {:>4}:{:<4} {:?} {:?}", index, token.pos.line, token.pos.column, token.kind, token.raw);
        }
    }
    if cli.ast {
        match serde_json::to_string_pretty(program) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("error: cannot serialize the tree of '{}': {}", name, err);
                return false;
            }
        }
    }
    if !cli.quiet {
        println!(
            "{}: ok ({} statement{}, {} tokens)",
            name,
            program.body.len(),
            if program.body.len() == 1 { "" } else { "s" },
            program.tokens.len()
        );
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typescript_extensions_imply_options() {
        let base = ParseOptions::default();
        let ts = options_for(Path::new("a/b.mts"), base);
        assert!(ts.typescript && ts.is_module());
        let mjs = options_for(Path::new("x.mjs"), base);
        assert!(!mjs.typescript && mjs.is_module());
        assert_eq!(options_for(Path::new("x.js"), base), base);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["rsecma", "--module", "--max-depth", "12", "in.js"]);
        let options = base_options(&cli).unwrap();
        assert!(options.is_module());
        assert!(!options.typescript);
        assert_eq!(options.max_depth, 12);
    }
}
