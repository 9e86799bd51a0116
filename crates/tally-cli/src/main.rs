//! Tally interpreter CLI.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::process;
use tally_cli::{exit_code, init_tracing, present, present_check, read_program, OutputFormat, BANNER};
use tally_eval::{Interpreter, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Tally - runs let/if programs over integer variables")]
#[command(version)]
struct Args {
    /// Read the program from a file instead of the interactive prompt
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Report problems anywhere in the program without running it
    #[arg(long)]
    check: bool,

    /// Deepest `if` nesting allowed
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Log interpreter activity to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Do not print the banner
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("tally: {e:#}");
            process::exit(2);
        }
    }
}

fn run(args: &Args) -> Result<i32> {
    let lines = match &args.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            read_program(BufReader::new(file), None)
                .with_context(|| format!("failed to read {}", path.display()))?
        }
        None => read_interactive(args.quiet)?,
    };

    let mut config = RunConfig::default();
    if let Some(depth) = args.max_depth {
        config = config.with_max_nesting_depth(depth);
    }
    let interpreter = Interpreter::new(config);
    tracing::debug!(lines = lines.len(), config = ?interpreter.config(), "program read");
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let mut stdout = io::stdout().lock();
    if args.check {
        let diagnostics = interpreter.check(&lines);
        writeln!(stdout, "{}", present_check(&diagnostics, format)?)?;
        return Ok(if diagnostics.has_errors() { 1 } else { 0 });
    }

    let outcome = interpreter.outcome(&lines);
    writeln!(stdout, "{}", present(&outcome, format)?)?;
    Ok(exit_code(&outcome))
}

fn read_interactive(quiet: bool) -> Result<Vec<String>> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = io::stdout();
    if interactive && !quiet {
        writeln!(stdout, "{BANNER}")?;
    }
    let prompt: Option<&mut dyn Write> = if interactive { Some(&mut stdout) } else { None };
    read_program(stdin.lock(), prompt).context("failed to read program from stdin")
}
