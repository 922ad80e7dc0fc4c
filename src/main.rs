//! asmfinder: report which lines of an assembly listing use which instructions.

use anyhow::{anyhow, bail, Context, Result};
use asmfinder::{
    config::Config,
    definition::{format_definitions, parse_definition, read_definitions},
    instruction::Instruction,
    policy::MatchPolicy,
    report::{export_results, summarize, ExportOrder},
    scanner::Scanner,
};
use clap::{ArgAction, Parser};
use std::{fs, fs::File, io::BufReader, path::PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "asmfinder",
    version,
    about = "Find the lines of an assembly listing that use a given set of instructions",
    long_about = r#"
Find the lines of an assembly listing that use a given set of instructions

Each line is credited to the first instruction, in the order given, whose name
appears on it in isolation. Instruction definitions are read from files in
NAME,DESCRIPTION format (one per line) and from --add arguments.

Examples:
  asmfinder prog.asm -d x86.txt
  asmfinder prog.asm -a MOV,"move data" -a ADD,add --policy substring
  asmfinder prog.asm -d x86.txt -o results.txt --order instruction
"#
)]
struct Args {
    /// Assembly source file to scan
    source: PathBuf,

    /// Instruction definition file (NAME,DESCRIPTION per line)
    #[arg(short, long = "definitions", value_name = "FILE")]
    definitions: Vec<PathBuf>,

    /// Add a single instruction as NAME,DESCRIPTION
    #[arg(short, long = "add", value_name = "NAME,DESCRIPTION")]
    add: Vec<String>,

    /// Matching policy: token-equality or substring-isolation
    #[arg(long)]
    policy: Option<MatchPolicy>,

    /// Result order: line-number or instruction
    #[arg(long)]
    order: Option<ExportOrder>,

    /// TOML config file providing policy and order defaults
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Save the matched lines here instead of printing them
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write the combined instruction list in NAME,DESCRIPTION format
    #[arg(long, value_name = "FILE")]
    export_definitions: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn load_instructions(args: &Args) -> Result<Vec<Instruction>> {
    let mut instructions = Vec::new();

    for path in &args.definitions {
        let definitions = read_definitions(path)
            .with_context(|| format!("Failed to read definitions from {}", path.display()))?;
        instructions.extend(definitions.instructions);
    }

    for value in &args.add {
        let instruction = parse_definition(value)
            .ok_or_else(|| anyhow!("--add expects NAME,DESCRIPTION, got '{}'", value))?
            .with_context(|| format!("Invalid instruction '{}'", value))?;
        instructions.push(instruction);
    }

    Ok(instructions)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(policy) = args.policy {
        config.policy = policy;
    }
    if let Some(order) = args.order {
        config.order = order;
    }

    let instructions = load_instructions(&args)?;
    if instructions.is_empty() {
        bail!("No instructions to search for; use --definitions or --add");
    }

    if let Some(path) = &args.export_definitions {
        fs::write(path, format_definitions(&instructions))
            .with_context(|| format!("Failed to write definitions to {}", path.display()))?;
    }

    let source = File::open(&args.source)
        .with_context(|| format!("Failed to open {}", args.source.display()))?;
    let report = Scanner::new(config.policy)
        .scan_reader(BufReader::new(source), &instructions)
        .with_context(|| format!("Failed to scan {}", args.source.display()))?;

    print!("{}", summarize(&report));

    let results = export_results(&report, config.order);
    match &args.output {
        Some(path) => {
            fs::write(path, results)
                .with_context(|| format!("Failed to write results to {}", path.display()))?;
            tracing::info!(path = %path.display(), hits = report.hits().len(), "saved results");
        }
        None => {
            println!();
            print!("{}", results);
        }
    }

    Ok(())
}
