use std::{path::PathBuf, process::ExitCode};

use clap::Parser as ClapParser;
use kbcore::prelude::*;
use log::{error, info, warn};

mod input;
mod logger;

use input::{CliError, DerivationFile};
use logger::TermLogger;

/// Replays theorem derivations into a knowledge base and prints the proofs found.
#[derive(ClapParser)]
#[command(version)]
pub struct Arguments {
    /// Path to the derivation file (TOML, `[[derivation]]` tables)
    input: PathBuf,

    /// Knowledge base configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Theorem whose proof should be printed (repeatable)
    #[arg(short, long = "theorem")]
    theorems: Vec<String>,

    /// Also list every derivation attempt of the printed theorems
    #[arg(long)]
    attempts: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Arguments) -> Result<(), CliError> {
    let create_info = match &args.config {
        Some(path) => KnowledgeBaseCreateInfo::from_path(path)?,
        None => KnowledgeBaseCreateInfo::default(),
    };
    let mut kb = KnowledgeBase::with_create_info(create_info);
    kb.subscribe(|theorem: &String| info!("Proven: {}", theorem));

    let file = DerivationFile::load(&args.input)?;
    info!(
        "Replaying {} derivations from {}",
        file.derivations.len(),
        args.input.display()
    );
    file.replay(&mut kb)?;
    info!("{}", kb.stats());

    let mut unproven: Vec<&String> = kb.unproven_theorems().collect();
    unproven.sort();
    if !unproven.is_empty() {
        warn!(
            "{} theorems remain unproven: {}",
            unproven.len(),
            unproven
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    for theorem in &args.theorems {
        match ProofGraph::build(&kb, theorem) {
            Ok(graph) => {
                println!("Proof of {} ({} steps):", theorem, graph.len());
                print!("{}", graph.render());
            }
            Err(e) if e.is_not_proven() => println!("{} is not proven", theorem),
            Err(e) => return Err(e.into()),
        }

        if args.attempts {
            for attempt in kb.get_derivation_attempts(theorem) {
                let mut proven: Vec<&String> = attempt.proven_assumptions().iter().collect();
                let mut pending: Vec<&String> = attempt.pending_assumptions().iter().collect();
                proven.sort();
                pending.sort();
                println!(
                    "  attempt {} [{}]: proven {:?}, pending {:?}",
                    attempt.id(),
                    attempt.data(),
                    proven,
                    pending
                );
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Arguments::parse();
    if let Err(e) = TermLogger::install(args.verbose) {
        eprintln!("Failed to install logger: {}", e);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
