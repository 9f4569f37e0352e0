use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use funge93::{Interpreter, InterpreterConfig, RunStats, Step};
use rayon::prelude::*;

#[derive(Parser)]
#[command(name = "funge93", about = "Interpreter for two-dimensional stack programs")]
struct Cli {
    /// Program files to run. Several files run in parallel.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Random seed for the `?` instruction.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop each program after this many instructions.
    #[arg(long)]
    max_steps: Option<u64>,

    /// Print instruction count, halt flag and wall time to stderr.
    #[arg(long)]
    stats: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = InterpreterConfig { seed: cli.seed };
    let max_steps = cli.max_steps.unwrap_or(u64::MAX);

    if let [path] = cli.files.as_slice() {
        return run_streaming(path, config, max_steps, cli.stats);
    }

    let results: Vec<_> = cli
        .files
        .par_iter()
        .map(|path| run_collected(path, config.clone(), max_steps))
        .collect();

    for (path, result) in cli.files.iter().zip(results) {
        let (output, stats, elapsed) = result?;
        println!("==> {} <==", path.display());
        println!("{output}");
        if cli.stats {
            report(path, stats, elapsed);
        }
    }
    Ok(())
}

fn read_program(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Run one program, writing each fragment to stdout as it is produced.
fn run_streaming(
    path: &Path,
    config: InterpreterConfig,
    max_steps: u64,
    stats: bool,
) -> anyhow::Result<()> {
    let text = read_program(path)?;
    let interp = Interpreter::with_config(config);
    let mut run = interp
        .run(&text)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let start = Instant::now();
    while run.instructions() < max_steps {
        match run.step() {
            Step::Continue => {}
            Step::Output(fragment) => {
                out.write_all(fragment.as_bytes())?;
                out.flush()?;
            }
            Step::Halted => break,
        }
    }
    let elapsed = start.elapsed();
    drop(run);
    writeln!(out)?;

    if stats {
        report(path, interp.stats(), elapsed);
    }
    Ok(())
}

fn run_collected(
    path: &Path,
    config: InterpreterConfig,
    max_steps: u64,
) -> anyhow::Result<(String, RunStats, Duration)> {
    let text = read_program(path)?;
    let interp = Interpreter::with_config(config);
    let start = Instant::now();
    let outcome = interp
        .run_bounded(&text, max_steps)
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok((outcome.output, outcome.stats, start.elapsed()))
}

fn report(path: &Path, stats: RunStats, elapsed: Duration) {
    let per_sec = stats.instructions as f64 / elapsed.as_secs_f64().max(f64::MIN_POSITIVE);
    eprintln!("Run results ({}):", path.display());
    eprintln!("  Instructions:      {}", stats.instructions);
    eprintln!("  Halted:            {}", stats.halted);
    eprintln!("  Elapsed:           {elapsed:.2?}");
    eprintln!("  Instructions/sec:  {per_sec:.0}");
}
