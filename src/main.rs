use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use dartfuzz::manifest::Manifest;
use dartfuzz::{GenConfig, Result, Seed, generate_program};

#[derive(Parser)]
#[command(name = "dartfuzz")]
#[command(about = "Generate a random, well-typed Dart program", version)]
struct Cli {
    /// Random seed; 0 picks a fresh one
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write the program to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write a JSON run manifest to this file
    #[arg(long)]
    manifest: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing if DARTFUZZ_LOG is set.
/// DARTFUZZ_LOG_STYLE=full adds timestamps and span open/close events.
fn init_tracing() {
    let Ok(filter) = EnvFilter::try_from_env("DARTFUZZ_LOG") else {
        return;
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr);
    if std::env::var("DARTFUZZ_LOG_STYLE").is_ok_and(|style| style == "full") {
        builder
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
            .init();
    } else {
        builder.without_time().init();
    }
}

fn run(cli: &Cli) -> Result<()> {
    let seed = Seed::resolve(cli.seed);
    let program = generate_program(seed, &GenConfig::default());

    match &cli.output {
        Some(path) => {
            let target = path.display().to_string();
            let file = File::create(path).map_err(|source| dartfuzz::Error::WriteProgram {
                target: target.clone(),
                source,
            })?;
            program.write_to(&mut BufWriter::new(file), &target)?;
        }
        None => program.write_to(&mut io::stdout().lock(), "stdout")?,
    }

    if let Some(path) = &cli.manifest {
        Manifest::new(&program, cli.output.as_deref()).write_to(path)?;
    }

    tracing::info!(
        %seed,
        bytes = program.text.len(),
        classes = program.summary.classes,
        functions = program.summary.functions,
        "generated program"
    );
    Ok(())
}
