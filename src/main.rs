use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use polemig::batch::{self, BatchOptions, BatchSummary, FileOutcome};
use polemig_core::config::Config;

#[derive(Parser)]
#[command(name = "polemig", about = "Migrate pole/line design exports to the version 10 schema")]
struct Cli {
    /// Input documents. Anything without a .json extension is skipped.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Write outputs here instead of next to each input.
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Extra config file layered over the built-in defaults.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print every change applied to each file.
    #[arg(long)]
    changes: bool,

    /// Migrate and report without writing any output.
    #[arg(long)]
    dry_run: bool,

    /// Files processed at once (defaults to the number of cores).
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Log at debug level on stderr (RUST_LOG overrides the level).
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let fallback = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(!cli.debug)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .init();
    tracing::debug!("polemig debug logging enabled");

    let config = Config::load(cli.config.as_deref())?;
    let defaults = Arc::new(config.engine_defaults());
    let options = Arc::new(BatchOptions {
        out_dir: cli.out_dir,
        prefix: config.output.prefix.clone(),
        pretty: config.output.pretty,
        dry_run: cli.dry_run,
        jobs: cli.jobs.unwrap_or_else(batch::default_jobs),
    });

    if let Some(dir) = &options.out_dir {
        if !options.dry_run {
            tokio::fs::create_dir_all(dir).await?;
        }
    }

    let (inputs, skipped) = batch::select_inputs(cli.inputs);
    for skip in &skipped {
        eprintln!("{skip}");
    }

    let reports = batch::run(inputs, defaults, options).await;

    for report in &reports {
        match &report.outcome {
            FileOutcome::Migrated { output, changes } => {
                match output {
                    Some(path) => println!("{}: {} change(s) -> {}", report.name(), changes.len(), path.display()),
                    None => println!("{}: {} change(s) (dry run)", report.name(), changes.len()),
                }
                if cli.changes {
                    for change in changes {
                        println!("  - {change}");
                    }
                }
            }
            FileOutcome::Failed { error } => eprintln!("{}: error: {error}", report.name()),
        }
    }

    let summary = BatchSummary::of(&reports);
    println!("{summary}");

    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
