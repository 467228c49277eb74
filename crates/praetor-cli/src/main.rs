//! Praetor CLI - run the standard governance scenario
//!
//! ```bash
//! # Run the simulation and write outputs to ./output
//! praetor run
//!
//! # Print the report to stdout without writing files
//! praetor run --no-write --print-report
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use praetor_sim::{report, Simulation};

/// Deterministic governance kernel for multi-agent task economies
#[derive(Parser)]
#[command(name = "praetor")]
#[command(author = "Praetor Contributors")]
#[command(version)]
#[command(about = "Run governed multi-agent simulations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the standard scenario to completion
    Run {
        /// Directory for event_log.json and report.txt
        #[arg(long, default_value = "output")]
        out_dir: PathBuf,

        /// Skip writing output files
        #[arg(long)]
        no_write: bool,

        /// Print the full report to stdout
        #[arg(long)]
        print_report: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            out_dir,
            no_write,
            print_report,
        } => run(out_dir, no_write, print_report),
    }
}

fn run(out_dir: PathBuf, no_write: bool, print_report: bool) -> anyhow::Result<()> {
    let mut sim = Simulation::standard().context("building standard scenario")?;
    sim.run().context("running simulation")?;

    let kernel = sim.kernel();
    let report = report::generate(kernel);

    if !no_write {
        fs::create_dir_all(&out_dir)
            .with_context(|| format!("creating output directory {}", out_dir.display()))?;

        let log_path = out_dir.join("event_log.json");
        fs::write(&log_path, kernel.log().to_json()?)
            .with_context(|| format!("writing {}", log_path.display()))?;

        let report_path = out_dir.join("report.txt");
        fs::write(&report_path, &report)
            .with_context(|| format!("writing {}", report_path.display()))?;

        println!("Event log written to {}", log_path.display());
        println!("Report written to {}", report_path.display());
    }

    if print_report {
        println!("{report}");
    }

    println!("Total events: {}", kernel.log().len());
    Ok(())
}
