use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use steptrack::logging::init_logging;
use steptrack::{process_reader, AppConfig, LogLevel, OutputFormat, RecordKind};

/// steptrack - Activity report CLI
///
/// Reads step-activity or training lines and prints distance, speed and
/// calorie reports for each valid line. Invalid lines are logged and skipped.
#[derive(Parser)]
#[command(name = "steptrack")]
#[command(version)]
#[command(about = "Step and training activity reports", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of diagnostics
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Athlete name (overrides the config file)
    #[arg(long, global = true)]
    name: Option<String>,

    /// Body weight in kilograms (overrides the config file)
    #[arg(long, global = true)]
    weight: Option<f64>,

    /// Body height in metres (overrides the config file)
    #[arg(long, global = true)]
    height: Option<f64>,

    /// Report format (text, json)
    #[arg(short = 'f', long, global = true)]
    format: Option<OutputFormat>,

    /// Do not print the personal-data banner
    #[arg(long, global = true)]
    no_profile: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report daily step lines ("<steps>,<duration>")
    Steps {
        /// Input file (stdin if omitted)
        file: Option<PathBuf>,
    },

    /// Report training lines ("<steps>,<activity type>,<duration>")
    Training {
        /// Input file (stdin if omitted)
        file: Option<PathBuf>,
    },

    /// Print the personal data used for calculations
    Profile,

    /// Show or initialize the configuration file
    Config {
        /// Write a default configuration file
        #[arg(long)]
        init: bool,

        /// Overwrite an existing file when initializing
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.verbose > 0 {
        config.logging.level = LogLevel::from_verbosity(cli.verbose);
    }
    init_logging(&config.logging)?;

    config.override_profile(cli.name, cli.weight, cli.height);
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.no_profile {
        config.output.show_profile = false;
    }

    match cli.command {
        Commands::Steps { file } => run_records(RecordKind::Steps, file, &config)?,

        Commands::Training { file } => run_records(RecordKind::Training, file, &config)?,

        Commands::Profile => print!("{}", config.profile),

        Commands::Config { init, force } => {
            let path = cli.config.unwrap_or_else(AppConfig::default_config_path);
            if init {
                if path.exists() && !force {
                    anyhow::bail!(
                        "Config file already exists: {} (use --force to overwrite)",
                        path.display()
                    );
                }
                AppConfig::default().save_to_file(&path)?;
                println!(
                    "{}",
                    format!("✓ Wrote default configuration to {}", path.display()).green()
                );
            } else {
                println!("{}", format!("# {}", path.display()).dimmed());
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}

fn run_records(kind: RecordKind, file: Option<PathBuf>, config: &AppConfig) -> Result<()> {
    for warning in config.profile_warnings() {
        tracing::warn!("{}", warning);
    }

    let reader: Box<dyn BufRead> = match &file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut sink = stdout.lock();

    if config.output.show_profile && config.output.format == OutputFormat::Text {
        writeln!(sink, "{}", config.profile.to_string().cyan())?;
    }

    let mut record = kind.new_record(config.profile.clone());
    let summary = process_reader(reader, record.as_mut(), &mut sink, config.output.format)?;

    if summary.skipped() > 0 {
        eprintln!(
            "{}",
            format!(
                "{} of {} lines skipped ({} unreadable, {} not computable)",
                summary.skipped(),
                summary.total,
                summary.parse_failures,
                summary.compute_failures
            )
            .yellow()
        );
    }

    Ok(())
}
