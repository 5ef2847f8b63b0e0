use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod transform;

#[derive(Parser)]
#[command(name = "tagpress", version, about = "Post-process a generated blog index page")]
struct Args {
    /// Log format
    #[arg(long, value_enum, default_value = "text", global = true)]
    log_format: LogFormat,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// The command to execute
    #[command(subcommand)]
    command: TagpressCommand,
}

/// Options shared by every command that loads an index document.
#[derive(Parser)]
struct SourceArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "tagpress.yaml")]
    config_file: Option<PathBuf>,

    /// Override the path of the index document
    #[arg(long)]
    index: Option<PathBuf>,

    /// Override the path of the replacement script
    #[arg(long)]
    script: Option<PathBuf>,
}

#[derive(Parser)]
struct RunArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Write the result here instead of overwriting the index
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser)]
struct CheckArgs {
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Subcommand)]
enum TagpressCommand {
    /// Transform the index document and write it back
    Run(RunArgs),

    /// Run every stage in memory and report, without writing anything
    Check(CheckArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match args.verbose {
        0 => "tagpress=info",
        1 => "tagpress=debug",
        _ => "tagpress=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match args.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    init_tracing(&args);

    match args.command {
        TagpressCommand::Run(args) => {
            commands::run::run(&args)?;
        }
        TagpressCommand::Check(args) => {
            commands::check::run(&args)?;
        }
    }

    Ok(())
}
