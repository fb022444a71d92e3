// src/main.rs

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use num_bigint::BigUint;
use tracing_subscriber::EnvFilter;

use morph_fixtures::fixture::{DEFAULT_NEW_BACKEND, DEFAULT_OLD_BACKEND};
use morph_fixtures::{Backend, CommitmentRecord, Preimage, generate_for};

/// Generate and check Poseidon commitment fixtures for the BN254 and
/// BLS12-381 backends.
#[derive(Parser, Debug)]
#[command(
    name = "morph-fixtures",
    version,
    about,
    long_about = None,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Verbose logging to stderr (-v, -vv, -vvv). RUST_LOG overrides.
    /// With a subcommand, pass it after the subcommand name.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Options for the default `generate` run.
    #[command(flatten)]
    generate: GenerateArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute both commitments and print the fixture record (default).
    Generate(GenerateArgs),

    /// Recompute the commitments of an existing fixture file.
    Check {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// List supported backends.
    Backends,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long, value_name = "N", env = "MORPH_BALANCE", default_value = "1000")]
    balance: BigUint,

    #[arg(long, value_name = "N", env = "MORPH_NONCE", default_value = "5")]
    nonce: BigUint,

    #[arg(long, value_name = "N", env = "MORPH_ACCOUNT_ID", default_value = "12345")]
    account_id: BigUint,

    #[arg(long, value_name = "ID", env = "MORPH_OLD_BACKEND", default_value_t = DEFAULT_OLD_BACKEND)]
    old_backend: u64,

    #[arg(long, value_name = "ID", env = "MORPH_NEW_BACKEND", default_value_t = DEFAULT_NEW_BACKEND)]
    new_backend: u64,

    /// Write the record here instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Single-line JSON.
    #[arg(long)]
    compact: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command.unwrap_or(Commands::Generate(cli.generate)) {
        Commands::Generate(args) => run_generate(&args),
        Commands::Check { path } => run_check(&path),
        Commands::Backends => run_backends(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let preimage = Preimage {
        balance: args.balance.clone(),
        nonce: args.nonce.clone(),
        account_id: args.account_id.clone(),
    };
    let record = generate_for(&preimage, args.old_backend, args.new_backend)
        .context("computing commitments")?;

    let json = if args.compact {
        record.to_json()?
    } else {
        record.to_json_pretty()?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "fixture written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run_check(path: &Path) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let record = CommitmentRecord::from_json(&json)
        .with_context(|| format!("parsing {}", path.display()))?;
    record.check().with_context(|| format!("checking {}", path.display()))?;
    println!("ok: {}", path.display());
    Ok(())
}

fn run_backends() -> anyhow::Result<()> {
    for backend in Backend::all() {
        println!(
            "{}  {:<10} {:>3}-bit  r = {}",
            backend.id(),
            backend.name(),
            backend.security_bits(),
            backend.modulus()
        );
    }
    Ok(())
}
