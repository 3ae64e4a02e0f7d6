//! expdb - query the experimental database from the command line
//!
//! Usage:
//! ```bash
//! # Print stimulus 5 as JSON (null if absent)
//! expdb --database lab.db --user lab --password secret stimulus 5
//!
//! # Print every experiment that used stimulus 5
//! expdb --config lab.toml experiments 5
//!
//! # Fail if rows lack their table's required columns
//! expdb --config lab.toml --strict experiments 5
//! ```
//!
//! Connection parameters are taken from flags, then the `--config` TOML
//! file, then the `EXPDB_*` environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use experimental_db::config::{ENV_DATABASE, ENV_HOST, ENV_PASSWORD, ENV_USER};
use experimental_db::{ConnectOptions, DataAccessClient, Value};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "expdb",
    about = "Read stimuli and experiments from the experimental database",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// TOML file with database, user, password and host
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database to open
    #[arg(long, global = true)]
    database: Option<String>,

    /// User name
    #[arg(long, global = true)]
    user: Option<String>,

    /// Password
    #[arg(long, global = true)]
    password: Option<String>,

    /// Database host
    #[arg(long, global = true)]
    host: Option<String>,

    /// Validate rows against the table's required columns
    #[arg(long, global = true)]
    strict: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the stimulus with the given id
    Stimulus {
        /// Stimulus id (integers are bound as integers, anything else as text)
        stim_id: String,
    },
    /// Print the experiments that reference the given stimulus id
    Experiments {
        /// Stimulus id (integers are bound as integers, anything else as text)
        stim_id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = resolve_options(&cli)?;
    debug!(?options, "resolved connection options");

    let client = DataAccessClient::open(&options)
        .with_context(|| format!("connecting to {}", options.database()))?;

    let output = match &cli.command {
        Command::Stimulus { stim_id } => {
            let key = parse_stim_id(stim_id);
            if cli.strict {
                serde_json::to_string_pretty(&client.stimulus(key)?)?
            } else {
                serde_json::to_string_pretty(&client.stim_definition(key)?)?
            }
        }
        Command::Experiments { stim_id } => {
            let key = parse_stim_id(stim_id);
            if cli.strict {
                serde_json::to_string_pretty(&client.experiments(key)?)?
            } else {
                serde_json::to_string_pretty(&client.get_experiments(key)?)?
            }
        }
    };
    println!("{output}");

    Ok(())
}

/// Merge flags over the config file over the environment.
fn resolve_options(cli: &Cli) -> Result<ConnectOptions> {
    resolve_options_from(cli, |key| env::var(key).ok())
}

/// Layer flags and the config file over `env_lookup`, then apply the
/// library's rules for required variables.
fn resolve_options_from<E>(cli: &Cli, env_lookup: E) -> Result<ConnectOptions>
where
    E: Fn(&str) -> Option<String>,
{
    let file = cli
        .config
        .as_ref()
        .map(|path| {
            ConnectOptions::from_toml_file(path)
                .with_context(|| format!("loading {}", path.display()))
        })
        .transpose()?;

    let layered = |key: &str| {
        let (flag, from_file) = match key {
            ENV_DATABASE => (&cli.database, file.as_ref().map(ConnectOptions::database)),
            ENV_USER => (&cli.user, file.as_ref().map(ConnectOptions::user)),
            ENV_PASSWORD => (&cli.password, file.as_ref().map(ConnectOptions::password)),
            ENV_HOST => (&cli.host, file.as_ref().map(ConnectOptions::host)),
            _ => return env_lookup(key),
        };
        flag.clone()
            .or_else(|| from_file.map(str::to_string))
            .or_else(|| env_lookup(key))
    };

    ConnectOptions::from_lookup(layered)
        .context("connection options come from flags, --config, or EXPDB_* variables")
}

fn parse_stim_id(raw: &str) -> Value {
    raw.parse::<i64>()
        .map_or_else(|_| Value::from(raw), Value::Integer)
}
