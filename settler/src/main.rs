use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tablebook_execution::{format_history, settle_round_parallel, TableRegistry};
use tablebook_settler::{Config, LogFormat, SettleRequest, ValidatedConfig};
use tablebook_types::RawRoundEvent;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "tablebook-settler", version, about = "Settle live table rounds.")]
struct Args {
    /// Path to a YAML config file (defaults apply when omitted).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Settle every bet of one round and print the verdicts as JSON.
    Settle {
        /// JSON file holding `{ "event": ..., "bets": [...] }`.
        #[arg(long)]
        round: PathBuf,
    },
    /// Print the result history strip for a table.
    History {
        #[arg(long)]
        table: String,
        /// JSON file holding an array of raw rounds.
        #[arg(long)]
        rows: PathBuf,
    },
    /// List families and the table routes that reach them.
    Tables,
    /// Validate the configuration and registry.
    Check,
}

fn init_tracing(config: &ValidatedConfig) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn load_config(path: Option<&Path>) -> Result<ValidatedConfig> {
    let config = match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    config.validate().context("invalid configuration")
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn settle(
    registry: &TableRegistry,
    pool: &rayon::ThreadPool,
    request: &SettleRequest,
) -> Result<String> {
    match settle_round_parallel(registry, &request.event, &request.bets, pool) {
        Ok(settlement) => {
            info!(
                table_id = %request.event.table_id,
                family = %settlement.family,
                bets = settlement.verdicts.len(),
                winners = settlement.won_count(),
                "round settled"
            );
            Ok(serde_json::to_string_pretty(&settlement)?)
        }
        Err(err) if err.is_retryable() => {
            Err(err).context("round is not settleable yet; retry later")
        }
        Err(err) => Err(err).context("round is unsupported; escalate"),
    }
}

fn history(registry: &TableRegistry, table: &str, rows: &[RawRoundEvent]) -> Result<String> {
    let entries = format_history(registry, table, rows)?;
    Ok(serde_json::to_string_pretty(&entries)?)
}

fn tables(registry: &TableRegistry) -> String {
    let mut out = String::new();
    for family in registry.families() {
        let patterns: Vec<String> = registry
            .routes()
            .filter(|route| route.family == family)
            .map(|route| format!("{} {}", route.kind, route.pattern))
            .collect();
        let name = registry
            .descriptor(family)
            .map(|descriptor| descriptor.name)
            .unwrap_or_default();
        out.push_str(&format!("{}\t{}\t{}\n", family, name, patterns.join(", ")));
    }
    out
}

fn run(args: Args, config: &ValidatedConfig) -> Result<String> {
    let registry = config
        .build_registry()
        .context("failed to build table registry")?;
    match args.command {
        Commands::Settle { round } => {
            let request: SettleRequest = read_json(&round)?;
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.worker_threads)
                .build()
                .context("failed to create settlement pool")?;
            settle(&registry, &pool, &request)
        }
        Commands::History { table, rows } => {
            let rows: Vec<RawRoundEvent> = read_json(&rows)?;
            history(&registry, &table, &rows)
        }
        Commands::Tables => Ok(tables(&registry)),
        Commands::Check => Ok(format!(
            "config ok: {} families, {} routes",
            registry.families().len(),
            registry.routes().count()
        )),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    init_tracing(&config);
    let output = run(args, &config)?;
    println!("{output}");
    Ok(())
}
