//! Command-line front end for rolestat.
//!
//! Run with: `rolestat <command> --dex data/pokedex.json ...`

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rolestat::normalize::summarize;
use rolestat::report::{format_significant, render_partners, render_ranking, RenderOptions};
use rolestat::{find_partners, AnalysisConfig, ColumnId, Pokedex, RolePipeline, Table, TypeChart};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const BASE_STAT_LABELS: [&str; 6] = ["HP", "Atk", "Def", "SpA", "SpD", "Spe"];

/// Role scoring and teammate search over a Pokédex dataset
#[derive(Parser)]
#[command(name = "rolestat")]
#[command(
    about = "Role scores, rankings and type synergy for Pokémon base stats",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank every creature by role scores
    Rank(RankArgs),

    /// Find teammates whose types cover a creature's weaknesses
    Partner(PartnerArgs),

    /// Print mean and standard deviation of each base stat
    Summary(DexArgs),

    /// Recompute speed ranks and write the dataset back out
    SpeedRanks(SpeedRankArgs),
}

#[derive(Args)]
struct DexArgs {
    /// Path to pokedex.json
    #[arg(long)]
    dex: PathBuf,
}

#[derive(Args)]
struct RankArgs {
    #[command(flatten)]
    dex: DexArgs,

    /// JSON file overriding analysis parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show at most this many rows
    #[arg(long)]
    limit: Option<usize>,

    /// Order rows by overall ranking, best first
    #[arg(long)]
    sort: bool,

    /// Emit JSON instead of a text table
    #[arg(long)]
    json: bool,

    /// Write to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct PartnerArgs {
    #[command(flatten)]
    dex: DexArgs,

    /// Creature to find partners for
    #[arg(long)]
    mon: String,

    /// Type chart JSON; the built-in chart is used when omitted
    #[arg(long)]
    types: Option<PathBuf>,

    /// Number of partners to list
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Write to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct SpeedRankArgs {
    #[command(flatten)]
    dex: DexArgs,

    /// Where to write the updated dataset
    #[arg(long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;

    match cli.command {
        Command::Rank(args) => rank(args),
        Command::Partner(args) => partner(args),
        Command::Summary(args) => summary(args),
        Command::SpeedRanks(args) => speed_ranks(args),
    }
}

fn setup_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_dex(path: &Path) -> Result<Pokedex> {
    tracing::info!("Loading {}", path.display());
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let dex = Pokedex::from_json(&text).with_context(|| format!("parsing {}", path.display()))?;
    tracing::info!(creatures = dex.len(), "Loaded dataset");
    Ok(dex)
}

fn emit(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn rank(args: RankArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    let dex = load_dex(&args.dex.dex)?;
    let report = RolePipeline::new(config).run(&dex)?;

    let text = if args.json {
        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        json
    } else {
        render_ranking(
            &report,
            RenderOptions {
                limit: args.limit,
                sort_by_overall: args.sort,
            },
        )
    };
    emit(args.output.as_deref(), &text)
}

fn partner(args: PartnerArgs) -> Result<()> {
    let chart = match &args.types {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            TypeChart::from_json(&text)?
        }
        None => TypeChart::standard(),
    };
    let dex = load_dex(&args.dex.dex)?;
    let mon = args.mon.to_lowercase();
    if dex.get(&mon).is_none() {
        bail!("{mon} is not in the dataset");
    }

    let partners = find_partners(&chart, &dex, &mon, args.limit)?;
    emit(args.output.as_deref(), &render_partners(&mon, &partners))
}

fn summary(args: DexArgs) -> Result<()> {
    let dex = load_dex(&args.dex)?;
    let rows = dex
        .iter()
        .map(|r| r.stats.as_array().iter().map(|&v| f64::from(v)).collect())
        .collect();
    let table = Table::from_rows(ColumnId::list(&BASE_STAT_LABELS), rows)?;
    for stat in summarize(&table)? {
        println!(
            "{:<4} mean {:>9}  std {:>9}  min {:>9}  max {:>9}",
            stat.column,
            format_significant(stat.mean, 5),
            format_significant(stat.std, 5),
            format_significant(stat.min, 5),
            format_significant(stat.max, 5),
        );
    }
    Ok(())
}

fn speed_ranks(args: SpeedRankArgs) -> Result<()> {
    let mut dex = load_dex(&args.dex.dex)?;
    dex.assign_speed_ranks();
    let mut json = dex.to_json_pretty()?;
    json.push('\n');
    emit(Some(&args.output), &json)
}
