mod commands;
mod config;
mod diff;
mod env_file;
mod remote;
mod types;
mod utils;


use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{display_push_summary, gate_preview_push, pull_tier, push_entries, verify_tier};
use config::Config;
use env_file::read_env_file;
use remote::ConvexCli;
use types::{Tier, TierArg};
use utils::prompt::InteractiveConfirmer;
use utils::{DryRun, EnvSyncError, Result, logging};

#[derive(Parser)]
#[command(name = "envsync")]
#[command(about = "Keep local Convex env files and remote deployments in sync")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare local env files against the remote deployments
    Verify {
        /// Target tier: development|dev, production|prod, preview, all
        tier: Option<String>,
        /// Preview deployment name (preview tier only)
        preview_name: Option<String>,
    },
    /// Push local env file entries to a remote deployment
    Push {
        /// Target tier: development|dev, production|prod, preview
        tier: Option<String>,
        /// Preview deployment name (preview tier only)
        preview_name: Option<String>,
        /// Dry run mode
        #[arg(long)]
        dry_run: bool,
        /// Skip confirmation prompts
        #[arg(long)]
        yes: bool,
    },
    /// Pull remote deployment entries into the local env files
    Pull {
        /// Target tier: development|dev, production|prod, preview, all
        tier: Option<String>,
        /// Preview deployment name (preview tier only)
        preview_name: Option<String>,
        /// Dry run mode
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() {
    logging::init_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

const TIER_USAGE: &str = "Expected tier: development|dev, production|prod, preview, or all";

/// Expand the tier argument into concrete tiers, attaching the preview name.
/// `all` covers every tier for verify/pull and is rejected for push.
fn resolve_tiers(
    config: &Config,
    tier: Option<String>,
    preview_name: Option<String>,
    allow_all: bool,
) -> Result<Vec<Tier>> {
    let Some(tier) = tier else {
        return Err(EnvSyncError::Usage(format!(
            "Missing tier argument\n  {}",
            TIER_USAGE
        )));
    };

    let parsed: TierArg = tier
        .parse()
        .map_err(|e: String| EnvSyncError::Usage(format!("{}\n  {}", e, TIER_USAGE)))?;

    if preview_name.is_some() && parsed != TierArg::Preview {
        return Err(EnvSyncError::Usage(
            "A preview name is only valid with the preview tier".to_string(),
        ));
    }

    let default_preview = || Tier::Preview {
        name: config.remote.default_preview_name.clone(),
    };

    match parsed {
        TierArg::Development => Ok(vec![Tier::Development]),
        TierArg::Production => Ok(vec![Tier::Production]),
        TierArg::Preview => Ok(vec![
            preview_name
                .map(|name| Tier::Preview { name })
                .unwrap_or_else(default_preview),
        ]),
        TierArg::All if allow_all => Ok(vec![
            Tier::Development,
            Tier::Production,
            default_preview(),
        ]),
        TierArg::All => Err(EnvSyncError::Usage(
            "`all` is not supported for push; push one tier at a time".to_string(),
        )),
    }
}

fn handle_verify(tier: Option<String>, preview_name: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let tiers = resolve_tiers(&config, tier, preview_name, true)?;
    let aggregate = tiers.len() > 1;

    let mut clean = true;
    for tier in &tiers {
        let local = match read_env_file(&config.env_file_path(tier), tier) {
            Ok(local) => local,
            Err(e @ EnvSyncError::MissingEnvFile { .. }) if aggregate => {
                eprintln!("{} {}", "✗".red(), e);
                clean = false;
                continue;
            }
            Err(e) => return Err(e),
        };

        let remote = ConvexCli::for_tier(&config, tier);
        clean &= verify_tier(tier, &local, &remote);
    }

    if !clean {
        std::process::exit(1);
    }

    println!("\n{} All checked tiers are in sync", "✓".green());
    Ok(())
}

fn handle_push(
    tier: Option<String>,
    preview_name: Option<String>,
    dry_run: bool,
    yes: bool,
) -> Result<()> {
    let config = Config::load()?;
    let tiers = resolve_tiers(&config, tier, preview_name, false)?;
    let tier = &tiers[0];

    let local = read_env_file(&config.env_file_path(tier), tier)?;
    if local.is_empty() {
        println!("{} No entries in {}", "⊘".yellow(), local.path.display());
        return Ok(());
    }

    let remote = ConvexCli::for_tier(&config, tier);
    let mut tracker = DryRun::new();

    if matches!(tier, Tier::Preview { .. }) {
        let dev = ConvexCli::for_tier(&config, &Tier::Development);
        let prod = ConvexCli::for_tier(&config, &Tier::Production);
        gate_preview_push(&local, &dev, &prod, &InteractiveConfirmer, dry_run, yes)?;
    }

    println!(
        "\n{} Pushing {} key(s) to {}...",
        "→".cyan(),
        local.len(),
        tier
    );
    let report = push_entries(&local, &remote, &mut tracker, dry_run);

    if dry_run {
        tracker.display_summary();
        return Ok(());
    }

    display_push_summary(tier, &report);
    if !report.failed.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn handle_pull(tier: Option<String>, preview_name: Option<String>, dry_run: bool) -> Result<()> {
    let config = Config::load()?;
    let tiers = resolve_tiers(&config, tier, preview_name, true)?;
    let mut tracker = DryRun::new();

    for tier in &tiers {
        let remote = ConvexCli::for_tier(&config, tier);
        pull_tier(&config, tier, &remote, &mut tracker, dry_run)?;
    }

    if dry_run {
        tracker.display_summary();
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Verify { tier, preview_name } => handle_verify(tier, preview_name),
        Commands::Push {
            tier,
            preview_name,
            dry_run,
            yes,
        } => handle_push(tier, preview_name, dry_run, yes),
        Commands::Pull {
            tier,
            preview_name,
            dry_run,
        } => handle_pull(tier, preview_name, dry_run),
    }
}
