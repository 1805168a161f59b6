use colored::Colorize;

use crate::config::Config;
use crate::env_file::{format_env_file, write_env_file};
use crate::remote::RemoteStore;
use crate::types::Tier;
use crate::utils::dry_run::{DryRun, Operation};
use crate::utils::error::Result;

/// Fetch a deployment's entries and write them to the tier's local file.
///
/// The rendered file is buffered and written in one call. Dry-run routes the
/// buffer to the tracker and leaves the file untouched.
pub fn pull_tier(
    config: &Config,
    tier: &Tier,
    remote: &dyn RemoteStore,
    tracker: &mut DryRun,
    dry_run: bool,
) -> Result<()> {
    println!("\n{} Pulling {}...", "→".cyan(), tier);

    let entries = remote.list();
    let path = config.env_file_path(tier);
    let content = format_env_file(tier, &entries);

    if dry_run {
        tracker.log_operation(Operation::WriteEnvFile { path, content });
        return Ok(());
    }

    write_env_file(&path, &content)?;
    println!(
        "{} Wrote {} key(s) to {}",
        "✓".green(),
        entries.len(),
        path.display()
    );

    Ok(())
}
