use colored::Colorize;
use std::collections::BTreeSet;

use crate::diff::DiffResult;
use crate::remote::RemoteStore;
use crate::types::{EnvFile, Tier};

/// Compare one tier's local file against its remote deployment. Returns
/// true when the two key sets match.
pub fn verify_tier(tier: &Tier, local: &EnvFile, remote: &dyn RemoteStore) -> bool {
    println!("\n{} Verifying {}...", "→".cyan(), tier);

    let remote_entries = remote.list();
    let remote_keys: BTreeSet<&str> = remote_entries.iter().map(|e| e.key.as_str()).collect();
    let diff = DiffResult::between(&local.key_set(), &remote_keys);

    display_diff(&diff);
    diff.is_clean()
}

pub fn display_diff(diff: &DiffResult) {
    if diff.is_clean() {
        println!("  {} local file and deployment are in sync", "✓".green());
        return;
    }

    if !diff.missing_remote.is_empty() {
        println!(
            "  {} {} key(s) missing on the deployment:",
            "✗".red(),
            diff.missing_remote.len()
        );
        for key in &diff.missing_remote {
            println!("    - {}", key.yellow());
        }
        println!("    {}", "💡 run `envsync push` to upload them".dimmed());
    }

    if !diff.missing_local.is_empty() {
        println!(
            "  {} {} key(s) missing locally:",
            "✗".red(),
            diff.missing_local.len()
        );
        for key in &diff.missing_local {
            println!("    - {}", key.yellow());
        }
        println!("    {}", "💡 run `envsync pull` to fetch them".dimmed());
    }
}
