use colored::Colorize;
use std::collections::BTreeSet;

use crate::remote::RemoteStore;
use crate::types::{EnvFile, Tier};
use crate::utils::dry_run::{DryRun, Operation};
use crate::utils::error::{EnvSyncError, Result};
use crate::utils::prompt::Confirmer;

/// Preview keys with no counterpart on the development or production
/// deployments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideReport {
    pub missing_dev: Vec<String>,
    pub missing_prod: Vec<String>,
}

impl OverrideReport {
    pub fn is_empty(&self) -> bool {
        self.missing_dev.is_empty() && self.missing_prod.is_empty()
    }
}

/// Cross-check a preview file against the dev and prod deployments. A
/// preview entry normally overrides a default that exists on both.
pub fn check_preview_overrides(
    preview: &EnvFile,
    dev: &dyn RemoteStore,
    prod: &dyn RemoteStore,
) -> OverrideReport {
    let dev_keys: BTreeSet<String> = dev.list().into_iter().map(|e| e.key).collect();
    let prod_keys: BTreeSet<String> = prod.list().into_iter().map(|e| e.key).collect();

    let mut missing_dev = Vec::new();
    let mut missing_prod = Vec::new();

    for key in preview.key_set() {
        if !dev_keys.contains(key) {
            missing_dev.push(key.to_string());
        }
        if !prod_keys.contains(key) {
            missing_prod.push(key.to_string());
        }
    }

    OverrideReport {
        missing_dev,
        missing_prod,
    }
}

pub fn display_override_report(report: &OverrideReport) {
    if report.is_empty() {
        return;
    }

    println!(
        "\n{}",
        "⚠ Preview keys without a base value:".yellow().bold()
    );

    if !report.missing_dev.is_empty() {
        println!("  {} missing in development:", "✗".red());
        for key in &report.missing_dev {
            println!("    - {}", key.yellow());
        }
    }
    if !report.missing_prod.is_empty() {
        println!("  {} missing in production:", "✗".red());
        for key in &report.missing_prod {
            println!("    - {}", key.yellow());
        }
    }

    println!(
        "  {}",
        "💡 Preview values normally override a default set on both deployments".dimmed()
    );
}

/// Gate a preview push behind the override cross-check. Dry-run and --yes
/// print the warning without blocking; a declined confirmation aborts the
/// push before any key is sent.
pub fn gate_preview_push(
    preview: &EnvFile,
    dev: &dyn RemoteStore,
    prod: &dyn RemoteStore,
    confirmer: &dyn Confirmer,
    dry_run: bool,
    assume_yes: bool,
) -> Result<()> {
    let report = check_preview_overrides(preview, dev, prod);
    if report.is_empty() {
        return Ok(());
    }

    display_override_report(&report);

    if dry_run || assume_yes {
        return Ok(());
    }

    if !confirmer.confirm("Push these keys to the preview deployment anyway?")? {
        return Err(EnvSyncError::Cancelled);
    }

    Ok(())
}

/// Outcome of a best-effort push batch.
#[derive(Debug)]
pub struct PushReport {
    pub pushed: usize,
    pub failed: Vec<String>,
}

/// Push every entry, continuing past per-key failures. In dry-run mode the
/// would-be command lines are recorded on the tracker instead.
pub fn push_entries(
    local: &EnvFile,
    remote: &dyn RemoteStore,
    tracker: &mut DryRun,
    dry_run: bool,
) -> PushReport {
    let mut report = PushReport {
        pushed: 0,
        failed: Vec::new(),
    };

    for entry in local.entries() {
        if dry_run {
            tracker.log_operation(Operation::RemoteSet {
                key: entry.key.clone(),
                command: remote.set_command_line(&entry.key, &entry.value),
            });
            continue;
        }

        match remote.set(&entry.key, &entry.value) {
            Ok(()) => {
                println!("  {} {}", "✓".green(), entry.key);
                report.pushed += 1;
            }
            Err(e) => {
                eprintln!("  {} {}: {}", "⚠".yellow(), entry.key, e);
                report.failed.push(entry.key.clone());
            }
        }
    }

    report
}

pub fn display_push_summary(tier: &Tier, report: &PushReport) {
    if report.failed.is_empty() {
        println!(
            "\n{} Pushed {} key(s) to {}",
            "✓".green(),
            report.pushed,
            tier
        );
    } else {
        println!(
            "\n{} Pushed {} key(s) to {}, {} failed",
            "⚠".yellow(),
            report.pushed,
            tier,
            report.failed.len()
        );
    }
}
