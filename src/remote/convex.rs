use colored::Colorize;
use std::path::PathBuf;
use std::process::Command;

use super::RemoteStore;
use crate::config::Config;
use crate::env_file::split_key_value;
use crate::types::{EnvEntry, Tier};
use crate::utils::error::{EnvSyncError, Result};

/// The Convex CLI scoped to one deployment, invoked as an external process.
///
/// Development talks to the default deployment; production and preview pass
/// a credentials file via --env-file, preview additionally --preview-name.
pub struct ConvexCli {
    program: String,
    base_args: Vec<String>,
    env_file: Option<PathBuf>,
    preview_name: Option<String>,
}

impl ConvexCli {
    pub fn for_tier(config: &Config, tier: &Tier) -> Self {
        Self {
            program: config.remote.program.clone(),
            base_args: config.remote.base_args.clone(),
            env_file: config.credentials_file(tier),
            preview_name: tier.preview_name().map(|n| n.to_string()),
        }
    }

    /// Full argv after the program: base args, subcommand, deployment flags.
    fn build_args(&self, subcommand: &[&str]) -> Vec<String> {
        let mut args: Vec<String> = self.base_args.clone();
        args.extend(subcommand.iter().map(|s| s.to_string()));

        if let Some(env_file) = &self.env_file {
            args.push("--env-file".to_string());
            args.push(env_file.display().to_string());
        }
        if let Some(name) = &self.preview_name {
            args.push("--preview-name".to_string());
            args.push(name.clone());
        }

        args
    }
}

impl RemoteStore for ConvexCli {
    fn list(&self) -> Vec<EnvEntry> {
        let args = self.build_args(&["env", "list"]);
        log::debug!("Running {} {}", self.program, args.join(" "));

        let output = match Command::new(&self.program).args(&args).output() {
            Ok(output) => output,
            Err(e) => {
                eprintln!(
                    "{} Could not run {}: {}",
                    "⚠".yellow(),
                    self.program,
                    e
                );
                return Vec::new();
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            eprintln!(
                "{} Remote listing failed: {}",
                "⚠".yellow(),
                stderr.trim()
            );
            return Vec::new();
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            eprintln!("{} Remote listing returned no entries", "⚠".yellow());
            return Vec::new();
        }

        parse_listing(&stdout)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let args = self.build_args(&["env", "set", key, value]);
        log::debug!("Running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| {
                EnvSyncError::Remote(format!("Failed to execute {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EnvSyncError::Remote(format!(
                "env set {} failed: {}",
                key,
                stderr.trim()
            )));
        }

        Ok(())
    }

    fn set_command_line(&self, key: &str, value: &str) -> String {
        let quoted_key = format!("\"{}\"", key);
        let quoted_value = format!("\"{}\"", value);
        let args = self.build_args(&["env", "set", &quoted_key, &quoted_value]);
        format!("{} {}", self.program, args.join(" "))
    }
}

/// Parse `env list` stdout: one unquoted KEY=value per line, values taken
/// verbatim after the first `=`.
fn parse_listing(stdout: &str) -> Vec<EnvEntry> {
    let mut entries = Vec::new();

    for line in stdout.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (key, value) = split_key_value(trimmed);
        entries.push(EnvEntry::new(key, value));
    }

    entries
}
