use colored::Colorize;
use std::path::PathBuf;

/// An operation that can be logged in dry-run mode.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Set a single key on a remote deployment
    RemoteSet { key: String, command: String },
    /// Write a local env file
    WriteEnvFile { path: PathBuf, content: String },
}

/// Tracks operations for dry-run mode.
pub struct DryRun {
    operations: Vec<Operation>,
}

impl DryRun {
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    pub fn log_operation(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn display_summary(&self) {
        if self.operations.is_empty() {
            println!("{}", "No operations to perform.".yellow());
            return;
        }

        println!(
            "\n{}",
            "DRY RUN - Operations that would be performed:"
                .bold()
                .cyan()
        );
        println!("{}", "=".repeat(60).cyan());

        for (i, op) in self.operations.iter().enumerate() {
            match op {
                Operation::RemoteSet { key, command } => {
                    println!("\n{}. {} {}", i + 1, "Set remote value:".green(), key.cyan());
                    println!("   Would run: {}", command);
                }
                Operation::WriteEnvFile { path, content } => {
                    println!(
                        "\n{}. {} {}",
                        i + 1,
                        "Write env file:".green(),
                        path.display()
                    );
                    println!("   {}", "Would write:".yellow());
                    for line in content.lines() {
                        println!("   | {}", line);
                    }
                }
            }
        }

        println!("\n{}", "=".repeat(60).cyan());
        println!(
            "{}",
            format!("Total operations: {}", self.operations.len()).bold()
        );
    }
}

impl Default for DryRun {
    fn default() -> Self {
        Self::new()
    }
}
