use crate::utils::error::{EnvSyncError, Result};
use dialoguer::{Select, theme::ColorfulTheme};

/// Source of yes/no confirmations. Interactive flows block on the operator;
/// tests substitute a fixed answer.
pub trait Confirmer {
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Terminal-backed confirmer.
pub struct InteractiveConfirmer;

impl Confirmer for InteractiveConfirmer {
    fn confirm(&self, question: &str) -> Result<bool> {
        prompt_yes_no(question)
    }
}

pub fn prompt_yes_no(question: &str) -> Result<bool> {
    let options = vec!["Yes", "No"];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(question)
        .items(&options)
        .default(0)
        .interact()
        .map_err(|e| EnvSyncError::Io(std::io::Error::other(e)))?;

    Ok(selection == 0)
}

/// Answers every question the same way, without touching the terminal.
#[cfg(test)]
pub struct StaticConfirmer(pub bool);

#[cfg(test)]
impl Confirmer for StaticConfirmer {
    fn confirm(&self, _question: &str) -> Result<bool> {
        Ok(self.0)
    }
}
