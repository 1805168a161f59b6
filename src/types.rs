use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// A single KEY/value pair, read from a local env file or listed from a
/// remote deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub key: String,
    pub value: String,
}

impl EnvEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An ordered collection of entries tied to the local file they belong to.
///
/// Keys are unique. Inserting a duplicate overwrites the existing entry's
/// value in place, so the last occurrence in a malformed file wins while the
/// key keeps its first-seen position.
#[derive(Debug, Clone)]
pub struct EnvFile {
    pub path: PathBuf,
    entries: Vec<EnvEntry>,
}

impl EnvFile {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, key: String, value: String) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.key == key) {
            existing.value = value;
        } else {
            self.entries.push(EnvEntry { key, value });
        }
    }

    pub fn entries(&self) -> &[EnvEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn key_set(&self) -> BTreeSet<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }
}

/// A deployment tier. Preview carries the name of the preview deployment
/// it addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tier {
    Development,
    Production,
    Preview { name: String },
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Development => "development",
            Tier::Production => "production",
            Tier::Preview { .. } => "preview",
        }
    }

    pub fn preview_name(&self) -> Option<&str> {
        match self {
            Tier::Preview { name } => Some(name.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Preview { name } => write!(f, "preview '{}'", name),
            _ => write!(f, "{}", self.label()),
        }
    }
}

/// The tier argument as given on the command line, before `all` is expanded
/// and a preview name is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierArg {
    Development,
    Production,
    Preview,
    All,
}

impl std::str::FromStr for TierArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(TierArg::Development),
            "production" | "prod" => Ok(TierArg::Production),
            "preview" => Ok(TierArg::Preview),
            "all" => Ok(TierArg::All),
            _ => Err(format!("Invalid tier: {}", s)),
        }
    }
}
