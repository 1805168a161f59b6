use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvSyncError {
    /// IO errors - includes file system and I/O related failures
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors - issues with the config file or its values
    #[error("{0}")]
    Config(String),

    /// TOML parsing errors - config file syntax issues
    #[error(
        "TOML parsing error in the envsync config file:\n{0}\n💡 Hint: Check TOML syntax - ensure quotes match, commas are placed correctly, and keys are valid"
    )]
    Toml(#[from] toml::de::Error),

    /// Local env file is missing - the user has never pulled this tier
    #[error(
        "Environment file not found: {}\n  💡 Solution: run `envsync pull {}` to create it from the remote deployment",
        .path.display(),
        .tier
    )]
    MissingEnvFile { path: PathBuf, tier: String },

    /// Remote CLI invocation errors - failures talking to the deployment
    #[error("{0}")]
    Remote(String),

    /// Bad command-line arguments
    #[error("{0}")]
    Usage(String),

    /// Operation cancelled - user declined to proceed
    #[error("Operation cancelled by user")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, EnvSyncError>;
