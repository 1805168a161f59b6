pub mod dry_run;
pub mod error;
pub mod logging;
pub mod prompt;

pub use dry_run::DryRun;
pub use error::{EnvSyncError, Result};
