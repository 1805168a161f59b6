mod convex;

pub use convex::ConvexCli;

use crate::types::EnvEntry;
use crate::utils::error::Result;

/// Narrow interface over the remote configuration backend.
pub trait RemoteStore {
    /// Current entries for the deployment. Degrades to an empty list when
    /// the backend cannot be reached, so callers still report maximal drift.
    fn list(&self) -> Vec<EnvEntry>;

    /// Set one key on the deployment.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// The exact command line `set` would run, for dry-run reporting.
    fn set_command_line(&self, key: &str, value: &str) -> String;
}
