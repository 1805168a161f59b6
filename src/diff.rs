use std::collections::BTreeSet;

/// Key drift between a local env file and a remote deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    /// Present locally, absent remotely - should be pushed.
    pub missing_remote: Vec<String>,
    /// Present remotely, absent locally - should be pulled.
    pub missing_local: Vec<String>,
}

impl DiffResult {
    /// Case-sensitive set difference in both directions, sorted for
    /// deterministic reporting.
    pub fn between(local: &BTreeSet<&str>, remote: &BTreeSet<&str>) -> Self {
        let missing_remote = local.difference(remote).map(|k| k.to_string()).collect();
        let missing_local = remote.difference(local).map(|k| k.to_string()).collect();

        Self {
            missing_remote,
            missing_local,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.missing_remote.is_empty() && self.missing_local.is_empty()
    }
}
