pub mod pull;
pub mod push;
pub mod verify;

pub use pull::pull_tier;
pub use push::{
    OverrideReport, PushReport, check_preview_overrides, display_override_report,
    display_push_summary, gate_preview_push, push_entries,
};
pub use verify::verify_tier;
