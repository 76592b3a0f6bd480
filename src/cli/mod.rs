//! Release workflow entry points, independent of argument parsing

pub mod orchestration;

pub use orchestration::{run_release, ReleaseArgs, ReleaseOutcome};
