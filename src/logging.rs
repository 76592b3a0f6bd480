use std::io::IsTerminal;

use tracing_subscriber::{fmt, EnvFilter};

/// How much the tool reports while it works
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    /// Resolve the `--quiet` / `--verbose` flags. Quiet wins when both are set.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    /// Filter directive for this crate at this verbosity
    pub fn directive(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "release_bump=warn",
            Verbosity::Normal => "release_bump=info",
            Verbosity::Verbose => "release_bump=debug",
        }
    }
}

/// Initialize the logging/tracing subsystem.
///
/// `RUST_LOG` is honoured only at normal verbosity; the flags win otherwise.
pub fn init_logging(verbosity: Verbosity) {
    let filter = match verbosity {
        Verbosity::Normal => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()))
        }
        _ => EnvFilter::new(verbosity.directive()),
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .compact()
        .init();
}
