use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset; keeps escape-hatch warnings visible.
const DEFAULT_FILTER: &str = "warn";

/// Install a stderr subscriber filtered by `RUST_LOG`.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
    if installed.is_err() {
        // A global subscriber already exists; events go there.
        tracing::debug!("tracing subscriber already installed");
    }
}
