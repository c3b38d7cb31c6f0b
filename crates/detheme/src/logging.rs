//! Diagnostic logging.
//!
//! Filtering follows `RUST_LOG` (default `warn`), so placeholder substitutions
//! made by the resolver show up without any flag:
//!
//! - `RUST_LOG=debug` - parse/serialize summaries as well
//! - `RUST_LOG=detheme_core::resolve=warn` - resolver warnings only

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, writing to stderr. `color` should reflect
/// whether stderr itself is a terminal.
pub fn init(color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(true)
        .init();
}
