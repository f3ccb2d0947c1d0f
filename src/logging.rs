use tracing_subscriber::EnvFilter;

use crate::stderr_buffer::BufferedStderr;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output for
/// this crate and warnings only for everything else.
pub fn init(verbose: bool) {
    let default_directive = if verbose { "eco_dash=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(false)
        .with_writer(|| BufferedStderr)
        .try_init();
}
