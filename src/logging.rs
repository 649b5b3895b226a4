//! Diagnostic logging to stderr.
//!
//! User-facing messages go through `cli::output`; this is for tracing what
//! azq did (which vaults were listed, how many names matched).  The filter
//! comes from `AZQ_LOG` when set, e.g. `AZQ_LOG=azq=trace`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "AZQ_LOG";

/// Install the global subscriber.  Safe to call more than once.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "azq=debug"
    } else {
        "azq=warn"
    }
}
