use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber. `RUST_LOG` wins; otherwise verbose
/// runs log this crate at `debug` and everything else stays at `warn`.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "warn,menuchat=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // Ignore a subscriber that is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
