use tracing_subscriber::{EnvFilter, fmt};

/// Logs go to stderr so command output stays pipeable. RUST_LOG wins over --verbose.
pub fn init(verbose: bool) {
    let default = if verbose {
        "evcopy=debug,evcopy_core=debug,info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
