use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber for the binary.
///
/// `RUST_LOG` wins over `level` when set. Repeated calls are ignored.
pub fn init_tracing(level: &str, json: bool) {
    let directive = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| format!("paynl_checkout={level}"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr);

    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}
