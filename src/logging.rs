//! Logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize tracing to stderr.
///
/// Verbosity: `-v` enables debug, `-vv` trace; `-q` silences everything
/// below errors. `RUST_LOG` wins when set.
pub fn init_logging(verbose: u8, quiet: bool) -> anyhow::Result<()> {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("capitask={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}
