//! Tracing configuration.
//!
//! ```bash
//! DTSGEN_LOG=debug dtsgen generate --meta-dir compiled/meta
//! DTSGEN_LOG="dtsgen_lib::typegen=trace" dtsgen map-type 'Array<String>'
//! ```
//!
//! The subscriber is only initialised when `DTSGEN_LOG` (or `RUST_LOG`) is
//! set. Output goes to stderr, so `map-type` results on stdout stay clean.

use tracing_subscriber::EnvFilter;

/// Build an `EnvFilter` from `DTSGEN_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    match std::env::var("DTSGEN_LOG") {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Initialise the global tracing subscriber, if logging was requested.
pub fn init_tracing() {
    let requested =
        std::env::var_os("DTSGEN_LOG").is_some() || std::env::var_os("RUST_LOG").is_some();
    if !requested {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .init();
}
