//! Tracing subscriber installation.
//!
//! - `RUST_LOG=debug`: stage spans (lex, parse, resolve, interpret)
//! - `RUST_LOG=lox_eval=trace`: every evaluated node
//! - `RUST_LOG=lox_parse=trace,lox_resolve=debug`: mix per crate
//!
//! Output goes to stderr as an indented tree so it never mixes with
//! program output on stdout.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install the subscriber if `RUST_LOG` is set. Safe to call more than once.
pub fn init() {
    INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let layer = HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_targets(true)
                .with_bracketed_fields(true);
            // Another subscriber may already be installed (e.g. by a test harness).
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init();
        }
    });
}
