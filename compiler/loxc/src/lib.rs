//! Lox interpreter driver.
//!
//! [`Session`] strings the pipeline crates together; [`commands`] holds the
//! CLI subcommands used by the `lox` binary.

pub mod commands;
mod error;
mod session;

pub use error::DriverError;
pub use session::{exit_code, RunOutcome, Session, SessionConfig};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber if `RUST_LOG` is set. Safe to call more than
/// once.
///
/// `RUST_LOG=lox_resolve=trace` shows every resolved binding, for example.
/// With `LOX_LOG_TREE=1` spans render as an indented tree instead of flat
/// lines.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        let tree = std::env::var("LOX_LOG_TREE").is_ok_and(|v| v == "1");
        if tree {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_targets(true),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
