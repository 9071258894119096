//! The cpps front end driver.
//!
//! Runs read → classify → lex → parse (→ generate) over one file and
//! reports the collected diagnosis. The binary in `main.rs` only parses the
//! command line and picks the output streams; everything else lives here so
//! it can be driven from tests.

pub mod commands;
mod error;
mod options;
mod pipeline;

pub use error::DriverError;
pub use options::{Command, DriverOptions, OutputFormat};
pub use pipeline::{read_source, Frontend};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Only takes effect when `RUST_LOG` is set, e.g. `RUST_LOG=cpps_parse=trace`.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}
