#![forbid(unsafe_code)]

//! Magnet replay driver.
//!
//! Runs canned interaction scenarios against a headless magnet and prints one
//! JSON report per scenario on stdout. Logs go to stderr.
//!
//! # Running
//!
//! ```sh
//! cargo run -p magnet-harness -- drag fling
//! RUST_LOG=magnet=trace cargo run -p magnet-harness
//! ```
//!
//! With no arguments every scenario runs. `MAGNET_REPLAY_SCENARIO` may name a
//! single scenario instead.

use std::io::{self, Write};
use std::process::ExitCode;

use magnet_harness::replay::{self, Scenario};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,magnet=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty()
        && let Ok(name) = std::env::var("MAGNET_REPLAY_SCENARIO")
    {
        names.push(name);
    }

    let scenarios = if names.is_empty() {
        Scenario::ALL.to_vec()
    } else {
        let mut parsed = Vec::with_capacity(names.len());
        for name in &names {
            match Scenario::parse(name) {
                Some(scenario) => parsed.push(scenario),
                None => {
                    eprintln!("unknown scenario: {name} (expected tap, drag, fling, rotate)");
                    return ExitCode::from(2);
                }
            }
        }
        parsed
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for scenario in scenarios {
        let report = replay::run(scenario);
        if writeln!(out, "{}", report.to_json()).is_err() {
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
