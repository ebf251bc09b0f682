//! # hearthd — hearth fixture daemon
//!
//! Composition root: loads configuration, seeds the in-memory store, and
//! serves operations as JSON lines — one request object per stdin line,
//! one reply envelope per stdout line.
//!
//! ## Dependency rule
//! This is the only crate that depends on everything else. It is the
//! wiring layer — no domain logic belongs here.

mod config;
mod seed;

use std::io::{BufRead, Write};

use tracing_subscriber::EnvFilter;

use hearth_engine::api::Engine;

use crate::config::Config;
use crate::seed::SeedData;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let seed = match config.seed.path.as_deref() {
        Some(path) => SeedData::from_file(path)?,
        None => SeedData::demo(),
    };
    let mut engine = Engine::with_store(config.engine, seed.into_store());
    tracing::info!(
        policy = ?config.engine.trigger_device_policy,
        "hearthd ready, reading requests from stdin"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = match serde_json::from_str(&line) {
            Ok(request) => engine.dispatch_value(request),
            Err(err) => serde_json::json!({"success": false, "error": err.to_string()}),
        };
        serde_json::to_writer(&mut out, &reply)?;
        out.write_all(b"\n")?;
        out.flush()?;
    }

    Ok(())
}
