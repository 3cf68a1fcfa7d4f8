////////////////////////////////////////////////////////////////////////////
// This file is part of "stir", a STIR model loader and state-space         //
// explorer for partitioned-state model checking front-ends.                //
//                                                                          //
// Licensed under the MIT license or the Apache License, Version 2.0,       //
// at your option. See the LICENSE-MIT and LICENSE-APACHE files.            //
////////////////////////////////////////////////////////////////////////////

//! Shared plumbing for the `stir-loader` and `stir-exporter` binaries:
//! tracing setup, the "fatal and terminal" error-reporting policy
//! `stir-core`'s own docs push out to this boundary, and the exporter's
//! core logic, kept here (rather than inline in `main`) so it is callable
//! directly from integration tests without spawning a subprocess.

use std::fs;
use std::io::Write;
use std::process::ExitCode;

use stir_core::cooccurrence::{project, read_dump_states, write_csv};
use stir_core::parser::parse;
use stir_core::StirError;

/// Initializes a `tracing-subscriber` formatter reading `RUST_LOG`,
/// defaulting to `info` when unset.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Logs `err` via `tracing::error!` and returns the process exit code every
/// binary in this crate reports a fatal error with.
///
/// Every error this crate can produce is, per `stir-core`'s own policy,
/// fatal and terminal: there is no retry or degraded mode to fall back to,
/// so the only thing left to decide here is how loudly to fail.
pub fn report_fatal(err: impl std::fmt::Display) -> ExitCode {
    tracing::error!("{err}");
    ExitCode::FAILURE
}

/// Reads the STIR model at `stir_file` and the dump at `bin_file`, projects
/// their pairwise co-occurrences, and writes the resulting CSV to `out`.
///
/// This is `stir-exporter`'s entire behavior; `main` only adds CLI parsing
/// and stdout plumbing around it.
pub fn run_exporter(stir_file: &str, bin_file: &str, out: impl Write) -> Result<(), StirError> {
    let text = fs::read_to_string(stir_file)
        .map_err(|source| StirError::resource(format!("failed to read model file {stir_file}"), source))?;
    let model = parse(&text)?;
    model.validate()?;

    let dump = fs::read(bin_file)
        .map_err(|source| StirError::resource(format!("failed to read dump file {bin_file}"), source))?;

    let states = read_dump_states(&model, &dump);
    let rows = project(&model, states.iter().map(|s| s.as_slice()));
    write_csv(&rows, out)
}
