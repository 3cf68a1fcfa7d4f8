////////////////////////////////////////////////////////////////////////////
// This file is part of "stir", a STIR model loader and state-space         //
// explorer for partitioned-state model checking front-ends.                //
//                                                                          //
// Licensed under the MIT license or the Apache License, Version 2.0,       //
// at your option. See the LICENSE-MIT and LICENSE-APACHE files.            //
////////////////////////////////////////////////////////////////////////////

//! `stir-exporter`: projects a STIR model's binary state dump down to the
//! pairwise co-occurrence CSV described in `spec.md` §4.6.
//!
//! Mirrors the standalone `export` tool this crate is modeled on: it needs
//! the model (for slot types and count) and the dump `stir-loader` produced,
//! and writes CSV to stdout so it composes with shell redirection. The
//! actual work happens in `stir_tools::run_exporter`; this file only adds
//! CLI parsing and stdout plumbing.

use std::io;
use std::process::ExitCode;

use clap::Parser;

/// Projects a STIR state-space dump to a pairwise slot co-occurrence CSV.
#[derive(Debug, Parser)]
#[command(name = "stir-exporter", version, about)]
struct Cli {
    /// Path to the STIR model text file the dump was produced from.
    stir_file: String,
    /// Path to the binary state dump written by `stir-loader`.
    bin_file: String,
}

fn main() -> ExitCode {
    stir_tools::init_tracing();
    let cli = Cli::parse();

    tracing::info!(model = %cli.stir_file, dump = %cli.bin_file, "projecting co-occurrences");

    let stdout = io::stdout();
    match stir_tools::run_exporter(&cli.stir_file, &cli.bin_file, stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => stir_tools::report_fatal(err),
    }
}
