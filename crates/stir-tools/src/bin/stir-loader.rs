////////////////////////////////////////////////////////////////////////////
// This file is part of "stir", a STIR model loader and state-space         //
// explorer for partitioned-state model checking front-ends.                //
//                                                                          //
// Licensed under the MIT license or the Apache License, Version 2.0,       //
// at your option. See the LICENSE-MIT and LICENSE-APACHE files.            //
////////////////////////////////////////////////////////////////////////////

//! `stir-loader`: parses a STIR document, validates it, and explores its
//! reachable state space, writing every visited state to a binary dump.
//!
//! This binary plays the role the original plugin filled by registering
//! callbacks with a PINS-compatible host process (`spec.md` §1, §6): with no
//! such host in this crate, [`stir_core::explore::BfsExplorer`] drives the
//! exploration itself. Configuration is read from the environment, matching
//! how the plugin it's modeled on was configured by its host rather than by
//! CLI flags.

use std::env;
use std::fs;
use std::process::ExitCode;

use stir_core::adapter::FileDumpSink;
use stir_core::explore::BfsExplorer;
use stir_core::parser::parse;
use stir_core::StirError;

const MODEL_PATH_VAR: &str = "PINS_STIR_MODEL";
const OUTPUT_PATH_VAR: &str = "PINS_STIR_OUTPUT";
const WORKERS_VAR: &str = "PINS_STIR_WORKERS";

struct Config {
    model_path: String,
    output_path: String,
    num_workers: usize,
}

impl Config {
    fn from_env() -> Result<Self, StirError> {
        let model_path = require_env(MODEL_PATH_VAR)?;
        let output_path = require_env(OUTPUT_PATH_VAR)?;

        let num_workers = match env::var(WORKERS_VAR) {
            Ok(value) => value
                .parse::<usize>()
                .map_err(|_| StirError::Configuration(format!("{WORKERS_VAR} must be a positive integer, got {value:?}")))?,
            Err(_) => std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
        };

        Ok(Self {
            model_path,
            output_path,
            num_workers,
        })
    }
}

fn require_env(var: &str) -> Result<String, StirError> {
    env::var(var).map_err(|_| StirError::Configuration(format!("{var} must be set")))
}

fn run() -> Result<(), StirError> {
    let config = Config::from_env()?;

    tracing::info!(model = %config.model_path, output = %config.output_path, workers = config.num_workers, "loading STIR model");

    let text = fs::read_to_string(&config.model_path)
        .map_err(|source| StirError::resource(format!("failed to read model file {}", config.model_path), source))?;

    let model = parse(&text)?;
    model.validate()?;

    tracing::info!(
        slots = model.num_slots(),
        transitions = model.num_transitions(),
        "model parsed and validated"
    );

    let sink = FileDumpSink::create(&config.output_path)?;
    let stats = BfsExplorer::new(config.num_workers).run(&model, &sink)?;

    tracing::info!(
        distinct_states = stats.distinct_states,
        emitted_states = stats.emitted_states,
        "exploration complete"
    );

    Ok(())
}

fn main() -> ExitCode {
    stir_tools::init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => stir_tools::report_fatal(err),
    }
}
