////////////////////////////////////////////////////////////////////////////
// This file is part of "stir", a STIR model loader and state-space         //
// explorer for partitioned-state model checking front-ends.                //
//                                                                          //
// Licensed under the MIT license or the Apache License, Version 2.0,       //
// at your option. See the LICENSE-MIT and LICENSE-APACHE files.            //
////////////////////////////////////////////////////////////////////////////

use std::io;

/// The error taxonomy for every fallible operation in this crate.
///
/// Every kind here is meant to be *fatal and terminal* to whoever is driving
/// the pipeline (see the crate-level docs): there is no recovery path baked
/// into the library itself, callers simply propagate with `?` and decide at
/// their own boundary (typically a `main` in `stir-tools`) how to report and
/// exit.
#[derive(Debug, thiserror::Error)]
pub enum StirError {
    /// A malformed STIR directive, an unknown instruction prefix, or an
    /// integer conversion failure while parsing.
    #[error("parse error at byte offset {offset}: {message}")]
    Parse {
        /// Byte offset into the input at which parsing stopped making sense.
        offset: usize,
        /// Human-readable description of what was expected.
        message: String,
    },

    /// Opening, reading, or writing a file failed.
    #[error("resource error: {message}")]
    Resource {
        /// Description of the operation that failed.
        message: String,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A required environment variable or CLI argument was absent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A transition, guard, or instruction references a slot id outside the
    /// declared state, or slots are not laid out with `slot_id` equal to
    /// array position.
    #[error("integrity error: {0}")]
    Integrity(String),
}

impl StirError {
    pub(crate) fn parse(offset: usize, message: impl Into<String>) -> Self {
        StirError::Parse {
            offset,
            message: message.into(),
        }
    }

    /// Public: `stir-tools` wraps its own I/O failures (reading model and
    /// dump files) in this variant too, not just `stir-core`'s internals.
    pub fn resource(message: impl Into<String>, source: io::Error) -> Self {
        StirError::Resource {
            message: message.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type StirResult<T> = Result<T, StirError>;
