////////////////////////////////////////////////////////////////////////////
// This file is part of "stir", a STIR model loader and state-space         //
// explorer for partitioned-state model checking front-ends.                //
//                                                                          //
// Licensed under the MIT license or the Apache License, Version 2.0,       //
// at your option. See the LICENSE-MIT and LICENSE-APACHE files.            //
////////////////////////////////////////////////////////////////////////////

//! # stir-core
//!
//! A loader and state-space exploration front-end for STIR, a small textual
//! language describing a labelled transition system of concurrent
//! node-machine components that synchronize through shared boolean slots.
//!
//! This crate owns the three pieces of the system that are not an external
//! collaborator:
//!
//! - [`parser`] turns STIR text into a [`model::Model`].
//! - [`eval`] and [`depmatrix`] give the transition semantics: enabledness,
//!   successor construction, and the transition × slot dependency matrix.
//! - [`adapter`] and [`explore`] expose that model to a partitioned-state
//!   exploration engine and record every visited state to a binary dump;
//!   [`cooccurrence`] projects that dump into pairwise slot co-occurrences.
//!
//! The real exploration engine's scheduler, state hashing, and work
//! queueing are out of scope — they're an external collaborator this crate
//! only needs to hand a few well-defined callbacks to. [`explore::BfsExplorer`]
//! is a small stand-in used to make the pipeline runnable end to end.

pub mod adapter;
pub mod cooccurrence;
pub mod depmatrix;
pub mod error;
pub mod eval;
pub mod explore;
pub mod model;
pub mod parser;

pub use error::{StirError, StirResult};
pub use model::Model;
