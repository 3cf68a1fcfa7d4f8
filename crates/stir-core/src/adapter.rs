////////////////////////////////////////////////////////////////////////////
// This file is part of "stir", a STIR model loader and state-space         //
// explorer for partitioned-state model checking front-ends.                //
//                                                                          //
// Licensed under the MIT license or the Apache License, Version 2.0,       //
// at your option. See the LICENSE-MIT and LICENSE-APACHE files.            //
////////////////////////////////////////////////////////////////////////////

//! The exploration adapter (`spec.md` §4.5): the concrete coupling between a
//! parsed [`Model`] and an external partitioned-state exploration engine.
//!
//! This module exposes exactly the surface such an engine needs —
//! state-vector length, per-position types and names, the initial state,
//! the dependency matrix, and a successor callback — plus the dump-writing
//! side effect, without depending on any particular engine's FFI. A real
//! PINS host (like the original plugin this crate is modeled on) wires
//! these onto its own registration hooks; [`crate::explore::BfsExplorer`]
//! is the in-crate stand-in used by tests and `stir-loader`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::mem::size_of;
use std::path::Path;
use std::sync::Mutex;

use crate::error::StirError;
use crate::eval;
use crate::model::{Model, SlotType, StateValue};

/// One of the two named type domains every slot's state position belongs
/// to (`spec.md` §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDomain {
    Node,
    Bool,
}

/// The engine-facing description of the state vector's shape: length, and
/// per-position type and name.
#[derive(Debug, Clone)]
pub struct StateSignature {
    names: Vec<String>,
    domains: Vec<TypeDomain>,
}

impl StateSignature {
    fn from_model(model: &Model) -> Self {
        let mut names = Vec::with_capacity(model.num_slots());
        let mut domains = Vec::with_capacity(model.num_slots());

        for slot in model.state().slots() {
            names.push(format!("slot{}", slot.slot_id()));
            domains.push(match slot.slot_type() {
                SlotType::Node => TypeDomain::Node,
                SlotType::Bool => TypeDomain::Bool,
                // Reserved; the parser never produces an Int slot today.
                SlotType::Int => TypeDomain::Node,
            });
        }

        Self { names, domains }
    }

    /// Length of every global state vector.
    #[inline]
    pub fn state_length(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn name(&self, position: usize) -> &str {
        &self.names[position]
    }

    #[inline]
    pub fn domain(&self, position: usize) -> TypeDomain {
        self.domains[position]
    }
}

/// A sink every visited global state is appended to, exactly once per
/// emission (`spec.md` §4.5/§6). Implementations must serialize writes so
/// records from concurrent callers are never interleaved (`spec.md` §5);
/// this trait makes no assumption about *how* beyond that.
pub trait DumpSink: Send + Sync {
    /// Appends one state vector as `N` native-endian `i32` words.
    fn write_state(&self, state: &[StateValue]) -> Result<(), StirError>;

    /// Flushes and releases any buffered data. Called exactly once, when
    /// the driving engine signals teardown.
    fn finish(&self) -> Result<(), StirError>;
}

/// A [`DumpSink`] backed by a file, matching the original plugin's
/// `fopen`/`fwrite`/`fflush`/`fclose` lifecycle.
pub struct FileDumpSink {
    writer: Mutex<BufWriter<File>>,
}

impl FileDumpSink {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, StirError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| {
            StirError::resource(format!("failed to create dump file {}", path.display()), source)
        })?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    fn write_bytes(&self, bytes: &[u8]) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writer.write_all(bytes)
    }
}

impl DumpSink for FileDumpSink {
    fn write_state(&self, state: &[StateValue]) -> Result<(), StirError> {
        let mut bytes = Vec::with_capacity(state.len() * size_of::<StateValue>());
        for value in state {
            bytes.extend_from_slice(&value.to_ne_bytes());
        }
        self.write_bytes(&bytes)
            .map_err(|source| StirError::resource("failed to append to dump file", source))
    }

    fn finish(&self) -> Result<(), StirError> {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writer
            .flush()
            .map_err(|source| StirError::resource("failed to flush dump file", source))
    }
}

/// Glues a [`Model`] to the engine-facing surface `spec.md` §4.5 describes.
pub struct PinsAdapter<'m> {
    model: &'m Model,
    signature: StateSignature,
}

impl<'m> PinsAdapter<'m> {
    pub fn new(model: &'m Model) -> Self {
        Self {
            model,
            signature: StateSignature::from_model(model),
        }
    }

    #[inline]
    pub fn signature(&self) -> &StateSignature {
        &self.signature
    }

    /// The initial global state vector.
    pub fn initial_state(&self) -> Vec<StateValue> {
        self.model.state().initial_vector()
    }

    #[inline]
    pub fn dependency_matrix(&self) -> crate::depmatrix::DependencyMatrix {
        crate::depmatrix::build(self.model)
    }

    /// `next_state(group, src, emit)` (`spec.md` §4.5): evaluates transition
    /// `group` at `src`. On enabled, calls `emit` exactly once with the
    /// successor and returns `true`; otherwise returns `false` without
    /// calling `emit`.
    pub fn next_state(
        &self,
        group: usize,
        src: &[StateValue],
        scratch: &mut Vec<StateValue>,
        mut emit: impl FnMut(&[StateValue]),
    ) -> bool {
        let transition = &self.model.transitions()[group];

        if !eval::is_enabled(transition, src) {
            return false;
        }

        scratch.resize(src.len(), 0);
        eval::fire_into(transition, src, scratch);
        emit(scratch);
        true
    }
}
