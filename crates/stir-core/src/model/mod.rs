////////////////////////////////////////////////////////////////////////////
// This file is part of "stir", a STIR model loader and state-space         //
// explorer for partitioned-state model checking front-ends.                //
//                                                                          //
// Licensed under the MIT license or the Apache License, Version 2.0,       //
// at your option. See the LICENSE-MIT and LICENSE-APACHE files.            //
////////////////////////////////////////////////////////////////////////////

//! The in-memory representation of a parsed STIR document: a [`State`] of
//! [`Slot`]s and an ordered sequence of [`Transition`]s.
//!
//! A [`Model`] is immutable once built: the parser is the only producer, and
//! the transition evaluator in [`crate::eval`] only ever reads it.

pub mod slot;
pub mod transition;

use crate::error::StirError;

pub use slot::{Slot, SlotType, StateValue};
pub use transition::{GuardKind, InstructionKind, Transition};

/// An ordered sequence of slots, one per position in the global state
/// vector.
#[derive(Debug, Clone, Default)]
pub struct State {
    slots: Vec<Slot>,
}

impl State {
    pub(crate) fn new(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    /// Number of slots, i.e. the length of every global state vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The initial global state vector: each position holds the declaring
    /// slot's `init_value`.
    pub fn initial_vector(&self) -> Vec<StateValue> {
        self.slots.iter().map(Slot::init_value).collect()
    }
}

/// Owns one [`State`] and an ordered sequence of [`Transition`]s.
///
/// Created by [`crate::parser::parse`] from a text buffer; the text buffer
/// only needs to outlive the parse call, not the model, since the parser
/// copies every scalar out of it.
#[derive(Debug, Clone)]
pub struct Model {
    state: State,
    transitions: Vec<Transition>,
}

impl Model {
    pub(crate) fn new(state: State, transitions: Vec<Transition>) -> Self {
        Self { state, transitions }
    }

    #[inline]
    pub fn state(&self) -> &State {
        &self.state
    }

    #[inline]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Number of slots (length `N` of every global state vector).
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.state.len()
    }

    /// Number of transitions (`M`).
    #[inline]
    pub fn num_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// Every slot with [`SlotType::Node`], in declaration order.
    pub fn node_slots(&self) -> impl Iterator<Item = &Slot> {
        self.state
            .slots()
            .iter()
            .filter(|slot| slot.slot_type() == SlotType::Node)
    }

    /// Checks the invariants `spec.md` §3/§4.2/§9 name but the original
    /// source "accepts silently": every `slot_id` equal to its array
    /// position, and every slot id referenced by a transition's component
    /// slot, guards, or instructions resolves to a declared slot.
    pub fn validate(&self) -> Result<(), StirError> {
        for (position, slot) in self.state.slots().iter().enumerate() {
            if slot.slot_id() != position {
                return Err(StirError::Integrity(format!(
                    "slot at array position {position} declares slot_id {}, \
                     but the evaluator indexes slots by array position",
                    slot.slot_id()
                )));
            }
        }

        let num_slots = self.num_slots();
        let in_range = |slot_id: usize| slot_id < num_slots;

        for transition in &self.transitions {
            if !in_range(transition.component_slot_id()) {
                return Err(StirError::Integrity(format!(
                    "transition {} references component_slot_id {}, \
                     outside the declared state of {num_slots} slots",
                    transition.transition_id(),
                    transition.component_slot_id()
                )));
            }

            for guard in transition.guards() {
                if !in_range(guard.slot_id()) {
                    return Err(StirError::Integrity(format!(
                        "transition {} has a guard referencing slot_id {}, \
                         outside the declared state of {num_slots} slots",
                        transition.transition_id(),
                        guard.slot_id()
                    )));
                }
            }

            for instruction in transition.instructions() {
                if let Some(slot_id) = instruction.written_slot_id() {
                    if !in_range(slot_id) {
                        return Err(StirError::Integrity(format!(
                            "transition {} has an instruction writing slot_id {}, \
                             outside the declared state of {num_slots} slots",
                            transition.transition_id(),
                            slot_id
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}
