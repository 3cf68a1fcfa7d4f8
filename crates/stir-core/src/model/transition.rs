////////////////////////////////////////////////////////////////////////////
// This file is part of "stir", a STIR model loader and state-space         //
// explorer for partitioned-state model checking front-ends.                //
//                                                                          //
// Licensed under the MIT license or the Apache License, Version 2.0,       //
// at your option. See the LICENSE-MIT and LICENSE-APACHE files.            //
////////////////////////////////////////////////////////////////////////////

use crate::model::slot::StateValue;

/// A guard: a boolean predicate over one slot's value that conditions a
/// transition's enabledness.
///
/// Sealed sum type so a future `Int` guard variant is additive; only `Bool`
/// has a textual surface today (`spec.md` §4.1, §9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    /// `bool_guard slot_id value` — the only variant the grammar parses.
    Bool { slot_id: usize, value: StateValue },
}

impl GuardKind {
    /// The slot this guard reads.
    #[inline]
    pub fn slot_id(&self) -> usize {
        match self {
            GuardKind::Bool { slot_id, .. } => *slot_id,
        }
    }

    /// The value this guard compares against.
    #[inline]
    pub fn value(&self) -> StateValue {
        match self {
            GuardKind::Bool { value, .. } => *value,
        }
    }
}

/// An instruction executed, in declaration order, when a transition fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionKind {
    /// `set_bool_instr slot_id value` — writes `value` into `slot_id`.
    SetBool { slot_id: usize, value: StateValue },
    /// `do_instr ...` — an opaque no-op placeholder reserved for external
    /// extension. Contributes no bits to the dependency matrix.
    Do,
}

impl InstructionKind {
    /// The slot this instruction writes, if any.
    #[inline]
    pub fn written_slot_id(&self) -> Option<usize> {
        match self {
            InstructionKind::SetBool { slot_id, .. } => Some(*slot_id),
            InstructionKind::Do => None,
        }
    }
}

/// An atomic rule attached to one component slot: the NODE slot it advances.
#[derive(Debug, Clone)]
pub struct Transition {
    transition_id: usize,
    component_slot_id: usize,
    src_node: StateValue,
    dst_node: StateValue,
    invert_guard: bool,
    guards: Vec<GuardKind>,
    instructions: Vec<InstructionKind>,
}

impl Transition {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        transition_id: usize,
        component_slot_id: usize,
        src_node: StateValue,
        dst_node: StateValue,
        invert_guard: bool,
        guards: Vec<GuardKind>,
        instructions: Vec<InstructionKind>,
    ) -> Self {
        Self {
            transition_id,
            component_slot_id,
            src_node,
            dst_node,
            invert_guard,
            guards,
            instructions,
        }
    }

    #[inline]
    pub fn transition_id(&self) -> usize {
        self.transition_id
    }

    #[inline]
    pub fn component_slot_id(&self) -> usize {
        self.component_slot_id
    }

    #[inline]
    pub fn src_node(&self) -> StateValue {
        self.src_node
    }

    #[inline]
    pub fn dst_node(&self) -> StateValue {
        self.dst_node
    }

    /// Whether the polarity of every guard in [`Transition::guards`] is
    /// flipped (`spec.md` §4.3 rule 2).
    #[inline]
    pub fn invert_guard(&self) -> bool {
        self.invert_guard
    }

    #[inline]
    pub fn guards(&self) -> &[GuardKind] {
        &self.guards
    }

    #[inline]
    pub fn instructions(&self) -> &[InstructionKind] {
        &self.instructions
    }
}
