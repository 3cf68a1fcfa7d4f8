////////////////////////////////////////////////////////////////////////////
// This file is part of "stir", a STIR model loader and state-space         //
// explorer for partitioned-state model checking front-ends.                //
//                                                                          //
// Licensed under the MIT license or the Apache License, Version 2.0,       //
// at your option. See the LICENSE-MIT and LICENSE-APACHE files.            //
////////////////////////////////////////////////////////////////////////////

//! The transition × slot dependency matrix (`spec.md` §4.4): which slots
//! each transition reads or writes, handed to the exploration engine so it
//! can apply partial-order or locality optimisations.
//!
//! Dense and bit-packed per the design note in `spec.md` §9: model sizes
//! here are small (tens of slots), so a `Vec<u64>` of words per row is both
//! simple and O(1) amortised per membership check.

use crate::model::{InstructionKind, Model};

const WORD_BITS: usize = u64::BITS as usize;

/// A dense `M × N` boolean matrix, `M` transitions by `N` slots.
#[derive(Debug, Clone)]
pub struct DependencyMatrix {
    num_transitions: usize,
    num_slots: usize,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl DependencyMatrix {
    fn empty(num_transitions: usize, num_slots: usize) -> Self {
        let words_per_row = num_slots.div_ceil(WORD_BITS).max(1);
        Self {
            num_transitions,
            num_slots,
            words_per_row,
            bits: vec![0u64; num_transitions * words_per_row],
        }
    }

    fn set(&mut self, transition: usize, slot: usize) {
        let index = transition * self.words_per_row + slot / WORD_BITS;
        self.bits[index] |= 1u64 << (slot % WORD_BITS);
    }

    /// `D[t, s]`: whether transition `t`'s firing semantics touch slot `s`.
    pub fn get(&self, transition: usize, slot: usize) -> bool {
        let index = transition * self.words_per_row + slot / WORD_BITS;
        (self.bits[index] >> (slot % WORD_BITS)) & 1 != 0
    }

    #[inline]
    pub fn num_transitions(&self) -> usize {
        self.num_transitions
    }

    #[inline]
    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// All slots transition `t` touches, in ascending order.
    pub fn row(&self, transition: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_slots).filter(move |&slot| self.get(transition, slot))
    }
}

/// Builds the dependency matrix for `model` (`spec.md` §4.4).
pub fn build(model: &Model) -> DependencyMatrix {
    let mut matrix = DependencyMatrix::empty(model.num_transitions(), model.num_slots());

    for transition in model.transitions() {
        let row = transition.transition_id();

        // Read as the src-node test, written as the component-slot update.
        matrix.set(row, transition.component_slot_id());

        for guard in transition.guards() {
            matrix.set(row, guard.slot_id());
        }

        for instruction in transition.instructions() {
            // `Do` contributes nothing (spec.md §4.4).
            if let InstructionKind::SetBool { slot_id, .. } = instruction {
                matrix.set(row, *slot_id);
            }
        }
    }

    matrix
}
