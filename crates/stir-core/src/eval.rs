////////////////////////////////////////////////////////////////////////////
// This file is part of "stir", a STIR model loader and state-space         //
// explorer for partitioned-state model checking front-ends.                //
//                                                                          //
// Licensed under the MIT license or the Apache License, Version 2.0,       //
// at your option. See the LICENSE-MIT and LICENSE-APACHE files.            //
////////////////////////////////////////////////////////////////////////////

//! The transition evaluator: a pure function of its inputs (`spec.md` §4.3,
//! §5). Safe to call concurrently from many worker threads because the only
//! mutable state per call is the destination vector the caller supplies.

use crate::model::{InstructionKind, Model, StateValue, Transition};

/// Decides whether `transition` is enabled at `src` (`spec.md` §4.3 rule 1-2).
pub fn is_enabled(transition: &Transition, src: &[StateValue]) -> bool {
    if src[transition.component_slot_id()] != transition.src_node() {
        return false;
    }

    transition.guards().iter().all(|guard| {
        let matches = src[guard.slot_id()] == guard.value();
        matches != transition.invert_guard()
    })
}

/// Writes `transition`'s successor state into `dst`, assuming `transition`
/// is already known to be [`is_enabled`] at `src`.
///
/// `dst` is overwritten in full; it does not need to start as a copy of
/// `src`, but it must have the same length. This is the zero-allocation hot
/// path the per-worker scratch vector in [`crate::adapter`] calls into
/// directly (`spec.md` §9 "Thread-local scratch").
pub fn fire_into(transition: &Transition, src: &[StateValue], dst: &mut [StateValue]) {
    dst.copy_from_slice(src);
    dst[transition.component_slot_id()] = transition.dst_node();

    for instruction in transition.instructions() {
        if let InstructionKind::SetBool { slot_id, value } = instruction {
            dst[*slot_id] = *value;
        }
    }
}

/// Given a source global state and a transition index, decides enabledness
/// and produces the successor state (`spec.md` §4.3).
///
/// Pure: calling this twice with the same arguments yields byte-identical
/// results, and `src` is never mutated (testable property 2, `spec.md` §8).
pub fn next(model: &Model, src: &[StateValue], transition_index: usize) -> Option<Vec<StateValue>> {
    let transition = &model.transitions()[transition_index];

    if !is_enabled(transition, src) {
        return None;
    }

    let mut dst = src.to_vec();
    fire_into(transition, src, &mut dst);
    Some(dst)
}
