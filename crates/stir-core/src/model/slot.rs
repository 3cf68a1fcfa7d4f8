////////////////////////////////////////////////////////////////////////////
// This file is part of "stir", a STIR model loader and state-space         //
// explorer for partitioned-state model checking front-ends.                //
//                                                                          //
// Licensed under the MIT license or the Apache License, Version 2.0,       //
// at your option. See the LICENSE-MIT and LICENSE-APACHE files.            //
////////////////////////////////////////////////////////////////////////////

/// The native width of every slot value, guard value, and dumped state
/// vector record. Matches the original PINS plugin's `int` (4 bytes,
/// platform-native byte order), not a pointer-width machine word.
pub type StateValue = i32;

/// The declared type of a [`Slot`].
///
/// `Int` is reserved: the data model carries it so a future parser
/// extension is additive, but the STIR grammar never produces it (see
/// `spec.md` §1 Non-goals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotType {
    /// A slot whose observed values are always `0` or `1`.
    Bool,
    /// A slot that advances one component's finite-state machine.
    Node,
    /// Reserved; no textual surface parses this variant today.
    Int,
}

/// A named location holding a small signed integer.
///
/// `slot_id` is also this slot's position in the global state vector and in
/// the model's slot array — [`crate::model::Model::validate`] checks that
/// invariant rather than assuming it silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    slot_id: usize,
    ty: SlotType,
    init_value: StateValue,
}

impl Slot {
    /// Builds a slot. Not exported outside the crate: only the parser
    /// constructs slots, to keep `slot_id` trustworthy.
    pub(crate) fn new(slot_id: usize, ty: SlotType, init_value: StateValue) -> Self {
        Self {
            slot_id,
            ty,
            init_value,
        }
    }

    /// The slot's unique, nonnegative index.
    #[inline]
    pub fn slot_id(&self) -> usize {
        self.slot_id
    }

    /// The slot's declared type.
    #[inline]
    pub fn slot_type(&self) -> SlotType {
        self.ty
    }

    /// The slot's value in the model's initial global state.
    #[inline]
    pub fn init_value(&self) -> StateValue {
        self.init_value
    }
}
