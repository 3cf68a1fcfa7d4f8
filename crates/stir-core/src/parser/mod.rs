////////////////////////////////////////////////////////////////////////////
// This file is part of "stir", a STIR model loader and state-space         //
// explorer for partitioned-state model checking front-ends.                //
//                                                                          //
// Licensed under the MIT license or the Apache License, Version 2.0,       //
// at your option. See the LICENSE-MIT and LICENSE-APACHE files.            //
////////////////////////////////////////////////////////////////////////////

//! The STIR textual format parser.
//!
//! Converts a STIR document (`spec.md` §4.1) into a fully-populated
//! [`crate::model::Model`]. Every directive is mandatory: a missing keyword
//! or malformed number is a fatal parse failure, surfaced as
//! [`crate::error::StirError::Parse`] rather than aborting directly — see
//! the crate-level docs for why the abort policy lives at the binary
//! boundary instead.
//!
//! ```
//! use stir_core::parser::parse;
//!
//! let text = "state 1\n\
//!              slot 0 bool 0\n\
//!              transitions 0\n";
//! let model = parse(text).unwrap();
//! assert_eq!(model.num_slots(), 1);
//! assert_eq!(model.num_transitions(), 0);
//! ```

mod cursor;

use cursor::Cursor;

use crate::error::StirError;
use crate::model::{GuardKind, InstructionKind, Model, Slot, SlotType, State, Transition};

/// Parses a complete STIR document into a [`Model`].
///
/// The text buffer only needs to outlive this call: every scalar is copied
/// into the returned model, nothing borrows into `text`.
pub fn parse(text: &str) -> Result<Model, StirError> {
    let mut cursor = Cursor::new(text);
    let state = parse_state(&mut cursor)?;
    let transitions = parse_transitions(&mut cursor)?;
    Ok(Model::new(state, transitions))
}

fn parse_state(cursor: &mut Cursor<'_>) -> Result<State, StirError> {
    cursor.expect_keyword("state")?;
    let num_slots = cursor.parse_usize()?;
    cursor.expect_newline()?;

    let mut slots = Vec::with_capacity(num_slots);
    for _ in 0..num_slots {
        slots.push(parse_slot(cursor)?);
    }

    Ok(State::new(slots))
}

fn parse_slot(cursor: &mut Cursor<'_>) -> Result<Slot, StirError> {
    cursor.expect_keyword("slot")?;
    let slot_id = cursor.parse_usize()?;

    // The grammar tries `bool %d` first, then `node %d`; a slot whose body
    // matches neither is rejected (spec.md §4.1).
    let checkpoint = cursor.save();
    if cursor.expect_keyword("bool").is_ok() {
        let init_value = cursor.parse_i32()?;
        cursor.expect_newline()?;
        return Ok(Slot::new(slot_id, SlotType::Bool, init_value));
    }
    cursor.restore(checkpoint);

    if cursor.expect_keyword("node").is_ok() {
        let init_value = cursor.parse_i32()?;
        cursor.expect_newline()?;
        return Ok(Slot::new(slot_id, SlotType::Node, init_value));
    }

    Err(StirError::parse(
        cursor.offset(),
        format!("slot {slot_id} body is neither 'bool' nor 'node'"),
    ))
}

fn parse_transitions(cursor: &mut Cursor<'_>) -> Result<Vec<Transition>, StirError> {
    cursor.expect_keyword("transitions")?;
    let num_transitions = cursor.parse_usize()?;
    cursor.expect_newline()?;

    let mut transitions = Vec::with_capacity(num_transitions);
    for _ in 0..num_transitions {
        transitions.push(parse_transition(cursor)?);
    }

    Ok(transitions)
}

fn parse_transition(cursor: &mut Cursor<'_>) -> Result<Transition, StirError> {
    cursor.expect_keyword("transition")?;
    let transition_id = cursor.parse_usize()?;
    cursor.expect_keyword("component")?;
    let component_slot_id = cursor.parse_usize()?;
    cursor.expect_keyword("src")?;
    let src_node = cursor.parse_i32()?;
    cursor.expect_keyword("dst")?;
    let dst_node = cursor.parse_i32()?;
    cursor.expect_keyword("guards")?;
    let num_guards = cursor.parse_usize()?;
    let invert_guard = parse_invert_guard(cursor)?;
    cursor.expect_keyword("instructions")?;
    let num_instructions = cursor.parse_usize()?;
    cursor.expect_newline()?;

    let mut guards = Vec::with_capacity(num_guards);
    for _ in 0..num_guards {
        guards.push(parse_guard(cursor)?);
    }

    let mut instructions = Vec::with_capacity(num_instructions);
    for _ in 0..num_instructions {
        instructions.push(parse_instruction(cursor)?);
    }

    Ok(Transition::new(
        transition_id,
        component_slot_id,
        src_node,
        dst_node,
        invert_guard,
        guards,
        instructions,
    ))
}

fn parse_invert_guard(cursor: &mut Cursor<'_>) -> Result<bool, StirError> {
    let offset = cursor.offset();
    match cursor.parse_i32()? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StirError::parse(
            offset,
            format!("invert_guard must be 0 or 1, found '{other}'"),
        )),
    }
}

fn parse_guard(cursor: &mut Cursor<'_>) -> Result<GuardKind, StirError> {
    // Only `bool_guard` is recognized; every guard parsed receives
    // `type = BOOL` (spec.md §4.1). The `Int` guard variant is reserved
    // with no textual surface (spec.md §9).
    cursor.expect_keyword("bool_guard")?;
    let slot_id = cursor.parse_usize()?;
    let value = cursor.parse_i32()?;
    cursor.expect_newline()?;
    Ok(GuardKind::Bool { slot_id, value })
}

fn parse_instruction(cursor: &mut Cursor<'_>) -> Result<InstructionKind, StirError> {
    if cursor.starts_with("do_instr") {
        cursor.skip_rest_of_line();
        return Ok(InstructionKind::Do);
    }

    cursor.expect_keyword("set_bool_instr")?;
    let slot_id = cursor.parse_usize()?;
    let value = cursor.parse_i32()?;
    cursor.expect_newline()?;
    Ok(InstructionKind::SetBool { slot_id, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_two_slot_model() {
        // Scenario E2 from spec.md §8.
        let text = "state 2\n\
                     slot 0 node 0\n\
                     slot 1 bool 0\n\
                     transitions 1\n\
                     transition 0 component 0 src 0 dst 1 guards 1 0 instructions 1\n\
                     bool_guard 1 1\n\
                     set_bool_instr 1 0\n";

        let model = parse(text).unwrap();
        assert_eq!(model.num_slots(), 2);
        assert_eq!(model.num_transitions(), 1);

        let slot0 = &model.state().slots()[0];
        assert_eq!(slot0.slot_id(), 0);
        assert_eq!(slot0.slot_type(), SlotType::Node);

        let transition = &model.transitions()[0];
        assert_eq!(transition.transition_id(), 0);
        assert_eq!(transition.component_slot_id(), 0);
        assert_eq!(transition.src_node(), 0);
        assert_eq!(transition.dst_node(), 1);
        assert!(!transition.invert_guard());
        assert_eq!(transition.guards().len(), 1);
        assert_eq!(transition.instructions().len(), 1);
    }

    #[test]
    fn do_instr_consumes_opaque_rest_of_line() {
        let text = "state 1\n\
                     slot 0 node 0\n\
                     transitions 1\n\
                     transition 0 component 0 src 0 dst 0 guards 0 0 instructions 1\n\
                     do_instr whatever trailing tokens appear here\n";

        let model = parse(text).unwrap();
        assert_eq!(model.transitions()[0].instructions(), &[InstructionKind::Do]);
    }

    #[test]
    fn rejects_slot_body_that_is_neither_bool_nor_node() {
        let text = "state 1\n\
                     slot 0 int 0\n\
                     transitions 0\n";

        let err = parse(text).unwrap_err();
        assert!(matches!(err, StirError::Parse { .. }));
    }

    #[test]
    fn rejects_unknown_instruction_prefix() {
        let text = "state 1\n\
                     slot 0 bool 0\n\
                     transitions 1\n\
                     transition 0 component 0 src 0 dst 0 guards 0 0 instructions 1\n\
                     frobnicate 0 0\n";

        let err = parse(text).unwrap_err();
        assert!(matches!(err, StirError::Parse { .. }));
    }

    #[test]
    fn rejects_malformed_header() {
        let err = parse("state not-a-number\n").unwrap_err();
        assert!(matches!(err, StirError::Parse { .. }));
    }

    #[test]
    fn round_trips_declared_ids() {
        // Testable property 1 (spec.md §8): declared slot/transition ids
        // match their parsed positions.
        let text = "state 3\n\
                     slot 0 node 0\n\
                     slot 1 node 0\n\
                     slot 2 bool 0\n\
                     transitions 2\n\
                     transition 0 component 0 src 0 dst 1 guards 0 0 instructions 0\n\
                     transition 1 component 1 src 0 dst 1 guards 0 1 instructions 0\n";

        let model = parse(text).unwrap();
        for (position, slot) in model.state().slots().iter().enumerate() {
            assert_eq!(slot.slot_id(), position);
        }
        for (position, transition) in model.transitions().iter().enumerate() {
            assert_eq!(transition.transition_id(), position);
        }
        model.validate().unwrap();
    }
}
