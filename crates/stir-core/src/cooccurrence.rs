////////////////////////////////////////////////////////////////////////////
// This file is part of "stir", a STIR model loader and state-space         //
// explorer for partitioned-state model checking front-ends.                //
//                                                                          //
// Licensed under the MIT license or the Apache License, Version 2.0,       //
// at your option. See the LICENSE-MIT and LICENSE-APACHE files.            //
////////////////////////////////////////////////////////////////////////////

//! The co-occurrence projection (`spec.md` §4.6): consolidates a stream of
//! visited global states into the set of `(slot1, value1, slot2, value2)`
//! tuples that co-occurred in at least one reachable state.
//!
//! `export.c`, the plugin this crate is modeled on, bounds its emission
//! loops with strict `<` against the maximum observed node value, which
//! silently drops every row where a value equals that maximum. `spec.md`
//! §9 flags this as an open question and recommends a corrected
//! implementation use `≤`; this module takes the correction (see
//! `DESIGN.md`).

use std::io::{self, Write};
use std::mem::size_of;

use serde::Serialize;

use crate::error::StirError;
use crate::model::{Model, SlotType, StateValue};

/// One row of the projection: two (slot, value) pairs that co-occurred in
/// at least one reachable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CooccurrenceRow {
    pub slot1: usize,
    pub value1: StateValue,
    pub slot2: usize,
    pub value2: StateValue,
}

/// A dense `K × V × K × V` cube of booleans, where `K` is the number of NODE
/// slots and `V` is one greater than the largest observed node value.
struct Cube {
    num_node_slots: usize,
    value_span: usize,
    bits: Vec<bool>,
}

impl Cube {
    fn new(num_node_slots: usize, value_span: usize) -> Self {
        Self {
            num_node_slots,
            value_span,
            bits: vec![false; num_node_slots * value_span * num_node_slots * value_span],
        }
    }

    fn index(&self, i: usize, vi: usize, j: usize, vj: usize) -> usize {
        ((i * self.value_span + vi) * self.num_node_slots + j) * self.value_span + vj
    }

    fn set(&mut self, i: usize, vi: usize, j: usize, vj: usize) {
        let index = self.index(i, vi, j, vj);
        self.bits[index] = true;
    }

    fn get(&self, i: usize, vi: usize, j: usize, vj: usize) -> bool {
        self.bits[self.index(i, vi, j, vj)]
    }
}

/// Reads the `N`-wide `i32` records from `dump`, where `N = model.num_slots()`.
///
/// Extra trailing bytes that don't complete a full record are ignored,
/// mirroring the original plugin's `bin_length / (sizeof(int) * N)` record
/// count.
pub fn read_dump_states(model: &Model, dump: &[u8]) -> Vec<Vec<StateValue>> {
    let n = model.num_slots();
    if n == 0 {
        return Vec::new();
    }

    let record_bytes = n * size_of::<StateValue>();
    let num_records = dump.len() / record_bytes;

    let mut states = Vec::with_capacity(num_records);
    for record in 0..num_records {
        let start = record * record_bytes;
        let mut state = Vec::with_capacity(n);
        for slot in 0..n {
            let offset = start + slot * size_of::<StateValue>();
            let bytes: [u8; size_of::<StateValue>()] =
                dump[offset..offset + size_of::<StateValue>()].try_into().unwrap();
            state.push(StateValue::from_ne_bytes(bytes));
        }
        states.push(state);
    }
    states
}

/// Projects a stream of visited global states down to the set of
/// `(slot1, value1, slot2, value2)` tuples that co-occur in at least one of
/// them (`spec.md` §4.6).
pub fn project<'s>(model: &Model, states: impl IntoIterator<Item = &'s [StateValue]>) -> Vec<CooccurrenceRow> {
    let node_slots: Vec<usize> = model
        .state()
        .slots()
        .iter()
        .filter(|slot| slot.slot_type() == SlotType::Node)
        .map(|slot| slot.slot_id())
        .collect();
    let k = node_slots.len();

    let mut max_node_value: StateValue = 0;
    for slot in model.node_slots() {
        max_node_value = max_node_value.max(slot.init_value());
    }
    for transition in model.transitions() {
        max_node_value = max_node_value.max(transition.dst_node());
    }
    let value_span = (max_node_value as usize) + 1;

    let mut cube = Cube::new(k, value_span);

    for state in states {
        for i in 0..k {
            let vi = state[node_slots[i]] as usize;
            for j in 0..k {
                if i == j {
                    continue;
                }
                let vj = state[node_slots[j]] as usize;
                cube.set(i, vi, j, vj);
            }
        }
    }

    let mut rows = Vec::new();
    for i in 0..k {
        // Corrected inclusive bound (spec.md §9 OQ2): the original drops
        // `value == max_node_value`.
        for vi in 0..value_span {
            for j in 0..k {
                for vj in 0..value_span {
                    if cube.get(i, vi, j, vj) {
                        rows.push(CooccurrenceRow {
                            slot1: node_slots[i],
                            value1: vi as StateValue,
                            slot2: node_slots[j],
                            value2: vj as StateValue,
                        });
                    }
                }
            }
        }
    }

    rows
}

/// Writes `rows` as CSV with header `slot1,value1,slot2,value2` to `out`
/// (`spec.md` §6: LF line terminators, unpadded integers).
pub fn write_csv(rows: &[CooccurrenceRow], out: impl Write) -> Result<(), StirError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    for row in rows {
        writer
            .serialize(row)
            .map_err(|err| StirError::resource("failed to write CSV row", io::Error::other(err)))?;
    }

    writer
        .flush()
        .map_err(|source| StirError::resource("failed to flush CSV output", source))
}
