////////////////////////////////////////////////////////////////////////////
// This file is part of "stir", a STIR model loader and state-space         //
// explorer for partitioned-state model checking front-ends.                //
//                                                                          //
// Licensed under the MIT license or the Apache License, Version 2.0,       //
// at your option. See the LICENSE-MIT and LICENSE-APACHE files.            //
////////////////////////////////////////////////////////////////////////////

//! A small breadth-first state-space explorer.
//!
//! `spec.md` puts the real exploration engine — its scheduler, state
//! hashing, and work queueing — out of scope as an external collaborator
//! (§1). [`BfsExplorer`] is a stand-in: it drives [`crate::adapter::PinsAdapter`]
//! level by level, parallelizing the evaluator calls for one BFS level
//! across a fixed worker pool, so `stir-loader` and the test suite have
//! something to actually run without linking against a real PINS host.
//!
//! Per `spec.md` §4.5/§6, *every* successful `next_state` emission is
//! appended to the dump, including repeats of an already-visited
//! destination — only genuinely new states get added to the frontier and
//! explored further.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::adapter::{DumpSink, PinsAdapter};
use crate::error::StirError;
use crate::model::{Model, StateValue};

/// Summary counters returned once exploration reaches a fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExploreStats {
    /// Number of distinct reachable global states, including the initial
    /// state.
    pub distinct_states: usize,
    /// Number of records appended to the dump, including the initial-state
    /// emission (`spec.md` §4.5/§6, testable property 6).
    pub emitted_states: usize,
}

/// Drives [`PinsAdapter`] to a fixed point over `model`'s reachable states,
/// appending every emission to `sink`.
pub struct BfsExplorer {
    num_workers: usize,
}

impl BfsExplorer {
    /// `num_workers` is clamped to at least `1`.
    pub fn new(num_workers: usize) -> Self {
        Self {
            num_workers: num_workers.max(1),
        }
    }

    pub fn run(&self, model: &Model, sink: &dyn DumpSink) -> Result<ExploreStats, StirError> {
        let adapter = PinsAdapter::new(model);
        let initial = adapter.initial_state();

        // The initial state is appended before any successor is computed
        // (spec.md §8 scenario E6).
        sink.write_state(&initial)?;

        let mut visited: HashSet<Vec<StateValue>> = HashSet::new();
        visited.insert(initial.clone());
        let mut frontier = vec![initial];
        let num_transitions = model.num_transitions();
        let mut emitted_states = 1usize;

        while !frontier.is_empty() {
            let chunks = partition(&frontier, self.num_workers);
            let error_slot: Mutex<Option<StirError>> = Mutex::new(None);

            let discovered: Vec<Vec<StateValue>> = std::thread::scope(|scope| {
                let handles: Vec<_> = chunks
                    .into_iter()
                    .map(|chunk| {
                        let adapter = &adapter;
                        let error_slot = &error_slot;
                        scope.spawn(move || {
                            let mut scratch = Vec::new();
                            let mut local_discovered = Vec::new();

                            for state in chunk {
                                for group in 0..num_transitions {
                                    let mut fired_state: Option<Vec<StateValue>> = None;
                                    adapter.next_state(group, state, &mut scratch, |dst| {
                                        fired_state = Some(dst.to_vec());
                                    });

                                    let Some(dst) = fired_state else {
                                        continue;
                                    };

                                    if let Err(err) = sink.write_state(&dst) {
                                        let mut slot = error_slot.lock().unwrap_or_else(|p| p.into_inner());
                                        if slot.is_none() {
                                            *slot = Some(err);
                                        }
                                    }

                                    local_discovered.push(dst);
                                }
                            }

                            local_discovered
                        })
                    })
                    .collect();

                handles
                    .into_iter()
                    .flat_map(|handle| handle.join().expect("explorer worker panicked"))
                    .collect()
            });

            if let Some(err) = error_slot.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner()) {
                return Err(err);
            }

            emitted_states += discovered.len();

            let mut next_frontier = Vec::new();
            for state in discovered {
                if visited.insert(state.clone()) {
                    next_frontier.push(state);
                }
            }
            frontier = next_frontier;
        }

        sink.finish()?;

        Ok(ExploreStats {
            distinct_states: visited.len(),
            emitted_states,
        })
    }
}

/// Splits `items` into at most `num_chunks` roughly-equal, non-overlapping
/// slices, preserving order.
fn partition<T>(items: &[T], num_chunks: usize) -> Vec<&[T]> {
    if items.is_empty() {
        return Vec::new();
    }

    let chunk_size = items.len().div_ceil(num_chunks).max(1);
    items.chunks(chunk_size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StateValue;
    use crate::parser::parse;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct RecordingSink {
        records: StdMutex<Vec<Vec<StateValue>>>,
    }

    impl DumpSink for RecordingSink {
        fn write_state(&self, state: &[StateValue]) -> Result<(), StirError> {
            self.records.lock().unwrap().push(state.to_vec());
            Ok(())
        }

        fn finish(&self) -> Result<(), StirError> {
            Ok(())
        }
    }

    #[test]
    fn e6_initial_state_is_emitted_before_any_successor() {
        let model = parse(
            "state 1\n\
             slot 0 node 0\n\
             transitions 1\n\
             transition 0 component 0 src 0 dst 1 guards 0 0 instructions 0\n",
        )
        .unwrap();

        let sink = RecordingSink::default();
        BfsExplorer::new(2).run(&model, &sink).unwrap();

        let records = sink.records.lock().unwrap();
        assert_eq!(records[0], vec![0]);
    }

    #[test]
    fn e1_dining_philosophers_never_reach_two_adjacent_holding() {
        // Two philosophers sharing one fork-available flag: both taking at
        // once is never reachable.
        let model = parse(
            "state 3\n\
             slot 0 node 0\n\
             slot 1 node 0\n\
             slot 2 bool 1\n\
             transitions 4\n\
             transition 0 component 0 src 0 dst 1 guards 1 0 instructions 1\n\
             bool_guard 2 1\n\
             set_bool_instr 2 0\n\
             transition 1 component 0 src 1 dst 0 guards 0 0 instructions 1\n\
             set_bool_instr 2 1\n\
             transition 2 component 1 src 0 dst 1 guards 1 0 instructions 1\n\
             bool_guard 2 1\n\
             set_bool_instr 2 0\n\
             transition 3 component 1 src 1 dst 0 guards 0 0 instructions 1\n\
             set_bool_instr 2 1\n",
        )
        .unwrap();

        let sink = RecordingSink::default();
        let stats = BfsExplorer::new(3).run(&model, &sink).unwrap();

        assert!(stats.distinct_states > 1);
        let records = sink.records.lock().unwrap();
        for state in records.iter() {
            assert!(
                !(state[0] == 1 && state[1] == 1),
                "both philosophers took the shared fork simultaneously: {state:?}"
            );
        }
    }

    #[test]
    fn dump_length_matches_emitted_count() {
        let model = parse(
            "state 1\n\
             slot 0 node 0\n\
             transitions 1\n\
             transition 0 component 0 src 0 dst 1 guards 0 0 instructions 0\n",
        )
        .unwrap();

        let sink = RecordingSink::default();
        let stats = BfsExplorer::new(4).run(&model, &sink).unwrap();

        assert_eq!(sink.records.lock().unwrap().len(), stats.emitted_states);
    }
}
