//! Memoized backward induction.
//!
//! `V(s, T+1) = 0` and
//! `V(s, t) = max_u [ reward(s, u) + V(transition(s, u), t+1) ]`
//! over the admissible joint actions `u`.
//!
//! Values are cached in a [`ValueTable`] owned by the caller for the
//! duration of one solve. Evaluation walks the reachable `(state, day)`
//! DAG with an explicit work-list in post order, so no call stack grows
//! with the horizon: a node is expanded once (successors pushed), and
//! reduced once all of its successors have values.

use std::collections::HashMap;

use crate::models::{FieldState, StateKey};

use super::{CropModel, SolveError};

/// Memo table of optimal values keyed by `(state, day)`.
///
/// Append-only: an entry, once written, is never changed. Days past the
/// horizon are terminal and read as 0 without being stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    horizon: i64,
    values: HashMap<StateKey, f64>,
}

impl ValueTable {
    /// Creates an empty table for a problem with the given horizon.
    pub fn new(horizon: i64) -> Self {
        Self {
            horizon,
            values: HashMap::new(),
        }
    }

    /// Cached value of `state` on `day`, if known.
    pub fn lookup(&self, state: &FieldState, day: i64) -> Option<f64> {
        if day > self.horizon {
            return Some(0.0);
        }
        self.values.get(&state.key(day)).copied()
    }

    /// Cached value for a precomputed key.
    pub fn get(&self, key: &StateKey) -> Option<f64> {
        if key.day() > self.horizon {
            return Some(0.0);
        }
        self.values.get(key).copied()
    }

    fn insert(&mut self, key: StateKey, value: f64) {
        let previous = self.values.insert(key, value);
        debug_assert!(previous.is_none(), "value table entry overwritten");
    }

    #[inline]
    pub fn horizon(&self) -> i64 {
        self.horizon
    }

    /// Number of stored (non-terminal) entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of stored entries for `day`.
    pub fn entries_on_day(&self, day: i64) -> usize {
        self.values.keys().filter(|k| k.day() == day).count()
    }
}

/// A node on the evaluation work-list.
struct Frame {
    key: StateKey,
    state: FieldState,
    day: i64,
    /// `(reward, next state)` per joint action, filled on expansion.
    successors: Option<Vec<(f64, FieldState)>>,
}

impl Frame {
    fn new(state: FieldState, day: i64) -> Self {
        Self {
            key: state.key(day),
            state,
            day,
            successors: None,
        }
    }
}

impl CropModel<'_> {
    /// Optimal total reward obtainable from `state` on `day` through the
    /// horizon, filling `table` with every reachable sub-result.
    ///
    /// Calling this again for a cached pair is a pure lookup.
    pub fn value(&self, table: &mut ValueTable, state: &FieldState, day: i64) -> Result<f64, SolveError> {
        if let Some(v) = table.lookup(state, day) {
            return Ok(v);
        }

        let before = table.len();
        let mut stack = vec![Frame::new(state.clone(), day)];

        while let Some(mut frame) = stack.pop() {
            if table.values.contains_key(&frame.key) {
                continue;
            }

            match frame.successors.take() {
                None => {
                    let sets = self.admissible_actions(&frame.state, frame.day);
                    let successors: Vec<(f64, FieldState)> = sets
                        .joint_actions()
                        .map(|u| (self.reward(&frame.state, &u), self.transition(&frame.state, &u)))
                        .collect();
                    if successors.is_empty() {
                        return Err(SolveError::NoFeasibleAction { day: frame.day });
                    }

                    let next_day = frame.day + 1;
                    let pending: Vec<Frame> = successors
                        .iter()
                        .filter(|(_, next)| table.lookup(next, next_day).is_none())
                        .map(|(_, next)| Frame::new(next.clone(), next_day))
                        .collect();

                    frame.successors = Some(successors);
                    stack.push(frame);
                    stack.extend(pending);
                }
                Some(successors) => {
                    let next_day = frame.day + 1;
                    let mut best: Option<f64> = None;
                    for (r, next) in &successors {
                        let continuation = table
                            .lookup(next, next_day)
                            .ok_or(SolveError::MissingValue { day: next_day })?;
                        let total = r + continuation;
                        if best.map_or(true, |b| total > b) {
                            best = Some(total);
                        }
                    }
                    let best = best.ok_or(SolveError::NoFeasibleAction { day: frame.day })?;
                    table.insert(frame.key, best);
                }
            }
        }

        tracing::debug!(
            day,
            new_entries = table.len() - before,
            total_entries = table.len(),
            "value table filled"
        );
        table.lookup(state, day).ok_or(SolveError::MissingValue { day })
    }
}
