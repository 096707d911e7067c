// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Pipeline progression state machine
//!
//! Tracks which step a project is on and which steps are complete. The
//! state is never persisted; it is reconstructed from the stored project
//! fields every time the project is loaded, so a reload always lands on a
//! consistent step.

use crate::project::Project;
use crate::step::Flow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Rejection returned for an out-of-order jump request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum JumpRejected {
    /// The target step lies past the first incomplete step
    #[error("step {target} is not reachable yet (furthest reachable step is {reachable})")]
    StepNotYetReachable { target: usize, reachable: usize },
}

/// Derived progression state: the active step index and the completed set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineState {
    pub current: usize,
    pub completed: BTreeSet<usize>,
}

impl PipelineState {
    /// Derive the state from a project's stored fields.
    ///
    /// Scans the flow in order, collecting satisfied steps until the first
    /// unsatisfied one; the cursor stops there, capped at the last step.
    /// Total over any project value.
    pub fn derive(flow: &Flow, project: &Project) -> Self {
        let mut completed = BTreeSet::new();
        let mut cursor = 0;
        for index in 0..flow.len() {
            if !flow.is_satisfied(index, project) {
                break;
            }
            completed.insert(index);
            cursor = index + 1;
        }
        Self {
            current: cursor.min(flow.last_index()),
            completed,
        }
    }

    /// Record `step` as completed and move to the step after it, clamped
    /// to the end of the flow. Idempotent in the completed set.
    pub fn advance_after_completing(&self, flow: &Flow, step: usize) -> Self {
        let mut completed = self.completed.clone();
        completed.insert(step);
        Self {
            current: (step + 1).min(flow.last_index()),
            completed,
        }
    }

    /// The furthest step index the user may move to: the step after the
    /// last completed one (clamped to the end of the flow), or the current
    /// step if a submission already moved past it
    pub fn reachable(&self, flow: &Flow) -> usize {
        let frontier = self
            .completed
            .iter()
            .next_back()
            .map_or(0, |max| max + 1)
            .min(flow.last_index());
        frontier.max(self.current)
    }

    /// Request a move to `target`.
    ///
    /// Any already-reached step (or the first incomplete one) is allowed;
    /// skipping ahead past the first incomplete step is rejected and the
    /// state is left untouched. Revisits never narrow reachability, so
    /// going back and returning is always possible.
    pub fn request_jump(&self, flow: &Flow, target: usize) -> Result<Self, JumpRejected> {
        let reachable = self.reachable(flow);
        if target > reachable {
            return Err(JumpRejected::StepNotYetReachable { target, reachable });
        }
        Ok(Self {
            current: target,
            completed: self.completed.clone(),
        })
    }

    /// Move one step back, stopping at the first step
    pub fn back(&self) -> Self {
        Self {
            current: self.current.saturating_sub(1),
            completed: self.completed.clone(),
        }
    }

    /// Completed fraction of the flow, for progress display
    pub fn progress(&self, flow: &Flow) -> f64 {
        if flow.is_empty() {
            return 0.0;
        }
        self.completed.len() as f64 / flow.len() as f64
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
