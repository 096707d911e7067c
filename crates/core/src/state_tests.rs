// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

use super::*;
use crate::features::{DateFeatures, NumericalFeatures};
use crate::project::SourceType;
use crate::step::Step;
use std::collections::BTreeSet;

fn flow() -> Flow {
    Flow::STANDARD
}

/// Project with every field through `steps` satisfied, in flow order.
fn project_through(steps: usize) -> Project {
    let mut project = Project::new(1, "test");
    if steps >= 1 {
        project.source_type = Some(SourceType::File);
    }
    if steps >= 2 {
        project.date_column = Some("date".to_string());
        project.value_column = Some("units".to_string());
    }
    if steps >= 3 {
        project.date_features = Some(DateFeatures {
            month: true,
            ..DateFeatures::default()
        });
    }
    project
}

#[test]
fn fresh_project_starts_at_zero() {
    let state = PipelineState::derive(&flow(), &project_through(0));
    assert_eq!(state.current, 0);
    assert!(state.completed.is_empty());
}

#[test]
fn derive_walks_satisfied_prefix() {
    let state = PipelineState::derive(&flow(), &project_through(1));
    assert_eq!(state.current, 1);
    assert_eq!(state.completed, BTreeSet::from([0]));

    let state = PipelineState::derive(&flow(), &project_through(2));
    assert_eq!(state.current, 2);
    assert_eq!(state.completed, BTreeSet::from([0, 1]));

    let state = PipelineState::derive(&flow(), &project_through(3));
    assert_eq!(state.current, 3);
    assert_eq!(state.completed, BTreeSet::from([0, 1, 2]));
}

#[test]
fn derive_stops_at_first_gap() {
    // Columns mapped but no source recorded: the gap is step 0, so the
    // later fields contribute nothing.
    let mut project = Project::new(1, "test");
    project.date_column = Some("date".to_string());
    project.value_column = Some("units".to_string());

    let state = PipelineState::derive(&flow(), &project);
    assert_eq!(state.current, 0);
    assert!(state.completed.is_empty());
}

#[test]
fn derive_caps_current_at_terminal_step() {
    let state = PipelineState::derive(&flow(), &project_through(3));
    assert_eq!(state.current, flow().last_index());
}

#[test]
fn derive_on_extended_flow_passes_optional_steps() {
    // Additional files never gate; aggregation does until configured.
    let project = project_through(1);
    let state = PipelineState::derive(&Flow::EXTENDED, &project);

    assert_eq!(
        Flow::EXTENDED.step(state.current),
        Some(Step::ColumnMapping)
    );
    assert_eq!(state.completed, BTreeSet::from([0, 1]));
}

#[test]
fn advance_moves_to_next_step() {
    let state = PipelineState::derive(&flow(), &project_through(0));
    let state = state.advance_after_completing(&flow(), 0);

    assert_eq!(state.current, 1);
    assert_eq!(state.completed, BTreeSet::from([0]));
}

#[test]
fn advance_clamps_at_terminal_step() {
    let state = PipelineState::derive(&flow(), &project_through(3));
    let state = state.advance_after_completing(&flow(), 3);

    assert_eq!(state.current, 3);
    assert!(state.completed.contains(&3));
}

#[test]
fn advance_is_idempotent() {
    let state = PipelineState::derive(&flow(), &project_through(1));
    let once = state.advance_after_completing(&flow(), 1);
    let twice = once.advance_after_completing(&flow(), 1);

    assert_eq!(once, twice);
}

#[test]
fn jump_back_keeps_completed_set() {
    let state = PipelineState::derive(&flow(), &project_through(2));
    let jumped = state.request_jump(&flow(), 0).unwrap();

    assert_eq!(jumped.current, 0);
    assert_eq!(jumped.completed, state.completed);
}

#[test]
fn jump_ahead_is_rejected() {
    let state = PipelineState::derive(&flow(), &project_through(1));
    let result = state.request_jump(&flow(), 3);

    assert_eq!(
        result,
        Err(JumpRejected::StepNotYetReachable {
            target: 3,
            reachable: 1
        })
    );
}

#[test]
fn jump_back_and_return_round_trips() {
    let state = PipelineState::derive(&flow(), &project_through(2));
    let back = state.request_jump(&flow(), 0).unwrap();
    let forward = back.request_jump(&flow(), 2).unwrap();

    assert_eq!(forward.current, 2);
    assert_eq!(forward.completed, state.completed);
}

#[test]
fn back_saturates_at_first_step() {
    let state = PipelineState::derive(&flow(), &project_through(0));
    assert_eq!(state.back().current, 0);
}

#[test]
fn progress_is_completed_fraction() {
    let state = PipelineState::derive(&flow(), &project_through(2));
    let progress = state.progress(&flow());
    assert!((progress - 0.5).abs() < f64::EPSILON);
}

use yare::parameterized;

#[parameterized(
        revisit_first = { 2, 0, true },
        revisit_middle = { 2, 1, true },
        stay_put = { 2, 2, true },
        one_ahead = { 2, 3, false },
        fresh_cannot_skip = { 0, 1, false },
        fresh_stays = { 0, 0, true },
    )]
fn jump_reachability(satisfied_through: usize, target: usize, allowed: bool) {
    let state = PipelineState::derive(&flow(), &project_through(satisfied_through));

    match state.request_jump(&flow(), target) {
        Ok(jumped) => {
            assert!(allowed, "jump to {} should have been rejected", target);
            assert_eq!(jumped.current, target);
        }
        Err(JumpRejected::StepNotYetReachable { .. }) => {
            assert!(!allowed, "jump to {} should have been allowed", target);
        }
    }
}

// Property tests

use proptest::prelude::*;

fn arb_project() -> impl Strategy<Value = Project> {
    (
        proptest::bool::ANY,
        proptest::option::of("[a-z]{0,8}"),
        proptest::option::of("[a-z]{0,8}"),
        proptest::bool::ANY,
        proptest::collection::btree_set(1u32..24, 0..4),
    )
        .prop_map(|(source, date, value, month, lags)| {
            let mut project = Project::new(9, "arb");
            if source {
                project.source_type = Some(SourceType::File);
            }
            project.date_column = date;
            project.value_column = value;
            if month {
                project.date_features = Some(DateFeatures {
                    month: true,
                    ..DateFeatures::default()
                });
            }
            if !lags.is_empty() {
                project.numerical_features = Some(NumericalFeatures {
                    lag_periods: lags,
                    ..NumericalFeatures::default()
                });
            }
            project
        })
}

proptest! {
    #[test]
    fn derive_completed_is_always_a_prefix(project in arb_project()) {
        let state = PipelineState::derive(&flow(), &project);

        for index in 0..state.completed.len() {
            prop_assert!(state.completed.contains(&index), "gap at {}", index);
        }
        prop_assert_eq!(state.current.min(flow().last_index()), state.current);
        prop_assert!(state.current <= state.completed.len());
    }

    #[test]
    fn jump_preserves_reachability(project in arb_project(), target in 0usize..8) {
        let state = PipelineState::derive(&flow(), &project);

        if let Ok(jumped) = state.request_jump(&flow(), target) {
            prop_assert_eq!(jumped.completed.clone(), state.completed.clone());
            prop_assert_eq!(jumped.reachable(&flow()), state.reachable(&flow()));
        }
    }
}
