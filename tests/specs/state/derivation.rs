//! State derivation specs
//!
//! The derived pipeline position must be reconstructible from project
//! fields alone, every time.

use crate::prelude::*;
use mlc_core::{Flow, PipelineState, Project, ProjectBackend, ProjectPatch};
use std::collections::BTreeSet;

#[test]
fn empty_project_derives_to_step_zero() {
    let state = PipelineState::derive(&Flow::STANDARD, &Project::new(1, "empty"));

    assert_eq!(state.current, 0);
    assert_eq!(state.completed, BTreeSet::new());
}

#[test]
fn satisfied_prefix_derives_to_first_gap() {
    let state = PipelineState::derive(&Flow::STANDARD, &project_with_source());
    assert_eq!(state.current, 1);
    assert_eq!(state.completed, BTreeSet::from([0]));

    let state = PipelineState::derive(&Flow::STANDARD, &project_with_mapping());
    assert_eq!(state.current, 2);
    assert_eq!(state.completed, BTreeSet::from([0, 1]));
}

/// The scenario from the wizard's point of view: each saved field set moves
/// the derived position exactly one step.
#[tokio::test]
async fn derivation_follows_persisted_fields() {
    let harness = Harness::fresh();

    let wizard = harness.wizard().await;
    assert_eq!(wizard.state().current, 0);
    assert!(wizard.state().completed.is_empty());

    harness
        .backend
        .update_project(harness.id, &ProjectPatch::file_source("uploads/x.csv"))
        .await
        .unwrap();
    let wizard = harness.wizard().await;
    assert_eq!(wizard.state().current, 1);
    assert_eq!(wizard.state().completed, BTreeSet::from([0]));

    harness
        .backend
        .update_project(
            harness.id,
            &ProjectPatch::column_mapping("date", "sales", None),
        )
        .await
        .unwrap();
    let wizard = harness.wizard().await;
    assert_eq!(wizard.state().current, 2);
    assert_eq!(wizard.state().completed, BTreeSet::from([0, 1]));
}

/// Two loads of the same project agree, regardless of what any earlier
/// session did locally.
#[tokio::test]
async fn derivation_is_deterministic_across_sessions() {
    let harness = Harness::with_project(project_with_mapping());

    let first = harness.wizard().await;
    let second = harness.wizard().await;

    assert_eq!(first.state(), second.state());
}
