//! Jump reachability specs

use crate::prelude::*;
use mlc_core::JumpRejected;

#[tokio::test]
async fn any_reached_step_is_revisitable() {
    let harness = Harness::with_project(project_with_mapping());
    let mut wizard = harness.wizard().await;

    for target in [0, 1, 2] {
        wizard.jump(target).unwrap();
        assert_eq!(wizard.state().current, target);
        // Completed steps survive every revisit.
        assert_eq!(wizard.state().completed.len(), 2);
        wizard.jump(2).unwrap();
    }
}

#[tokio::test]
async fn skipping_ahead_is_rejected_without_mutation() {
    let harness = Harness::with_project(project_with_source());
    let mut wizard = harness.wizard().await;
    let before = wizard.state().clone();

    for target in [2, 3, 7] {
        let result = wizard.jump(target);
        assert!(matches!(
            result,
            Err(JumpRejected::StepNotYetReachable { .. })
        ));
        assert_eq!(wizard.state(), &before, "rejected jump must not mutate");
    }
}

#[tokio::test]
async fn back_walks_one_step() {
    let harness = Harness::with_project(project_with_mapping());
    let mut wizard = harness.wizard().await;

    assert_eq!(wizard.state().current, 2);
    wizard.back();
    assert_eq!(wizard.state().current, 1);
    wizard.back();
    wizard.back();
    assert_eq!(wizard.state().current, 0, "back saturates at the start");
}
