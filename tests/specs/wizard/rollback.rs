//! Optimistic advancement rollback specs
//!
//! A failed persistence call must restore the exact pre-submission state,
//! never leave a partially-advanced one.

use crate::prelude::*;
use mlc_core::{
    DateFeatures, FeaturePlan, ModelType, NumericalFeatures, TrainRequest, WizardError,
};
use std::collections::BTreeSet;
use std::path::Path;

#[tokio::test]
async fn failed_mapping_persistence_restores_state() {
    let harness = Harness::with_project(project_with_source());
    let mut wizard = harness.wizard().await;
    // Preview cache is empty in this session, so mapping validation relies
    // on the backend; load the preview first.
    wizard.jump(0).unwrap();
    wizard.load_file(Path::new("sales.csv")).await.unwrap();

    let state_before = wizard.state().clone();
    let project_before = wizard.project().clone();
    harness.backend.set_update_fails(true);

    let result = wizard.save_mapping("date", "units", None).await;

    assert!(matches!(result, Err(WizardError::Backend(_))));
    assert_eq!(wizard.state(), &state_before);
    assert_eq!(wizard.project(), &project_before);
}

#[tokio::test]
async fn rollback_then_retry_succeeds() {
    let harness = Harness::fresh();
    let mut wizard = harness.wizard().await;

    harness.backend.set_update_fails(true);
    assert!(wizard.load_file(Path::new("sales.csv")).await.is_err());
    assert_eq!(wizard.state().current, 0);

    harness.backend.set_update_fails(false);
    wizard.load_file(Path::new("sales.csv")).await.unwrap();
    assert_eq!(wizard.state().current, 1);
    assert_eq!(wizard.state().completed, BTreeSet::from([0]));
}

#[tokio::test]
async fn failed_training_does_not_mark_the_step_complete() {
    let harness = Harness::with_project(project_with_mapping());
    let mut wizard = harness.wizard().await;
    wizard
        .generate_features(FeaturePlan {
            date_features: DateFeatures {
                month: true,
                ..DateFeatures::default()
            },
            numerical_features: NumericalFeatures::default(),
        })
        .await
        .unwrap();

    let before = wizard.state().clone();
    harness.backend.set_train_fails(true);

    let result = wizard
        .train(0.2, 3, TrainRequest::new("m", ModelType::RandomForest))
        .await;

    assert!(matches!(result, Err(WizardError::Backend(_))));
    assert_eq!(wizard.state(), &before);
    assert!(!wizard.state().completed.contains(&3));
}

/// The backend never saw a completed update, so a later derivation agrees
/// with the rolled-back session.
#[tokio::test]
async fn rollback_matches_fresh_derivation() {
    let harness = Harness::fresh();
    let mut wizard = harness.wizard().await;

    harness.backend.set_update_fails(true);
    assert!(wizard.load_file(Path::new("sales.csv")).await.is_err());
    harness.backend.set_update_fails(false);

    let fresh = harness.wizard().await;
    assert_eq!(wizard.state(), fresh.state());
}
