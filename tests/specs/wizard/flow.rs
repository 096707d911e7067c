//! End-to-end wizard flow specs

use crate::prelude::*;
use mlc_core::{
    DateFeatures, FeaturePlan, ModelType, NumericalFeatures, Step, StepContent, TrainRequest,
};
use std::collections::BTreeSet;
use std::path::Path;

fn lag_plan() -> FeaturePlan {
    FeaturePlan {
        date_features: DateFeatures {
            month: true,
            ..DateFeatures::default()
        },
        numerical_features: NumericalFeatures {
            lag_periods: BTreeSet::from([1, 7]),
            ..NumericalFeatures::default()
        },
    }
}

/// The whole happy path: load data, map columns, generate features, train.
#[tokio::test]
async fn full_pipeline_walkthrough() {
    let harness = Harness::fresh();
    let mut wizard = harness.wizard().await;

    assert_eq!(wizard.current_step(), Some(Step::DataLoading));

    wizard.load_file(Path::new("sales.csv")).await.unwrap();
    assert_eq!(wizard.current_step(), Some(Step::ColumnMapping));

    wizard.save_mapping("date", "units", None).await.unwrap();
    assert_eq!(wizard.current_step(), Some(Step::FeatureGeneration));

    let report = wizard.generate_features(lag_plan()).await.unwrap();
    assert!(!report.generated_features.is_empty());
    assert_eq!(wizard.current_step(), Some(Step::ModelTraining));

    let record = wizard
        .train(0.2, 3, TrainRequest::new("baseline", ModelType::RandomForest))
        .await
        .unwrap();
    assert_eq!(record.name, "baseline");

    // Terminal step: still on training, free to retrain.
    assert_eq!(wizard.current_step(), Some(Step::ModelTraining));
    assert_eq!(wizard.state().completed, BTreeSet::from([0, 1, 2, 3]));
}

/// The persisted fields alone reproduce the session's position in a brand
/// new session.
#[tokio::test]
async fn progress_survives_a_new_session() {
    let harness = Harness::fresh();
    let mut wizard = harness.wizard().await;
    wizard.load_file(Path::new("sales.csv")).await.unwrap();
    wizard.save_mapping("date", "units", None).await.unwrap();

    let fresh_session = harness.wizard().await;
    assert_eq!(fresh_session.state().current, 2);
    assert_eq!(fresh_session.state().completed, BTreeSet::from([0, 1]));
}

/// Step content follows the cursor when revisiting earlier steps.
#[tokio::test]
async fn revisited_step_prefills_saved_values() {
    let harness = Harness::fresh();
    let mut wizard = harness.wizard().await;
    wizard.load_file(Path::new("sales.csv")).await.unwrap();
    wizard.save_mapping("date", "units", None).await.unwrap();

    wizard.jump(1).unwrap();
    match wizard.content().unwrap() {
        StepContent::ColumnMapping {
            date_column,
            value_column,
            ..
        } => {
            assert_eq!(date_column.as_deref(), Some("date"));
            assert_eq!(value_column.as_deref(), Some("units"));
        }
        other => panic!("expected column mapping, got {:?}", other),
    }
}
