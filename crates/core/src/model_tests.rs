// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

use super::*;
use serde_json::json;

#[test]
fn train_request_omits_absent_parameters() {
    let request = TrainRequest::new("baseline", ModelType::LinearRegression);
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(
        body,
        json!({ "name": "baseline", "model_type": "linear_regression" })
    );
}

#[test]
fn train_request_carries_parameters() {
    let request = TrainRequest::new("forest", ModelType::RandomForest)
        .with_parameters(json!({ "n_estimators": 200, "max_depth": 8 }));
    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["parameters"]["n_estimators"], json!(200));
}

#[test]
fn record_decodes_nested_metrics() {
    let record: ModelRecord = serde_json::from_value(json!({
        "id": 11,
        "name": "forest",
        "model_type": "random_forest",
        "metrics": {
            "train": { "mse": 1.2, "mae": 0.8, "r2": 0.93 },
            "test": { "mse": 2.4, "mae": 1.1, "r2": 0.88 },
            "cv_mean": 0.9,
            "cv_std": 0.02
        },
        "created_at": "2026-02-01T12:00:00Z"
    }))
    .unwrap();

    let metrics = record.metrics.unwrap();
    assert_eq!(metrics.cv_mean, Some(0.9));
    assert_eq!(metrics.test.map(|m| m.r2), Some(0.88));
}

#[test]
fn record_tolerates_malformed_metrics() {
    let record: ModelRecord = serde_json::from_value(json!({
        "id": 12,
        "name": "broken",
        "model_type": "linear_regression",
        "metrics": "n/a"
    }))
    .unwrap();

    assert_eq!(record.metrics, None);
}
