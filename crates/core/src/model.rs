// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Trained model records

use crate::project::lenient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supported model families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    RandomForest,
    LinearRegression,
}

impl ModelType {
    pub fn name(&self) -> &'static str {
        match self {
            ModelType::RandomForest => "random_forest",
            ModelType::LinearRegression => "linear_regression",
        }
    }
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Request body for training a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainRequest {
    pub name: String,
    pub model_type: ModelType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

impl TrainRequest {
    pub fn new(name: impl Into<String>, model_type: ModelType) -> Self {
        Self {
            name: name.into(),
            model_type,
            parameters: None,
        }
    }

    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// One evaluation split's metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub mse: f64,
    pub mae: f64,
    pub r2: f64,
}

/// Metrics reported by the backend for a trained model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelMetrics {
    pub train: Option<MetricSet>,
    pub test: Option<MetricSet>,
    pub cv_mean: Option<f64>,
    pub cv_std: Option<f64>,
}

/// A trained model as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRecord {
    pub id: i64,
    pub name: String,
    pub model_type: ModelType,
    #[serde(default, deserialize_with = "lenient")]
    pub parameters: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub metrics: Option<ModelMetrics>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
