// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Project record and partial updates
//!
//! A project is the persisted configuration for one pipeline run. Every
//! progression field is optional until its wizard step completes, and a
//! field the backend sends in an unexpected shape decodes as absent rather
//! than failing the whole record, so state derivation stays total.

use crate::features::{AggregationConfig, DateFeatures, NumericalFeatures};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Unique identifier for a project, assigned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub i64);

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProjectId {
    fn from(id: i64) -> Self {
        ProjectId(id)
    }
}

/// Where a project's time series comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    File,
    Db,
}

impl SourceType {
    pub fn name(&self) -> &'static str {
        match self {
            SourceType::File => "file",
            SourceType::Db => "db",
        }
    }
}

/// A stored pipeline configuration, as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub source_type: Option<SourceType>,
    #[serde(default, deserialize_with = "lenient")]
    pub file_path: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub db_connection_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub table_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub date_column: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub value_column: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub product_column: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub date_features: Option<DateFeatures>,
    #[serde(default, deserialize_with = "lenient")]
    pub numerical_features: Option<NumericalFeatures>,
    #[serde(default, deserialize_with = "lenient")]
    pub aggregation: Option<AggregationConfig>,
    #[serde(default, deserialize_with = "lenient")]
    pub test_ratio: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub cv_folds: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Create a bare project with no progression fields set
    pub fn new(id: impl Into<ProjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            source_type: None,
            file_path: None,
            db_connection_id: None,
            table_name: None,
            query: None,
            date_column: None,
            value_column: None,
            product_column: None,
            date_features: None,
            numerical_features: None,
            aggregation: None,
            test_ratio: None,
            cv_folds: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Apply a patch locally, mirroring what the backend PUT does
    pub fn apply(&mut self, patch: &ProjectPatch) {
        let ProjectPatch {
            name,
            description,
            source_type,
            file_path,
            db_connection_id,
            table_name,
            query,
            date_column,
            value_column,
            product_column,
            date_features,
            numerical_features,
            aggregation,
            test_ratio,
            cv_folds,
        } = patch;

        if let Some(v) = name {
            self.name = v.clone();
        }
        if let Some(v) = description {
            self.description = Some(v.clone());
        }
        if let Some(v) = source_type {
            self.source_type = Some(*v);
        }
        if let Some(v) = file_path {
            self.file_path = Some(v.clone());
        }
        if let Some(v) = db_connection_id {
            self.db_connection_id = Some(*v);
        }
        if let Some(v) = table_name {
            self.table_name = Some(v.clone());
        }
        if let Some(v) = query {
            self.query = Some(v.clone());
        }
        if let Some(v) = date_column {
            self.date_column = Some(v.clone());
        }
        if let Some(v) = value_column {
            self.value_column = Some(v.clone());
        }
        if let Some(v) = product_column {
            self.product_column = Some(v.clone());
        }
        if let Some(v) = date_features {
            self.date_features = Some(v.clone());
        }
        if let Some(v) = numerical_features {
            self.numerical_features = Some(v.clone());
        }
        if let Some(v) = aggregation {
            self.aggregation = Some(*v);
        }
        if let Some(v) = test_ratio {
            self.test_ratio = Some(*v);
        }
        if let Some(v) = cv_folds {
            self.cv_folds = Some(*v);
        }
    }
}

/// Partial update for a project
///
/// Only set fields are serialized, so a PUT never clears fields the caller
/// did not touch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_connection_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_features: Option<DateFeatures>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numerical_features: Option<NumericalFeatures>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<AggregationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_folds: Option<u32>,
}

impl ProjectPatch {
    /// Patch recording a freshly uploaded file source
    pub fn file_source(path: impl Into<String>) -> Self {
        Self {
            source_type: Some(SourceType::File),
            file_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Patch recording a database table source
    pub fn db_source(connection: i64, table: impl Into<String>) -> Self {
        Self {
            source_type: Some(SourceType::Db),
            db_connection_id: Some(connection),
            table_name: Some(table.into()),
            ..Self::default()
        }
    }

    /// Patch storing the column mapping
    pub fn column_mapping(
        date: impl Into<String>,
        value: impl Into<String>,
        product: Option<String>,
    ) -> Self {
        Self {
            date_column: Some(date.into()),
            value_column: Some(value.into()),
            product_column: product,
            ..Self::default()
        }
    }

    /// Patch storing the generated feature configuration
    pub fn features(date: DateFeatures, numerical: NumericalFeatures) -> Self {
        Self {
            date_features: Some(date),
            numerical_features: Some(numerical),
            ..Self::default()
        }
    }

    /// Patch storing the aggregation choice
    pub fn aggregation(config: AggregationConfig) -> Self {
        Self {
            aggregation: Some(config),
            ..Self::default()
        }
    }

    /// Patch storing the training split settings
    pub fn training_settings(test_ratio: f64, cv_folds: u32) -> Self {
        Self {
            test_ratio: Some(test_ratio),
            cv_folds: Some(cv_folds),
            ..Self::default()
        }
    }
}

/// Decode a field if it has the expected shape, treating anything else as
/// absent. The wire format is JSON, so buffering through `Value` is exact.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
