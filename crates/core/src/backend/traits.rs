// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Backend adapter trait and shared wire types

use crate::features::{AggregationConfig, FeaturePlan};
use crate::model::{ModelRecord, TrainRequest};
use crate::preview::{SampleRow, SourcePreview};
use crate::project::{lenient, Project, ProjectId, ProjectPatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from backend operations
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("authentication required or token rejected")]
    Unauthorized,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A saved database connection (credentials stay server-side)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbConnection {
    pub id: i64,
    pub name: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Parameters for creating or testing a database connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDbConnection {
    pub name: String,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

fn default_port() -> u16 {
    5432
}

/// Result of uploading a source file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedSource {
    pub file_path: String,
    pub source_info: SourcePreview,
}

/// A supplementary file attached to a project (extended flow)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditionalFile {
    pub id: i64,
    pub filename: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub row_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Summary returned by feature generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureReport {
    pub generated_features: Vec<String>,
    pub total_features: u64,
    pub sample_data: Vec<SampleRow>,
}

/// Summary returned by aggregation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationReport {
    pub row_count: Option<u64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// The project backend the wizard drives.
///
/// One implementation speaks HTTP to the real service; the fake keeps
/// everything in memory for tests. All calls are short request/response
/// operations; model training blocks only until the backend accepts it.
#[async_trait]
pub trait ProjectBackend: Clone + Send + Sync + 'static {
    // Projects
    async fn list_projects(&self) -> Result<Vec<Project>, BackendError>;
    async fn create_project(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Project, BackendError>;
    async fn fetch_project(&self, id: ProjectId) -> Result<Project, BackendError>;
    async fn update_project(
        &self,
        id: ProjectId,
        patch: &ProjectPatch,
    ) -> Result<Project, BackendError>;
    async fn delete_project(&self, id: ProjectId) -> Result<(), BackendError>;

    // Data sources
    async fn upload_source(&self, file: &Path) -> Result<UploadedSource, BackendError>;
    async fn test_connection(&self, connection: &NewDbConnection) -> Result<(), BackendError>;
    async fn create_connection(
        &self,
        connection: &NewDbConnection,
    ) -> Result<DbConnection, BackendError>;
    async fn list_connections(&self) -> Result<Vec<DbConnection>, BackendError>;
    async fn list_tables(&self, connection: i64) -> Result<Vec<String>, BackendError>;
    async fn preview_table(
        &self,
        connection: i64,
        table: &str,
    ) -> Result<SourcePreview, BackendError>;

    // Additional files (extended flow)
    async fn upload_additional_file(
        &self,
        id: ProjectId,
        file: &Path,
    ) -> Result<AdditionalFile, BackendError>;
    async fn list_additional_files(
        &self,
        id: ProjectId,
    ) -> Result<Vec<AdditionalFile>, BackendError>;
    async fn delete_additional_file(&self, id: ProjectId, file: i64) -> Result<(), BackendError>;

    // Processing
    async fn aggregate(
        &self,
        id: ProjectId,
        config: &AggregationConfig,
    ) -> Result<AggregationReport, BackendError>;
    async fn generate_features(
        &self,
        id: ProjectId,
        plan: &FeaturePlan,
    ) -> Result<FeatureReport, BackendError>;

    // Models
    async fn train_model(
        &self,
        id: ProjectId,
        request: &TrainRequest,
    ) -> Result<ModelRecord, BackendError>;
    async fn list_models(&self, id: ProjectId) -> Result<Vec<ModelRecord>, BackendError>;
    async fn delete_model(&self, model: i64) -> Result<(), BackendError>;
}
