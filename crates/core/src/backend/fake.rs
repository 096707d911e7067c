// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Fake backend implementation for testing
//!
//! Keeps projects and models in memory, applies patches the way the real
//! PUT does, records calls, and can be told to fail specific operations.

use super::traits::{
    AdditionalFile, AggregationReport, BackendError, DbConnection, FeatureReport, NewDbConnection,
    ProjectBackend, UploadedSource,
};
use crate::features::{AggregationConfig, FeaturePlan};
use crate::model::{MetricSet, ModelMetrics, ModelRecord, TrainRequest};
use crate::preview::SourcePreview;
use crate::project::{Project, ProjectId, ProjectPatch, SourceType};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Recorded call to the fake backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    FetchProject { id: i64 },
    UpdateProject { id: i64 },
    UploadSource { file: PathBuf },
    PreviewTable { connection: i64, table: String },
    Aggregate { id: i64 },
    GenerateFeatures { id: i64 },
    TrainModel { id: i64, name: String },
}

/// Shared state for the fake backend
#[derive(Default)]
struct FakeState {
    calls: Vec<BackendCall>,
    projects: HashMap<i64, Project>,
    connections: Vec<DbConnection>,
    tables: HashMap<i64, Vec<String>>,
    previews: HashMap<(i64, String), SourcePreview>,
    upload: Option<UploadedSource>,
    additional: HashMap<i64, Vec<AdditionalFile>>,
    models: HashMap<i64, Vec<ModelRecord>>,
    next_id: i64,
    // Configurable failure modes
    upload_fails: bool,
    update_fails: bool,
    generate_fails: bool,
    aggregate_fails: bool,
    train_fails: bool,
}

impl FakeState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Fake backend with call recording for testing
#[derive(Clone)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState::default())),
        }
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Clear recorded calls
    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Register an existing project
    pub fn seed_project(&self, project: Project) -> ProjectId {
        let id = project.id;
        let mut state = self.state.lock().unwrap();
        state.next_id = state.next_id.max(id.0);
        state.projects.insert(id.0, project);
        id
    }

    /// Current stored copy of a project
    pub fn project(&self, id: ProjectId) -> Option<Project> {
        self.state.lock().unwrap().projects.get(&id.0).cloned()
    }

    /// The next upload-file call returns this payload
    pub fn set_upload(&self, upload: UploadedSource) {
        self.state.lock().unwrap().upload = Some(upload);
    }

    /// Register a connection with its tables
    pub fn seed_connection(&self, connection: DbConnection, tables: Vec<String>) {
        let mut state = self.state.lock().unwrap();
        state.tables.insert(connection.id, tables);
        state.connections.push(connection);
    }

    /// Set the preview returned for a connection's table
    pub fn set_table_preview(&self, connection: i64, table: &str, preview: SourcePreview) {
        self.state
            .lock()
            .unwrap()
            .previews
            .insert((connection, table.to_string()), preview);
    }

    /// Configure upload-file to fail
    pub fn set_upload_fails(&self, fails: bool) {
        self.state.lock().unwrap().upload_fails = fails;
    }

    /// Configure project PUT to fail
    pub fn set_update_fails(&self, fails: bool) {
        self.state.lock().unwrap().update_fails = fails;
    }

    /// Configure generate-features to fail
    pub fn set_generate_fails(&self, fails: bool) {
        self.state.lock().unwrap().generate_fails = fails;
    }

    /// Configure aggregation to fail
    pub fn set_aggregate_fails(&self, fails: bool) {
        self.state.lock().unwrap().aggregate_fails = fails;
    }

    /// Configure train-model to fail
    pub fn set_train_fails(&self, fails: bool) {
        self.state.lock().unwrap().train_fails = fails;
    }

    /// Models stored for a project
    pub fn models(&self, id: ProjectId) -> Vec<ModelRecord> {
        self.state
            .lock()
            .unwrap()
            .models
            .get(&id.0)
            .cloned()
            .unwrap_or_default()
    }
}

fn default_upload(file: &Path) -> UploadedSource {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.csv".to_string());
    UploadedSource {
        file_path: format!("uploads/{name}"),
        source_info: SourcePreview {
            source_type: SourceType::File,
            columns: vec!["date".to_string(), "units".to_string()],
            row_count: 100,
            sample_rows: Vec::new(),
        },
    }
}

/// Feature column names the real backend would generate for a plan
fn generated_columns(plan: &FeaturePlan) -> Vec<String> {
    let mut columns = Vec::new();
    if plan.date_features.month {
        columns.push("date_month".to_string());
    }
    if plan.date_features.year {
        columns.push("date_year".to_string());
    }
    if plan.date_features.quarter {
        columns.push("date_quarter".to_string());
    }
    for lag in &plan.numerical_features.lag_periods {
        columns.push(format!("units_lag_{lag}"));
    }
    for window in &plan.numerical_features.rolling_windows {
        columns.push(format!("units_rolling_{window}"));
    }
    for period in &plan.numerical_features.change_periods {
        columns.push(format!("units_change_{period}"));
    }
    columns
}

#[async_trait]
impl ProjectBackend for FakeBackend {
    async fn list_projects(&self) -> Result<Vec<Project>, BackendError> {
        let state = self.state.lock().unwrap();
        let mut projects: Vec<_> = state.projects.values().cloned().collect();
        projects.sort_by_key(|p| p.id.0);
        Ok(projects)
    }

    async fn create_project(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Project, BackendError> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let mut project = Project::new(id, name);
        project.description = description.map(str::to_string);
        state.projects.insert(id, project.clone());
        Ok(project)
    }

    async fn fetch_project(&self, id: ProjectId) -> Result<Project, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(BackendCall::FetchProject { id: id.0 });
        state
            .projects
            .get(&id.0)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("project {id}")))
    }

    async fn update_project(
        &self,
        id: ProjectId,
        patch: &ProjectPatch,
    ) -> Result<Project, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(BackendCall::UpdateProject { id: id.0 });
        if state.update_fails {
            return Err(BackendError::Network("injected update failure".to_string()));
        }
        let project = state
            .projects
            .get_mut(&id.0)
            .ok_or_else(|| BackendError::NotFound(format!("project {id}")))?;
        project.apply(patch);
        Ok(project.clone())
    }

    async fn delete_project(&self, id: ProjectId) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        state
            .projects
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| BackendError::NotFound(format!("project {id}")))
    }

    async fn upload_source(&self, file: &Path) -> Result<UploadedSource, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(BackendCall::UploadSource {
            file: file.to_path_buf(),
        });
        if state.upload_fails {
            return Err(BackendError::Rejected(
                "injected upload failure".to_string(),
            ));
        }
        Ok(state.upload.take().unwrap_or_else(|| default_upload(file)))
    }

    async fn test_connection(&self, _connection: &NewDbConnection) -> Result<(), BackendError> {
        Ok(())
    }

    async fn create_connection(
        &self,
        connection: &NewDbConnection,
    ) -> Result<DbConnection, BackendError> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let record = DbConnection {
            id,
            name: connection.name.clone(),
            host: connection.host.clone(),
            port: connection.port,
            database: connection.database.clone(),
            username: connection.username.clone(),
            created_at: None,
        };
        state.connections.push(record.clone());
        Ok(record)
    }

    async fn list_connections(&self) -> Result<Vec<DbConnection>, BackendError> {
        Ok(self.state.lock().unwrap().connections.clone())
    }

    async fn list_tables(&self, connection: i64) -> Result<Vec<String>, BackendError> {
        self.state
            .lock()
            .unwrap()
            .tables
            .get(&connection)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("connection {connection}")))
    }

    async fn preview_table(
        &self,
        connection: i64,
        table: &str,
    ) -> Result<SourcePreview, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(BackendCall::PreviewTable {
            connection,
            table: table.to_string(),
        });
        state
            .previews
            .get(&(connection, table.to_string()))
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("table {table}")))
    }

    async fn upload_additional_file(
        &self,
        id: ProjectId,
        file: &Path,
    ) -> Result<AdditionalFile, BackendError> {
        let mut state = self.state.lock().unwrap();
        if !state.projects.contains_key(&id.0) {
            return Err(BackendError::NotFound(format!("project {id}")));
        }
        let file_id = state.next_id();
        let record = AdditionalFile {
            id: file_id,
            filename: file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "extra.csv".to_string()),
            columns: Vec::new(),
            row_count: None,
            created_at: None,
        };
        state.additional.entry(id.0).or_default().push(record.clone());
        Ok(record)
    }

    async fn list_additional_files(
        &self,
        id: ProjectId,
    ) -> Result<Vec<AdditionalFile>, BackendError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .additional
            .get(&id.0)
            .cloned()
            .unwrap_or_default())
    }

    async fn delete_additional_file(&self, id: ProjectId, file: i64) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        let files = state
            .additional
            .get_mut(&id.0)
            .ok_or_else(|| BackendError::NotFound(format!("project {id}")))?;
        let before = files.len();
        files.retain(|f| f.id != file);
        if files.len() == before {
            return Err(BackendError::NotFound(format!("file {file}")));
        }
        Ok(())
    }

    async fn aggregate(
        &self,
        id: ProjectId,
        _config: &AggregationConfig,
    ) -> Result<AggregationReport, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(BackendCall::Aggregate { id: id.0 });
        if state.aggregate_fails {
            return Err(BackendError::Rejected(
                "injected aggregation failure".to_string(),
            ));
        }
        if !state.projects.contains_key(&id.0) {
            return Err(BackendError::NotFound(format!("project {id}")));
        }
        Ok(AggregationReport {
            row_count: Some(12),
            ..AggregationReport::default()
        })
    }

    async fn generate_features(
        &self,
        id: ProjectId,
        plan: &FeaturePlan,
    ) -> Result<FeatureReport, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(BackendCall::GenerateFeatures { id: id.0 });
        if state.generate_fails {
            return Err(BackendError::Rejected(
                "injected feature failure".to_string(),
            ));
        }
        if !state.projects.contains_key(&id.0) {
            return Err(BackendError::NotFound(format!("project {id}")));
        }
        let generated = generated_columns(plan);
        Ok(FeatureReport {
            total_features: generated.len() as u64,
            generated_features: generated,
            sample_data: Vec::new(),
        })
    }

    async fn train_model(
        &self,
        id: ProjectId,
        request: &TrainRequest,
    ) -> Result<ModelRecord, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(BackendCall::TrainModel {
            id: id.0,
            name: request.name.clone(),
        });
        if state.train_fails {
            return Err(BackendError::Rejected(
                "injected training failure".to_string(),
            ));
        }
        if !state.projects.contains_key(&id.0) {
            return Err(BackendError::NotFound(format!("project {id}")));
        }
        let model_id = state.next_id();
        let record = ModelRecord {
            id: model_id,
            name: request.name.clone(),
            model_type: request.model_type,
            parameters: request.parameters.clone(),
            metrics: Some(ModelMetrics {
                train: Some(MetricSet {
                    mse: 1.0,
                    mae: 0.7,
                    r2: 0.95,
                }),
                test: Some(MetricSet {
                    mse: 2.0,
                    mae: 1.1,
                    r2: 0.9,
                }),
                cv_mean: Some(0.9),
                cv_std: Some(0.03),
            }),
            created_at: None,
        };
        state.models.entry(id.0).or_default().push(record.clone());
        Ok(record)
    }

    async fn list_models(&self, id: ProjectId) -> Result<Vec<ModelRecord>, BackendError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .models
            .get(&id.0)
            .cloned()
            .unwrap_or_default())
    }

    async fn delete_model(&self, model: i64) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        for models in state.models.values_mut() {
            let before = models.len();
            models.retain(|m| m.id != model);
            if models.len() != before {
                return Ok(());
            }
        }
        Err(BackendError::NotFound(format!("model {model}")))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
