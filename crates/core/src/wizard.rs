// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Wizard driver
//!
//! Owns the confirmed project, its derived pipeline state, and the busy
//! guard, and runs each step's completion workflow against the backend.
//! Completions advance the local state optimistically; when the backend
//! call fails the state rolls back to the exact pre-submission snapshot
//! and the caller keeps whatever the user entered.

use crate::backend::{
    AdditionalFile, AggregationReport, BackendError, FeatureReport, ProjectBackend, UploadedSource,
};
use crate::features::{AggregationConfig, FeaturePlan};
use crate::model::{ModelRecord, TrainRequest};
use crate::preview::PreviewCache;
use crate::project::{Project, ProjectId, ProjectPatch};
use crate::resolver::{resolve, ResolveError, StepContent};
use crate::state::{JumpRejected, PipelineState};
use crate::step::{Flow, Step};
use std::path::Path;
use thiserror::Error;

/// File types the backend can parse
const ALLOWED_EXTENSIONS: [&str; 4] = ["csv", "json", "xlsx", "xls"];

/// Local validation failure; nothing was sent to the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
    #[error("select at least one feature to generate")]
    EmptyFeaturePlan,
}

/// Errors surfaced by wizard operations
#[derive(Debug, Error)]
pub enum WizardError {
    /// Submission blocked before any network call
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The backend call failed; local state was rolled back
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// An out-of-order jump request
    #[error(transparent)]
    Jump(#[from] JumpRejected),
    /// The active step's content could not be resolved
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// A submission is already in flight for this project
    #[error("a submission is already in flight for this project")]
    Busy,
    /// Earlier steps are incomplete
    #[error("earlier steps must be completed before {}", .0.label())]
    StepNotReady(Step),
    /// The step does not exist in the active flow
    #[error("{} is not part of this flow", .0.label())]
    StepNotInFlow(Step),
}

/// Drives one project through the pipeline-building steps
pub struct Wizard<B: ProjectBackend, C: PreviewCache> {
    backend: B,
    cache: C,
    flow: Flow,
    /// Last backend-confirmed copy of the project
    project: Project,
    state: PipelineState,
    in_flight: bool,
}

impl<B: ProjectBackend, C: PreviewCache> Wizard<B, C> {
    /// Fetch the project and derive its state.
    ///
    /// Derivation settles here, before any step content can be resolved,
    /// so a caller never renders against a stale or default step.
    pub async fn load(
        backend: B,
        cache: C,
        flow: Flow,
        id: ProjectId,
    ) -> Result<Self, WizardError> {
        let project = backend.fetch_project(id).await?;
        let state = PipelineState::derive(&flow, &project);
        tracing::debug!(project = %project.id, step = state.current, "wizard loaded");
        Ok(Self {
            backend,
            cache,
            flow,
            project,
            state,
            in_flight: false,
        })
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    /// The step the wizard is on
    pub fn current_step(&self) -> Option<Step> {
        self.flow.step(self.state.current)
    }

    /// Whether a submission is outstanding
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Content for the active step
    pub fn content(&self) -> Result<StepContent, ResolveError> {
        resolve(&self.flow, &self.state, &self.project, &self.cache)
    }

    /// Re-fetch the project and re-derive, dropping any local-only state
    pub async fn reload(&mut self) -> Result<(), WizardError> {
        if self.in_flight {
            return Err(WizardError::Busy);
        }
        self.project = self.backend.fetch_project(self.project.id).await?;
        self.state = PipelineState::derive(&self.flow, &self.project);
        Ok(())
    }

    /// Move to an already-reached step
    pub fn jump(&mut self, target: usize) -> Result<(), JumpRejected> {
        self.state = self.state.request_jump(&self.flow, target)?;
        Ok(())
    }

    /// Move one step back
    pub fn back(&mut self) {
        self.state = self.state.back();
    }

    /// Advance past the current step when its data is already in place.
    ///
    /// Used for the non-gating steps of the extended flow, where "next"
    /// needs no backend call.
    pub fn advance_if_satisfied(&mut self) -> Result<(), WizardError> {
        let index = self.state.current;
        match self.flow.step(index) {
            Some(step) if step.is_satisfied(&self.project) => {
                self.state = self.state.advance_after_completing(&self.flow, index);
                Ok(())
            }
            Some(step) => Err(WizardError::StepNotReady(step)),
            None => Err(ResolveError::StepOutOfRange(index).into()),
        }
    }

    /// Upload a file source, record it on the project, and advance
    pub async fn load_file(&mut self, file: &Path) -> Result<(), WizardError> {
        validate_upload(file)?;
        let index = self.ensure_ready(Step::DataLoading)?;
        self.begin_submission()?;
        let snapshot = self.state.clone();
        self.state = self.state.advance_after_completing(&self.flow, index);

        let outcome = self.submit_file(file).await;
        self.in_flight = false;

        match outcome {
            Ok((project, upload)) => {
                self.project = project;
                self.cache.put(self.project.id, &upload.source_info);
                Ok(())
            }
            Err(err) => {
                self.state = snapshot;
                Err(err)
            }
        }
    }

    async fn submit_file(&self, file: &Path) -> Result<(Project, UploadedSource), WizardError> {
        let upload = self.backend.upload_source(file).await?;
        let patch = ProjectPatch::file_source(upload.file_path.clone());
        let project = self.backend.update_project(self.project.id, &patch).await?;
        Ok((project, upload))
    }

    /// Point the project at a database table, cache its preview, advance
    pub async fn load_table(&mut self, connection: i64, table: &str) -> Result<(), WizardError> {
        if table.trim().is_empty() {
            return Err(ValidationError::MissingField("table name").into());
        }
        let index = self.ensure_ready(Step::DataLoading)?;
        self.begin_submission()?;
        let snapshot = self.state.clone();
        self.state = self.state.advance_after_completing(&self.flow, index);

        let outcome = self.submit_table(connection, table).await;
        self.in_flight = false;

        match outcome {
            Ok((project, preview)) => {
                self.project = project;
                self.cache.put(self.project.id, &preview);
                Ok(())
            }
            Err(err) => {
                self.state = snapshot;
                Err(err)
            }
        }
    }

    async fn submit_table(
        &self,
        connection: i64,
        table: &str,
    ) -> Result<(Project, crate::preview::SourcePreview), WizardError> {
        let preview = self.backend.preview_table(connection, table).await?;
        let patch = ProjectPatch::db_source(connection, table);
        let project = self.backend.update_project(self.project.id, &patch).await?;
        Ok((project, preview))
    }

    /// Save the column mapping and advance
    pub async fn save_mapping(
        &mut self,
        date: &str,
        value: &str,
        product: Option<&str>,
    ) -> Result<(), WizardError> {
        if date.trim().is_empty() {
            return Err(ValidationError::MissingField("date column").into());
        }
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField("value column").into());
        }
        if date == value {
            return Err(ValidationError::InvalidValue {
                field: "value column",
                reason: "date and value columns must differ".to_string(),
            }
            .into());
        }
        // Validate against the loaded columns when the preview is still
        // around; without it the backend is the only judge.
        if let Some(preview) = self.cache.get(self.project.id) {
            for (field, column) in [("date column", date), ("value column", value)] {
                if !preview.columns.iter().any(|c| c == column) {
                    return Err(ValidationError::InvalidValue {
                        field,
                        reason: format!("column '{column}' is not in the loaded data"),
                    }
                    .into());
                }
            }
            if let Some(product) = product {
                if !preview.columns.iter().any(|c| c == product) {
                    return Err(ValidationError::InvalidValue {
                        field: "product column",
                        reason: format!("column '{product}' is not in the loaded data"),
                    }
                    .into());
                }
            }
        }

        let index = self.ensure_ready(Step::ColumnMapping)?;
        self.begin_submission()?;
        let snapshot = self.state.clone();
        self.state = self.state.advance_after_completing(&self.flow, index);

        let patch = ProjectPatch::column_mapping(date, value, product.map(str::to_string));
        let outcome = self.backend.update_project(self.project.id, &patch).await;
        self.in_flight = false;

        match outcome {
            Ok(project) => {
                self.project = project;
                Ok(())
            }
            Err(err) => {
                self.state = snapshot;
                Err(err.into())
            }
        }
    }

    /// Upload a supplementary file (extended flow); never changes the step
    pub async fn add_file(&mut self, file: &Path) -> Result<AdditionalFile, WizardError> {
        validate_upload(file)?;
        self.ensure_ready(Step::AdditionalFiles)?;
        self.begin_submission()?;
        let outcome = self
            .backend
            .upload_additional_file(self.project.id, file)
            .await;
        self.in_flight = false;
        Ok(outcome?)
    }

    /// Run aggregation, persist the chosen config, and advance
    pub async fn save_aggregation(
        &mut self,
        config: AggregationConfig,
    ) -> Result<AggregationReport, WizardError> {
        let index = self.ensure_ready(Step::Aggregation)?;
        self.begin_submission()?;
        let snapshot = self.state.clone();
        self.state = self.state.advance_after_completing(&self.flow, index);

        let outcome = self.submit_aggregation(config).await;
        self.in_flight = false;

        match outcome {
            Ok((project, report)) => {
                self.project = project;
                Ok(report)
            }
            Err(err) => {
                self.state = snapshot;
                Err(err)
            }
        }
    }

    async fn submit_aggregation(
        &self,
        config: AggregationConfig,
    ) -> Result<(Project, AggregationReport), WizardError> {
        let report = self.backend.aggregate(self.project.id, &config).await?;
        let project = self
            .backend
            .update_project(self.project.id, &ProjectPatch::aggregation(config))
            .await?;
        Ok((project, report))
    }

    /// Generate features, persist the plan, and advance
    pub async fn generate_features(
        &mut self,
        plan: FeaturePlan,
    ) -> Result<FeatureReport, WizardError> {
        if plan.is_empty() {
            return Err(ValidationError::EmptyFeaturePlan.into());
        }
        if plan.numerical_features.periods().any(|p| p == 0) {
            return Err(ValidationError::InvalidValue {
                field: "periods",
                reason: "periods must be positive".to_string(),
            }
            .into());
        }

        let index = self.ensure_ready(Step::FeatureGeneration)?;
        self.begin_submission()?;
        let snapshot = self.state.clone();
        self.state = self.state.advance_after_completing(&self.flow, index);

        let outcome = self.submit_features(&plan).await;
        self.in_flight = false;

        match outcome {
            Ok((project, report)) => {
                self.project = project;
                Ok(report)
            }
            Err(err) => {
                self.state = snapshot;
                Err(err)
            }
        }
    }

    async fn submit_features(
        &self,
        plan: &FeaturePlan,
    ) -> Result<(Project, FeatureReport), WizardError> {
        let report = self.backend.generate_features(self.project.id, plan).await?;
        let patch = ProjectPatch::features(
            plan.date_features.clone(),
            plan.numerical_features.clone(),
        );
        let project = self.backend.update_project(self.project.id, &patch).await?;
        Ok((project, report))
    }

    /// Persist the split settings and train a model.
    ///
    /// The terminal step stays active afterwards so the user can retrain
    /// as often as they like.
    pub async fn train(
        &mut self,
        test_ratio: f64,
        cv_folds: u32,
        request: TrainRequest,
    ) -> Result<ModelRecord, WizardError> {
        if request.name.trim().is_empty() {
            return Err(ValidationError::MissingField("model name").into());
        }
        if !(test_ratio > 0.0 && test_ratio < 1.0) {
            return Err(ValidationError::InvalidValue {
                field: "test ratio",
                reason: "must be strictly between 0 and 1".to_string(),
            }
            .into());
        }
        if cv_folds == 0 {
            return Err(ValidationError::InvalidValue {
                field: "cv folds",
                reason: "must be positive".to_string(),
            }
            .into());
        }

        let index = self.ensure_ready(Step::ModelTraining)?;
        self.begin_submission()?;
        let snapshot = self.state.clone();
        self.state = self.state.advance_after_completing(&self.flow, index);

        let outcome = self.submit_training(test_ratio, cv_folds, &request).await;
        self.in_flight = false;

        match outcome {
            Ok((project, record)) => {
                self.project = project;
                Ok(record)
            }
            Err(err) => {
                self.state = snapshot;
                Err(err)
            }
        }
    }

    async fn submit_training(
        &self,
        test_ratio: f64,
        cv_folds: u32,
        request: &TrainRequest,
    ) -> Result<(Project, ModelRecord), WizardError> {
        let patch = ProjectPatch::training_settings(test_ratio, cv_folds);
        let project = self.backend.update_project(self.project.id, &patch).await?;
        let record = self.backend.train_model(self.project.id, request).await?;
        Ok((project, record))
    }

    /// Models trained for this project
    pub async fn models(&self) -> Result<Vec<ModelRecord>, WizardError> {
        Ok(self.backend.list_models(self.project.id).await?)
    }

    fn begin_submission(&mut self) -> Result<(), WizardError> {
        if self.in_flight {
            return Err(WizardError::Busy);
        }
        self.in_flight = true;
        Ok(())
    }

    /// All steps before `step` must be satisfied by the confirmed project
    fn ensure_ready(&self, step: Step) -> Result<usize, WizardError> {
        let index = self
            .flow
            .index_of(step)
            .ok_or(WizardError::StepNotInFlow(step))?;
        for earlier in 0..index {
            if !self.flow.is_satisfied(earlier, &self.project) {
                return Err(WizardError::StepNotReady(step));
            }
        }
        Ok(index)
    }
}

fn validate_upload(file: &Path) -> Result<(), ValidationError> {
    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(ValidationError::InvalidValue {
            field: "file",
            reason: format!(
                "unsupported file type; allowed: {}",
                ALLOWED_EXTENSIONS.join(", ")
            ),
        }),
    }
}

#[cfg(test)]
#[path = "wizard_tests.rs"]
mod tests;
