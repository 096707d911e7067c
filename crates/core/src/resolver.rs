// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Step content resolver
//!
//! Maps the active step to the content its sub-workflow needs, prefilled
//! from the project record. Column mapping depends on the transient preview
//! payload; when that payload is gone (a reload, an expired cache entry)
//! the resolver reports it explicitly so the caller can send the user back
//! to data loading.

use crate::features::{AggregationConfig, FeaturePlan};
use crate::preview::{PreviewCache, SourcePreview};
use crate::project::{Project, ProjectId};
use crate::state::PipelineState;
use crate::step::{Flow, Step};
use thiserror::Error;

/// Default test split when the project has none stored
pub const DEFAULT_TEST_RATIO: f64 = 0.2;
/// Default cross-validation fold count
pub const DEFAULT_CV_FOLDS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The preview payload for column mapping is gone; the data source
    /// must be loaded again
    #[error("sample data for project {0} is no longer available; run data loading again")]
    PreviewMissing(ProjectId),
    /// The state points outside this flow
    #[error("step index {0} is out of range for this flow")]
    StepOutOfRange(usize),
}

/// What the active step's workflow needs to render and run
#[derive(Debug, Clone, PartialEq)]
pub enum StepContent {
    /// Choose and connect a data source
    DataLoading,
    /// Manage supplementary files (extended flow)
    AdditionalFiles,
    /// Map columns over the loaded preview
    ColumnMapping {
        preview: SourcePreview,
        date_column: Option<String>,
        value_column: Option<String>,
        product_column: Option<String>,
    },
    /// Choose the aggregation period and function (extended flow)
    Aggregation { config: Option<AggregationConfig> },
    /// Pick date and numerical features, prefilled from the project
    FeatureGeneration { plan: FeaturePlan },
    /// Configure the split and train; re-enterable for retraining
    ModelTraining { test_ratio: f64, cv_folds: u32 },
}

impl StepContent {
    /// The step this content belongs to
    pub fn step(&self) -> Step {
        match self {
            StepContent::DataLoading => Step::DataLoading,
            StepContent::AdditionalFiles => Step::AdditionalFiles,
            StepContent::ColumnMapping { .. } => Step::ColumnMapping,
            StepContent::Aggregation { .. } => Step::Aggregation,
            StepContent::FeatureGeneration { .. } => Step::FeatureGeneration,
            StepContent::ModelTraining { .. } => Step::ModelTraining,
        }
    }
}

/// Resolve the content for the state's current step
pub fn resolve<C: PreviewCache>(
    flow: &Flow,
    state: &PipelineState,
    project: &Project,
    cache: &C,
) -> Result<StepContent, ResolveError> {
    let step = flow
        .step(state.current)
        .ok_or(ResolveError::StepOutOfRange(state.current))?;

    Ok(match step {
        Step::DataLoading => StepContent::DataLoading,
        Step::AdditionalFiles => StepContent::AdditionalFiles,
        Step::ColumnMapping => {
            // A cached preview with no columns is as useless as a missing
            // one; both degrade to the recovery prompt.
            let preview = cache
                .get(project.id)
                .filter(SourcePreview::has_columns)
                .ok_or(ResolveError::PreviewMissing(project.id))?;
            StepContent::ColumnMapping {
                preview,
                date_column: project.date_column.clone(),
                value_column: project.value_column.clone(),
                product_column: project.product_column.clone(),
            }
        }
        Step::Aggregation => StepContent::Aggregation {
            config: project.aggregation,
        },
        Step::FeatureGeneration => StepContent::FeatureGeneration {
            plan: FeaturePlan {
                date_features: project.date_features.clone().unwrap_or_default(),
                numerical_features: project.numerical_features.clone().unwrap_or_default(),
            },
        },
        Step::ModelTraining => StepContent::ModelTraining {
            test_ratio: project.test_ratio.unwrap_or(DEFAULT_TEST_RATIO),
            cv_folds: project.cv_folds.unwrap_or(DEFAULT_CV_FOLDS),
        },
    })
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
