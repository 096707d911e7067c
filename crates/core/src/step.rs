// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Pipeline step catalog
//!
//! The fixed, ordered table of wizard steps and the pure predicates that
//! report whether a step's required project fields are present.

use crate::features::DateFeatures;
use crate::project::Project;
use serde::{Deserialize, Serialize};

/// A wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    DataLoading,
    AdditionalFiles,
    ColumnMapping,
    Aggregation,
    FeatureGeneration,
    ModelTraining,
}

impl Step {
    /// Human-facing label
    pub fn label(&self) -> &'static str {
        match self {
            Step::DataLoading => "Data Loading",
            Step::AdditionalFiles => "Additional Files",
            Step::ColumnMapping => "Column Mapping",
            Step::Aggregation => "Aggregation",
            Step::FeatureGeneration => "Feature Generation",
            Step::ModelTraining => "Model Training",
        }
    }

    /// Stable slug used on the command line and in logs
    pub fn name(&self) -> &'static str {
        match self {
            Step::DataLoading => "data-loading",
            Step::AdditionalFiles => "additional-files",
            Step::ColumnMapping => "column-mapping",
            Step::Aggregation => "aggregation",
            Step::FeatureGeneration => "feature-generation",
            Step::ModelTraining => "model-training",
        }
    }

    /// Whether this step's required project fields are all present.
    ///
    /// Pure and total over any project value; absent fields read as not
    /// satisfied.
    pub fn is_satisfied(&self, project: &Project) -> bool {
        match self {
            Step::DataLoading => project.source_type.is_some(),
            // Supplementary files never gate progression.
            Step::AdditionalFiles => true,
            Step::ColumnMapping => {
                non_empty(&project.date_column) && non_empty(&project.value_column)
            }
            Step::Aggregation => project.aggregation.is_some(),
            Step::FeatureGeneration => {
                project
                    .date_features
                    .as_ref()
                    .is_some_and(DateFeatures::any_enabled)
                    || project
                        .numerical_features
                        .as_ref()
                        .is_some_and(|f| !f.is_empty())
            }
            // Terminal step; training is re-enterable and never
            // auto-completes from stored fields.
            Step::ModelTraining => false,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn non_empty(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// An ordered catalog of steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flow {
    steps: &'static [Step],
}

impl Flow {
    /// The standard four-step flow
    pub const STANDARD: Flow = Flow {
        steps: &[
            Step::DataLoading,
            Step::ColumnMapping,
            Step::FeatureGeneration,
            Step::ModelTraining,
        ],
    };

    /// The extended flow with supplementary files and aggregation
    pub const EXTENDED: Flow = Flow {
        steps: &[
            Step::DataLoading,
            Step::AdditionalFiles,
            Step::ColumnMapping,
            Step::Aggregation,
            Step::FeatureGeneration,
            Step::ModelTraining,
        ],
    };

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &'static [Step] {
        self.steps
    }

    pub fn step(&self, index: usize) -> Option<Step> {
        self.steps.get(index).copied()
    }

    pub fn index_of(&self, step: Step) -> Option<usize> {
        self.steps.iter().position(|s| *s == step)
    }

    /// Index of the terminal step
    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Whether the step at `index` is satisfied by `project`
    pub fn is_satisfied(&self, index: usize, project: &Project) -> bool {
        self.step(index).is_some_and(|s| s.is_satisfied(project))
    }
}

impl Default for Flow {
    fn default() -> Self {
        Flow::STANDARD
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
