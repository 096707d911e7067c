// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! User-friendly error display with context and suggestions.
//!
//! Wizard and backend failures are converted into errors that say what
//! went wrong, why it might have happened, and what to try next, instead
//! of a bare message.

use mlc_core::{BackendError, ResolveError, WizardError};
use std::fmt;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl CliError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Convert a wizard failure into a displayable error.
    pub fn from_wizard(err: WizardError) -> Self {
        match err {
            WizardError::Validation(err) => CliError::new(err.to_string())
                .with_suggestion("Fix the flagged value and submit again"),
            WizardError::Backend(err) => Self::from_backend(err),
            WizardError::Jump(err) => CliError::new(err.to_string())
                .with_context("Steps unlock in order as their data is saved")
                .with_suggestion("Check the pipeline position: mlc status <project>"),
            WizardError::Resolve(ResolveError::PreviewMissing(project)) => {
                CliError::new(format!("sample data for project {project} is no longer available"))
                    .with_context("The data preview lives only for one working session")
                    .with_suggestion(format!(
                        "Reload the data source: mlc source upload {project} <file>"
                    ))
            }
            WizardError::Resolve(err) => CliError::new(err.to_string()),
            WizardError::Busy => CliError::new("a submission is already in flight")
                .with_suggestion("Wait for the current submission to finish"),
            WizardError::StepNotReady(step) => {
                CliError::new(format!("{} is not ready yet", step.label()))
                    .with_context("Earlier steps have not saved their required fields")
                    .with_suggestion("Check the pipeline position: mlc status <project>")
            }
            WizardError::StepNotInFlow(step) => {
                CliError::new(format!("{} is not part of the active flow", step.label()))
                    .with_suggestion("Run with --extended to enable the extended flow")
            }
        }
    }

    /// Convert a backend failure into a displayable error.
    pub fn from_backend(err: BackendError) -> Self {
        match err {
            BackendError::Unauthorized => CliError::new("the backend rejected the credentials")
                .with_context("The bearer token is missing, expired, or wrong")
                .with_suggestion("Set MLC_API_TOKEN or the token field in the config file"),
            BackendError::Network(detail) => CliError::new("could not reach the backend")
                .with_context(detail)
                .with_suggestion("Check that the backend is running and MLC_API_URL is correct"),
            BackendError::NotFound(detail) => CliError::new(detail)
                .with_suggestion("List known projects: mlc project list"),
            other => CliError::new(other.to_string()),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                write!(f, "\n  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                write!(f, "\n  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {}
