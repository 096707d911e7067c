// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Transient source preview payload and its cache
//!
//! Data loading produces a preview (columns, sample rows) that the backend
//! does not persist on the project. The wizard carries it forward to column
//! mapping through a cache keyed by project id; when the cache has nothing,
//! column mapping degrades to an explicit data-unavailable state instead of
//! rendering an empty table.

use crate::project::{ProjectId, SourceType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// A sample row, keyed by column name
pub type SampleRow = serde_json::Map<String, serde_json::Value>;

/// Preview of a connected data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcePreview {
    pub source_type: SourceType,
    pub columns: Vec<String>,
    pub row_count: u64,
    #[serde(rename = "sample_data", default)]
    pub sample_rows: Vec<SampleRow>,
}

impl SourcePreview {
    /// True when the preview carries columns to map
    pub fn has_columns(&self) -> bool {
        !self.columns.is_empty()
    }
}

/// Session-scoped cache carrying the preview from data loading to column
/// mapping.
///
/// Lookups miss rather than fail; writes are best-effort. A lost entry is
/// recoverable by re-running data loading, so cache failures must never
/// fail a step.
pub trait PreviewCache: Clone + Send + Sync + 'static {
    fn get(&self, project: ProjectId) -> Option<SourcePreview>;
    fn put(&self, project: ProjectId, preview: &SourcePreview);
    fn clear(&self, project: ProjectId);
}

/// In-memory cache for tests and single-process front ends
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<i64, SourcePreview>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreviewCache for MemoryCache {
    fn get(&self, project: ProjectId) -> Option<SourcePreview> {
        self.entries.lock().ok()?.get(&project.0).cloned()
    }

    fn put(&self, project: ProjectId, preview: &SourcePreview) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(project.0, preview.clone());
        }
    }

    fn clear(&self, project: ProjectId) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(&project.0);
        }
    }
}

/// File-backed cache: one JSON file per project under a state directory.
///
/// Lets separate CLI invocations share the preview within a working
/// session, the way a browser session would.
#[derive(Debug, Clone)]
pub struct FileCache {
    base_path: PathBuf,
}

impl FileCache {
    /// Open a cache rooted at the given directory, creating it if needed
    pub fn open(base_path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    fn path_for(&self, project: ProjectId) -> PathBuf {
        self.base_path.join(format!("{}.json", project))
    }
}

impl PreviewCache for FileCache {
    fn get(&self, project: ProjectId) -> Option<SourcePreview> {
        let json = fs::read_to_string(self.path_for(project)).ok()?;
        serde_json::from_str(&json).ok()
    }

    fn put(&self, project: ProjectId, preview: &SourcePreview) {
        let path = self.path_for(project);
        let result = serde_json::to_string_pretty(preview)
            .map_err(std::io::Error::other)
            .and_then(|json| fs::write(&path, json));
        if let Err(err) = result {
            tracing::warn!(project = %project, error = %err, "failed to cache source preview");
        }
    }

    fn clear(&self, project: ProjectId) {
        match fs::remove_file(self.path_for(project)) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(project = %project, error = %err, "failed to drop cached preview");
            }
        }
    }
}

#[cfg(test)]
#[path = "preview_tests.rs"]
mod tests;
