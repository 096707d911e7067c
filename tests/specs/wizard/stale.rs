//! Stale preview payload specs
//!
//! The data preview is never persisted server-side. When it is gone the
//! column mapping step must surface an explicit recovery state, not an
//! empty table.

use crate::prelude::*;
use mlc_core::{
    FakeBackend, Flow, MemoryCache, PreviewCache, ResolveError, SourcePreview, SourceType,
    StepContent, Wizard,
};
use std::path::Path;

#[tokio::test]
async fn reload_without_preview_is_stale_not_empty() {
    let harness = Harness::fresh();
    let mut wizard = harness.wizard().await;
    wizard.load_file(Path::new("sales.csv")).await.unwrap();

    // Same project, new session: fields say column mapping, cache is gone.
    let new_session = Wizard::load(
        harness.backend.clone(),
        MemoryCache::new(),
        Flow::STANDARD,
        harness.id,
    )
    .await
    .unwrap();

    assert_eq!(new_session.state().current, 1);
    assert_eq!(
        new_session.content(),
        Err(ResolveError::PreviewMissing(harness.id))
    );
}

#[tokio::test]
async fn zero_column_preview_is_treated_as_stale() {
    let harness = Harness::with_project(project_with_source());
    harness.cache.put(
        harness.id,
        &SourcePreview {
            source_type: SourceType::File,
            columns: Vec::new(),
            row_count: 0,
            sample_rows: Vec::new(),
        },
    );

    let wizard = harness.wizard().await;
    assert_eq!(
        wizard.content(),
        Err(ResolveError::PreviewMissing(harness.id))
    );
}

#[tokio::test]
async fn redoing_data_loading_recovers_from_stale() {
    let backend = FakeBackend::new();
    let cache = MemoryCache::new();
    let id = backend.seed_project(project_with_source());
    let mut wizard = Wizard::load(backend, cache, Flow::STANDARD, id)
        .await
        .unwrap();

    assert!(wizard.content().is_err());

    // The recovery path: go back and load the source again.
    wizard.jump(0).unwrap();
    wizard.load_file(Path::new("sales.csv")).await.unwrap();

    assert!(matches!(
        wizard.content(),
        Ok(StepContent::ColumnMapping { .. })
    ));
}

#[tokio::test]
async fn preview_follows_its_own_project() {
    let harness = Harness::fresh();
    let mut wizard = harness.wizard().await;
    wizard.load_file(Path::new("sales.csv")).await.unwrap();

    // A second project in the same session must not see the first one's
    // preview.
    let other = harness
        .backend
        .seed_project(mlc_core::Project::new(2, "other"));
    assert!(harness.cache.get(other).is_none());
    assert!(harness.cache.get(harness.id).is_some());
}
