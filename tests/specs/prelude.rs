//! Shared helpers for behavioral specs

use mlc_core::{
    FakeBackend, Flow, MemoryCache, Project, ProjectId, SourceType, Wizard,
};

/// Backend, cache, and a seeded project, ready for a wizard
pub struct Harness {
    pub backend: FakeBackend,
    pub cache: MemoryCache,
    pub id: ProjectId,
}

impl Harness {
    /// A fresh project with no progression fields set
    pub fn fresh() -> Self {
        Self::with_project(Project::new(1, "spec"))
    }

    pub fn with_project(project: Project) -> Self {
        let backend = FakeBackend::new();
        let cache = MemoryCache::new();
        let id = backend.seed_project(project);
        Self { backend, cache, id }
    }

    pub async fn wizard(&self) -> Wizard<FakeBackend, MemoryCache> {
        Wizard::load(
            self.backend.clone(),
            self.cache.clone(),
            Flow::STANDARD,
            self.id,
        )
        .await
        .unwrap()
    }
}

/// Project with a file source already connected
pub fn project_with_source() -> Project {
    let mut project = Project::new(1, "spec");
    project.source_type = Some(SourceType::File);
    project.file_path = Some("uploads/spec.csv".to_string());
    project
}

/// Project with source and column mapping in place
pub fn project_with_mapping() -> Project {
    let mut project = project_with_source();
    project.date_column = Some("date".to_string());
    project.value_column = Some("sales".to_string());
    project
}
