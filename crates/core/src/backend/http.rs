// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! HTTP backend adapter
//!
//! Speaks the ML Constructor REST API: JSON bodies, bearer auth, FastAPI
//! style `{"detail": ...}` error payloads.

use super::traits::{
    AdditionalFile, AggregationReport, BackendError, DbConnection, FeatureReport, NewDbConnection,
    ProjectBackend, UploadedSource,
};
use crate::config::BackendConfig;
use crate::features::{AggregationConfig, FeaturePlan};
use crate::model::{ModelRecord, TrainRequest};
use crate::preview::SourcePreview;
use crate::project::{Project, ProjectId, ProjectPatch};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

/// Backend adapter speaking HTTP to the real service
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    /// Build a client from connection settings
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| BackendError::Network(err.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, BackendError> {
        let response = checked(builder).await?;
        response
            .json()
            .await
            .map_err(|err| BackendError::InvalidResponse(err.to_string()))
    }

    async fn send_unit(&self, builder: RequestBuilder) -> Result<(), BackendError> {
        checked(builder).await?;
        Ok(())
    }
}

/// FastAPI error payloads carry the message under `detail`
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

async fn checked(builder: RequestBuilder) -> Result<Response, BackendError> {
    let response = builder
        .send()
        .await
        .map_err(|err| BackendError::Network(err.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.detail)
        .unwrap_or_else(|_| status.to_string());

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Unauthorized,
        StatusCode::NOT_FOUND => BackendError::NotFound(detail),
        _ => BackendError::Rejected(detail),
    })
}

async fn file_part(file: &Path) -> Result<Form, BackendError> {
    let bytes = tokio::fs::read(file).await?;
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(Form::new().part("file", Part::bytes(bytes).file_name(name)))
}

#[async_trait]
impl ProjectBackend for HttpBackend {
    async fn list_projects(&self) -> Result<Vec<Project>, BackendError> {
        self.send(self.request(Method::GET, "/api/projects")).await
    }

    async fn create_project(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Project, BackendError> {
        let body = serde_json::json!({ "name": name, "description": description });
        self.send(self.request(Method::POST, "/api/projects").json(&body))
            .await
    }

    async fn fetch_project(&self, id: ProjectId) -> Result<Project, BackendError> {
        self.send(self.request(Method::GET, &format!("/api/projects/{id}")))
            .await
    }

    async fn update_project(
        &self,
        id: ProjectId,
        patch: &ProjectPatch,
    ) -> Result<Project, BackendError> {
        self.send(
            self.request(Method::PUT, &format!("/api/projects/{id}"))
                .json(patch),
        )
        .await
    }

    async fn delete_project(&self, id: ProjectId) -> Result<(), BackendError> {
        self.send_unit(self.request(Method::DELETE, &format!("/api/projects/{id}")))
            .await
    }

    async fn upload_source(&self, file: &Path) -> Result<UploadedSource, BackendError> {
        let form = file_part(file).await?;
        self.send(
            self.request(Method::POST, "/api/data-source/upload-file")
                .multipart(form),
        )
        .await
    }

    async fn test_connection(&self, connection: &NewDbConnection) -> Result<(), BackendError> {
        self.send_unit(
            self.request(Method::POST, "/api/data-source/test-db-connection")
                .json(connection),
        )
        .await
    }

    async fn create_connection(
        &self,
        connection: &NewDbConnection,
    ) -> Result<DbConnection, BackendError> {
        self.send(
            self.request(Method::POST, "/api/data-source/db-connections")
                .json(connection),
        )
        .await
    }

    async fn list_connections(&self) -> Result<Vec<DbConnection>, BackendError> {
        self.send(self.request(Method::GET, "/api/data-source/db-connections"))
            .await
    }

    async fn list_tables(&self, connection: i64) -> Result<Vec<String>, BackendError> {
        #[derive(Deserialize)]
        struct Tables {
            tables: Vec<String>,
        }
        let body: Tables = self
            .send(self.request(
                Method::GET,
                &format!("/api/data-source/db-connections/{connection}/tables"),
            ))
            .await?;
        Ok(body.tables)
    }

    async fn preview_table(
        &self,
        connection: i64,
        table: &str,
    ) -> Result<SourcePreview, BackendError> {
        #[derive(Deserialize)]
        struct PreviewBody {
            source_info: SourcePreview,
        }
        let body: PreviewBody = self
            .send(self.request(
                Method::GET,
                &format!("/api/data-source/db-connections/{connection}/tables/{table}/preview"),
            ))
            .await?;
        Ok(body.source_info)
    }

    async fn upload_additional_file(
        &self,
        id: ProjectId,
        file: &Path,
    ) -> Result<AdditionalFile, BackendError> {
        let form = file_part(file).await?;
        self.send(
            self.request(
                Method::POST,
                &format!("/api/additional-files/projects/{id}/additional-files/upload"),
            )
            .multipart(form),
        )
        .await
    }

    async fn list_additional_files(
        &self,
        id: ProjectId,
    ) -> Result<Vec<AdditionalFile>, BackendError> {
        self.send(self.request(
            Method::GET,
            &format!("/api/additional-files/projects/{id}/additional-files"),
        ))
        .await
    }

    async fn delete_additional_file(&self, id: ProjectId, file: i64) -> Result<(), BackendError> {
        self.send_unit(self.request(
            Method::DELETE,
            &format!("/api/additional-files/projects/{id}/additional-files/{file}"),
        ))
        .await
    }

    async fn aggregate(
        &self,
        id: ProjectId,
        config: &AggregationConfig,
    ) -> Result<AggregationReport, BackendError> {
        self.send(
            self.request(
                Method::POST,
                &format!("/api/aggregation/projects/{id}/aggregate"),
            )
            .json(config),
        )
        .await
    }

    async fn generate_features(
        &self,
        id: ProjectId,
        plan: &FeaturePlan,
    ) -> Result<FeatureReport, BackendError> {
        self.send(
            self.request(
                Method::POST,
                &format!("/api/features/projects/{id}/generate-features"),
            )
            .json(plan),
        )
        .await
    }

    async fn train_model(
        &self,
        id: ProjectId,
        request: &TrainRequest,
    ) -> Result<ModelRecord, BackendError> {
        self.send(
            self.request(
                Method::POST,
                &format!("/api/models/projects/{id}/train-model"),
            )
            .json(request),
        )
        .await
    }

    async fn list_models(&self, id: ProjectId) -> Result<Vec<ModelRecord>, BackendError> {
        self.send(self.request(Method::GET, &format!("/api/models/projects/{id}/models")))
            .await
    }

    async fn delete_model(&self, model: i64) -> Result<(), BackendError> {
        self.send_unit(self.request(Method::DELETE, &format!("/api/models/{model}")))
            .await
    }
}
