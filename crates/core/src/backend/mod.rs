// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Project backend adapter
//!
//! The trait the wizard drives, plus the HTTP implementation speaking to
//! the real service and a fake for tests.

pub mod fake;
pub mod http;
pub mod traits;

pub use fake::{BackendCall, FakeBackend};
pub use http::HttpBackend;
pub use traits::{
    AdditionalFile, AggregationReport, BackendError, DbConnection, FeatureReport, NewDbConnection,
    ProjectBackend, UploadedSource,
};
