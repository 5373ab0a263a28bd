//! `list_documents` example crate.
//!
//! A workflow receives an organization id plus `skip`/`limit`, runs one
//! activity that performs an authenticated `GET` against the DocRouter
//! `/v0/orgs/{organization_id}/documents` endpoint, and returns the parsed
//! page. The `worker` binary hosts both on the `doc-router-task-queue` task
//! queue; the `client` binary starts an execution and prints the documents.

pub mod activities;
pub mod client;
pub mod config;
pub mod error;
pub mod trigger;
pub mod types;
pub mod workflow;

pub use client::DocRouterClient;
pub use config::{ClientConfig, ConfigError, DocRouterConfig, TASK_QUEUE};
pub use error::DocRouterError;
pub use types::{Document, ListDocumentsRequest, ListDocumentsResult, RequestError};
