//! Workflow definition for listing one page of organization documents.

use std::time::Duration;

use helpers::parse_activity_result;
use log::{info, warn};
use prost_wkt_types::Duration as ProstDuration;
use temporal_sdk::{ActivityOptions, WfContext, WfExitValue, WorkflowResult};
use temporal_sdk_core_protos::coresdk::{
    AsJsonPayloadExt, workflow_commands::ActivityCancellationType,
};
use temporal_sdk_core_protos::temporal::api::common::v1::RetryPolicy;

use crate::activities::LIST_DOCUMENTS_ACTIVITY;
use crate::types::{ListDocumentsRequest, ListDocumentsResult};

/// Workflow type name.
pub const LIST_DOCUMENTS_WORKFLOW: &str = "ListDocumentsWorkflow";
/// Shorter alias registered for the same workflow function.
pub const LIST_DOCUMENTS_WORKFLOW_ALIAS: &str = "list-documents";

pub const ACTIVITY_START_TO_CLOSE_TIMEOUT: Duration = Duration::from_secs(60);

/// Retry behaviour the server applies to `list_documents_activity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityRetrySettings {
    pub initial_interval: Duration,
    pub backoff_coefficient: f64,
    pub maximum_interval: Duration,
    /// Total attempts including the first one; 0 means unlimited.
    pub maximum_attempts: i32,
}

impl Default for ActivityRetrySettings {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(1),
            backoff_coefficient: 2.0,
            maximum_interval: Duration::from_secs(30),
            maximum_attempts: 5,
        }
    }
}

impl ActivityRetrySettings {
    pub fn to_retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            initial_interval: Some(prost_duration(self.initial_interval)),
            backoff_coefficient: self.backoff_coefficient,
            maximum_interval: Some(prost_duration(self.maximum_interval)),
            maximum_attempts: self.maximum_attempts,
            ..Default::default()
        }
    }
}

fn prost_duration(d: Duration) -> ProstDuration {
    ProstDuration {
        seconds: d.as_secs() as i64,
        nanos: d.subsec_nanos() as i32,
    }
}

/// Options used to schedule the activity for `req`.
pub fn activity_options(req: &ListDocumentsRequest) -> anyhow::Result<ActivityOptions> {
    Ok(ActivityOptions {
        activity_type: LIST_DOCUMENTS_ACTIVITY.to_string(),
        input: req.as_json_payload()?,
        start_to_close_timeout: Some(ACTIVITY_START_TO_CLOSE_TIMEOUT),
        retry_policy: Some(ActivityRetrySettings::default().to_retry_policy()),
        cancellation_type: ActivityCancellationType::TryCancel,
        ..Default::default()
    })
}

/// Invoke `list_documents_activity` once and return its result unchanged.
///
/// Input is decoded before anything is scheduled, so bad arguments fail the
/// workflow without touching the document service. Once the server has used
/// up the activity's retries the final failure fails the workflow too.
pub async fn list_documents_workflow(ctx: WfContext) -> WorkflowResult<ListDocumentsResult> {
    let req = ListDocumentsRequest::from_workflow_args(ctx.get_args())?;

    info!(
        "Starting workflow to list documents for organization: {}",
        req.organization_id
    );

    let resolution = ctx.activity(activity_options(&req)?).await;

    match parse_activity_result::<ListDocumentsResult>(&resolution) {
        Ok(result) => {
            info!(
                "Workflow completed. Found {} documents (total_count={:?})",
                result.document_count(),
                result.total_count()
            );
            Ok(WfExitValue::Normal(result))
        }
        Err(err) => {
            warn!("Listing documents for {} failed: {err}", req.organization_id);
            Err(err.context(format!(
                "listing documents for organization {} failed",
                req.organization_id
            )))
        }
    }
}
