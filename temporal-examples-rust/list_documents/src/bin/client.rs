//! Client binary that starts one `list-documents` execution and prints the
//! documents it returns.

use anyhow::{Context, bail};
use helpers::{TemporalConfig, connect, failure_message, init_logging};
use log::{error, info, warn};
use temporal_client::{WfClientExt, WorkflowClientTrait, WorkflowExecutionResult};
use temporal_sdk_core_protos::coresdk::{AsJsonPayloadExt, FromJsonPayloadExt};

use list_documents::trigger::{completion_report, new_workflow_id, start_options};
use list_documents::workflow::LIST_DOCUMENTS_WORKFLOW_ALIAS;
use list_documents::{ClientConfig, ListDocumentsRequest, ListDocumentsResult, TASK_QUEUE};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let temporal = TemporalConfig::from_env().context("invalid Temporal configuration")?;
    let cfg = ClientConfig::from_env().context("invalid client configuration")?;
    let request = ListDocumentsRequest::new(cfg.organization_id.clone(), cfg.skip, cfg.limit)?;

    let client = connect(&temporal).await?;

    info!(
        "Starting workflow for organization: {} (skip={}, limit={})",
        request.organization_id, request.skip, request.limit
    );

    let input = vec![request.as_json_payload()?];

    let workflow_id = cfg
        .workflow_id
        .clone()
        .unwrap_or_else(|| new_workflow_id(&request.organization_id));

    let start_res = client
        .start_workflow(
            input,
            TASK_QUEUE.to_string(),
            workflow_id.clone(),
            LIST_DOCUMENTS_WORKFLOW_ALIAS.to_string(),
            None,
            start_options(),
        )
        .await
        .context("failed starting list-documents workflow")?;

    if start_res.started {
        info!("Workflow started with ID: {workflow_id}");
    } else {
        warn!("Workflow already running with ID: {workflow_id}, attaching to it");
    }
    info!("Workflow run ID: {}", start_res.run_id);

    let handle = client.get_untyped_workflow_handle(workflow_id.clone(), start_res.run_id);

    let payloads = match handle
        .get_workflow_result(Default::default())
        .await
        .context("failed waiting for workflow result")?
    {
        WorkflowExecutionResult::Succeeded(payloads) => payloads,
        WorkflowExecutionResult::Failed(failure) => {
            let msg = failure_message(&failure);
            error!("Workflow {workflow_id} failed: {msg}");
            bail!("workflow {workflow_id} failed: {msg}");
        }
        _ => {
            error!("Workflow {workflow_id} was cancelled, terminated or timed out");
            bail!("workflow {workflow_id} did not complete successfully");
        }
    };

    let result_payload = payloads
        .first()
        .ok_or_else(|| anyhow::anyhow!("missing result payload"))?;
    let result = ListDocumentsResult::from_json_payload(result_payload)?;

    info!("Workflow completed!");
    println!("{}", completion_report(&workflow_id, &result));

    Ok(())
}
