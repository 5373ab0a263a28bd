//! Worker for the `list_documents` example.

use std::sync::Arc;

use anyhow::Context;
use helpers::{TemporalConfig, connect, init_logging};
use log::info;
use temporal_sdk::{ActContext, Worker};
use temporal_sdk_core::{CoreRuntime, init_worker};
use temporal_sdk_core_api::worker::WorkerVersioningStrategy;
use temporal_sdk_core_api::{telemetry::TelemetryOptionsBuilder, worker::WorkerConfigBuilder};

use list_documents::activities::{LIST_DOCUMENTS_ACTIVITY, list_documents_activity};
use list_documents::workflow::{
    LIST_DOCUMENTS_WORKFLOW, LIST_DOCUMENTS_WORKFLOW_ALIAS, list_documents_workflow,
};
use list_documents::{DocRouterClient, DocRouterConfig, ListDocumentsRequest, TASK_QUEUE};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    info!("Starting list_documents worker ...");

    // Resolve everything before touching the network so bad config fails fast.
    let temporal = TemporalConfig::from_env().context("invalid Temporal configuration")?;
    let docrouter = DocRouterConfig::from_env().context("invalid DocRouter configuration")?;
    info!("DocRouter API at {}", docrouter.base_url);

    let docrouter = Arc::new(DocRouterClient::new(docrouter));

    let client = connect(&temporal).await?;
    info!("Connected to Temporal namespace: {}", temporal.namespace);

    // Build runtime & worker config.
    let telemetry_options = TelemetryOptionsBuilder::default().build()?;
    let runtime = CoreRuntime::new_assume_tokio(telemetry_options)?;

    let worker_config = WorkerConfigBuilder::default()
        .namespace(temporal.namespace.clone())
        .task_queue(TASK_QUEUE)
        .versioning_strategy(WorkerVersioningStrategy::None {
            build_id: "rust-sdk".to_owned(),
        })
        .build()?;

    let core_worker = init_worker(&runtime, worker_config, client)?;
    let mut worker = Worker::new_from_core(Arc::new(core_worker), TASK_QUEUE);

    worker.register_activity(
        LIST_DOCUMENTS_ACTIVITY,
        move |ctx: ActContext, req: ListDocumentsRequest| {
            let docrouter = docrouter.clone();
            async move { list_documents_activity(ctx, docrouter, req).await }
        },
    );
    worker.register_wf(LIST_DOCUMENTS_WORKFLOW, list_documents_workflow);
    worker.register_wf(LIST_DOCUMENTS_WORKFLOW_ALIAS, list_documents_workflow);

    info!("Starting worker on task queue: {TASK_QUEUE}");

    // Run until the process is terminated.
    worker.run().await?;

    Ok(())
}
