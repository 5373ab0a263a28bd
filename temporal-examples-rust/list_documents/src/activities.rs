//! The `list_documents_activity` implementation.

use std::future::Future;
use std::sync::Arc;

use log::{error, info, warn};
use temporal_sdk::{ActContext, ActivityError};

use crate::client::DocRouterClient;
use crate::types::{ListDocumentsRequest, ListDocumentsResult};

/// Activity type name the workflow schedules and the worker registers.
pub const LIST_DOCUMENTS_ACTIVITY: &str = "list_documents_activity";

/// Fetch one page of documents for the requested organization.
///
/// The client (and the configuration inside it) is built once at worker
/// startup and captured by the registered closure; see `bin/worker.rs`.
pub async fn list_documents_activity(
    ctx: ActContext,
    client: Arc<DocRouterClient>,
    req: ListDocumentsRequest,
) -> Result<ListDocumentsResult, ActivityError> {
    fetch_until_cancelled(&client, req, ctx.cancelled()).await
}

/// Run the request unless `cancelled` resolves first, in which case the
/// in-flight HTTP call is dropped and the activity reports cancellation.
pub async fn fetch_until_cancelled<C>(
    client: &DocRouterClient,
    req: ListDocumentsRequest,
    cancelled: C,
) -> Result<ListDocumentsResult, ActivityError>
where
    C: Future<Output = ()>,
{
    if let Err(err) = req.validate() {
        warn!("Rejecting list documents request: {err}");
        return Err(ActivityError::NonRetryable(anyhow::Error::new(err)));
    }

    info!(
        "Listing documents for organization {} (skip={}, limit={})",
        req.organization_id, req.skip, req.limit
    );

    tokio::select! {
        res = client.list_documents(&req.organization_id, req.skip, req.limit) => {
            res.map_err(|err| {
                error!("Listing documents for organization {} failed: {err}", req.organization_id);
                err.into_activity_error()
            })
        }
        _ = cancelled => {
            warn!("Listing documents for organization {} cancelled", req.organization_id);
            Err(ActivityError::Cancelled { details: None })
        }
    }
}
