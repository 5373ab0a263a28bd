//! Pieces of the client binary that do not need a live server.

use temporal_client::WorkflowOptions;
use temporal_sdk_core_protos::temporal::api::enums::v1::WorkflowIdConflictPolicy;
use uuid::Uuid;

use crate::types::ListDocumentsResult;

/// `list-documents-{organization_id}-{8 hex chars}`.
pub fn new_workflow_id(organization_id: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("list-documents-{organization_id}-{}", &suffix[..8])
}

/// Start options for the workflow.
///
/// If an execution with the same id is already running the server hands back
/// that execution instead of rejecting the start, so the client attaches to
/// it and waits for its result.
pub fn start_options() -> WorkflowOptions {
    WorkflowOptions {
        id_conflict_policy: WorkflowIdConflictPolicy::UseExisting,
        ..Default::default()
    }
}

/// What the client prints once the workflow has completed.
pub fn completion_report(workflow_id: &str, result: &ListDocumentsResult) -> String {
    format!("Workflow {workflow_id} completed\n{result}")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn workflow_ids_are_unique_per_call() {
        let a = new_workflow_id("org123");
        let b = new_workflow_id("org123");
        assert!(a.starts_with("list-documents-org123-"));
        assert_eq!(a.len(), "list-documents-org123-".len() + 8);
        assert_ne!(a, b);
    }

    #[test]
    fn running_execution_is_reused() {
        assert_eq!(
            start_options().id_conflict_policy,
            WorkflowIdConflictPolicy::UseExisting
        );
    }

    #[test]
    fn report_names_the_workflow() {
        let result = ListDocumentsResult(json!({
            "documents": [{"id": "d1", "name": "a.pdf"}],
            "total_count": 1
        }));
        assert_eq!(
            completion_report("list-documents-org123-abcd1234", &result),
            "Workflow list-documents-org123-abcd1234 completed\n\
             Total documents: 1\n\
             Documents returned: 1\n  \
             - a.pdf (ID: d1)"
        );
    }
}
