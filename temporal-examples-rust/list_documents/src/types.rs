//! Request and result shapes exchanged between client, workflow and activity.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use temporal_sdk_core_protos::coresdk::FromJsonPayloadExt;
use temporal_sdk_core_protos::temporal::api::common::v1::Payload;
use thiserror::Error;

use crate::config::{DEFAULT_LIMIT, MAX_LIMIT};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("organization_id must not be empty")]
    EmptyOrganization,

    #[error("limit must be between 1 and 100, got {0}")]
    LimitOutOfRange(u32),

    #[error("invalid workflow arguments: {0}")]
    InvalidArguments(String),
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// One page request against `/v0/orgs/{organization_id}/documents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDocumentsRequest {
    pub organization_id: String,
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl ListDocumentsRequest {
    /// Build a validated request.
    pub fn new(
        organization_id: impl Into<String>,
        skip: u32,
        limit: u32,
    ) -> Result<Self, RequestError> {
        let req = Self {
            organization_id: organization_id.into(),
            skip,
            limit,
        };
        req.validate()?;
        Ok(req)
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        if self.organization_id.trim().is_empty() {
            return Err(RequestError::EmptyOrganization);
        }
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(RequestError::LimitOutOfRange(self.limit));
        }
        Ok(())
    }

    /// Decode workflow input.
    ///
    /// Accepts a single JSON object (`{"organization_id", "skip", "limit"}`)
    /// or positional arguments `organization_id, [skip, [limit]]`.
    pub fn from_workflow_args(args: &[Payload]) -> Result<Self, RequestError> {
        let first = args
            .first()
            .ok_or_else(|| RequestError::InvalidArguments("no arguments supplied".into()))?;
        let first = decode_arg::<Value>(first, "first argument")?;

        let req = match first {
            Value::Object(_) => serde_json::from_value::<Self>(first)
                .map_err(|err| RequestError::InvalidArguments(err.to_string()))?,
            Value::String(organization_id) => {
                let skip = match args.get(1) {
                    Some(p) => decode_arg::<u32>(p, "skip")?,
                    None => 0,
                };
                let limit = match args.get(2) {
                    Some(p) => decode_arg::<u32>(p, "limit")?,
                    None => DEFAULT_LIMIT,
                };
                Self {
                    organization_id,
                    skip,
                    limit,
                }
            }
            other => {
                return Err(RequestError::InvalidArguments(format!(
                    "expected an object or an organization id string, got {other}"
                )));
            }
        };

        req.validate()?;
        Ok(req)
    }
}

fn decode_arg<T: FromJsonPayloadExt>(payload: &Payload, what: &str) -> Result<T, RequestError> {
    T::from_json_payload(payload)
        .map_err(|err| RequestError::InvalidArguments(format!("cannot decode {what}: {err}")))
}

/// Read-only view of one entry of the `documents` array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Document<'a>(pub &'a Value);

impl Document<'_> {
    pub fn id(&self) -> Option<String> {
        self.0.get("id").and_then(scalar_text)
    }

    /// `document_name`, falling back to `name`.
    pub fn name(&self) -> Option<String> {
        self.0
            .get("document_name")
            .and_then(scalar_text)
            .or_else(|| self.0.get("name").and_then(scalar_text))
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// One page of documents, relayed exactly as the service sent it.
///
/// Any valid JSON body is accepted; the accessors below only read it for
/// logging and printing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListDocumentsResult(pub Value);

impl ListDocumentsResult {
    /// Entries of the top-level `documents` array; empty when absent.
    pub fn documents(&self) -> impl Iterator<Item = Document<'_>> {
        self.0
            .get("documents")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(Document)
    }

    pub fn document_count(&self) -> usize {
        self.documents().count()
    }

    /// `total_count` as sent, unless missing or null.
    pub fn total_count(&self) -> Option<&Value> {
        self.0.get("total_count").filter(|v| !v.is_null())
    }
}

impl fmt::Display for ListDocumentsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.total_count() {
            Some(total) => writeln!(f, "Total documents: {total}")?,
            None => writeln!(f, "Total documents: unknown")?,
        }
        write!(f, "Documents returned: {}", self.document_count())?;
        for doc in self.documents() {
            let name = doc.name().unwrap_or_else(|| "Unknown".to_string());
            let id = doc.id().unwrap_or_else(|| "unknown".to_string());
            write!(f, "\n  - {name} (ID: {id})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use temporal_sdk_core_protos::coresdk::AsJsonPayloadExt;

    use super::*;

    fn payloads(values: &[Value]) -> Vec<Payload> {
        values.iter().map(|v| v.as_json_payload().unwrap()).collect()
    }

    #[test]
    fn new_validates_inputs() {
        assert!(ListDocumentsRequest::new("org123", 0, 10).is_ok());
        assert_eq!(
            ListDocumentsRequest::new("  ", 0, 10).unwrap_err(),
            RequestError::EmptyOrganization
        );
        assert_eq!(
            ListDocumentsRequest::new("org", 0, 0).unwrap_err(),
            RequestError::LimitOutOfRange(0)
        );
        assert_eq!(
            ListDocumentsRequest::new("org", 0, 101).unwrap_err(),
            RequestError::LimitOutOfRange(101)
        );
    }

    #[test]
    fn object_argument_is_decoded_with_defaults() {
        let args = payloads(&[json!({"organization_id": "org123"})]);
        let req = ListDocumentsRequest::from_workflow_args(&args).unwrap();
        assert_eq!(req, ListDocumentsRequest::new("org123", 0, 100).unwrap());

        let args = payloads(&[json!({"organization_id": "org123", "skip": 5, "limit": 10})]);
        let req = ListDocumentsRequest::from_workflow_args(&args).unwrap();
        assert_eq!((req.skip, req.limit), (5, 10));
    }

    #[test]
    fn positional_arguments_are_decoded() {
        let req = ListDocumentsRequest::from_workflow_args(&payloads(&[json!("org1")])).unwrap();
        assert_eq!((req.skip, req.limit), (0, 100));

        let req =
            ListDocumentsRequest::from_workflow_args(&payloads(&[json!("org1"), json!(30)]))
                .unwrap();
        assert_eq!((req.skip, req.limit), (30, 100));

        let req = ListDocumentsRequest::from_workflow_args(&payloads(&[
            json!("org1"),
            json!(30),
            json!(15),
        ]))
        .unwrap();
        assert_eq!(req, ListDocumentsRequest::new("org1", 30, 15).unwrap());
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(matches!(
            ListDocumentsRequest::from_workflow_args(&[]),
            Err(RequestError::InvalidArguments(_))
        ));
        assert!(matches!(
            ListDocumentsRequest::from_workflow_args(&payloads(&[json!(42)])),
            Err(RequestError::InvalidArguments(_))
        ));
        assert!(matches!(
            ListDocumentsRequest::from_workflow_args(&payloads(&[json!("org"), json!(-1)])),
            Err(RequestError::InvalidArguments(_))
        ));
        assert_eq!(
            ListDocumentsRequest::from_workflow_args(&payloads(&[json!("")])).unwrap_err(),
            RequestError::EmptyOrganization
        );
        assert_eq!(
            ListDocumentsRequest::from_workflow_args(&payloads(&[json!({
                "organization_id": "org", "limit": 0
            })]))
            .unwrap_err(),
            RequestError::LimitOutOfRange(0)
        );
    }

    fn round_trip(body: Value) -> ListDocumentsResult {
        let result: ListDocumentsResult = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(serde_json::to_value(&result).unwrap(), body);
        result
    }

    #[test]
    fn result_round_trips_unknown_fields() {
        let result = round_trip(json!({
            "documents": [{"id": "d1", "document_name": "a.pdf", "state": "ocr_completed"}],
            "total_count": 1,
            "next_skip": 10,
        }));
        assert_eq!(result.total_count(), Some(&json!(1)));
        assert_eq!(result.document_count(), 1);
    }

    #[test]
    fn null_total_count_is_kept() {
        let result = round_trip(json!({"documents": [], "total_count": null}));
        assert_eq!(result.total_count(), None);
    }

    #[test]
    fn fractional_total_count_is_kept() {
        let result = round_trip(json!({"documents": [], "total_count": 1.0}));
        assert_eq!(result.to_string(), "Total documents: 1.0\nDocuments returned: 0");
    }

    #[test]
    fn body_without_documents_is_kept() {
        let result = round_trip(json!({"items": [], "total_count": 0}));
        assert_eq!(result.document_count(), 0);
    }

    #[test]
    fn non_object_body_is_kept() {
        let result = round_trip(json!([{"id": "d1"}]));
        assert_eq!(result.document_count(), 0);
        assert_eq!(result.total_count(), None);
    }

    #[test]
    fn display_lists_every_document() {
        let result: ListDocumentsResult = serde_json::from_value(json!({
            "documents": [
                {"id": "d1", "name": "a.pdf"},
                {"id": 7, "document_name": "b.pdf", "name": "ignored"},
                {"status": "uploaded"}
            ],
            "total_count": 3
        }))
        .unwrap();

        assert_eq!(
            result.to_string(),
            "Total documents: 3\n\
             Documents returned: 3\n  \
             - a.pdf (ID: d1)\n  \
             - b.pdf (ID: 7)\n  \
             - Unknown (ID: unknown)"
        );
    }

    #[test]
    fn display_without_total() {
        let result: ListDocumentsResult =
            serde_json::from_value(json!({"documents": []})).unwrap();
        assert_eq!(
            result.to_string(),
            "Total documents: unknown\nDocuments returned: 0"
        );
    }
}
