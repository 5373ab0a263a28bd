//! Decoding of activity resolutions inside workflow code.

use anyhow::{anyhow, bail};
use temporal_sdk_core_protos::coresdk::{
    FromJsonPayloadExt,
    activity_result::{ActivityResolution, activity_resolution::Status},
};
use temporal_sdk_core_protos::temporal::api::failure::v1::Failure as ProtoFailure;

/// Turn an [`ActivityResolution`] into the activity's typed return value.
///
/// Failed, cancelled and backoff resolutions become errors whose message
/// carries the whole failure chain, so the workflow can surface it verbatim.
pub fn parse_activity_result<T>(res: &ActivityResolution) -> anyhow::Result<T>
where
    T: FromJsonPayloadExt,
{
    match res.status.as_ref() {
        Some(Status::Completed(success)) => {
            let payload = success
                .result
                .as_ref()
                .ok_or_else(|| anyhow!("activity completed without a result payload"))?;
            T::from_json_payload(payload)
                .map_err(|err| anyhow!("failed decoding activity result: {err}"))
        }
        Some(Status::Failed(failed)) => match failed.failure.as_ref() {
            Some(failure) => bail!("activity failed: {}", failure_message(failure)),
            None => bail!("activity failed without failure details"),
        },
        Some(Status::Cancelled(cancelled)) => match cancelled.failure.as_ref() {
            Some(failure) => bail!("activity cancelled: {}", failure_message(failure)),
            None => bail!("activity cancelled"),
        },
        Some(Status::Backoff(_)) => bail!("activity requested local backoff"),
        None => bail!("activity resolution has no status"),
    }
}

/// Join the messages of a failure and all of its causes, outermost first.
pub fn failure_message(failure: &ProtoFailure) -> String {
    let mut parts = Vec::new();
    let mut current = Some(failure);
    while let Some(f) = current {
        if !f.message.is_empty() {
            parts.push(f.message.as_str());
        }
        current = f.cause.as_deref();
    }
    if parts.is_empty() {
        "unknown failure".to_string()
    } else {
        parts.join(": ")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use temporal_sdk_core_protos::coresdk::{
        AsJsonPayloadExt,
        activity_result::{Cancellation, Failure, Success},
    };

    use super::*;

    fn failure(message: &str, cause: Option<ProtoFailure>) -> ProtoFailure {
        ProtoFailure {
            message: message.to_string(),
            cause: cause.map(Box::new),
            ..Default::default()
        }
    }

    #[test]
    fn completed_result_is_decoded() {
        let res = ActivityResolution {
            status: Some(Status::Completed(Success {
                result: Some(json!({"total_count": 3}).as_json_payload().unwrap()),
            })),
        };
        let value: serde_json::Value = parse_activity_result(&res).unwrap();
        assert_eq!(value, json!({"total_count": 3}));
    }

    #[test]
    fn completed_without_payload_is_an_error() {
        let res = ActivityResolution {
            status: Some(Status::Completed(Success { result: None })),
        };
        let err = parse_activity_result::<serde_json::Value>(&res).unwrap_err();
        assert!(err.to_string().contains("without a result payload"));
    }

    #[test]
    fn failure_chain_is_reported() {
        let res = ActivityResolution {
            status: Some(Status::Failed(Failure {
                failure: Some(failure(
                    "Activity task failed",
                    Some(failure("HttpStatusError: status 500", None)),
                )),
            })),
        };
        let err = parse_activity_result::<serde_json::Value>(&res).unwrap_err();
        assert_eq!(
            err.to_string(),
            "activity failed: Activity task failed: HttpStatusError: status 500"
        );
    }

    #[test]
    fn cancellation_is_an_error() {
        let res = ActivityResolution {
            status: Some(Status::Cancelled(Cancellation { failure: None })),
        };
        let err = parse_activity_result::<serde_json::Value>(&res).unwrap_err();
        assert_eq!(err.to_string(), "activity cancelled");
    }

    #[test]
    fn missing_status_is_an_error() {
        let res = ActivityResolution { status: None };
        assert!(parse_activity_result::<String>(&res).is_err());
    }

    #[test]
    fn empty_failure_messages_are_skipped() {
        let f = failure("", Some(failure("", None)));
        assert_eq!(failure_message(&f), "unknown failure");
    }
}
