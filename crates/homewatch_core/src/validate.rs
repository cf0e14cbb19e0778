use serde_json::Value;

use crate::TrackedItem;

/// Validator output: the tracked items plus the watermark the API reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBatch {
    pub items: Vec<TrackedItem>,
    /// Value of the payload's `current_date` key, when present.
    pub next_watermark: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidateError {
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
    #[error("no homework entries in the requested window")]
    EmptyResult,
}

/// Check a raw payload's shape and extract the homework list and watermark.
///
/// Only the first (most recent) entry is ever examined downstream, so an
/// empty list or a null first entry is `EmptyResult` rather than a success.
pub fn validate(payload: &Value) -> Result<ValidatedBatch, ValidateError> {
    let object = payload
        .as_object()
        .ok_or_else(|| malformed("payload is not a JSON object"))?;

    let homeworks = object
        .get("homeworks")
        .ok_or_else(|| malformed("missing `homeworks` key"))?;
    let entries = homeworks
        .as_array()
        .ok_or_else(|| malformed("`homeworks` is not an array"))?;

    match entries.first() {
        None | Some(Value::Null) => return Err(ValidateError::EmptyResult),
        Some(_) => {}
    }

    let items = entries
        .iter()
        .map(|entry| {
            serde_json::from_value(entry.clone())
                .map_err(|err| malformed(format!("homework entry: {err}")))
        })
        .collect::<Result<Vec<TrackedItem>, ValidateError>>()?;

    let next_watermark = object.get("current_date").and_then(Value::as_i64);

    Ok(ValidatedBatch {
        items,
        next_watermark,
    })
}

fn malformed(reason: impl Into<String>) -> ValidateError {
    ValidateError::MalformedResponse {
        reason: reason.into(),
    }
}
