use crate::{ReviewStatus, TrackedItem};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("unrecognized review status `{status}`")]
    UnknownStatus { status: String },
    #[error("homework entry carries no name")]
    MissingName,
}

/// Render a tracked item as the message delivered to the chat.
pub fn translate(item: &TrackedItem) -> Result<String, TranslateError> {
    let wire_status = item.status.as_deref().unwrap_or_default();
    let status =
        ReviewStatus::from_wire(wire_status).ok_or_else(|| TranslateError::UnknownStatus {
            status: wire_status.to_string(),
        })?;

    let name = match item.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(TranslateError::MissingName),
    };

    let verdict = status.verdict();
    let message = match item.comment.as_deref().filter(|c| !c.is_empty()) {
        Some(comment) => format!(
            "Review status changed for \"{name}\": {verdict}. Reviewer comment: {comment}"
        ),
        None => format!("Review status changed for \"{name}\": {verdict}."),
    };
    Ok(message)
}
