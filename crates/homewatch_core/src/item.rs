use serde::Deserialize;

/// One homework submission record as returned by the review API.
///
/// Every field is optional on the wire; the translator decides which
/// absences are errors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TrackedItem {
    #[serde(rename = "homework_name", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "reviewer_comment", default)]
    pub comment: Option<String>,
    #[serde(rename = "date_updated", default)]
    pub updated_at: Option<i64>,
}

/// Recognized review states for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    /// Maps a wire status string to a recognized state, if any.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "reviewing" => Some(ReviewStatus::Pending),
            "approved" => Some(ReviewStatus::Approved),
            "rejected" => Some(ReviewStatus::Rejected),
            _ => None,
        }
    }

    /// Fixed human-readable verdict for this state.
    pub fn verdict(self) -> &'static str {
        match self {
            ReviewStatus::Pending => "work received for review",
            ReviewStatus::Approved => "work reviewed, accepted",
            ReviewStatus::Rejected => "work reviewed, has remarks",
        }
    }
}
