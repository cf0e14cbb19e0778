use homewatch_core::{translate, TrackedItem, TranslateError};
use pretty_assertions::assert_eq;

fn item(name: &str, status: &str) -> TrackedItem {
    TrackedItem {
        name: Some(name.to_string()),
        status: Some(status.to_string()),
        ..TrackedItem::default()
    }
}

#[test]
fn pending_verdict() {
    let message = translate(&item("hw1", "reviewing")).expect("recognized status");
    assert_eq!(
        message,
        "Review status changed for \"hw1\": work received for review."
    );
}

#[test]
fn approved_verdict() {
    let message = translate(&item("hw1", "approved")).expect("recognized status");
    assert_eq!(
        message,
        "Review status changed for \"hw1\": work reviewed, accepted."
    );
}

#[test]
fn rejected_verdict() {
    let message = translate(&item("hw1", "rejected")).expect("recognized status");
    assert_eq!(
        message,
        "Review status changed for \"hw1\": work reviewed, has remarks."
    );
}

#[test]
fn comment_is_appended() {
    let mut item = item("hw1", "rejected");
    item.comment = Some("please add tests".to_string());

    let message = translate(&item).expect("recognized status");
    assert_eq!(
        message,
        "Review status changed for \"hw1\": work reviewed, has remarks. \
         Reviewer comment: please add tests"
    );
}

#[test]
fn empty_comment_is_omitted() {
    let mut item = item("hw1", "approved");
    item.comment = Some(String::new());

    let message = translate(&item).expect("recognized status");
    assert!(!message.contains("Reviewer comment"));
}

#[test]
fn unknown_status_is_rejected() {
    let err = translate(&item("hw1", "unknown_state")).unwrap_err();
    assert_eq!(
        err,
        TranslateError::UnknownStatus {
            status: "unknown_state".to_string(),
        }
    );
}

#[test]
fn absent_status_is_rejected() {
    let entry = TrackedItem {
        name: Some("hw1".to_string()),
        ..TrackedItem::default()
    };
    let err = translate(&entry).unwrap_err();
    assert!(matches!(err, TranslateError::UnknownStatus { .. }));
}

#[test]
fn absent_name_is_rejected() {
    let entry = TrackedItem {
        status: Some("approved".to_string()),
        ..TrackedItem::default()
    };
    assert_eq!(translate(&entry), Err(TranslateError::MissingName));
}

#[test]
fn empty_name_is_rejected() {
    assert_eq!(translate(&item("", "approved")), Err(TranslateError::MissingName));
}
