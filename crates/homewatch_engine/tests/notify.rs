use homewatch_engine::{DeliveryFailureKind, Notifier, NotifySettings, TelegramNotifier};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn notifier_for(server: &MockServer) -> TelegramNotifier {
    let settings = NotifySettings {
        api_base: server.uri(),
        ..NotifySettings::default()
    };
    TelegramNotifier::new(settings, "bot-token".to_string(), "42".to_string())
        .expect("client builds")
}

#[tokio::test]
async fn delivers_message_to_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botbot-token/sendMessage"))
        .and(body_json(json!({ "chat_id": "42", "text": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    notifier_for(&server)
        .deliver("hello")
        .await
        .expect("delivery ok");
}

#[tokio::test]
async fn auth_rejection_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botbot-token/sendMessage"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "ok": false, "description": "Unauthorized" })),
        )
        .mount(&server)
        .await;

    let err = notifier_for(&server).deliver("hello").await.unwrap_err();
    assert_eq!(err.kind, DeliveryFailureKind::Rejected(401));
    assert!(!err.is_recoverable());
    assert!(err.message.contains("Unauthorized"));
}

#[tokio::test]
async fn forbidden_chat_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botbot-token/sendMessage"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(
                json!({ "ok": false, "description": "Forbidden: bot was kicked" }),
            ),
        )
        .mount(&server)
        .await;

    let err = notifier_for(&server).deliver("hello").await.unwrap_err();
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn server_error_is_recoverable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botbot-token/sendMessage"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = notifier_for(&server).deliver("hello").await.unwrap_err();
    assert_eq!(err.kind, DeliveryFailureKind::Rejected(502));
    assert!(err.is_recoverable());
}
