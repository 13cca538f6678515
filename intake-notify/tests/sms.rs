use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use intake_core::{
    models::{SubmissionPayload, SubmissionRecord},
    ports::Messenger as _,
};
use intake_notify::{NotifyError, SmsMessenger, config::SmsConfig};
use serde_json::{Value, json};
use std::sync::Arc;
use time::macros::{datetime, offset};
use tokio::sync::Mutex;

type Inbox = Arc<Mutex<Vec<Value>>>;

/// Start a fake gateway answering every request with `status`.
async fn gateway(status: StatusCode) -> (String, Inbox) {
    let inbox = Inbox::default();
    let app = Router::new()
        .route(
            "/send",
            post(
                move |State(inbox): State<Inbox>, Json(body): Json<Value>| async move {
                    inbox.lock().await.push(body);
                    (status, "queued")
                },
            ),
        )
        .with_state(inbox.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await });

    (format!("http://{address}/send"), inbox)
}

fn config(api_url: String) -> SmsConfig {
    SmsConfig {
        enabled: true,
        api_url,
        api_key: "key-123".into(),
        sender_number: "+821012345678".into(),
        admin_phone: "+821098765432".into(),
        ..Default::default()
    }
}

fn record() -> SubmissionRecord {
    SubmissionRecord::from_payload(
        SubmissionPayload {
            name: Some("테스트".into()),
            grade: Some("초등 저학년".into()),
            phone: Some("010-1234-5678".into()),
            ..Default::default()
        },
        datetime!(2024-05-01 01:30 UTC),
        offset!(+9),
    )
}

#[test]
fn disabled_by_default() {
    assert!(SmsMessenger::new(&SmsConfig::default()).unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn posts_json_message() {
    let (url, inbox) = gateway(StatusCode::OK).await;
    let messenger = SmsMessenger::new(&config(url)).unwrap().unwrap();

    messenger.dispatch(&record()).await.unwrap();

    let inbox = inbox.lock().await;
    assert_eq!(
        inbox.as_slice(),
        [json!({
            "apiKey": "key-123",
            "sender": "+821012345678",
            "receiver": "+821098765432",
            "message": "[화명현대공부방] 새 상담신청\n이름: 테스트\n학년: 초등 저학년\n연락처: 010-1234-5678",
        })]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn error_status_is_reported() {
    let (url, _inbox) = gateway(StatusCode::UNAUTHORIZED).await;
    let messenger = SmsMessenger::new(&config(url)).unwrap().unwrap();

    assert!(matches!(
        messenger.dispatch(&record()).await,
        Err(NotifyError::Http(_))
    ));
}
