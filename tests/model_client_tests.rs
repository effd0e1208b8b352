use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use klinik_assistant::config::ModelConfig;
use klinik_assistant::routes::create_router;
use klinik_assistant::services::chat_model::{ChatModel, ChatTurn, ModelError, OpenAiChatClient};
use klinik_assistant::services::chatbot::ChatService;
use klinik_assistant::services::knowledge_store::KnowledgeStore;
use klinik_assistant::services::prompt_builder::PromptTemplate;
use klinik_assistant::state::AppState;

/// Serves `router` on an ephemeral port and returns the API base URL.
async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/v1")
}

fn model_config(api_url: String, timeout: Duration) -> ModelConfig {
    ModelConfig {
        api_url,
        api_key: "test-key".to_string(),
        model: "mistral-small-latest".to_string(),
        timeout,
        temperature: 0.3,
    }
}

fn turns() -> Vec<ChatTurn> {
    vec![
        ChatTurn::system("BİLGİ BANKASI:\nSoru: a\nCevap: b\n\n"),
        ChatTurn::user("hangi bölümleriniz var"),
    ]
}

fn slow_upstream() -> Router {
    Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({"choices": [{"message": {"content": "late"}}]}))
        }),
    )
}

#[tokio::test]
async fn test_request_shape_and_auth() {
    let seen: Arc<Mutex<Option<(Option<String>, Value)>>> = Arc::new(Mutex::new(None));
    let captured = seen.clone();
    let upstream = Router::new().route(
        "/v1/chat/completions",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let captured = captured.clone();
            async move {
                let auth = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                *captured.lock().unwrap() = Some((auth, body));
                Json(json!({"choices": [{"message": {"role": "assistant", "content": "Kardiyoloji var."}}]}))
            }
        }),
    );
    let base = spawn_upstream(upstream).await;
    let client = OpenAiChatClient::new(&model_config(base, Duration::from_secs(5))).unwrap();

    let reply = client.send(&turns()).await.unwrap();
    assert_eq!(reply.text, "Kardiyoloji var.");

    let (auth, body) = seen.lock().unwrap().take().expect("upstream was not called");
    assert_eq!(auth.as_deref(), Some("Bearer test-key"));
    assert_eq!(body["model"], "mistral-small-latest");
    assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    assert_eq!(
        body["messages"],
        json!([
            {"role": "system", "content": "BİLGİ BANKASI:\nSoru: a\nCevap: b\n\n"},
            {"role": "user", "content": "hangi bölümleriniz var"},
        ])
    );
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let base = spawn_upstream(slow_upstream()).await;
    let client = OpenAiChatClient::new(&model_config(base, Duration::from_millis(300))).unwrap();

    let err = client.send(&turns()).await.unwrap_err();
    assert!(matches!(err, ModelError::Timeout), "got {err:?}");
}

#[tokio::test]
async fn test_upstream_error_body_is_normalized() {
    let upstream = Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": {"message": "boom"}})),
            )
        }),
    );
    let base = spawn_upstream(upstream).await;
    let client = OpenAiChatClient::new(&model_config(base, Duration::from_secs(5))).unwrap();

    match client.send(&turns()).await.unwrap_err() {
        ModelError::Unavailable(msg) => assert_eq!(msg, "500 Internal Server Error: boom"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_no_choices_is_empty_reply() {
    let upstream = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let base = spawn_upstream(upstream).await;
    let client = OpenAiChatClient::new(&model_config(base, Duration::from_secs(5))).unwrap();

    let err = client.send(&turns()).await.unwrap_err();
    assert!(matches!(err, ModelError::EmptyReply), "got {err:?}");
}

#[tokio::test]
async fn test_upstream_timeout_is_gateway_timeout() {
    let base = spawn_upstream(slow_upstream()).await;
    let client = OpenAiChatClient::new(&model_config(base, Duration::from_millis(300))).unwrap();
    let chat = ChatService::new(
        Arc::new(KnowledgeStore::builtin()),
        PromptTemplate::turkish(),
        Arc::new(client),
    );
    let app = create_router().with_state(Arc::new(AppState::new(chat)));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"userInput": "Nasıl randevu oluşturabilirim?"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
}
