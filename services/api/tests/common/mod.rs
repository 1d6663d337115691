//! Shared fixtures for the web service integration tests.

#![allow(dead_code)]

use api_lib::{
    adapters::OpenAiCompletionClient,
    config::Config,
    web::{self, AppState},
};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    routing::post,
    Router,
};
use serde_json::Value;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;
use study_planner_core::ports::{CompletionService, PortError, PortResult, TextExtractionService};
use tower::ServiceExt;

pub const BOUNDARY: &str = "----study-planner-test-boundary";

//=========================================================================================
// Fake Text Extractor
//=========================================================================================

/// Returns the uploaded bytes as text, or fails when they start with `BROKEN`.
#[derive(Default)]
pub struct FakeExtractor {
    pub calls: AtomicUsize,
}

impl FakeExtractor {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextExtractionService for FakeExtractor {
    async fn extract_text(&self, pdf_bytes: &[u8]) -> PortResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if pdf_bytes.starts_with(b"BROKEN") {
            return Err(PortError::Unexpected("unreadable xref table".to_string()));
        }
        Ok(String::from_utf8_lossy(pdf_bytes).into_owned())
    }
}

//=========================================================================================
// Fake Completion API
//=========================================================================================

/// A request the fake completion endpoint received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

pub struct FakeCompletionApi {
    pub requests: Mutex<Vec<RecordedRequest>>,
    pub reply: Mutex<(StatusCode, String)>,
}

impl FakeCompletionApi {
    pub fn set_reply(&self, status: StatusCode, body: &str) {
        *self.reply.lock().unwrap() = (status, body.to_string());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn fake_completion(
    State(api): State<Arc<FakeCompletionApi>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    api.requests.lock().unwrap().push(RecordedRequest {
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });
    api.reply.lock().unwrap().clone()
}

/// Serves the fake completion endpoint on an ephemeral local port.
async fn spawn_fake_completion_api() -> (Arc<FakeCompletionApi>, String) {
    let api = Arc::new(FakeCompletionApi {
        requests: Mutex::new(Vec::new()),
        reply: Mutex::new((
            StatusCode::OK,
            r#"{"choices":[{"message":{"content":"Day 1: review..."}}]}"#.to_string(),
        )),
    });
    let app = Router::new()
        .route("/v1/chat/completions", post(fake_completion))
        .with_state(api.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (api, format!("http://{}/v1/chat/completions", addr))
}

//=========================================================================================
// Test Harness
//=========================================================================================

pub struct TestApp {
    pub router: Router,
    pub extractor: Arc<FakeExtractor>,
    pub completion_api: Arc<FakeCompletionApi>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(Config::default(), None).await
    }

    /// Builds the app from `config`, pointed at the fake completion endpoint.
    /// `completion` replaces the HTTP completion client when given.
    pub async fn spawn_with(
        config: Config,
        completion: Option<Arc<dyn CompletionService>>,
    ) -> Self {
        let (completion_api, endpoint) = spawn_fake_completion_api().await;
        let config = Config {
            completion_url: endpoint.clone(),
            ..config
        };
        let extractor = Arc::new(FakeExtractor::default());
        let completion: Arc<dyn CompletionService> = match completion {
            Some(completion) => completion,
            None => Arc::new(OpenAiCompletionClient::new(
                reqwest::Client::new(),
                endpoint,
                config.plan_model.clone(),
            )),
        };
        let app_state = Arc::new(AppState::new(
            Arc::new(config),
            extractor.clone(),
            completion,
        ));

        Self {
            router: web::router(app_state),
            extractor,
            completion_api,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    /// Posts the Add New Test form.
    pub async fn submit_test_form(&self, form: &MultipartForm) -> StatusCode {
        let request = Request::builder()
            .method("POST")
            .uri("/tests")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(form.finish()))
            .unwrap();
        self.send(request).await.0
    }

    /// Posts the Generate Study Plan form.
    pub async fn request_plan(&self, api_key: &str) -> StatusCode {
        let request = Request::builder()
            .method("POST")
            .uri("/plan")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("api_key={}", api_key)))
            .unwrap();
        self.send(request).await.0
    }

    pub async fn state(&self) -> Value {
        let request = Request::builder()
            .uri("/api/state")
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = self.send(request).await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_str(&body).unwrap()
    }

    /// Polls the state until no generation is outstanding.
    pub async fn settled_state(&self) -> Value {
        for _ in 0..500 {
            let state = self.state().await;
            if state["pending_generations"] == 0 {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("plan generation did not finish");
    }

    /// Adds a complete test through the form in one submission.
    pub async fn add_test(&self, name: &str, date: &str, study_guide: &str) {
        let form = MultipartForm::new()
            .text("name", name)
            .text("date", date)
            .file("study_guide", "guide.pdf", "application/pdf", study_guide.as_bytes())
            .text("intent", "add");
        assert_eq!(self.submit_test_form(&form).await, StatusCode::SEE_OTHER);
    }
}

//=========================================================================================
// Multipart Body Builder
//=========================================================================================

#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, name, file_name, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(&self) -> Vec<u8> {
        let mut body = self.body.clone();
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }
}
