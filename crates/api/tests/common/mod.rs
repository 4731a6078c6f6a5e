#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use certgen_ai::extraction::{ExtractionGateway, ExtractionSettings};
use certgen_ai::image::ImageGateway;
use certgen_ai::openai::OpenAiConfig;
use certgen_ai::provider::{
    GeneratedImage, ImageGeneration, ImageModel, ImageRequest, LanguageModel, ProviderError,
};
use certgen_api::auth::identity::{IdentityConfig, IdentityError, IdentityProvider};
use certgen_api::auth::jwt::JwtConfig;
use certgen_api::config::ServerConfig;
use certgen_api::records::{RecordAccessGateway, RecordStore};
use certgen_api::router::build_app_router;
use certgen_api::state::AppState;
use certgen_db::models::certificate::CertificateRecord;
use certgen_db::models::template::Template;
use certgen_core::types::Timestamp;
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

/// Token accepted for [`TestApp::alice`].
pub const ALICE_TOKEN: &str = "alice-token";
/// Token accepted for [`TestApp::bob`].
pub const BOB_TOKEN: &str = "bob-token";

/// Well-formed extraction reply with every key present.
pub const COMPLETE_REPLY: &str = r#"{
  "institution": "Bright Horizons Academy",
  "department": "Science Department",
  "location": "Portland, OR",
  "openingPhrase": "We proudly certify that",
  "certificateTitle": "Certificate of Excellence",
  "preRecipientPhrase": "is presented to",
  "recipientName": "Jane Doe",
  "purposePhrase": "for outstanding achievement",
  "role": "Lead Researcher",
  "eventDetails": "Regional Science Fair",
  "datePlace": "May 3, 2024, Portland",
  "signatures": [{ "name": "Dr. Alan Grant", "title": "Principal" }]
}"#;

/// Build a test `ServerConfig` with safe defaults.
///
/// Secrets are placeholders; every provider in the test app is a fake.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        upstream_timeout_secs: 5,
        openai: OpenAiConfig {
            api_key: "test-key".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            chat_model: "test-chat".to_string(),
            image_model: "test-image".to_string(),
            timeout: Duration::from_secs(5),
        },
        keep_model_opening_phrase: false,
        database_url: "postgres://localhost/unused".to_string(),
        identity: IdentityConfig::Jwt(JwtConfig::new("test-secret")),
    }
}

// ---------------------------------------------------------------------------
// Fake providers
// ---------------------------------------------------------------------------

/// Language model that replies with a fixed text and records every prompt.
pub struct FakeLanguageModel {
    reply: String,
    delay: Duration,
    prompts: Mutex<Vec<String>>,
}

impl FakeLanguageModel {
    pub fn replying(reply: &str) -> Arc<Self> {
        Self::slow(reply, Duration::ZERO)
    }

    /// Replies only after `delay`.
    pub fn slow(reply: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            delay,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for FakeLanguageModel {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        tokio::time::sleep(self.delay).await;
        Ok(self.reply.clone())
    }
}

/// Image model that returns a fixed list of URLs and records every request.
pub struct FakeImageModel {
    urls: Vec<String>,
    requests: Mutex<Vec<ImageRequest>>,
}

impl FakeImageModel {
    pub fn returning(urls: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            urls: urls.iter().map(|u| u.to_string()).collect(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ImageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageModel for FakeImageModel {
    async fn generate(&self, request: &ImageRequest) -> Result<ImageGeneration, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(ImageGeneration {
            data: self
                .urls
                .iter()
                .map(|u| GeneratedImage {
                    url: Some(u.clone()),
                })
                .collect(),
        })
    }
}

/// Identity service that knows a fixed set of tokens.
pub struct FakeIdentity {
    users: HashMap<String, Uuid>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn authenticate(&self, token: &str) -> Result<Uuid, IdentityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.users
            .get(token)
            .copied()
            .ok_or_else(|| IdentityError::Rejected("unknown token".into()))
    }
}

/// In-memory record store applying the same owner predicate and ordering
/// as the SQL queries.
///
/// Each insert is stamped one second after the previous one, so insertion
/// order is creation order.
#[derive(Default)]
pub struct MemoryStore {
    certificates: Mutex<Vec<CertificateRecord>>,
    templates: Mutex<Vec<Template>>,
    pub queries: AtomicUsize,
    inserts: AtomicUsize,
}

impl MemoryStore {
    fn next_timestamp(&self) -> Timestamp {
        let n = self.inserts.fetch_add(1, Ordering::SeqCst);
        Utc::now() + chrono::Duration::seconds(n as i64)
    }

    pub fn insert_certificate(&self, user_id: Uuid, title: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.certificates.lock().unwrap().push(CertificateRecord {
            id,
            user_id,
            title: title.to_string(),
            prompt: Some(format!("{title} prompt")),
            size: "landscape".to_string(),
            elements: serde_json::json!([{ "type": "text", "value": title }]),
            created_at: self.next_timestamp(),
        });
        id
    }

    pub fn insert_template(&self, user_id: Uuid, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.templates.lock().unwrap().push(Template {
            id,
            name: name.to_string(),
            description: None,
            file_url: Some(format!("https://files.example.com/{id}.pdf")),
            thumbnail_url: None,
            user_id,
            created_at: self.next_timestamp(),
        });
        id
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_certificate(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<CertificateRecord>, sqlx::Error> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .certificates
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id && c.user_id == user_id)
            .cloned())
    }

    async fn list_certificates(&self, user_id: Uuid) -> Result<Vec<CertificateRecord>, sqlx::Error> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let mut rows = self
            .certificates
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_templates(&self, user_id: Uuid) -> Result<Vec<Template>, sqlx::Error> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let mut rows = self
            .templates
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Test application
// ---------------------------------------------------------------------------

/// The full router plus handles on every fake behind it.
pub struct TestApp {
    pub router: Router,
    pub language: Arc<FakeLanguageModel>,
    pub images: Arc<FakeImageModel>,
    pub identity: Arc<FakeIdentity>,
    pub store: Arc<MemoryStore>,
    pub alice: Uuid,
    pub bob: Uuid,
}

/// Build the application with a model replying [`COMPLETE_REPLY`] and an
/// image model returning one URL.
pub fn build_test_app() -> TestApp {
    build_test_app_with(
        FakeLanguageModel::replying(COMPLETE_REPLY),
        FakeImageModel::returning(&["https://images.example.com/corner.png"]),
    )
}

/// Build the full application router around the given fakes.
///
/// Uses [`build_app_router`], so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app_with(
    language: Arc<FakeLanguageModel>,
    images: Arc<FakeImageModel>,
) -> TestApp {
    build_test_app_from(test_config(), language, images)
}

/// Build the application around the given fakes and configuration.
pub fn build_test_app_from(
    config: ServerConfig,
    language: Arc<FakeLanguageModel>,
    images: Arc<FakeImageModel>,
) -> TestApp {
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let identity = Arc::new(FakeIdentity {
        users: HashMap::from([
            (ALICE_TOKEN.to_string(), alice),
            (BOB_TOKEN.to_string(), bob),
        ]),
        calls: AtomicUsize::new(0),
    });
    let store = Arc::new(MemoryStore::default());

    let state = AppState {
        extraction: Arc::new(ExtractionGateway::new(
            language.clone(),
            ExtractionSettings {
                keep_model_opening_phrase: false,
                deadline: config.upstream_timeout(),
            },
        )),
        images: Arc::new(ImageGateway::new(images.clone(), config.upstream_timeout())),
        records: Arc::new(RecordAccessGateway::new(
            identity.clone(),
            store.clone(),
            config.upstream_timeout(),
        )),
    };

    TestApp {
        router: build_app_router(state, &config),
        language,
        images,
        identity,
        store,
        alice,
        bob,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without credentials.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with `Authorization: Bearer <token>`.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a raw body and an optional content type.
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> Response<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(value) = content_type {
        builder = builder.header("content-type", value);
    }
    let request = builder.body(Body::from(body)).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
