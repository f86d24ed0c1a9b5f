use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode, Uri},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    io::Write,
    net::{SocketAddr, TcpListener},
    sync::{Arc, Mutex},
};
use tempfile::NamedTempFile;

pub const TEST_PROJECT_ID: &str = "hubapp";
pub const TEST_CLIENT_EMAIL: &str = "push@hubapp.iam.gserviceaccount.com";
pub const TEST_ACCESS_TOKEN: &str = "test-access-token";
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
pub const TEST_PRIVATE_KEY: &str = include_str!("../fixtures/test_service_account_key.pem");
pub const TEST_PUBLIC_KEY: &str = include_str!("../fixtures/test_service_account_pub.pem");

/// Serve the router on an ephemeral local port
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(app.into_make_service());
    tokio::spawn(async move {
        server.await.unwrap();
    });
    addr
}

/// Address nothing is listening on
pub fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

#[derive(Clone)]
struct LoanApiState {
    status: StatusCode,
    body: String,
    api_keys: Arc<Mutex<Vec<Option<String>>>>,
}

/// Fake loans API. Returns the url and the `x-api-key` header of every request received.
pub async fn spawn_loan_api(
    status: StatusCode,
    body: &str,
) -> (String, Arc<Mutex<Vec<Option<String>>>>) {
    let api_keys = Arc::new(Mutex::new(vec![]));
    let state = LoanApiState {
        status,
        body: body.to_owned(),
        api_keys: api_keys.clone(),
    };
    let app = Router::new()
        .route("/api/loans", get(loans_handler))
        .with_state(state);
    let addr = spawn_server(app).await;
    (format!("http://{addr}/api/loans"), api_keys)
}

async fn loans_handler(State(state): State<LoanApiState>, headers: HeaderMap) -> (StatusCode, String) {
    let api_key = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_owned());
    state.api_keys.lock().unwrap().push(api_key);
    (state.status, state.body.clone())
}

pub fn loans_envelope(loans: Value) -> String {
    let count = loans.as_array().map(|l| l.len()).unwrap_or_default();
    json!({
        "success": true,
        "count": count,
        "data": loans,
        "message": "Loans retrieved"
    })
    .to_string()
}

pub fn loan_json(id: &str, applicant: &str, return_date: &str, device_token: &str) -> Value {
    json!({
        "id": id,
        "imageUrl": format!("https://cdn.example.com/items/{id}.png"),
        "returnDate": return_date,
        "reason": "post-surgery recovery",
        "isActive": true,
        "item": 12,
        "applicant": applicant,
        "dependent": "",
        "responsible": "Ana Lima",
        "deviceToken": device_token,
        "createdAt": "2023-10-05T10:00:00.000000Z"
    })
}

/// Request received by the fake FCM host
#[derive(Debug, Clone)]
pub struct RecordedPush {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
pub struct FakeFcm {
    /// `assertion` of every token request
    pub assertions: Mutex<Vec<String>>,
    pub pushes: Mutex<Vec<RecordedPush>>,
    /// device tokens answered with 404 UNREGISTERED
    pub unregistered: Vec<String>,
    pub token_endpoint_fails: bool,
}

impl FakeFcm {
    pub fn pushed_tokens(&self) -> Vec<String> {
        self.pushes
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.body["message"]["token"].as_str().unwrap_or_default().to_owned())
            .collect()
    }
}

/// Fake google token endpoint (`/token`) and FCM send endpoint on the same host
pub async fn spawn_fake_fcm(fake: FakeFcm) -> (String, Arc<FakeFcm>) {
    let fake = Arc::new(fake);
    let app = Router::new()
        .route("/token", post(token_handler))
        .fallback(push_handler)
        .with_state(fake.clone());
    let addr = spawn_server(app).await;
    (format!("http://{addr}"), fake)
}

async fn token_handler(
    State(fake): State<Arc<FakeFcm>>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if let Some(assertion) = form.get("assertion") {
        fake.assertions.lock().unwrap().push(assertion.clone());
    }
    let grant_type = form.get("grant_type").map(String::as_str);
    if fake.token_endpoint_fails || grant_type != Some(JWT_BEARER_GRANT_TYPE) {
        let res = json!({"error": "invalid_grant"});
        return (StatusCode::BAD_REQUEST, Json(res));
    }
    let res = json!({
        "access_token": TEST_ACCESS_TOKEN,
        "expires_in": 3599,
        "token_type": "Bearer"
    });
    (StatusCode::OK, Json(res))
}

async fn push_handler(
    State(fake): State<Arc<FakeFcm>>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_owned());
    let token = body["message"]["token"]
        .as_str()
        .unwrap_or_default()
        .to_owned();
    let mut pushes = fake.pushes.lock().unwrap();
    pushes.push(RecordedPush {
        path: uri.path().to_owned(),
        authorization,
        body,
    });
    if fake.unregistered.contains(&token) {
        let res = json!({"error": {"code": 404, "status": "NOT_FOUND", "message": "Requested entity was not found."}});
        return (StatusCode::NOT_FOUND, Json(res));
    }
    let res = json!({"name": format!("projects/{TEST_PROJECT_ID}/messages/{}", pushes.len())});
    (StatusCode::OK, Json(res))
}

/// Service account key file pointing its token endpoint at the fake host
pub fn service_account_file(base_url: &str) -> NamedTempFile {
    let json = json!({
        "type": "service_account",
        "project_id": TEST_PROJECT_ID,
        "private_key_id": "0123456789abcdef",
        "private_key": TEST_PRIVATE_KEY,
        "client_email": TEST_CLIENT_EMAIL,
        "client_id": "100000000000000000000",
        "token_uri": format!("{base_url}/token")
    });
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.to_string().as_bytes()).unwrap();
    file
}
