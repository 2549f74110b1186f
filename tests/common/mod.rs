//! Shared utilities for integration testing: an in-process mock of the
//! routes API.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use quest_tour::config::{ApiConfig, AuthMode};

/// One request as seen by the mock.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Recorded {
    pub method: &'static str,
    pub id: Option<String>,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    quests: Vec<Value>,
    paginated: bool,
    fail_updates: Option<u16>,
    requests: Vec<Recorded>,
}

/// Handle to a running mock backend.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
    pub addr: Option<SocketAddr>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr.unwrap())
    }

    /// Client configuration pointing at this mock.
    pub fn api_config(&self, token: &str, auth_mode: AuthMode) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url(),
            token: token.to_string(),
            auth_mode,
            timeout_secs: 2,
            ..ApiConfig::default()
        }
    }

    /// Make every PUT fail with `status`, or succeed again with `None`.
    pub fn fail_updates(&self, status: Option<u16>) {
        self.state.lock().unwrap().fail_updates = status;
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn quest(&self, id: &str) -> Option<Value> {
        let state = self.state.lock().unwrap();
        state.quests.iter().find(|q| id_of(q) == id).cloned()
    }
}

fn id_of(quest: &Value) -> String {
    match &quest["id"] {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => String::new(),
    }
}

fn auth_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn list(
    State(mock): State<MockBackend>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Value> {
    let mut state = mock.state.lock().unwrap();
    state.requests.push(Recorded {
        method: "GET",
        id: None,
        query,
        authorization: auth_header(&headers),
        body: None,
    });
    let quests = Value::Array(state.quests.clone());
    if state.paginated {
        Json(json!({ "count": state.quests.len(), "next": null, "results": quests }))
    } else {
        Json(quests)
    }
}

async fn detail(
    State(mock): State<MockBackend>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let mut state = mock.state.lock().unwrap();
    state.requests.push(Recorded {
        method: "GET",
        id: Some(id.clone()),
        query,
        authorization: auth_header(&headers),
        body: None,
    });
    match state.quests.iter().find(|q| id_of(q) == id) {
        Some(quest) => Json(quest.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." }))).into_response(),
    }
}

async fn update(
    State(mock): State<MockBackend>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = mock.state.lock().unwrap();
    state.requests.push(Recorded {
        method: "PUT",
        id: Some(id.clone()),
        query,
        authorization: auth_header(&headers),
        body: Some(body.clone()),
    });

    if let Some(status) = state.fail_updates {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, "backend unavailable").into_response();
    }

    match state.quests.iter_mut().find(|q| id_of(q) == id) {
        Some(quest) => {
            *quest = body.clone();
            Json(body).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Start a mock routes API on an ephemeral local port.
pub async fn start_mock_backend(quests: Vec<Value>, paginated: bool) -> MockBackend {
    let mut mock = MockBackend::default();
    {
        let mut state = mock.state.lock().unwrap();
        state.quests = quests;
        state.paginated = paginated;
    }

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    mock.addr = Some(listener.local_addr().unwrap());

    let app = Router::new()
        .route("/api/routes/", get(list))
        .route("/api/routes/{id}/", get(detail).put(update))
        .with_state(mock.clone());

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    mock
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn dead_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Backend JSON for a quest with points in the given (order, id, lat, lng) layout.
pub fn quest_json(id: u64, name: &str, points: &[(u32, u64, f64, f64)]) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} description"),
        "image_url": null,
        "points": points.iter().map(|(order, pid, lat, lng)| json!({
            "order": order,
            "point": {
                "id": pid,
                "name": format!("Point {pid}"),
                "description": "",
                "latitude": lat,
                "longitude": lng,
                "photo": format!("/media/points/{pid}.jpg"),
                "audio_file": null,
                "video": null,
                "is_intermediate": false
            }
        })).collect::<Vec<_>>()
    })
}
