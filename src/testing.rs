//! In-process PostgREST stand-in for unit tests.
//!
//! Serves `/rest/v1/{table}` on an ephemeral port with just enough of the
//! PostgREST surface for the remote backends: `select`, `id=eq.N`
//! filters, inserts with `Prefer: return=representation`, and deletes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use parking_lot::Mutex;
use serde_json::Value;

use crate::config::RemoteConfig;

#[derive(Default)]
struct StubState {
    tables: HashMap<String, Vec<Value>>,
    next_id: i64,
    failing: bool,
    api_keys: Vec<String>,
}

type Shared = Arc<Mutex<StubState>>;

pub(crate) struct PostgrestStub {
    url: String,
    state: Shared,
}

impl PostgrestStub {
    pub(crate) async fn start() -> Self {
        let state: Shared = Arc::default();
        let app = Router::new()
            .route("/rest/v1/{table}", get(select).post(insert).delete(delete))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            state,
        }
    }

    pub(crate) fn config(&self) -> RemoteConfig {
        RemoteConfig {
            url: self.url.clone(),
            key: "stub-key".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Every request answers 503 while set.
    pub(crate) fn set_failing(&self, failing: bool) {
        self.state.lock().failing = failing;
    }

    pub(crate) fn seed(&self, table: &str, rows: Vec<Value>) {
        let mut state = self.state.lock();
        for row in &rows {
            if let Some(id) = row["id"].as_i64() {
                state.next_id = state.next_id.max(id);
            }
        }
        state.tables.entry(table.to_string()).or_default().extend(rows);
    }

    pub(crate) fn rows(&self, table: &str) -> Vec<Value> {
        self.state.lock().tables.get(table).cloned().unwrap_or_default()
    }

    pub(crate) fn api_keys(&self) -> Vec<String> {
        self.state.lock().api_keys.clone()
    }
}

fn record(state: &mut StubState, headers: &HeaderMap) -> Option<Response> {
    if let Some(key) = headers.get("apikey").and_then(|v| v.to_str().ok()) {
        state.api_keys.push(key.to_string());
    }
    state
        .failing
        .then(|| (StatusCode::SERVICE_UNAVAILABLE, "stub unavailable").into_response())
}

fn id_filter(params: &HashMap<String, String>) -> Option<i64> {
    params.get("id")?.strip_prefix("eq.")?.parse().ok()
}

fn matches(row: &Value, id: Option<i64>) -> bool {
    id.is_none_or(|id| row["id"].as_i64() == Some(id))
}

async fn select(
    State(state): State<Shared>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock();
    if let Some(failure) = record(&mut state, &headers) {
        return failure;
    }
    let id = id_filter(&params);
    let rows: Vec<Value> = state
        .tables
        .get(&table)
        .map(|rows| rows.iter().filter(|r| matches(r, id)).cloned().collect())
        .unwrap_or_default();
    Json(rows).into_response()
}

async fn insert(
    State(state): State<Shared>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(mut row): Json<Value>,
) -> Response {
    let mut state = state.lock();
    if let Some(failure) = record(&mut state, &headers) {
        return failure;
    }
    state.next_id += 1;
    row["id"] = Value::from(state.next_id);
    state.tables.entry(table).or_default().push(row.clone());
    (StatusCode::CREATED, Json(vec![row])).into_response()
}

async fn delete(
    State(state): State<Shared>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock();
    if let Some(failure) = record(&mut state, &headers) {
        return failure;
    }
    let id = id_filter(&params);
    let rows = state.tables.entry(table).or_default();
    let (removed, kept): (Vec<Value>, Vec<Value>) =
        rows.drain(..).partition(|r| matches(r, id));
    *rows = kept;
    Json(removed).into_response()
}
