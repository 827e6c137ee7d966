//! In-memory stand-in for the CAP API read surface.
//!
//! Serves fixed fixtures under `/cap/v1/*` and insists on the same
//! `access_token`, `p` and `ps` query parameters the real service uses.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Token accepted by `app()`.
pub const DEFAULT_TOKEN: &str = "mock-token";

const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub name: String,
}

/// One page of a collection, shaped like CAP list responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub values: Vec<Record>,
}

pub struct AppState {
    token: String,
    collections: HashMap<&'static str, Vec<Record>>,
}

pub type Db = Arc<AppState>;

pub fn app() -> Router {
    app_with_token(DEFAULT_TOKEN)
}

pub fn app_with_token(token: &str) -> Router {
    let state: Db = Arc::new(AppState {
        token: token.to_string(),
        collections: fixtures(),
    });
    Router::new()
        .route("/cap/v1/search", get(search))
        .route("/cap/v1/{resource}", get(list_records))
        .route("/cap/v1/{resource}/{id}", get(get_record))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn record(id: u64, name: &str) -> Record {
    Record {
        id,
        name: name.to_string(),
    }
}

fn fixtures() -> HashMap<&'static str, Vec<Record>> {
    let profiles = vec![
        record(1, "Ada Lovelace"),
        record(2, "Alan Turing"),
        record(3, "Grace Hopper"),
        record(4, "Barbara Liskov"),
        record(5, "Donald Knuth"),
        record(6, "Frances Allen"),
        record(7, "John McCarthy"),
        record(8, "Edsger Dijkstra"),
        record(9, "Leslie Lamport"),
        record(10, "Margaret Hamilton"),
        record(11, "Ken Thompson"),
        record(12, "Radia Perlman"),
    ];
    HashMap::from([
        (
            "orgs",
            vec![
                record(1, "School of Engineering"),
                record(2, "Department of Computer Science"),
                record(3, "School of Medicine"),
            ],
        ),
        ("profiles", profiles),
        (
            "schemas",
            vec![record(1, "profile"), record(2, "organization")],
        ),
        ("layouts", vec![record(1, "default"), record(2, "compact")]),
    ])
}

fn authorize(state: &AppState, params: &HashMap<String, String>) -> Result<(), StatusCode> {
    match params.get("access_token") {
        Some(token) if *token == state.token => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

fn param(params: &HashMap<String, String>, key: &str, default: usize) -> Result<usize, StatusCode> {
    match params.get(key) {
        None => Ok(default),
        Some(raw) => match raw.parse() {
            Ok(0) | Err(_) => Err(StatusCode::BAD_REQUEST),
            Ok(n) => Ok(n),
        },
    }
}

/// Slice `records` by the 1-based `p` and the page size `ps`.
fn paginate(records: &[Record], params: &HashMap<String, String>) -> Result<Page, StatusCode> {
    let page = param(params, "p", 1)?;
    let size = param(params, "ps", DEFAULT_PAGE_SIZE)?;
    let offset = (page - 1)
        .checked_mul(size)
        .ok_or(StatusCode::BAD_REQUEST)?;
    let total_count = records.len();
    let values = records
        .iter()
        .skip(offset)
        .take(size)
        .cloned()
        .collect();
    Ok(Page {
        page,
        total_pages: total_count.div_ceil(size),
        total_count,
        values,
    })
}

async fn list_records(
    State(db): State<Db>,
    Path(resource): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Page>, StatusCode> {
    authorize(&db, &params)?;
    let records = db
        .collections
        .get(resource.as_str())
        .ok_or(StatusCode::NOT_FOUND)?;
    paginate(records, &params).map(Json)
}

async fn get_record(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, u64)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Record>, StatusCode> {
    authorize(&db, &params)?;
    let records = db
        .collections
        .get(resource.as_str())
        .ok_or(StatusCode::NOT_FOUND)?;
    records
        .iter()
        .find(|r| r.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn search(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Page>, StatusCode> {
    authorize(&db, &params)?;
    let needle = params
        .get("q")
        .map(|q| q.to_lowercase())
        .unwrap_or_default();
    let hits: Vec<Record> = db
        .collections
        .get("profiles")
        .into_iter()
        .flatten()
        .filter(|r| r.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    paginate(&hits, &params).map(Json)
}
