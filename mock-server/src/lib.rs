use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateBoard {
    pub title: String,
    pub description: String,
}

#[derive(Deserialize)]
pub struct UpdateBoard {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Boards keyed by id. Ids are handed out in increasing order, so iteration
/// order is creation order.
#[derive(Default)]
pub struct Store {
    next_id: u64,
    boards: BTreeMap<u64, Board>,
}

pub type Db = Arc<RwLock<Store>>;

type ApiResult<T> = Result<T, (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/boards", get(list_boards).post(create_board))
        .route(
            "/boards/{id}",
            get(get_board).patch(update_board).delete(delete_board),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found(id: u64) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "statusCode": 404,
            "message": format!("Board with id {id} not found"),
            "error": "Not Found",
        })),
    )
}

async fn list_boards(State(db): State<Db>) -> Json<Vec<Board>> {
    let store = db.read().await;
    Json(store.boards.values().cloned().collect())
}

async fn create_board(
    State(db): State<Db>,
    Json(input): Json<CreateBoard>,
) -> (StatusCode, Json<Board>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let board = Board {
        id: store.next_id,
        title: input.title,
        description: input.description,
        created_at: Utc::now(),
    };
    store.boards.insert(board.id, board.clone());
    tracing::debug!(id = board.id, "board created");
    (StatusCode::CREATED, Json(board))
}

async fn get_board(State(db): State<Db>, Path(id): Path<u64>) -> ApiResult<Json<Board>> {
    let store = db.read().await;
    store.boards.get(&id).cloned().map(Json).ok_or_else(|| not_found(id))
}

async fn update_board(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateBoard>,
) -> ApiResult<Json<Board>> {
    let mut store = db.write().await;
    let board = store.boards.get_mut(&id).ok_or_else(|| not_found(id))?;
    if let Some(title) = input.title {
        board.title = title;
    }
    if let Some(description) = input.description {
        board.description = description;
    }
    Ok(Json(board.clone()))
}

async fn delete_board(State(db): State<Db>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    store.boards.remove(&id).ok_or_else(|| not_found(id))?;
    tracing::debug!(id, "board deleted");
    Ok(StatusCode::OK)
}
