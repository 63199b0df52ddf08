//! HTTP surface of the service.
//!
//! | Method | Path                  | Description                  |
//! |--------|-----------------------|------------------------------|
//! | GET    | `/health`             | Liveness probe               |
//! | POST   | `/transactions`       | Create a transaction         |
//! | GET    | `/transactions`       | List, `?page=&size=`         |
//! | GET    | `/transactions/:id`   | Fetch one transaction        |
//! | PUT    | `/transactions/:id`   | Replace a transaction's data |
//! | DELETE | `/transactions/:id`   | Remove a transaction         |

mod errors;

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::models::{Page, Transaction, TransactionInput, TransactionRequest};
use crate::service::TransactionService;
use crate::storage::Storage;

pub use errors::{ApiError, ErrorResponse, MALFORMED_REQUEST_CODE};

const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub size: usize
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

pub fn create_router<S: Storage>(service: Arc<TransactionService<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/transactions", get(list_handler::<S>).post(create_handler::<S>))
        .route("/transactions/:id", get(get_handler::<S>).put(update_handler::<S>).delete(delete_handler::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

async fn create_handler<S: Storage>(
    State(service): State<Arc<TransactionService<S>>>,
    payload: Result<Json<TransactionRequest>, JsonRejection>
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let Json(request) = payload?;
    let created = service.create(TransactionInput::try_from(request)?).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_handler<S: Storage>(
    State(service): State<Arc<TransactionService<S>>>,
    Path(id): Path<String>
) -> Result<Json<Transaction>, ApiError> {
    Ok(Json(service.get(&id).await?))
}

async fn list_handler<S: Storage>(
    State(service): State<Arc<TransactionService<S>>>,
    params: Result<Query<ListParams>, QueryRejection>
) -> Result<Json<Page<Transaction>>, ApiError> {
    let Query(params) = params?;

    Ok(Json(service.list(params.page, params.size)?))
}

async fn update_handler<S: Storage>(
    State(service): State<Arc<TransactionService<S>>>,
    Path(id): Path<String>,
    payload: Result<Json<TransactionRequest>, JsonRejection>
) -> Result<Json<Transaction>, ApiError> {
    let Json(request) = payload?;

    Ok(Json(service.update(&id, TransactionInput::try_from(request)?).await?))
}

async fn delete_handler<S: Storage>(
    State(service): State<Arc<TransactionService<S>>>,
    Path(id): Path<String>
) -> Result<StatusCode, ApiError> {
    service.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
