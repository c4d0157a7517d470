use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use workout_core::fault::{FaultContext, StructuredError};
use workout_core::model::Categoria;
use workout_core::page::{Page, PageParams};

use super::{ApiError, ApiResult};
use crate::AppState;
use crate::db::{Database, Uow};
use crate::uow::{classify, guard};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/categorias", get(list).post(create))
        .route("/api/categorias/{id}", get(get_one))
}

#[derive(Deserialize)]
struct CreateCategoria {
    nome: String,
}

/// Opens the request's unit of work, translating begin failures.
async fn open(state: &AppState, ctx: &FaultContext) -> Result<Uow, ApiError> {
    state
        .db
        .begin()
        .await
        .map_err(|err| ApiError::from(StructuredError::translate(&classify(&err), ctx)))
}

async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateCategoria>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Categoria>)> {
    let Json(body) = payload.map_err(|rejection| {
        debug!(%rejection, "rejected categoria payload");
        ApiError::from(StructuredError::invalid_data())
    })?;

    let categoria = Categoria::new(body.nome);
    let ctx = FaultContext::field("nome", categoria.nome.clone());
    let uow = open(&state, &ctx).await?;
    let to_insert = categoria.clone();
    guard(uow, &ctx, move |uow: &mut Uow| {
        Box::pin(async move { Database::insert_categoria(uow, &to_insert).await })
    })
    .await?;

    Ok((StatusCode::CREATED, Json(categoria)))
}

async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> ApiResult<Json<Page<Categoria>>> {
    let ctx = FaultContext::none();
    let uow = open(&state, &ctx).await?;
    let page = guard(uow, &ctx, |uow: &mut Uow| {
        Box::pin(async move { Database::list_categorias(uow, params.limit(), params.offset()).await })
    })
    .await?;
    Ok(Json(page))
}

async fn get_one(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Categoria>> {
    let ctx = FaultContext::none();
    let uow = open(&state, &ctx).await?;
    let found = guard(uow, &ctx, |uow: &mut Uow| {
        Box::pin(async move { Database::get_categoria(uow, id).await })
    })
    .await?;

    // A miss is a controlled outcome of the lookup, not a caught failure;
    // it never goes through the translator.
    match found {
        Some(categoria) => Ok(Json(categoria)),
        None => Err(ApiError::from(StructuredError::not_found(&id))),
    }
}
