//! Handlers for `/clientes`.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use barber_core::{
  client::{Client, ClientInput},
  input::non_blank,
  store::BarbershopStore,
};
use serde_json::json;

use crate::{ApiJson, ApiQuery, error::ApiError, staff::CpfParams};

/// `GET /clientes[?cpf=<fragment>]`, ordered by name.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  ApiQuery(params): ApiQuery<CpfParams>,
) -> Result<Json<Vec<Client>>, ApiError>
where
  S: BarbershopStore,
{
  let clients = store
    .list_clients(non_blank(params.cpf))
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(clients))
}

/// `POST /clientes`, returns 201 + `{"id", "message"}`.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<ClientInput>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BarbershopStore,
{
  let client = store
    .add_client(body.validate()?)
    .await
    .map_err(ApiError::from_store)?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "id": client.id, "message": "client registered" })),
  ))
}
