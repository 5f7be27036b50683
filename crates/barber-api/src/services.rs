//! Handlers for service endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/servicos` | Optional `?nome=` substring; newest first |
//! | `POST` | `/servicos` | Body: [`ServiceInput`]; returns 201 + id |
//! | `PUT`  | `/servicos/nome/:nome` | Replace the service currently so named |
//! | `GET`  | `/buscar-servicos` | Ordered by name |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use barber_core::{
  input::non_blank,
  service::{Service, ServiceInput},
  store::BarbershopStore,
};
use serde::Deserialize;
use serde_json::json;

use crate::{ApiJson, ApiPath, ApiQuery, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct NameParams {
  pub nome: Option<String>,
}

/// `GET /servicos[?nome=<fragment>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  ApiQuery(params): ApiQuery<NameParams>,
) -> Result<Json<Vec<Service>>, ApiError>
where
  S: BarbershopStore,
{
  let services = store
    .list_services(non_blank(params.nome))
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(services))
}

/// `GET /buscar-servicos`
pub async fn by_name<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Service>>, ApiError>
where
  S: BarbershopStore,
{
  let services = store
    .list_services_by_name()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(services))
}

/// `POST /servicos`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<ServiceInput>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BarbershopStore,
{
  let service = store
    .add_service(body.validate()?)
    .await
    .map_err(ApiError::from_store)?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "id": service.id, "message": "service registered" })),
  ))
}

/// `PUT /servicos/nome/:nome`
pub async fn update_by_name<S>(
  State(store): State<Arc<S>>,
  ApiPath(current_name): ApiPath<String>,
  ApiJson(body): ApiJson<ServiceInput>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BarbershopStore,
{
  let input = body.validate()?;
  store
    .update_service(current_name, input)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(json!({ "message": "service updated" })))
}
