//! Handlers for staff endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/login-barbeiro` | Body: `{"nome", "cpf"}`; 401 if no match |
//! | `POST` | `/barbeiros` | Body: [`StaffInput`]; returns 201 + id |
//! | `GET`  | `/barbeiros` | Optional `?cpf=` substring |
//! | `PUT`  | `/barbeiros/cpf/:cpf` | Body: [`StaffUpdateInput`] |
//! | `GET`  | `/buscar-barbeiros` | Staff who can take appointments |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use barber_core::{
  Cpf,
  input::non_blank,
  staff::{LoginInput, Staff, StaffInput, StaffUpdateInput},
  store::BarbershopStore,
};
use serde::Deserialize;
use serde_json::json;

use crate::{ApiJson, ApiPath, ApiQuery, error::ApiError};

// ─── Login ────────────────────────────────────────────────────────────────────

/// `POST /login-barbeiro`, returns the staff profile on match.
pub async fn login<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<LoginInput>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BarbershopStore,
{
  let login = body.validate()?;
  let staff = store
    .find_staff_by_login(login.name, login.cpf)
    .await
    .map_err(ApiError::from_store)?
    .ok_or(barber_core::Error::Unauthorized)?;

  tracing::info!(staff_id = staff.id, role = %staff.role, "staff login");
  Ok(Json(json!({ "success": true, "user": staff })))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /barbeiros`, returns 201 + `{"id", "message"}`.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<StaffInput>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BarbershopStore,
{
  let staff = store
    .add_staff(body.validate()?)
    .await
    .map_err(ApiError::from_store)?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "id": staff.id, "message": "staff member registered" })),
  ))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CpfParams {
  pub cpf: Option<String>,
}

/// `GET /barbeiros[?cpf=<fragment>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  ApiQuery(params): ApiQuery<CpfParams>,
) -> Result<Json<Vec<Staff>>, ApiError>
where
  S: BarbershopStore,
{
  let staff = store
    .list_staff(non_blank(params.cpf))
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(staff))
}

/// `GET /buscar-barbeiros`
pub async fn bookable<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Staff>>, ApiError>
where
  S: BarbershopStore,
{
  let staff = store
    .list_bookable_staff()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(staff))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /barbeiros/cpf/:cpf`
pub async fn update_by_cpf<S>(
  State(store): State<Arc<S>>,
  ApiPath(cpf): ApiPath<String>,
  ApiJson(body): ApiJson<StaffUpdateInput>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BarbershopStore,
{
  let cpf = Cpf::parse(&cpf)?;
  let update = body.validate()?;
  store
    .update_staff(cpf, update)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(json!({ "message": "staff member updated" })))
}
