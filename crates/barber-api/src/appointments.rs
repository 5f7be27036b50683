//! Handlers for availability and appointment endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/horarios-disponiveis` | `?data=YYYY-MM-DD&id=<service id>` |
//! | `POST`   | `/cadastrar-agendamento` | Body: [`BookingRequest`]; returns 201 + id |
//! | `GET`    | `/agendamentos` | Optional `?date=YYYY-MM-DD` |
//! | `DELETE` | `/excluir-agendamento/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use barber_core::{
  StoreError,
  appointment::{self, AppointmentDetail, BookingRequest},
  input::non_blank,
  schedule::{self, AvailabilityQuery, Slot, parse_date},
  store::BarbershopStore,
};
use serde::Deserialize;
use serde_json::json;

use crate::{ApiJson, ApiPath, ApiQuery, error::ApiError};

// ─── Availability ─────────────────────────────────────────────────────────────

/// `GET /horarios-disponiveis?data=&id=`
pub async fn availability<S>(
  State(store): State<Arc<S>>,
  ApiQuery(query): ApiQuery<AvailabilityQuery>,
) -> Result<Json<Vec<Slot>>, ApiError>
where
  S: BarbershopStore,
  S::Error: From<barber_core::Error>,
{
  let slots = schedule::free_slots(store.as_ref(), query)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(slots))
}

// ─── Book ─────────────────────────────────────────────────────────────────────

/// `POST /cadastrar-agendamento`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<BookingRequest>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BarbershopStore,
  S::Error: From<barber_core::Error>,
{
  let booked = match appointment::book(store.as_ref(), body).await {
    Ok(booked) => booked,
    Err(err) => {
      if let Some(reason) = err.domain() {
        tracing::info!(%reason, "booking rejected");
      }
      return Err(ApiError::from_store(err));
    }
  };

  tracing::info!(
    appointment_id = booked.id,
    staff_id = booked.staff_id,
    date = %booked.date,
    time = %booked.time,
    "appointment booked"
  );
  Ok((
    StatusCode::CREATED,
    Json(json!({ "id": booked.id, "message": "appointment booked" })),
  ))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub date: Option<String>,
}

/// `GET /agendamentos[?date=YYYY-MM-DD]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<AppointmentDetail>>, ApiError>
where
  S: BarbershopStore,
{
  let date = non_blank(params.date)
    .map(|raw| parse_date(&raw, "date"))
    .transpose()?;
  let appointments = store
    .list_appointments(date)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(appointments))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /excluir-agendamento/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BarbershopStore,
{
  store
    .delete_appointment(id)
    .await
    .map_err(ApiError::from_store)?;
  tracing::info!(appointment_id = id, "appointment deleted");
  Ok(Json(json!({ "message": "appointment deleted" })))
}
