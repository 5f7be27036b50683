//! `GET /relatorio-financeiro`: appointments joined with service prices.
//!
//! All query parameters are optional: `cpf_cliente` and `servico` match as
//! substrings, `dataInicio` and `dataFim` bound the date range inclusively.

use std::sync::Arc;

use axum::{Json, extract::State};
use barber_core::{
  report::{ReportQuery, ReportRow},
  store::BarbershopStore,
};

use crate::{ApiQuery, error::ApiError};

pub async fn handler<S>(
  State(store): State<Arc<S>>,
  ApiQuery(query): ApiQuery<ReportQuery>,
) -> Result<Json<Vec<ReportRow>>, ApiError>
where
  S: BarbershopStore,
{
  let filter = query.validate()?;
  let rows = store
    .report(&filter)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(rows))
}
