//! JSON REST API for the barbershop.
//!
//! Exposes an axum [`Router`] backed by any
//! [`barber_core::store::BarbershopStore`]. Static files, health checks and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! Router::new().merge(barber_api::api_router(store.clone()))
//! ```

pub mod appointments;
pub mod clients;
pub mod error;
pub mod extract;
pub mod reports;
pub mod services;
pub mod staff;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use barber_core::store::BarbershopStore;

pub use error::ApiError;
pub use extract::{ApiJson, ApiPath, ApiQuery};

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: BarbershopStore + 'static,
  S::Error: From<barber_core::Error>,
{
  Router::new()
    // Staff
    .route("/login-barbeiro", post(staff::login::<S>))
    .route("/barbeiros", get(staff::list::<S>).post(staff::create::<S>))
    .route("/barbeiros/cpf/{cpf}", put(staff::update_by_cpf::<S>))
    .route("/buscar-barbeiros", get(staff::bookable::<S>))
    // Services
    .route("/servicos", get(services::list::<S>).post(services::create::<S>))
    .route("/servicos/nome/{nome}", put(services::update_by_name::<S>))
    .route("/buscar-servicos", get(services::by_name::<S>))
    // Clients
    .route("/clientes", get(clients::list::<S>).post(clients::create::<S>))
    // Appointments
    .route("/horarios-disponiveis", get(appointments::availability::<S>))
    .route("/cadastrar-agendamento", post(appointments::create::<S>))
    .route("/agendamentos", get(appointments::list::<S>))
    .route("/excluir-agendamento/{id}", delete(appointments::delete_one::<S>))
    // Reports
    .route("/relatorio-financeiro", get(reports::handler::<S>))
    .with_state(store)
}
