//! HTTP server assembly for the barbershop service.
//!
//! Merges the JSON API with a health route and a static file fallback, and
//! seeds the default manager account on startup.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use axum::{Json, Router, routing::get};
use barber_core::{
  Cpf, StoreError as _,
  staff::{NewStaff, Staff, StaffRole},
  store::BarbershopStore,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::{services::ServeDir, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `BARBER_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:        String,
  pub port:        u16,
  pub store_path:  PathBuf,
  pub static_dir:  PathBuf,
  /// Create the default manager when no staff member holds that role.
  pub seed_admin:  bool,
  pub admin_name:  String,
  pub admin_cpf:   String,
  pub admin_email: Option<String>,
  pub admin_phone: Option<String>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:        "0.0.0.0".to_string(),
      port:        5000,
      store_path:  PathBuf::from("database.db"),
      static_dir:  PathBuf::from("public"),
      seed_admin:  true,
      admin_name:  "Administrador do Sistema".to_string(),
      admin_cpf:   "12345678900".to_string(),
      admin_email: Some("admin@sistema.com".to_string()),
      admin_phone: Some("(00) 00000-0000".to_string()),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application: API routes, `GET /test`, static files for
/// everything else, and request tracing.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: BarbershopStore + 'static,
  S::Error: From<barber_core::Error>,
{
  Router::new()
    .merge(barber_api::api_router(store))
    .route("/test", get(health))
    .fallback_service(ServeDir::new(&config.static_dir))
    .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> { Json(json!({ "message": "server is running" })) }

// ─── Seeding ──────────────────────────────────────────────────────────────────

/// Insert the configured manager unless one already exists.
///
/// Returns the new staff member, or `None` when nothing was inserted.
pub async fn seed_manager<S>(store: &S, config: &ServerConfig) -> anyhow::Result<Option<Staff>>
where
  S: BarbershopStore,
{
  if !config.seed_admin {
    return Ok(None);
  }

  let managers = store
    .count_staff_with_role(StaffRole::Manager)
    .await
    .context("failed to count managers")?;
  if managers > 0 {
    tracing::debug!(managers, "manager already present, skipping seed");
    return Ok(None);
  }

  let cpf = Cpf::parse(&config.admin_cpf).context("invalid admin_cpf")?;
  let mut manager = NewStaff::new(config.admin_name.clone(), cpf, StaffRole::Manager);
  manager.email = config.admin_email.clone();
  manager.phone = config.admin_phone.clone();

  match store.add_staff(manager).await {
    Ok(staff) => {
      tracing::info!(staff_id = staff.id, cpf = %staff.cpf, "default manager created");
      Ok(Some(staff))
    }
    Err(err) if matches!(err.domain(), Some(barber_core::Error::Duplicate(_))) => {
      tracing::warn!(cpf = %config.admin_cpf, "admin CPF belongs to another staff member, not seeding");
      Ok(None)
    }
    Err(err) => Err(err).context("failed to seed default manager"),
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────
