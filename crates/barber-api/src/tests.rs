//! Router tests against an in-memory `SqliteStore`.

use std::sync::Arc;

use axum::{
  Router,
  body::{Body, to_bytes},
  http::{Request, StatusCode, header},
};
use barber_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(store))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(v) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(v.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };
  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let json = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap_or_else(|_| panic!("non-JSON body: {bytes:?}"))
  };
  (status, json)
}

/// Seeds a barber, a receptionist, a client and a service; returns
/// `(barber_id, receptionist_id, service_id)`.
async fn seeded(app: &Router) -> (i64, i64, i64) {
  let (status, barber) = send(
    app,
    "POST",
    "/barbeiros",
    Some(json!({ "nome": "Carlos Souza", "cpf": "55566677788", "cargo": "Barbeiro" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);

  let (_, receptionist) = send(
    app,
    "POST",
    "/barbeiros",
    Some(json!({ "nome": "Paula Reis", "cpf": "77788899900", "cargo": "Recepcionista" })),
  )
  .await;

  let (status, _) = send(
    app,
    "POST",
    "/clientes",
    Some(json!({ "nome": "João Pereira", "cpf": "11122233344" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, service) = send(
    app,
    "POST",
    "/servicos",
    Some(json!({ "nome": "Corte", "preco": "35.00", "duracao": "30" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);

  (
    barber["id"].as_i64().unwrap(),
    receptionist["id"].as_i64().unwrap(),
    service["id"].as_i64().unwrap(),
  )
}

fn booking(staff: i64, service: i64, time: &str) -> Value {
  json!({
    "data": "2024-06-01",
    "horario": time,
    "cpf_cliente": "11122233344",
    "id_barbeiro": staff,
    "id_servico": service.to_string(),
  })
}

// ── Staff ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_staff_returns_id_and_message() {
  let app = app().await;
  let (status, body) = send(
    &app,
    "POST",
    "/barbeiros",
    Some(json!({ "nome": "Marina Lima", "cpf": "66677788899" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert!(body["id"].as_i64().is_some());
  assert!(body["message"].is_string());

  let (_, list) = send(&app, "GET", "/barbeiros", None).await;
  assert_eq!(list[0]["cargo"], "Barbeiro");
}

#[tokio::test]
async fn duplicate_staff_cpf_is_400_with_error_body() {
  let app = app().await;
  let body = json!({ "nome": "A", "cpf": "55566677788" });
  send(&app, "POST", "/barbeiros", Some(body.clone())).await;
  let (status, err) = send(&app, "POST", "/barbeiros", Some(body)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(err["error"].is_string());
}

#[tokio::test]
async fn missing_staff_fields_are_400() {
  let app = app().await;
  let (status, err) = send(&app, "POST", "/barbeiros", Some(json!({ "nome": "Só nome" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(err["error"], "name and CPF are required");
}

#[tokio::test]
async fn staff_list_filters_by_cpf_fragment() {
  let app = app().await;
  seeded(&app).await;
  let (status, list) = send(&app, "GET", "/barbeiros?cpf=899", None).await;
  assert_eq!(status, StatusCode::OK);
  let names: Vec<_> = list.as_array().unwrap().iter().map(|s| s["nome"].clone()).collect();
  assert_eq!(names, vec![json!("Paula Reis")]);
}

#[tokio::test]
async fn bookable_staff_excludes_receptionists() {
  let app = app().await;
  seeded(&app).await;
  let (_, list) = send(&app, "GET", "/buscar-barbeiros", None).await;
  let list = list.as_array().unwrap();
  assert_eq!(list.len(), 1);
  assert_eq!(list[0]["nome"], "Carlos Souza");
}

#[tokio::test]
async fn update_staff_by_cpf() {
  let app = app().await;
  seeded(&app).await;
  let (status, _) = send(
    &app,
    "PUT",
    "/barbeiros/cpf/55566677788",
    Some(json!({ "nome": "Carlos S. Souza", "telefone": "11 99999-0000" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (_, list) = send(&app, "GET", "/barbeiros?cpf=55566677788", None).await;
  assert_eq!(list[0]["nome"], "Carlos S. Souza");
  assert_eq!(list[0]["cargo"], "Barbeiro");

  let (status, _) = send(
    &app,
    "PUT",
    "/barbeiros/cpf/00000000000",
    Some(json!({ "nome": "Ninguém" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Login ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_matches_name_fragment_and_cpf() {
  let app = app().await;
  seeded(&app).await;
  let (status, body) = send(
    &app,
    "POST",
    "/login-barbeiro",
    Some(json!({ "nome": "Carlos", "cpf": "55566677788" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);
  assert_eq!(body["user"]["nome"], "Carlos Souza");
}

#[tokio::test]
async fn login_with_wrong_cpf_is_401() {
  let app = app().await;
  seeded(&app).await;
  let (status, body) = send(
    &app,
    "POST",
    "/login-barbeiro",
    Some(json!({ "nome": "Carlos", "cpf": "55566677789" })),
  )
  .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert!(body["error"].is_string());
}

// ── Services ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn services_accept_numeric_price_and_update_by_name() {
  let app = app().await;
  let (status, _) = send(&app, "POST", "/servicos", Some(json!({ "nome": "Barba", "preco": 25 }))).await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, _) = send(
    &app,
    "PUT",
    "/servicos/nome/Barba",
    Some(json!({ "nome": "Barba completa", "preco": "30.00" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (_, list) = send(&app, "GET", "/servicos?nome=completa", None).await;
  assert_eq!(list[0]["preco"], "30.00");

  let (status, _) = send(
    &app,
    "PUT",
    "/servicos/nome/Barba",
    Some(json!({ "nome": "Barba", "preco": "30.00" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Appointments ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn booking_flow_updates_availability() {
  let app = app().await;
  let (barber, _, service) = seeded(&app).await;

  let uri = format!("/horarios-disponiveis?data=2024-06-01&id={service}");
  let (status, slots) = send(&app, "GET", &uri, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(slots.as_array().unwrap().len(), 21);
  assert_eq!(slots[0], "08:00");

  let (status, body) =
    send(&app, "POST", "/cadastrar-agendamento", Some(booking(barber, service, "10:00"))).await;
  assert_eq!(status, StatusCode::CREATED);
  assert!(body["id"].as_i64().is_some());

  let (_, slots) = send(&app, "GET", &uri, None).await;
  let slots = slots.as_array().unwrap();
  assert_eq!(slots.len(), 20);
  assert!(!slots.contains(&json!("10:00")));
}

#[tokio::test]
async fn availability_requires_date_and_service() {
  let app = app().await;
  let (status, body) = send(&app, "GET", "/horarios-disponiveis?data=2024-06-01", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn double_booking_is_rejected() {
  let app = app().await;
  let (barber, _, service) = seeded(&app).await;
  send(&app, "POST", "/cadastrar-agendamento", Some(booking(barber, service, "10:00"))).await;
  let (status, body) =
    send(&app, "POST", "/cadastrar-agendamento", Some(booking(barber, service, "10:00"))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn receptionist_cannot_take_appointments() {
  let app = app().await;
  let (_, receptionist, service) = seeded(&app).await;
  let (status, _) =
    send(&app, "POST", "/cadastrar-agendamento", Some(booking(receptionist, service, "09:00")))
      .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn incomplete_booking_is_400() {
  let app = app().await;
  let (status, body) = send(
    &app,
    "POST",
    "/cadastrar-agendamento",
    Some(json!({ "data": "2024-06-01", "horario": "10:00" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "all fields are required");
}

#[tokio::test]
async fn list_and_delete_appointments() {
  let app = app().await;
  let (barber, _, service) = seeded(&app).await;
  let (_, booked) =
    send(&app, "POST", "/cadastrar-agendamento", Some(booking(barber, service, "11:30"))).await;
  let id = booked["id"].as_i64().unwrap();

  let (status, list) = send(&app, "GET", "/agendamentos?date=2024-06-01", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(list[0]["cliente_nome"], "João Pereira");
  assert_eq!(list[0]["barbeiro_nome"], "Carlos Souza");
  assert_eq!(list[0]["servico_nome"], "Corte");

  let (_, other_day) = send(&app, "GET", "/agendamentos?date=2024-06-02", None).await;
  assert!(other_day.as_array().unwrap().is_empty());

  let (status, _) = send(&app, "DELETE", &format!("/excluir-agendamento/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  let (status, _) = send(&app, "DELETE", &format!("/excluir-agendamento/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_list_date_is_400() {
  let app = app().await;
  let (status, _) = send(&app, "GET", "/agendamentos?date=01/06/2024", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn numeric_client_cpf_is_accepted() {
  let app = app().await;
  let (barber, _, service) = seeded(&app).await;
  let mut body = booking(barber, service, "09:30");
  body["cpf_cliente"] = json!(11122233344_i64);
  let (status, _) = send(&app, "POST", "/cadastrar-agendamento", Some(body)).await;
  assert_eq!(status, StatusCode::CREATED);
}

// ── Malformed requests ────────────────────────────────────────────────────────

async fn send_raw(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
  let req = Request::builder()
    .method(method)
    .uri(uri)
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap();
  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn unparseable_body_is_400_with_error_body() {
  let app = app().await;
  let (status, body) = send_raw(&app, "POST", "/cadastrar-agendamento", "{not json").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string());

  let (status, body) =
    send_raw(&app, "POST", "/barbeiros", r#"{"nome": ["Carlos"], "cpf": "55566677788"}"#).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn non_numeric_path_id_is_400_with_error_body() {
  let app = app().await;
  let (status, body) = send(&app, "DELETE", "/excluir-agendamento/abc", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_query_is_400_with_error_body() {
  let app = app().await;
  let (status, body) = send(&app, "GET", "/barbeiros?cpf=1&cpf=2", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string());
}

// ── Reports ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn report_includes_service_price() {
  let app = app().await;
  let (barber, _, service) = seeded(&app).await;
  send(&app, "POST", "/cadastrar-agendamento", Some(booking(barber, service, "08:00"))).await;

  let (status, rows) = send(
    &app,
    "GET",
    "/relatorio-financeiro?cpf_cliente=111&dataInicio=2024-06-01&dataFim=2024-06-01",
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(rows.as_array().unwrap().len(), 1);
  assert_eq!(rows[0]["servico_preco"], "35.00");
  assert_eq!(rows[0]["horario"], "08:00");

  let (status, rows) = send(
    &app,
    "GET",
    "/relatorio-financeiro?dataInicio=2024-06-02&dataFim=2024-06-01",
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert!(rows.as_array().unwrap().is_empty());
}
