//! Appointments and the booking request that creates them.
//!
//! Booking is a single decision taken against the store's current contents:
//!
//! 1. every field is present and well-formed ([`BookingRequest::validate`]);
//! 2. the staff member exists and is a barber or hairdresser;
//! 3. the staff member has nothing booked at that date and time;
//! 4. the appointment is inserted.
//!
//! Steps 2–4 belong to [`BarbershopStore::book_appointment`], which must run
//! them atomically.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Cpf, Error, Result,
  input::{LooseId, non_blank, text_or_number},
  schedule::{Slot, parse_date},
  store::BarbershopStore,
};

/// A persisted appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
  pub id:         i64,
  #[serde(rename = "data")]
  pub date:       NaiveDate,
  #[serde(rename = "horario")]
  pub time:       Slot,
  #[serde(rename = "cpf_cliente")]
  pub client_cpf: Cpf,
  #[serde(rename = "id_barbeiro")]
  pub staff_id:   i64,
  #[serde(rename = "id_servico")]
  pub service_id: i64,
}

/// A validated booking, ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
  pub date:       NaiveDate,
  pub time:       Slot,
  pub client_cpf: Cpf,
  pub staff_id:   i64,
  pub service_id: i64,
}

/// Booking body, as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingRequest {
  #[serde(rename = "data")]
  pub date:       Option<String>,
  #[serde(rename = "horario")]
  pub time:       Option<String>,
  #[serde(rename = "cpf_cliente", default, deserialize_with = "text_or_number")]
  pub client_cpf: Option<String>,
  #[serde(rename = "id_barbeiro")]
  pub staff_id:   Option<LooseId>,
  #[serde(rename = "id_servico")]
  pub service_id: Option<LooseId>,
}

impl BookingRequest {
  /// Presence first, then format: a request missing any field is rejected
  /// with the same message regardless of which one.
  pub fn validate(self) -> Result<NewAppointment> {
    let date = non_blank(self.date);
    let time = non_blank(self.time);
    let client_cpf = non_blank(self.client_cpf);
    let staff_id = LooseId::resolve(self.staff_id, "staff id")?;
    let service_id = LooseId::resolve(self.service_id, "service id")?;

    let (Some(date), Some(time), Some(client_cpf), Some(staff_id), Some(service_id)) =
      (date, time, client_cpf, staff_id, service_id)
    else {
      return Err(Error::invalid("all fields are required"));
    };

    Ok(NewAppointment {
      date: parse_date(&date, "date")?,
      time: Slot::parse(&time)?,
      client_cpf: Cpf::parse(&client_cpf)?,
      staff_id,
      service_id,
    })
  }
}

/// Validate `request` and hand it to the store's atomic booking operation.
pub async fn book<S>(store: &S, request: BookingRequest) -> Result<Appointment, S::Error>
where
  S: BarbershopStore,
  S::Error: From<Error>,
{
  let new = request.validate()?;
  store.book_appointment(new).await
}

/// An appointment joined with the names of the people and service involved.
///
/// The names are optional because the joins are outer joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDetail {
  pub id:           i64,
  #[serde(rename = "data")]
  pub date:         NaiveDate,
  #[serde(rename = "horario")]
  pub time:         String,
  #[serde(rename = "cpf_cliente")]
  pub client_cpf:   String,
  #[serde(rename = "cliente_nome")]
  pub client_name:  Option<String>,
  #[serde(rename = "id_barbeiro")]
  pub staff_id:     i64,
  #[serde(rename = "barbeiro_nome")]
  pub staff_name:   Option<String>,
  #[serde(rename = "id_servico")]
  pub service_id:   i64,
  #[serde(rename = "servico_nome")]
  pub service_name: Option<String>,
}
