//! The `BarbershopStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `barber-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend;
//! the store handle is passed in explicitly rather than held globally.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  Cpf, StoreError,
  appointment::{Appointment, AppointmentDetail, NewAppointment},
  client::{Client, NewClient},
  report::{ReportFilter, ReportRow},
  service::{NewService, Service},
  staff::{NewStaff, Staff, StaffRole, StaffUpdate},
};

/// Abstraction over a barbershop record store.
///
/// Uniqueness (staff CPF, client CPF, service name) and referential integrity
/// are enforced by the backend; violations surface as
/// [`crate::Error::Duplicate`] or [`crate::Error::InvalidInput`] through
/// [`StoreError::domain`].
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait BarbershopStore: Send + Sync {
  type Error: StoreError;

  // ── Staff ─────────────────────────────────────────────────────────────

  /// Persist a new staff member. Fails with `Duplicate` if the CPF is taken.
  fn add_staff(
    &self,
    input: NewStaff,
  ) -> impl Future<Output = Result<Staff, Self::Error>> + Send + '_;

  /// Retrieve a staff member by id. Returns `None` if not found.
  fn get_staff(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Staff>, Self::Error>> + Send + '_;

  /// All staff whose CPF contains `cpf_filter`, newest first.
  fn list_staff(
    &self,
    cpf_filter: Option<String>,
  ) -> impl Future<Output = Result<Vec<Staff>, Self::Error>> + Send + '_;

  /// Staff who can take appointments, ordered by name.
  fn list_bookable_staff(
    &self,
  ) -> impl Future<Output = Result<Vec<Staff>, Self::Error>> + Send + '_;

  /// How many staff members hold `role`.
  fn count_staff_with_role(
    &self,
    role: StaffRole,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Staff member whose CPF equals `cpf` and whose name contains
  /// `name_fragment`.
  fn find_staff_by_login(
    &self,
    name_fragment: String,
    cpf: Cpf,
  ) -> impl Future<Output = Result<Option<Staff>, Self::Error>> + Send + '_;

  /// Replace the editable fields of the staff member with this CPF.
  /// Fails with `NotFound` if no such staff member exists.
  fn update_staff(
    &self,
    cpf: Cpf,
    update: StaffUpdate,
  ) -> impl Future<Output = Result<Staff, Self::Error>> + Send + '_;

  // ── Clients ───────────────────────────────────────────────────────────

  /// Persist a new client. Fails with `Duplicate` if the CPF is taken.
  fn add_client(
    &self,
    input: NewClient,
  ) -> impl Future<Output = Result<Client, Self::Error>> + Send + '_;

  /// All clients whose CPF contains `cpf_filter`, ordered by name.
  fn list_clients(
    &self,
    cpf_filter: Option<String>,
  ) -> impl Future<Output = Result<Vec<Client>, Self::Error>> + Send + '_;

  // ── Services ──────────────────────────────────────────────────────────

  /// Persist a new service. Fails with `Duplicate` if the name is taken.
  fn add_service(
    &self,
    input: NewService,
  ) -> impl Future<Output = Result<Service, Self::Error>> + Send + '_;

  /// All services whose name contains `name_filter`, newest first.
  fn list_services(
    &self,
    name_filter: Option<String>,
  ) -> impl Future<Output = Result<Vec<Service>, Self::Error>> + Send + '_;

  /// All services ordered by name.
  fn list_services_by_name(
    &self,
  ) -> impl Future<Output = Result<Vec<Service>, Self::Error>> + Send + '_;

  /// Replace the service currently named `current_name`.
  ///
  /// Fails with `NotFound` if no service has that name, and with `Duplicate`
  /// if the new name belongs to another service.
  fn update_service(
    &self,
    current_name: String,
    input: NewService,
  ) -> impl Future<Output = Result<Service, Self::Error>> + Send + '_;

  // ── Appointments ──────────────────────────────────────────────────────

  /// Raw `HH:MM` times of every appointment on `date` for `service_id`,
  /// regardless of staff member.
  fn occupied_slots(
    &self,
    date: NaiveDate,
    service_id: i64,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Check staff eligibility and slot availability, then insert, as one
  /// atomic unit with respect to concurrent bookings.
  ///
  /// Fails with `IneligibleStaff` if the staff member does not exist or
  /// cannot take appointments, and with `SlotConflict` if the staff member
  /// already has an appointment at that date and time.
  fn book_appointment(
    &self,
    input: NewAppointment,
  ) -> impl Future<Output = Result<Appointment, Self::Error>> + Send + '_;

  /// Appointments with joined names. With a date: that day only, by time
  /// ascending. Without: everything, newest first.
  fn list_appointments(
    &self,
    date: Option<NaiveDate>,
  ) -> impl Future<Output = Result<Vec<AppointmentDetail>, Self::Error>> + Send + '_;

  /// Delete an appointment. Fails with `NotFound` if it does not exist.
  fn delete_appointment(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reports ───────────────────────────────────────────────────────────

  /// Report rows matching `filter`, newest date/time first.
  fn report<'a>(
    &'a self,
    filter: &'a ReportFilter,
  ) -> impl Future<Output = Result<Vec<ReportRow>, Self::Error>> + Send + 'a;
}
