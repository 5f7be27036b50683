//! [`SqliteStore`], the SQLite implementation of [`BarbershopStore`].

use std::path::Path;

use barber_core::{
  Cpf,
  appointment::{Appointment, AppointmentDetail, NewAppointment},
  client::{Client, NewClient},
  report::{ReportFilter, ReportRow},
  service::{NewService, Service},
  staff::{NewStaff, Staff, StaffRole, StaffUpdate},
  store::BarbershopStore,
};
use chrono::NaiveDate;
use rusqlite::{OptionalExtension as _, TransactionBehavior};

use crate::{
  Result,
  encode::{
    CLIENT_COLUMNS, DETAIL_SELECT, RawClient, RawDetail, RawStaff, SERVICE_COLUMNS,
    STAFF_COLUMNS, Violation, classify_write, encode_date, service_from_row, violation,
  },
  schema::SCHEMA,
};

const DUPLICATE_CPF: &str = "CPF already registered";
const DUPLICATE_SERVICE: &str = "service already registered";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A barbershop store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, used by tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn staff_where(
    &self,
    clause: &'static str,
    cpf_filter: Option<String>,
  ) -> Result<Vec<Staff>> {
    let raws: Vec<RawStaff> = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {STAFF_COLUMNS} FROM barbeiros {clause}");
        let mut stmt = conn.prepare(&sql)?;
        let rows = if clause.contains("?1") {
          stmt
            .query_map(rusqlite::params![cpf_filter], RawStaff::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          stmt
            .query_map([], RawStaff::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStaff::into_staff).collect()
  }

  async fn services_where(
    &self,
    clause: &'static str,
    name_filter: Option<String>,
  ) -> Result<Vec<Service>> {
    let services = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {SERVICE_COLUMNS} FROM servicos {clause}");
        let mut stmt = conn.prepare(&sql)?;
        let rows = if clause.contains("?1") {
          stmt
            .query_map(rusqlite::params![name_filter], service_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          stmt
            .query_map([], service_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;
    Ok(services)
  }
}

// ─── BarbershopStore impl ────────────────────────────────────────────────────

impl BarbershopStore for SqliteStore {
  type Error = crate::Error;

  // ── Staff ─────────────────────────────────────────────────────────────────

  async fn add_staff(&self, input: NewStaff) -> Result<Staff> {
    let row = input.clone();

    let id = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO barbeiros (nome, cpf, email, telefone, especialidade, endereco, cargo)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            row.name,
            row.cpf.as_str(),
            row.email,
            row.phone,
            row.specialty,
            row.address,
            row.role.as_str(),
          ],
        );
        Ok(classify_write(inserted, DUPLICATE_CPF)?.map(|_| conn.last_insert_rowid()))
      })
      .await??;

    Ok(Staff {
      id,
      name: input.name,
      cpf: input.cpf,
      email: input.email,
      phone: input.phone,
      specialty: input.specialty,
      address: input.address,
      role: input.role,
    })
  }

  async fn get_staff(&self, id: i64) -> Result<Option<Staff>> {
    let raw: Option<RawStaff> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {STAFF_COLUMNS} FROM barbeiros WHERE id = ?1"),
            rusqlite::params![id],
            RawStaff::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawStaff::into_staff).transpose()
  }

  async fn list_staff(&self, cpf_filter: Option<String>) -> Result<Vec<Staff>> {
    self
      .staff_where(
        "WHERE (?1 IS NULL OR cpf LIKE '%' || ?1 || '%') ORDER BY id DESC",
        cpf_filter,
      )
      .await
  }

  async fn list_bookable_staff(&self) -> Result<Vec<Staff>> {
    self
      .staff_where(
        "WHERE cargo IN ('Barbeiro', 'Cabeleireiro') ORDER BY nome",
        None,
      )
      .await
  }

  async fn count_staff_with_role(&self, role: StaffRole) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM barbeiros WHERE cargo = ?1",
          rusqlite::params![role.as_str()],
          |r| r.get(0),
        )?)
      })
      .await?;
    Ok(count.max(0) as u64)
  }

  async fn find_staff_by_login(&self, name_fragment: String, cpf: Cpf) -> Result<Option<Staff>> {
    let raw: Option<RawStaff> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {STAFF_COLUMNS} FROM barbeiros
               WHERE cpf = ?1 AND nome LIKE '%' || ?2 || '%'
               LIMIT 1"
            ),
            rusqlite::params![cpf.as_str(), name_fragment],
            RawStaff::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawStaff::into_staff).transpose()
  }

  async fn update_staff(&self, cpf: Cpf, update: StaffUpdate) -> Result<Staff> {
    let raw: Option<RawStaff> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE barbeiros
           SET nome = ?1, email = ?2, telefone = ?3, especialidade = ?4, endereco = ?5,
               cargo = COALESCE(?6, cargo)
           WHERE cpf = ?7",
          rusqlite::params![
            update.name,
            update.email,
            update.phone,
            update.specialty,
            update.address,
            update.role.map(StaffRole::as_str),
            cpf.as_str(),
          ],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(Some(conn.query_row(
          &format!("SELECT {STAFF_COLUMNS} FROM barbeiros WHERE cpf = ?1"),
          rusqlite::params![cpf.as_str()],
          RawStaff::from_row,
        )?))
      })
      .await?;

    match raw {
      Some(raw) => raw.into_staff(),
      None => Err(barber_core::Error::NotFound("staff member".into()).into()),
    }
  }

  // ── Clients ───────────────────────────────────────────────────────────────

  async fn add_client(&self, input: NewClient) -> Result<Client> {
    let row = input.clone();

    let id = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO clientes (nome, cpf, email, telefone, endereco)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![row.name, row.cpf.as_str(), row.email, row.phone, row.address],
        );
        Ok(classify_write(inserted, DUPLICATE_CPF)?.map(|_| conn.last_insert_rowid()))
      })
      .await??;

    Ok(Client {
      id,
      name: input.name,
      cpf: input.cpf,
      email: input.email,
      phone: input.phone,
      address: input.address,
    })
  }

  async fn list_clients(&self, cpf_filter: Option<String>) -> Result<Vec<Client>> {
    let raws: Vec<RawClient> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CLIENT_COLUMNS} FROM clientes
           WHERE (?1 IS NULL OR cpf LIKE '%' || ?1 || '%')
           ORDER BY nome"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![cpf_filter], RawClient::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawClient::into_client).collect()
  }

  // ── Services ──────────────────────────────────────────────────────────────

  async fn add_service(&self, input: NewService) -> Result<Service> {
    let row = input.clone();

    let id = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO servicos (nome, preco, duracao, descricao) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![row.name, row.price, row.duration, row.description],
        );
        Ok(classify_write(inserted, DUPLICATE_SERVICE)?.map(|_| conn.last_insert_rowid()))
      })
      .await??;

    Ok(Service {
      id,
      name: input.name,
      price: input.price,
      duration: input.duration,
      description: input.description,
    })
  }

  async fn list_services(&self, name_filter: Option<String>) -> Result<Vec<Service>> {
    self
      .services_where(
        "WHERE (?1 IS NULL OR nome LIKE '%' || ?1 || '%') ORDER BY id DESC",
        name_filter,
      )
      .await
  }

  async fn list_services_by_name(&self) -> Result<Vec<Service>> {
    self.services_where("ORDER BY nome", None).await
  }

  async fn update_service(&self, current_name: String, input: NewService) -> Result<Service> {
    let service: Option<Service> = self
      .conn
      .call(move |conn| {
        let updated = conn.execute(
          "UPDATE servicos SET nome = ?1, preco = ?2, duracao = ?3, descricao = ?4
           WHERE nome = ?5",
          rusqlite::params![
            input.name,
            input.price,
            input.duration,
            input.description,
            current_name,
          ],
        );
        match classify_write(updated, DUPLICATE_SERVICE)? {
          Err(rejected) => Ok(Err(rejected)),
          Ok(0) => Ok(Ok(None)),
          Ok(_) => Ok(Ok(Some(conn.query_row(
            &format!("SELECT {SERVICE_COLUMNS} FROM servicos WHERE nome = ?1"),
            rusqlite::params![input.name],
            service_from_row,
          )?))),
        }
      })
      .await??;

    service.ok_or_else(|| barber_core::Error::NotFound("service".into()).into())
  }

  // ── Appointments ──────────────────────────────────────────────────────────

  async fn occupied_slots(&self, date: NaiveDate, service_id: i64) -> Result<Vec<String>> {
    let date_str = encode_date(date);

    let times = self
      .conn
      .call(move |conn| {
        let mut stmt = conn
          .prepare("SELECT horario FROM agendamentos WHERE data = ?1 AND id_servico = ?2")?;
        let rows = stmt
          .query_map(rusqlite::params![date_str, service_id], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(times)
  }

  async fn book_appointment(&self, input: NewAppointment) -> Result<Appointment> {
    let NewAppointment { date, time, client_cpf, staff_id, service_id } = input;
    let date_str = encode_date(date);
    let time_str = time.to_string();
    let cpf_str = client_cpf.as_str().to_owned();
    let conflict = move || barber_core::Error::SlotConflict { staff_id, date, time };

    // IMMEDIATE takes the write lock up front, so eligibility, conflict check
    // and insert see no interleaved writer.
    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let role: Option<String> = tx
          .query_row(
            "SELECT cargo FROM barbeiros WHERE id = ?1",
            rusqlite::params![staff_id],
            |r| r.get(0),
          )
          .optional()?;
        let eligible = role
          .as_deref()
          .and_then(|r| r.parse::<StaffRole>().ok())
          .is_some_and(StaffRole::can_take_appointments);
        if !eligible {
          return Ok(Err(barber_core::Error::IneligibleStaff(staff_id)));
        }

        let taken = tx
          .query_row(
            "SELECT 1 FROM agendamentos WHERE data = ?1 AND horario = ?2 AND id_barbeiro = ?3",
            rusqlite::params![date_str, time_str, staff_id],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if taken {
          return Ok(Err(conflict()));
        }

        let inserted = tx.execute(
          "INSERT INTO agendamentos (data, horario, cpf_cliente, id_barbeiro, id_servico)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![date_str, time_str, cpf_str, staff_id, service_id],
        );
        if let Err(e) = inserted {
          return match violation(&e) {
            Some(Violation::Unique) => {
              tracing::warn!(staff_id, "slot uniqueness constraint rejected a double booking");
              Ok(Err(conflict()))
            }
            Some(Violation::ForeignKey) => Ok(Err(barber_core::Error::invalid(
              "referenced client or service does not exist",
            ))),
            None => Err(e.into()),
          };
        }

        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(Ok(id))
      })
      .await??;

    Ok(Appointment { id, date, time, client_cpf, staff_id, service_id })
  }

  async fn list_appointments(&self, date: Option<NaiveDate>) -> Result<Vec<AppointmentDetail>> {
    let date_str = date.map(encode_date);

    let raws: Vec<RawDetail> = self
      .conn
      .call(move |conn| {
        let rows = match date_str {
          Some(d) => {
            let mut stmt =
              conn.prepare(&format!("{DETAIL_SELECT} WHERE a.data = ?1 ORDER BY a.horario"))?;
            stmt
              .query_map(rusqlite::params![d], RawDetail::from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?
          }
          None => {
            let mut stmt = conn
              .prepare(&format!("{DETAIL_SELECT} ORDER BY a.data DESC, a.horario DESC"))?;
            stmt
              .query_map([], RawDetail::from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?
          }
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDetail::into_detail).collect()
  }

  async fn delete_appointment(&self, id: i64) -> Result<()> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM agendamentos WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    if deleted == 0 {
      return Err(barber_core::Error::NotFound(format!("appointment {id}")).into());
    }
    Ok(())
  }

  // ── Reports ───────────────────────────────────────────────────────────────

  async fn report(&self, filter: &ReportFilter) -> Result<Vec<ReportRow>> {
    let client_cpf = filter.client_cpf.clone();
    let service_name = filter.service_name.clone();
    let start = filter.start_date.map(encode_date);
    let end = filter.end_date.map(encode_date);

    let raws: Vec<RawDetail> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "{DETAIL_SELECT}
           WHERE (?1 IS NULL OR a.cpf_cliente LIKE '%' || ?1 || '%')
             AND (?2 IS NULL OR s.nome LIKE '%' || ?2 || '%')
             AND (?3 IS NULL OR a.data >= ?3)
             AND (?4 IS NULL OR a.data <= ?4)
           ORDER BY a.data DESC, a.horario DESC"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![client_cpf, service_name, start, end],
            RawDetail::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDetail::into_report_row).collect()
  }
}
