//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD`, times as zero-padded `HH:MM`, roles as
//! their Portuguese labels and CPFs as bare digit strings.

use barber_core::{
  Cpf,
  appointment::AppointmentDetail,
  client::Client,
  report::ReportRow,
  service::Service,
  staff::{Staff, StaffRole},
};
use chrono::NaiveDate;
use rusqlite::{ErrorCode, Row, ffi};

use crate::{Error, Result};

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(table: &'static str, s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::CorruptRow {
    table,
    detail: format!("date {s:?}: {e}"),
  })
}

// ─── Cpf / StaffRole ─────────────────────────────────────────────────────────

fn decode_cpf(table: &'static str, s: &str) -> Result<Cpf> {
  Cpf::parse(s).map_err(|_| Error::CorruptRow { table, detail: format!("cpf {s:?}") })
}

fn decode_role(s: &str) -> Result<StaffRole> {
  s.parse().map_err(|_| Error::CorruptRow {
    table:  "barbeiros",
    detail: format!("unknown role {s:?}"),
  })
}

// ─── Constraint violations ───────────────────────────────────────────────────

/// Which storage-level constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
  Unique,
  ForeignKey,
}

pub fn violation(err: &rusqlite::Error) -> Option<Violation> {
  match err {
    rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
      match e.extended_code {
        ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
          Some(Violation::Unique)
        }
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(Violation::ForeignKey),
        _ => None,
      }
    }
    _ => None,
  }
}

/// Split the outcome of a write into a domain rejection (inner `Err`) and a
/// database failure (outer `Err`). `duplicate` is the message reported when a
/// uniqueness constraint fires.
pub fn classify_write(
  result: rusqlite::Result<usize>,
  duplicate: &str,
) -> tokio_rusqlite::Result<barber_core::Result<usize>> {
  match result {
    Ok(n) => Ok(Ok(n)),
    Err(e) => match violation(&e) {
      Some(Violation::Unique) => Ok(Err(barber_core::Error::Duplicate(duplicate.to_owned()))),
      Some(Violation::ForeignKey) => Ok(Err(barber_core::Error::invalid(
        "referenced client or service does not exist",
      ))),
      None => Err(e.into()),
    },
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const STAFF_COLUMNS: &str =
  "id, nome, cpf, email, telefone, especialidade, endereco, cargo";

/// Raw values read directly from a `barbeiros` row.
pub struct RawStaff {
  pub id:            i64,
  pub nome:          String,
  pub cpf:           String,
  pub email:         Option<String>,
  pub telefone:      Option<String>,
  pub especialidade: Option<String>,
  pub endereco:      Option<String>,
  pub cargo:         String,
}

impl RawStaff {
  /// Read a row selected with [`STAFF_COLUMNS`].
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      nome:          row.get(1)?,
      cpf:           row.get(2)?,
      email:         row.get(3)?,
      telefone:      row.get(4)?,
      especialidade: row.get(5)?,
      endereco:      row.get(6)?,
      cargo:         row.get(7)?,
    })
  }

  pub fn into_staff(self) -> Result<Staff> {
    Ok(Staff {
      id:        self.id,
      name:      self.nome,
      cpf:       decode_cpf("barbeiros", &self.cpf)?,
      email:     self.email,
      phone:     self.telefone,
      specialty: self.especialidade,
      address:   self.endereco,
      role:      decode_role(&self.cargo)?,
    })
  }
}

pub const CLIENT_COLUMNS: &str = "id, nome, cpf, email, telefone, endereco";

/// Raw values read directly from a `clientes` row.
pub struct RawClient {
  pub id:       i64,
  pub nome:     String,
  pub cpf:      String,
  pub email:    Option<String>,
  pub telefone: Option<String>,
  pub endereco: Option<String>,
}

impl RawClient {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:       row.get(0)?,
      nome:     row.get(1)?,
      cpf:      row.get(2)?,
      email:    row.get(3)?,
      telefone: row.get(4)?,
      endereco: row.get(5)?,
    })
  }

  pub fn into_client(self) -> Result<Client> {
    Ok(Client {
      id:      self.id,
      name:    self.nome,
      cpf:     decode_cpf("clientes", &self.cpf)?,
      email:   self.email,
      phone:   self.telefone,
      address: self.endereco,
    })
  }
}

pub const SERVICE_COLUMNS: &str = "id, nome, preco, duracao, descricao";

/// Services need no decoding beyond the row itself.
pub fn service_from_row(row: &Row<'_>) -> rusqlite::Result<Service> {
  Ok(Service {
    id:          row.get(0)?,
    name:        row.get(1)?,
    price:       row.get(2)?,
    duration:    row.get(3)?,
    description: row.get(4)?,
  })
}

/// Select list shared by appointment listings and the report; the last
/// column is the service price.
pub const DETAIL_SELECT: &str = "
  SELECT
    a.id, a.data, a.horario, a.cpf_cliente,
    c.nome AS cliente_nome,
    a.id_barbeiro,
    b.nome AS barbeiro_nome,
    a.id_servico,
    s.nome AS servico_nome,
    s.preco AS servico_preco
  FROM agendamentos a
  LEFT JOIN clientes  c ON a.cpf_cliente = c.cpf
  LEFT JOIN barbeiros b ON a.id_barbeiro = b.id
  LEFT JOIN servicos  s ON a.id_servico  = s.id";

/// Raw values from [`DETAIL_SELECT`].
pub struct RawDetail {
  pub id:            i64,
  pub data:          String,
  pub horario:       String,
  pub cpf_cliente:   String,
  pub cliente_nome:  Option<String>,
  pub id_barbeiro:   i64,
  pub barbeiro_nome: Option<String>,
  pub id_servico:    i64,
  pub servico_nome:  Option<String>,
  pub servico_preco: Option<String>,
}

impl RawDetail {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      data:          row.get(1)?,
      horario:       row.get(2)?,
      cpf_cliente:   row.get(3)?,
      cliente_nome:  row.get(4)?,
      id_barbeiro:   row.get(5)?,
      barbeiro_nome: row.get(6)?,
      id_servico:    row.get(7)?,
      servico_nome:  row.get(8)?,
      servico_preco: row.get(9)?,
    })
  }

  pub fn into_detail(self) -> Result<AppointmentDetail> {
    Ok(self.into_report_row()?.appointment)
  }

  pub fn into_report_row(self) -> Result<ReportRow> {
    Ok(ReportRow {
      appointment: AppointmentDetail {
        id:           self.id,
        date:         decode_date("agendamentos", &self.data)?,
        time:         self.horario,
        client_cpf:   self.cpf_cliente,
        client_name:  self.cliente_nome,
        staff_id:     self.id_barbeiro,
        staff_name:   self.barbeiro_nome,
        service_id:   self.id_servico,
        service_name: self.servico_nome,
      },
      price:       self.servico_preco,
    })
  }
}
