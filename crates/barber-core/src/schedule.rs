//! The daily slot grid and the availability calculation.
//!
//! The shop books in fixed 30-minute slots from 08:00 to 18:00 inclusive,
//! independent of how long a service takes. Availability is derived on every
//! call from the appointments currently in the store; nothing is cached.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  input::{LooseId, non_blank},
  store::BarbershopStore,
};

// ─── Grid ────────────────────────────────────────────────────────────────────

/// Opening time, in minutes after midnight (08:00).
pub const OPENING_MINUTE: u16 = 8 * 60;
/// Last bookable slot, in minutes after midnight (18:00).
pub const LAST_SLOT_MINUTE: u16 = 18 * 60;
pub const SLOT_MINUTES: u16 = 30;
/// Number of slots on the grid.
pub const SLOTS_PER_DAY: usize =
  ((LAST_SLOT_MINUTE - OPENING_MINUTE) / SLOT_MINUTES) as usize + 1;

/// A time of day on the canonical grid. Rendered and stored as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slot(u16);

impl Slot {
  /// Every slot of the day, ascending.
  pub fn all() -> impl Iterator<Item = Slot> {
    (OPENING_MINUTE..=LAST_SLOT_MINUTE)
      .step_by(SLOT_MINUTES as usize)
      .map(Slot)
  }

  /// Parse an `HH:MM` string, accepting only times that fall on the grid.
  pub fn parse(raw: &str) -> Result<Self> {
    let invalid = || {
      Error::invalid(format!(
        "time {raw:?} is not a bookable slot (08:00 to 18:00, every 30 minutes)"
      ))
    };

    let (h, m) = raw.trim().split_once(':').ok_or_else(invalid)?;
    let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(h) || !two_digits(m) {
      return Err(invalid());
    }
    let h: u16 = h.parse().map_err(|_| invalid())?;
    let m: u16 = m.parse().map_err(|_| invalid())?;
    if m >= 60 {
      return Err(invalid());
    }

    let minute = h * 60 + m;
    let on_grid = (OPENING_MINUTE..=LAST_SLOT_MINUTE).contains(&minute)
      && (minute - OPENING_MINUTE) % SLOT_MINUTES == 0;
    if on_grid { Ok(Slot(minute)) } else { Err(invalid()) }
  }

  pub fn hour(self) -> u16 { self.0 / 60 }

  pub fn minute(self) -> u16 { self.0 % 60 }
}

impl fmt::Display for Slot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:02}:{:02}", self.hour(), self.minute())
  }
}

impl TryFrom<String> for Slot {
  type Error = Error;

  fn try_from(value: String) -> Result<Self> { Self::parse(&value) }
}

impl From<Slot> for String {
  fn from(value: Slot) -> Self { value.to_string() }
}

// ─── Availability ────────────────────────────────────────────────────────────

/// The grid minus every slot named in `occupied`.
///
/// `occupied` holds raw `HH:MM` strings as stored; entries that are not on
/// the grid cannot remove anything and are ignored.
pub fn available_slots(occupied: &[String]) -> Vec<Slot> {
  Slot::all()
    .filter(|slot| {
      let rendered = slot.to_string();
      !occupied.iter().any(|o| o.trim() == rendered)
    })
    .collect()
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(raw: &str, field: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
    .map_err(|_| Error::invalid(format!("{field} must be a date in YYYY-MM-DD form")))
}

/// Query-string parameters of an availability lookup, as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityQuery {
  #[serde(rename = "data")]
  pub date:       Option<String>,
  #[serde(rename = "id")]
  pub service_id: Option<LooseId>,
}

/// A validated availability lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
  pub date:       NaiveDate,
  pub service_id: i64,
}

impl AvailabilityQuery {
  pub fn validate(self) -> Result<Availability> {
    let date = non_blank(self.date);
    let service_id = LooseId::resolve(self.service_id, "service id")?;
    let (Some(date), Some(service_id)) = (date, service_id) else {
      return Err(Error::invalid("date and service id are required"));
    };
    Ok(Availability { date: parse_date(&date, "date")?, service_id })
  }
}

/// Free slots for a date and service, ascending.
///
/// Occupancy is scoped to the *service*: a slot disappears as soon as any
/// appointment for that service exists at that time, whichever staff member
/// holds it. Booking conflicts are scoped to the *staff member* instead (see
/// [`BarbershopStore::book_appointment`]), so the two views can disagree.
pub async fn free_slots<S>(store: &S, query: AvailabilityQuery) -> Result<Vec<Slot>, S::Error>
where
  S: BarbershopStore,
  S::Error: From<Error>,
{
  let Availability { date, service_id } = query.validate()?;
  let occupied = store.occupied_slots(date, service_id).await?;
  Ok(available_slots(&occupied))
}
