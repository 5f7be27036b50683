//! Staff members and their roles.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{
  Cpf, Error, Result,
  input::{non_blank, text_or_number},
};

/// The closed set of staff classifications. The wire and storage names are
/// the Portuguese labels used by the shop.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
pub enum StaffRole {
  #[default]
  #[serde(rename = "Barbeiro")]
  #[strum(serialize = "Barbeiro")]
  Barber,
  #[serde(rename = "Cabeleireiro")]
  #[strum(serialize = "Cabeleireiro")]
  Hairdresser,
  #[serde(rename = "Recepcionista")]
  #[strum(serialize = "Recepcionista")]
  Receptionist,
  #[serde(rename = "Gerente")]
  #[strum(serialize = "Gerente")]
  Manager,
  #[serde(rename = "Outro")]
  #[strum(serialize = "Outro")]
  Other,
}

impl StaffRole {
  /// Only barbers and hairdressers can be assigned appointments.
  pub fn can_take_appointments(self) -> bool {
    matches!(self, Self::Barber | Self::Hairdresser)
  }

  pub fn as_str(self) -> &'static str { self.into() }

  fn parse_field(raw: Option<String>) -> Result<Option<Self>> {
    non_blank(raw)
      .map(|r| {
        r.parse()
          .map_err(|_| Error::invalid(format!("unknown staff role {r:?}")))
      })
      .transpose()
  }
}

/// A persisted staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
  pub id:        i64,
  #[serde(rename = "nome")]
  pub name:      String,
  pub cpf:       Cpf,
  pub email:     Option<String>,
  #[serde(rename = "telefone")]
  pub phone:     Option<String>,
  #[serde(rename = "especialidade")]
  pub specialty: Option<String>,
  #[serde(rename = "endereco")]
  pub address:   Option<String>,
  #[serde(rename = "cargo")]
  pub role:      StaffRole,
}

/// Input to [`crate::store::BarbershopStore::add_staff`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStaff {
  pub name:      String,
  pub cpf:       Cpf,
  pub email:     Option<String>,
  pub phone:     Option<String>,
  pub specialty: Option<String>,
  pub address:   Option<String>,
  pub role:      StaffRole,
}

impl NewStaff {
  pub fn new(name: impl Into<String>, cpf: Cpf, role: StaffRole) -> Self {
    Self {
      name: name.into(),
      cpf,
      email: None,
      phone: None,
      specialty: None,
      address: None,
      role,
    }
  }
}

/// Staff registration body, as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaffInput {
  #[serde(rename = "nome")]
  pub name:      Option<String>,
  #[serde(default, deserialize_with = "text_or_number")]
  pub cpf:       Option<String>,
  pub email:     Option<String>,
  #[serde(rename = "telefone")]
  pub phone:     Option<String>,
  #[serde(rename = "especialidade")]
  pub specialty: Option<String>,
  #[serde(rename = "endereco")]
  pub address:   Option<String>,
  #[serde(rename = "cargo")]
  pub role:      Option<String>,
}

impl StaffInput {
  pub fn validate(self) -> Result<NewStaff> {
    let (Some(name), Some(cpf)) = (non_blank(self.name), non_blank(self.cpf)) else {
      return Err(Error::invalid("name and CPF are required"));
    };
    Ok(NewStaff {
      name,
      cpf: Cpf::parse(&cpf)?,
      email: non_blank(self.email),
      phone: non_blank(self.phone),
      specialty: non_blank(self.specialty),
      address: non_blank(self.address),
      role: StaffRole::parse_field(self.role)?.unwrap_or_default(),
    })
  }
}

/// Administrative edit of a staff member, addressed by CPF.
///
/// A `None` role keeps the current one; the contact fields are replaced as
/// given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffUpdate {
  pub name:      String,
  pub email:     Option<String>,
  pub phone:     Option<String>,
  pub specialty: Option<String>,
  pub address:   Option<String>,
  pub role:      Option<StaffRole>,
}

/// Staff update body, as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaffUpdateInput {
  #[serde(rename = "nome")]
  pub name:      Option<String>,
  pub email:     Option<String>,
  #[serde(rename = "telefone")]
  pub phone:     Option<String>,
  #[serde(rename = "especialidade")]
  pub specialty: Option<String>,
  #[serde(rename = "endereco")]
  pub address:   Option<String>,
  #[serde(rename = "cargo")]
  pub role:      Option<String>,
}

impl StaffUpdateInput {
  pub fn validate(self) -> Result<StaffUpdate> {
    let name = non_blank(self.name).ok_or_else(|| Error::invalid("name is required"))?;
    Ok(StaffUpdate {
      name,
      email: non_blank(self.email),
      phone: non_blank(self.phone),
      specialty: non_blank(self.specialty),
      address: non_blank(self.address),
      role: StaffRole::parse_field(self.role)?,
    })
  }
}

/// Login body: a name fragment plus the exact CPF.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
  #[serde(rename = "nome")]
  pub name: Option<String>,
  #[serde(default, deserialize_with = "text_or_number")]
  pub cpf:  Option<String>,
}

/// A validated login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Login {
  pub name: String,
  pub cpf:  Cpf,
}

impl LoginInput {
  pub fn validate(self) -> Result<Login> {
    let (Some(name), Some(cpf)) = (non_blank(self.name), non_blank(self.cpf)) else {
      return Err(Error::invalid("name and CPF are required"));
    };
    Ok(Login { name, cpf: Cpf::parse(&cpf)? })
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn only_barbers_and_hairdressers_take_appointments() {
    let eligible: Vec<StaffRole> = StaffRole::iter()
      .filter(|r| r.can_take_appointments())
      .collect();
    assert_eq!(eligible, vec![StaffRole::Barber, StaffRole::Hairdresser]);
  }

  #[test]
  fn role_labels_round_trip_through_strum_and_serde() {
    for role in StaffRole::iter() {
      let parsed: StaffRole = role.as_str().parse().unwrap();
      assert_eq!(parsed, role);
      let json = serde_json::to_string(&role).unwrap();
      assert_eq!(json, format!("\"{}\"", role.as_str()));
    }
    assert_eq!(StaffRole::Manager.to_string(), "Gerente");
  }

  #[test]
  fn input_defaults_role_to_barber() {
    let input = StaffInput {
      name: Some("Carlos".into()),
      cpf: Some("11122233344".into()),
      ..Default::default()
    };
    let staff = input.validate().unwrap();
    assert_eq!(staff.role, StaffRole::Barber);
    assert_eq!(staff.email, None);
  }

  #[test]
  fn input_rejects_unknown_role_and_missing_fields() {
    let bad_role = StaffInput {
      name: Some("Carlos".into()),
      cpf: Some("11122233344".into()),
      role: Some("Astronaut".into()),
      ..Default::default()
    };
    assert!(matches!(bad_role.validate(), Err(Error::InvalidInput(_))));

    let no_cpf = StaffInput { name: Some("Carlos".into()), ..Default::default() };
    assert!(matches!(no_cpf.validate(), Err(Error::InvalidInput(_))));
  }

  #[test]
  fn login_requires_eleven_digit_cpf() {
    let short = LoginInput { name: Some("Ana".into()), cpf: Some("123".into()) };
    assert!(matches!(short.validate(), Err(Error::InvalidInput(_))));

    let ok = LoginInput { name: Some("Ana".into()), cpf: Some("12345678900".into()) };
    assert_eq!(ok.validate().unwrap().cpf.as_str(), "12345678900");
  }
}
