//! The national identifier shared by staff and clients.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of digits in a CPF.
pub const CPF_LEN: usize = 11;

/// A CPF: exactly eleven ASCII digits, stored without punctuation.
///
/// Used as the login key for staff and as the foreign key from appointments
/// to clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
  pub fn parse(raw: &str) -> Result<Self> {
    let trimmed = raw.trim();
    if trimmed.len() == CPF_LEN && trimmed.bytes().all(|b| b.is_ascii_digit()) {
      Ok(Self(trimmed.to_owned()))
    } else {
      Err(Error::invalid("CPF must contain 11 digits"))
    }
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl TryFrom<String> for Cpf {
  type Error = Error;

  fn try_from(value: String) -> Result<Self> { Self::parse(&value) }
}

impl From<Cpf> for String {
  fn from(value: Cpf) -> Self { value.0 }
}

impl fmt::Display for Cpf {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}
