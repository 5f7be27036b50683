//! Clients of the shop.

use serde::{Deserialize, Serialize};

use crate::{
  Cpf, Error, Result,
  input::{non_blank, text_or_number},
};

/// A persisted client. Appointments reference clients by [`Cpf`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
  pub id:      i64,
  #[serde(rename = "nome")]
  pub name:    String,
  pub cpf:     Cpf,
  pub email:   Option<String>,
  #[serde(rename = "telefone")]
  pub phone:   Option<String>,
  #[serde(rename = "endereco")]
  pub address: Option<String>,
}

/// Input to [`crate::store::BarbershopStore::add_client`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
  pub name:    String,
  pub cpf:     Cpf,
  pub email:   Option<String>,
  pub phone:   Option<String>,
  pub address: Option<String>,
}

impl NewClient {
  pub fn new(name: impl Into<String>, cpf: Cpf) -> Self {
    Self { name: name.into(), cpf, email: None, phone: None, address: None }
  }
}

/// Client registration body, as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientInput {
  #[serde(rename = "nome")]
  pub name:    Option<String>,
  #[serde(default, deserialize_with = "text_or_number")]
  pub cpf:     Option<String>,
  pub email:   Option<String>,
  #[serde(rename = "telefone")]
  pub phone:   Option<String>,
  #[serde(rename = "endereco")]
  pub address: Option<String>,
}

impl ClientInput {
  pub fn validate(self) -> Result<NewClient> {
    let (Some(name), Some(cpf)) = (non_blank(self.name), non_blank(self.cpf)) else {
      return Err(Error::invalid("name and CPF are required"));
    };
    Ok(NewClient {
      name,
      cpf: Cpf::parse(&cpf)?,
      email: non_blank(self.email),
      phone: non_blank(self.phone),
      address: non_blank(self.address),
    })
  }
}
