//! Services offered by the shop.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  input::{non_blank, text_or_number},
};

/// A persisted service.
///
/// `price` is a decimal kept as text exactly as it was entered; the store
/// never does arithmetic on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
  pub id:          i64,
  #[serde(rename = "nome")]
  pub name:        String,
  #[serde(rename = "preco")]
  pub price:       String,
  #[serde(rename = "duracao")]
  pub duration:    Option<String>,
  #[serde(rename = "descricao")]
  pub description: Option<String>,
}

/// Input to [`crate::store::BarbershopStore::add_service`] and
/// [`crate::store::BarbershopStore::update_service`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewService {
  pub name:        String,
  pub price:       String,
  pub duration:    Option<String>,
  pub description: Option<String>,
}

impl NewService {
  pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
    Self { name: name.into(), price: price.into(), duration: None, description: None }
  }
}

/// Service body, as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceInput {
  #[serde(rename = "nome")]
  pub name:        Option<String>,
  #[serde(rename = "preco", default, deserialize_with = "text_or_number")]
  pub price:       Option<String>,
  #[serde(rename = "duracao", default, deserialize_with = "text_or_number")]
  pub duration:    Option<String>,
  #[serde(rename = "descricao")]
  pub description: Option<String>,
}

impl ServiceInput {
  pub fn validate(self) -> Result<NewService> {
    let (Some(name), Some(price)) = (non_blank(self.name), non_blank(self.price)) else {
      return Err(Error::invalid("name and price are required"));
    };
    Ok(NewService {
      name,
      price,
      duration: non_blank(self.duration),
      description: non_blank(self.description),
    })
  }
}
