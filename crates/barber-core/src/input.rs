//! Helpers for the loosely-typed fields that arrive in request bodies and
//! query strings.

use serde::Deserialize;

use crate::{Error, Result};

/// Collapse `None`, `""` and whitespace-only strings into `None`; trim the
/// rest.
pub fn non_blank(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}

/// An id sent either as a JSON number or as text (HTML forms and query
/// strings post `"5"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LooseId {
  Number(i64),
  Text(String),
}

impl LooseId {
  /// `Ok(None)` when absent or blank, `InvalidInput` when the text is not an
  /// integer.
  pub fn resolve(field: Option<Self>, name: &str) -> Result<Option<i64>> {
    match field {
      None => Ok(None),
      Some(Self::Number(n)) => Ok(Some(n)),
      Some(Self::Text(t)) => {
        let t = t.trim();
        if t.is_empty() {
          return Ok(None);
        }
        t.parse()
          .map(Some)
          .map_err(|_| Error::invalid(format!("{name} must be a number")))
      }
    }
  }
}

impl From<i64> for LooseId {
  fn from(value: i64) -> Self { Self::Number(value) }
}

/// `deserialize_with` for text fields that forms sometimes post as numbers,
/// e.g. `"preco": 35.5`. Pair with `#[serde(default)]`.
pub fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
  D: serde::Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Loose {
    Text(String),
    Int(i64),
    Float(f64),
  }

  Ok(Option::<Loose>::deserialize(deserializer)?.map(|v| match v {
    Loose::Text(s) => s,
    Loose::Int(n) => n.to_string(),
    Loose::Float(f) => f.to_string(),
  }))
}
