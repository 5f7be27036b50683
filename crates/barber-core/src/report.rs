//! The financial report: appointments joined with client, staff and service
//! details, filtered by optional criteria.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Result, appointment::AppointmentDetail, input::non_blank, schedule::parse_date};

/// Report filters, as received from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
  /// Substring of the client CPF.
  #[serde(rename = "cpf_cliente")]
  pub client_cpf:   Option<String>,
  /// Substring of the service name.
  #[serde(rename = "servico")]
  pub service_name: Option<String>,
  #[serde(rename = "dataInicio")]
  pub start_date:   Option<String>,
  #[serde(rename = "dataFim")]
  pub end_date:     Option<String>,
}

/// Validated report filters. Every `None` means "no restriction"; both date
/// bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
  pub client_cpf:   Option<String>,
  pub service_name: Option<String>,
  pub start_date:   Option<NaiveDate>,
  pub end_date:     Option<NaiveDate>,
}

impl ReportQuery {
  pub fn validate(self) -> Result<ReportFilter> {
    let start_date = non_blank(self.start_date)
      .map(|d| parse_date(&d, "start date"))
      .transpose()?;
    let end_date = non_blank(self.end_date)
      .map(|d| parse_date(&d, "end date"))
      .transpose()?;

    Ok(ReportFilter {
      client_cpf: non_blank(self.client_cpf),
      service_name: non_blank(self.service_name),
      start_date,
      end_date,
    })
  }
}

/// One report line, newest first in the store's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
  #[serde(flatten)]
  pub appointment: AppointmentDetail,
  /// Price text of the joined service, if the service still exists.
  #[serde(rename = "servico_preco")]
  pub price:       Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;

  #[test]
  fn blank_filters_are_dropped() {
    let q = ReportQuery {
      client_cpf:   Some("".into()),
      service_name: Some(" corte ".into()),
      start_date:   Some(" ".into()),
      end_date:     None,
    };
    let f = q.validate().unwrap();
    assert_eq!(f.client_cpf, None);
    assert_eq!(f.service_name.as_deref(), Some("corte"));
    assert_eq!(f.start_date, None);
  }

  #[test]
  fn inverted_range_passes_through() {
    let inverted = ReportQuery {
      start_date: Some("2024-06-02".into()),
      end_date: Some("2024-06-01".into()),
      ..Default::default()
    };
    let f = inverted.validate().unwrap();
    assert!(f.start_date > f.end_date);
  }

  #[test]
  fn malformed_date_is_invalid() {
    let malformed = ReportQuery { end_date: Some("june".into()), ..Default::default() };
    assert!(matches!(malformed.validate(), Err(Error::InvalidInput(_))));
  }
}
