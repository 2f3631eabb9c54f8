//! Payment payload accepted by `POST /payment`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A payment as submitted by the client.
///
/// Any JSON object is accepted and kept as-is; no field is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payment(Map<String, Value>);

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        write!(f, "Payment{body}")
    }
}
