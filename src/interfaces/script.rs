//! Before-submit checks described in JSON, for exercising a checkout from
//! the command line.
//!
//! ```json
//! [
//!   { "delay_ms": 100, "report": true },
//!   { "delay_ms": 200, "report": "Card declined" },
//!   { "delay_ms": 50 }
//! ]
//! ```
//!
//! A check without `report` never reports back.

use crate::domain::validation::{Reporter, ValidatorEntry, ValidatorHandler};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScriptedCheck {
    #[serde(default)]
    pub delay_ms: u64,
    /// `None` only when the field is absent; an explicit `null` is kept.
    #[serde(default, deserialize_with = "present")]
    pub report: Option<Value>,
    #[serde(default)]
    pub payload: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[async_trait]
impl ValidatorHandler for ScriptedCheck {
    async fn validate(&self, _payload: Option<Value>, reporter: Reporter) {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        if let Some(report) = self.report.clone() {
            reporter.report(report);
        }
    }
}

impl ScriptedCheck {
    pub fn into_entry(self) -> ValidatorEntry {
        let payload = self.payload.clone();
        ValidatorEntry {
            payload,
            handler: Some(Arc::new(self)),
        }
    }
}

pub fn read_checks<R: Read>(source: R) -> Result<Vec<ScriptedCheck>> {
    Ok(serde_json::from_reader(source)?)
}
