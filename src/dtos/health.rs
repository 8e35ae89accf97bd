//! Health DTOs

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthStatusDTO {
    pub status: String,
    /// ISO-8601 in UTC con millisecondi, es. "2024-01-01T00:00:00.000Z"
    pub timestamp: String,
}

impl HealthStatusDTO {
    pub fn ok_at(now: DateTime<Utc>) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
