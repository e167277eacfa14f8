pub mod mock_probe;

use crate::domain::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use mock_probe::MockWhatsAppProbe;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeOutcome {
    pub connected: bool,
    pub message: String,
    pub checked_at: DateTime<Utc>,
}

impl ProbeOutcome {
    pub fn connected() -> Self {
        Self {
            connected: true,
            message: "WhatsApp API connection successful!".to_string(),
            checked_at: Utc::now(),
        }
    }

    pub fn failed() -> Self {
        Self {
            connected: false,
            message: "Failed to connect to WhatsApp API. Please check your credentials."
                .to_string(),
            checked_at: Utc::now(),
        }
    }
}

/// Checks whether the WhatsApp Business API is reachable.
#[async_trait]
pub trait ConnectivityProbe {
    async fn check(&self) -> Result<ProbeOutcome>;
}
