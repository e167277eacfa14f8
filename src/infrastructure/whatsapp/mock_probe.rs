use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::info;

use super::{ConnectivityProbe, ProbeOutcome};
use crate::domain::error::{AppError, Result};

/// Demo probe: no network call, just a fixed wait and a weighted coin flip.
pub struct MockWhatsAppProbe {
    delay: Duration,
    success_probability: f64,
    rng: Mutex<StdRng>,
}

impl MockWhatsAppProbe {
    pub fn new(delay: Duration, success_probability: f64, rng: StdRng) -> Self {
        Self {
            delay,
            success_probability: success_probability.clamp(0.0, 1.0),
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl ConnectivityProbe for MockWhatsAppProbe {
    async fn check(&self) -> Result<ProbeOutcome> {
        // Draw before sleeping so the lock is never held across the await.
        let connected = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| AppError::Internal("Probe RNG lock poisoned".to_string()))?;
            rng.gen_bool(self.success_probability)
        };

        tokio::time::sleep(self.delay).await;

        info!(connected, "Mock WhatsApp API check finished");
        Ok(if connected {
            ProbeOutcome::connected()
        } else {
            ProbeOutcome::failed()
        })
    }
}
