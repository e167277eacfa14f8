use serde::{Deserialize, Serialize};

/// Minimum readiness score accepted by `deploy`.
pub const DEPLOY_MIN_SCORE: u8 = 60;
const READY_SCORE: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessLevel {
    Ready,
    NeedsAttention,
    NotReady,
}

impl ReadinessLevel {
    pub fn from_score(score: u8) -> Self {
        if score >= READY_SCORE {
            ReadinessLevel::Ready
        } else if score >= DEPLOY_MIN_SCORE {
            ReadinessLevel::NeedsAttention
        } else {
            ReadinessLevel::NotReady
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSummary {
    pub bot_name: String,
    pub faq_count: usize,
    pub template_count: usize,
    pub language: String,
    pub api_connected: bool,
    pub score: u8,
    pub level: ReadinessLevel,
    pub deployed: bool,
}
