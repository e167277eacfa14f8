use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub quick_replies: Vec<String>,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            timestamp: Utc::now(),
            quick_replies: Vec::new(),
        }
    }

    pub fn bot(text: impl Into<String>, quick_replies: Vec<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            timestamp: Utc::now(),
            quick_replies,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    AwaitingResponse,
}

/// Mock quality figures shown next to the simulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestMetrics {
    /// Percent.
    pub accuracy_score: f64,
    /// Seconds, one decimal.
    pub response_time: f64,
    /// Percent.
    pub handoff_rate: f64,
    /// Percent.
    pub satisfaction_score: f64,
}

impl TestMetrics {
    pub fn has_run(&self) -> bool {
        self.accuracy_score > 0.0
    }
}

/// Canned message batches the operator can fire at the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestSuite {
    CommonQuestions,
    EdgeCases,
}

impl TestSuite {
    pub fn messages(&self) -> Vec<String> {
        match self {
            TestSuite::CommonQuestions => vec![
                "What are your working hours?".to_string(),
                "How can I place an order?".to_string(),
                "What payment methods do you accept?".to_string(),
                "How long does delivery take?".to_string(),
                "What's your return policy?".to_string(),
            ],
            TestSuite::EdgeCases => vec![
                String::new(),
                "xyz".to_string(),
                "What about...?".to_string(),
                "!!!!".to_string(),
                "a".repeat(500),
            ],
        }
    }
}
