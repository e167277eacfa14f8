//! Simulated conversation against the FAQ matcher.
//!
//! One exchange at a time: `begin` records the user message and moves the
//! session to `AwaitingResponse`; `complete` appends the bot reply and
//! returns it to `Idle`. The caller waits out the artificial delay between
//! the two calls without holding the session.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::faq_matcher::{match_faq, MatchResult};
use crate::domain::error::{AppError, Result};
use crate::domain::faq::Faq;
use crate::domain::transcript::{SessionState, TestMetrics, TranscriptEntry};

pub const DEFAULT_WELCOME: &str = "Hello! 👋 I'm your FAQ bot. How can I help you today?";

/// A submitted message waiting for its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExchange {
    pub id: Uuid,
    pub message: String,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeReply {
    pub message: String,
    pub reply: TranscriptEntry,
    pub matched_faq_id: Option<i64>,
    pub fallback: bool,
    pub metrics: TestMetrics,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    transcript: Vec<TranscriptEntry>,
    state: SessionState,
    pending: Option<PendingExchange>,
    metrics: TestMetrics,
}

impl ChatSession {
    pub fn new(welcome: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            transcript: vec![welcome_entry(welcome)],
            state: SessionState::Idle,
            pending: None,
            metrics: TestMetrics::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn metrics(&self) -> TestMetrics {
        self.metrics
    }

    /// Records the user message. Empty input is rejected, and so is any
    /// message sent while a previous one still awaits its reply.
    pub fn begin(&mut self, text: &str, delay: Duration) -> Result<PendingExchange> {
        let message = text.trim();
        if message.is_empty() {
            return Err(AppError::ValidationError("Message is empty".to_string()));
        }
        if self.state == SessionState::AwaitingResponse {
            return Err(AppError::Busy(
                "The bot is still replying to the previous message".to_string(),
            ));
        }

        let exchange = PendingExchange {
            id: Uuid::new_v4(),
            message: message.to_string(),
            delay,
        };
        self.transcript.push(TranscriptEntry::user(message));
        self.state = SessionState::AwaitingResponse;
        self.pending = Some(exchange.clone());
        debug!(session_id = %self.id, exchange_id = %exchange.id, "Exchange started");
        Ok(exchange)
    }

    /// Appends the bot reply for `exchange_id`. Fails if the session was
    /// cleared in the meantime, in which case the reply is discarded.
    pub fn complete<R: Rng + ?Sized>(
        &mut self,
        exchange_id: Uuid,
        faqs: &[Faq],
        rng: &mut R,
    ) -> Result<ExchangeReply> {
        let exchange = match &self.pending {
            Some(pending) if pending.id == exchange_id => pending.clone(),
            _ => {
                return Err(AppError::NotFound(format!(
                    "Exchange {} is no longer pending",
                    exchange_id
                )))
            }
        };

        let result = match_faq(&exchange.message, faqs, rng);
        let reply = TranscriptEntry::bot(result.reply_text(), result.quick_replies().to_vec());
        self.transcript.push(reply.clone());
        self.metrics = sample_metrics(rng);
        self.pending = None;
        self.state = SessionState::Idle;

        let matched_faq_id = result.faq().map(|faq| faq.id);
        info!(
            session_id = %self.id,
            matched_faq_id = ?matched_faq_id,
            fallback = result.is_fallback(),
            "Exchange completed"
        );

        Ok(ExchangeReply {
            message: exchange.message,
            reply,
            matched_faq_id,
            fallback: matches!(result, MatchResult::Fallback { .. }),
            metrics: self.metrics,
        })
    }

    /// Back to a single welcome entry. Any in-flight reply is dropped.
    pub fn clear(&mut self, welcome: &str) {
        self.transcript = vec![welcome_entry(welcome)];
        self.pending = None;
        self.state = SessionState::Idle;
        self.metrics = TestMetrics::default();
        info!(session_id = %self.id, "Chat cleared");
    }
}

fn welcome_entry(welcome: &str) -> TranscriptEntry {
    let text = if welcome.trim().is_empty() {
        DEFAULT_WELCOME
    } else {
        welcome.trim()
    };
    TranscriptEntry::bot(text, Vec::new())
}

/// Uniform delay in `[min_ms, max_ms]`.
pub fn pick_delay<R: Rng + ?Sized>(rng: &mut R, min_ms: u64, max_ms: u64) -> Duration {
    if max_ms <= min_ms {
        return Duration::from_millis(min_ms);
    }
    Duration::from_millis(rng.gen_range(min_ms..=max_ms))
}

/// Mock quality figures; each uses its own draw.
pub fn sample_metrics<R: Rng + ?Sized>(rng: &mut R) -> TestMetrics {
    let accuracy = (65.0 + rng.gen::<f64>() * 30.0).min(100.0);
    let response_time = ((1.0 + rng.gen::<f64>() * 3.0) * 10.0).round() / 10.0;
    let handoff = (10.0 + rng.gen::<f64>() * 20.0).max(0.0);
    let satisfaction = (70.0 + rng.gen::<f64>() * 25.0).min(100.0);

    TestMetrics {
        accuracy_score: accuracy,
        response_time,
        handoff_rate: handoff,
        satisfaction_score: satisfaction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::faq::FaqInput;
    use crate::domain::transcript::Sender;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn faqs() -> Vec<Faq> {
        vec![Faq::from_input(
            1,
            FaqInput::new("What are your working hours?", "Nine to six.")
                .with_keywords(&["hours"])
                .with_quick_replies(&["Thank you"]),
        )]
    }

    #[test]
    fn test_new_session_has_welcome_entry() {
        let session = ChatSession::new("");
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].text, DEFAULT_WELCOME);
        assert_eq!(session.transcript()[0].sender, Sender::Bot);
        assert_eq!(session.state(), SessionState::Idle);

        let custom = ChatSession::new("  Welcome to Acme  ");
        assert_eq!(custom.transcript()[0].text, "Welcome to Acme");
    }

    #[test]
    fn test_exchange_round_trip() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = ChatSession::new("");
        let pending = session.begin("  hours?  ", Duration::ZERO).unwrap();
        assert_eq!(pending.message, "hours?");
        assert_eq!(session.state(), SessionState::AwaitingResponse);

        let reply = session.complete(pending.id, &faqs(), &mut rng).unwrap();
        assert_eq!(reply.matched_faq_id, Some(1));
        assert!(!reply.fallback);
        assert_eq!(reply.reply.text, "Nine to six.");
        assert_eq!(reply.reply.quick_replies, vec!["Thank you"]);
        assert!(session.metrics().has_run());
        assert_eq!(session.state(), SessionState::Idle);

        let senders: Vec<Sender> = session.transcript().iter().map(|e| e.sender).collect();
        assert_eq!(senders, vec![Sender::Bot, Sender::User, Sender::Bot]);
    }

    #[test]
    fn test_empty_message_rejected() {
        let mut session = ChatSession::new("");
        let err = session.begin("   ", Duration::ZERO).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn test_second_message_while_awaiting_is_rejected() {
        let mut session = ChatSession::new("");
        session.begin("first", Duration::ZERO).unwrap();
        let err = session.begin("second", Duration::ZERO).unwrap_err();
        assert!(matches!(err, AppError::Busy(_)));
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn test_clear_discards_in_flight_reply() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = ChatSession::new("");
        let pending = session.begin("hours", Duration::ZERO).unwrap();
        session.clear("");

        let err = session.complete(pending.id, &faqs(), &mut rng).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(session.transcript().len(), 1);
        assert!(!session.metrics().has_run());
    }

    #[test]
    fn test_replies_follow_submission_order() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = ChatSession::new("");
        for message in ["hours", "xyz", "working hours"] {
            let pending = session.begin(message, Duration::ZERO).unwrap();
            session.complete(pending.id, &faqs(), &mut rng).unwrap();
        }
        let users: Vec<&str> = session
            .transcript()
            .iter()
            .filter(|e| e.sender == Sender::User)
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(users, vec!["hours", "xyz", "working hours"]);
        assert_eq!(session.transcript().len(), 7);
    }

    #[test]
    fn test_sample_metrics_ranges() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let metrics = sample_metrics(&mut rng);
            assert!((65.0..=95.0).contains(&metrics.accuracy_score));
            assert!((1.0..=4.0).contains(&metrics.response_time));
            assert!((10.0..=30.0).contains(&metrics.handoff_rate));
            assert!((70.0..=95.0).contains(&metrics.satisfaction_score));
        }
    }

    #[test]
    fn test_pick_delay_bounds() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let delay = pick_delay(&mut rng, 1000, 3000);
            assert!(delay >= Duration::from_millis(1000) && delay <= Duration::from_millis(3000));
        }
        assert_eq!(pick_delay(&mut rng, 0, 0), Duration::ZERO);
    }
}
