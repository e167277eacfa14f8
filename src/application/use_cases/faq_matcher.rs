//! FAQ matcher for the chat simulator.
//!
//! Deliberately naive: lowercase substring containment, first FAQ in storage
//! order wins. No ranking and no confidence score; the configured
//! confidence threshold is not consulted here.
//!
//! Keywords are compared lowercased, so a stored `Card` matches "card".

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::faq::Faq;

pub const FALLBACK_RESPONSES: [&str; 4] = [
    "I'm not sure how to help with that. Can you try asking in a different way?",
    "I don't have information about that. Would you like me to connect you with a human agent?",
    "That's an interesting question! Let me find someone who can better assist you.",
    "I'm still learning! For this specific question, I'll need to connect you with our support team.",
];

pub const FALLBACK_QUICK_REPLIES: [&str; 3] = ["Contact support", "Try again", "Main menu"];

/// Why a FAQ was picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum MatchReason {
    /// The question text contains the input.
    Question,
    /// The input contains this keyword.
    Keyword(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchResult {
    Matched {
        faq: Faq,
        reason: MatchReason,
    },
    Fallback {
        text: String,
        #[serde(rename = "quickReplies")]
        quick_replies: Vec<String>,
    },
}

impl MatchResult {
    pub fn reply_text(&self) -> &str {
        match self {
            MatchResult::Matched { faq, .. } => &faq.answer,
            MatchResult::Fallback { text, .. } => text,
        }
    }

    pub fn quick_replies(&self) -> &[String] {
        match self {
            MatchResult::Matched { faq, .. } => &faq.quick_replies,
            MatchResult::Fallback { quick_replies, .. } => quick_replies,
        }
    }

    pub fn faq(&self) -> Option<&Faq> {
        match self {
            MatchResult::Matched { faq, .. } => Some(faq),
            MatchResult::Fallback { .. } => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, MatchResult::Fallback { .. })
    }
}

/// Returns the first FAQ whose lowercased question contains the lowercased
/// input, or whose keyword is contained in it; otherwise a random fallback.
pub fn match_faq<R: Rng + ?Sized>(input: &str, faqs: &[Faq], rng: &mut R) -> MatchResult {
    let normalized = input.to_lowercase();

    for faq in faqs {
        if let Some(reason) = candidate_reason(&normalized, faq) {
            return MatchResult::Matched {
                faq: faq.clone(),
                reason,
            };
        }
    }

    fallback(rng)
}

fn candidate_reason(normalized: &str, faq: &Faq) -> Option<MatchReason> {
    if faq.question.to_lowercase().contains(normalized) {
        return Some(MatchReason::Question);
    }

    // Blank keywords would match every input.
    faq.keywords
        .iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .find(|keyword| !keyword.is_empty() && normalized.contains(keyword.as_str()))
        .map(MatchReason::Keyword)
}

fn fallback<R: Rng + ?Sized>(rng: &mut R) -> MatchResult {
    let text = FALLBACK_RESPONSES
        .choose(rng)
        .unwrap_or(&FALLBACK_RESPONSES[0]);

    MatchResult::Fallback {
        text: text.to_string(),
        quick_replies: FALLBACK_QUICK_REPLIES
            .iter()
            .map(|reply| reply.to_string())
            .collect(),
    }
}
