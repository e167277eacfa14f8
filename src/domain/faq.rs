use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::shared::text::clean_labels;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaqCategory {
    #[default]
    General,
    Products,
    Pricing,
    Shipping,
    Returns,
    Support,
}

impl FaqCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaqCategory::General => "general",
            FaqCategory::Products => "products",
            FaqCategory::Pricing => "pricing",
            FaqCategory::Shipping => "shipping",
            FaqCategory::Returns => "returns",
            FaqCategory::Support => "support",
        }
    }
}

impl fmt::Display for FaqCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FaqCategory {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "general" => Ok(FaqCategory::General),
            "products" => Ok(FaqCategory::Products),
            "pricing" => Ok(FaqCategory::Pricing),
            "shipping" => Ok(FaqCategory::Shipping),
            "returns" => Ok(FaqCategory::Returns),
            "support" => Ok(FaqCategory::Support),
            other => Err(format!("Unknown FAQ category: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaqStatus {
    #[default]
    Active,
    Inactive,
}

/// A stored question/answer pair with its matching keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: FaqCategory,
    pub keywords: Vec<String>,
    pub status: FaqStatus,
    #[serde(default)]
    pub quick_replies: Vec<String>,
}

impl Faq {
    pub fn from_input(id: i64, input: FaqInput) -> Self {
        Self {
            id,
            question: input.question,
            answer: input.answer,
            category: input.category,
            keywords: input.keywords,
            status: input.status,
            quick_replies: input.quick_replies,
        }
    }

    /// Case-insensitive containment over question, answer and keywords.
    /// `term_lower` must already be lowercased.
    pub fn mentions(&self, term_lower: &str) -> bool {
        self.question.to_lowercase().contains(term_lower)
            || self.answer.to_lowercase().contains(term_lower)
            || self
                .keywords
                .iter()
                .any(|keyword| keyword.to_lowercase().contains(term_lower))
    }
}

/// Operator-supplied FAQ fields, validated before they reach the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FaqInput {
    #[validate(length(min = 1, message = "Question is required"))]
    pub question: String,
    #[validate(length(min = 1, message = "Answer is required"))]
    pub answer: String,
    #[serde(default)]
    pub category: FaqCategory,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub status: FaqStatus,
    #[serde(default)]
    pub quick_replies: Vec<String>,
}

impl FaqInput {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: FaqCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_keywords<S: AsRef<str>>(mut self, keywords: &[S]) -> Self {
        self.keywords = clean_labels(keywords);
        self
    }

    pub fn with_status(mut self, status: FaqStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_quick_replies<S: AsRef<str>>(mut self, replies: &[S]) -> Self {
        self.quick_replies = clean_labels(replies);
        self
    }

    /// Trims text fields and drops blank keywords and quick replies.
    pub fn normalized(self) -> Self {
        Self {
            question: self.question.trim().to_string(),
            answer: self.answer.trim().to_string(),
            category: self.category,
            keywords: clean_labels(&self.keywords),
            status: self.status,
            quick_replies: clean_labels(&self.quick_replies),
        }
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<FaqCategory>,
    pub keywords: Option<Vec<String>>,
    pub status: Option<FaqStatus>,
    pub quick_replies: Option<Vec<String>>,
}

impl FaqPatch {
    /// Produces the input that results from applying this patch to `faq`.
    pub fn apply_to(self, faq: &Faq) -> FaqInput {
        FaqInput {
            question: self.question.unwrap_or_else(|| faq.question.clone()),
            answer: self.answer.unwrap_or_else(|| faq.answer.clone()),
            category: self.category.unwrap_or(faq.category),
            keywords: self.keywords.unwrap_or_else(|| faq.keywords.clone()),
            status: self.status.unwrap_or(faq.status),
            quick_replies: self
                .quick_replies
                .unwrap_or_else(|| faq.quick_replies.clone()),
        }
    }
}

/// Optional category and status predicates; `None` means "any".
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FaqFilter {
    pub category: Option<FaqCategory>,
    pub status: Option<FaqStatus>,
}

impl FaqFilter {
    pub fn accepts(&self, faq: &Faq) -> bool {
        self.category.map_or(true, |category| faq.category == category)
            && self.status.map_or(true, |status| faq.status == status)
    }
}
