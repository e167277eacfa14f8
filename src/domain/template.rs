use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shared::text::clean_labels;

static PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(\d+)\}\}").unwrap());

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    #[default]
    Utility,
    Marketing,
    Authentication,
}

/// Reusable WhatsApp message pattern. Placeholders (`{{1}}`, `{{2}}`, ...)
/// are kept verbatim; nothing interpolates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplate {
    #[validate(length(min = 1, message = "Template name is required"))]
    pub name: String,
    #[serde(default)]
    pub category: TemplateCategory,
    #[validate(length(min = 1, message = "Template content is required"))]
    pub content: String,
    #[serde(default)]
    pub quick_replies: Vec<String>,
}

impl MessageTemplate {
    pub fn new(
        name: impl Into<String>,
        category: TemplateCategory,
        content: impl Into<String>,
        quick_replies: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            category,
            content: content.into(),
            quick_replies: clean_labels(quick_replies),
        }
    }

    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            category: self.category,
            content: self.content.trim().to_string(),
            quick_replies: clean_labels(&self.quick_replies),
        }
    }

    /// Distinct positional placeholders in order of first appearance.
    pub fn placeholders(&self) -> Vec<u32> {
        let mut seen = Vec::new();
        for capture in PLACEHOLDER_PATTERN.captures_iter(&self.content) {
            if let Ok(position) = capture[1].parse::<u32>() {
                if !seen.contains(&position) {
                    seen.push(position);
                }
            }
        }
        seen
    }

    pub fn preview(&self) -> TemplatePreview {
        TemplatePreview {
            name: self.name.clone(),
            content: self.content.clone(),
            placeholders: self.placeholders(),
            quick_replies: self.quick_replies.clone(),
        }
    }
}

/// What the operator sees for a template: literal text, markers and replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePreview {
    pub name: String,
    pub content: String,
    pub placeholders: Vec<u32>,
    pub quick_replies: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_in_order_without_duplicates() {
        let template = MessageTemplate::new(
            "order_confirmation",
            TemplateCategory::Utility,
            "Order {{2}} for {{1}}: {{2}} ({{10}})",
            &[],
        );
        assert_eq!(template.placeholders(), vec![2, 1, 10]);
    }

    #[test]
    fn test_preview_keeps_content_verbatim() {
        let template = MessageTemplate::new(
            "welcome_message",
            TemplateCategory::Utility,
            "Hello {{1}}, welcome to {{2}}!",
            &["Shop now", " "],
        );
        let preview = template.preview();
        assert_eq!(preview.content, "Hello {{1}}, welcome to {{2}}!");
        assert_eq!(preview.quick_replies, vec!["Shop now"]);
    }

    #[test]
    fn test_validation_rejects_blank_name_after_normalizing() {
        let template =
            MessageTemplate::new("   ", TemplateCategory::Marketing, "Hi", &[]).normalized();
        assert!(template.validate().is_err());
    }
}
