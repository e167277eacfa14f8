use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shared::text::is_blank;

static NON_DIGIT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").unwrap());

const COUNTRY_CODE: &str = "234";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStyle {
    #[default]
    Professional,
    Friendly,
    Casual,
    Formal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "en-ng")]
    EnNg,
    #[serde(rename = "pidgin")]
    Pidgin,
    #[serde(rename = "yoruba")]
    Yoruba,
    #[serde(rename = "igbo")]
    Igbo,
    #[serde(rename = "hausa")]
    Hausa,
}

impl Language {
    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::EnNg => "Nigerian English",
            Language::Pidgin => "Nigerian Pidgin",
            Language::Yoruba => "Yoruba",
            Language::Igbo => "Igbo",
            Language::Hausa => "Hausa",
        }
    }
}

/// Descriptive bot settings edited field by field from the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct BotConfig {
    pub name: String,
    pub business_name: String,
    pub phone_number: String,
    pub welcome_message: String,
    pub fallback_message: String,
    pub response_style: ResponseStyle,
    pub language: Language,
    /// Seconds.
    #[validate(range(min = 0.0, max = 10.0, message = "Response delay must be between 0 and 10 seconds"))]
    pub response_delay: f64,
    /// Cosmetic: the matcher never consults it.
    #[validate(range(max = 100, message = "Confidence threshold must be between 0 and 100"))]
    pub confidence_threshold: u8,
    pub enable_emojis: bool,
    pub enable_typing: bool,
    pub enable_quick_replies: bool,
    pub enable_human_handoff: bool,
    pub enable_analytics: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            business_name: String::new(),
            phone_number: String::new(),
            welcome_message: String::new(),
            fallback_message: String::new(),
            response_style: ResponseStyle::Professional,
            language: Language::En,
            response_delay: 1.0,
            confidence_threshold: 75,
            enable_emojis: true,
            enable_typing: true,
            enable_quick_replies: true,
            enable_human_handoff: true,
            enable_analytics: true,
        }
    }
}

impl BotConfig {
    pub fn has_name(&self) -> bool {
        !is_blank(&self.name)
    }

    pub fn has_business_name(&self) -> bool {
        !is_blank(&self.business_name)
    }

    pub fn has_phone_number(&self) -> bool {
        !is_blank(&self.phone_number)
    }

    /// Bot name, then business name, then a placeholder.
    pub fn display_name(&self) -> String {
        if self.has_name() {
            self.name.trim().to_string()
        } else if self.has_business_name() {
            self.business_name.trim().to_string()
        } else {
            "Unnamed Bot".to_string()
        }
    }

    pub fn normalized(mut self) -> Self {
        self.phone_number = format_phone_number(&self.phone_number);
        self
    }
}

/// Field-level change coming from the console form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfigPatch {
    pub name: Option<String>,
    pub business_name: Option<String>,
    pub phone_number: Option<String>,
    pub welcome_message: Option<String>,
    pub fallback_message: Option<String>,
    pub response_style: Option<ResponseStyle>,
    pub language: Option<Language>,
    pub response_delay: Option<f64>,
    pub confidence_threshold: Option<u8>,
    pub enable_emojis: Option<bool>,
    pub enable_typing: Option<bool>,
    pub enable_quick_replies: Option<bool>,
    pub enable_human_handoff: Option<bool>,
    pub enable_analytics: Option<bool>,
}

impl BotConfigPatch {
    pub fn apply_to(self, config: &BotConfig) -> BotConfig {
        let mut next = config.clone();
        if let Some(value) = self.name {
            next.name = value;
        }
        if let Some(value) = self.business_name {
            next.business_name = value;
        }
        if let Some(value) = self.phone_number {
            next.phone_number = value;
        }
        if let Some(value) = self.welcome_message {
            next.welcome_message = value;
        }
        if let Some(value) = self.fallback_message {
            next.fallback_message = value;
        }
        if let Some(value) = self.response_style {
            next.response_style = value;
        }
        if let Some(value) = self.language {
            next.language = value;
        }
        if let Some(value) = self.response_delay {
            next.response_delay = value;
        }
        if let Some(value) = self.confidence_threshold {
            next.confidence_threshold = value;
        }
        if let Some(value) = self.enable_emojis {
            next.enable_emojis = value;
        }
        if let Some(value) = self.enable_typing {
            next.enable_typing = value;
        }
        if let Some(value) = self.enable_quick_replies {
            next.enable_quick_replies = value;
        }
        if let Some(value) = self.enable_human_handoff {
            next.enable_human_handoff = value;
        }
        if let Some(value) = self.enable_analytics {
            next.enable_analytics = value;
        }
        next
    }
}

/// Normalizes a phone number to `234 XXX XXXX XXX`.
///
/// Non-digits are dropped, the Nigerian country code is prefixed when
/// missing and anything past thirteen digits is cut off.
pub fn format_phone_number(raw: &str) -> String {
    let mut digits = NON_DIGIT_PATTERN.replace_all(raw, "").to_string();
    if digits.is_empty() {
        return digits;
    }
    if !digits.starts_with(COUNTRY_CODE) {
        digits = format!("{}{}", COUNTRY_CODE, digits);
    }

    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("{} {}", &digits[..3], &digits[3..]),
        7..=10 => format!("{} {} {}", &digits[..3], &digits[3..6], &digits[6..]),
        len => format!(
            "{} {} {} {}",
            &digits[..3],
            &digits[3..6],
            &digits[6..10],
            &digits[10..len.min(13)]
        ),
    }
}
