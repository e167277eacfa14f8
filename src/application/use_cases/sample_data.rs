use crate::domain::faq::{FaqCategory, FaqInput};
use crate::domain::template::{MessageTemplate, TemplateCategory};

/// Demo FAQs loaded into a fresh console.
pub fn sample_faqs() -> Vec<FaqInput> {
    vec![
        FaqInput::new(
            "What are your working hours?",
            "We're open Monday to Friday, 9 AM to 6 PM. We're closed on weekends and public holidays.",
        )
        .with_keywords(&["hours", "timing", "schedule", "open", "close"])
        .with_quick_replies(&["Thank you", "More questions", "Contact support"]),
        FaqInput::new(
            "How can I place an order?",
            "You can place an order through our website, mobile app, or by calling our hotline. We accept payments via card, bank transfer, and mobile money.",
        )
        .with_category(FaqCategory::Products)
        .with_keywords(&["order", "buy", "purchase", "payment"])
        .with_quick_replies(&["Website link", "Call support", "Other payment methods"]),
        FaqInput::new(
            "What payment methods do you accept?",
            "We accept Visa, Mastercard, American Express, bank transfers, and popular mobile money services like PayPal, Apple Pay, and Google Pay.",
        )
        .with_category(FaqCategory::Pricing)
        .with_keywords(&["payment", "card", "money", "transfer"])
        .with_quick_replies(&["Card details", "Mobile money", "Bank info"]),
        FaqInput::new(
            "How long does delivery take?",
            "Standard delivery takes 3-5 business days. Express delivery (available in major cities) takes 1-2 business days. International shipping takes 7-14 days.",
        )
        .with_category(FaqCategory::Shipping)
        .with_keywords(&["delivery", "shipping", "time", "arrival"])
        .with_quick_replies(&["Track order", "Express delivery", "International rates"]),
        FaqInput::new(
            "What's your return policy?",
            "We offer a 30-day return policy for unused items in original packaging. Digital products have a 7-day return window. Please contact our support team to initiate a return.",
        )
        .with_category(FaqCategory::Returns)
        .with_keywords(&["return", "refund", "exchange", "policy"])
        .with_quick_replies(&["Start return", "Refund status", "Exchange options"]),
    ]
}

/// Demo WhatsApp templates loaded into a fresh console.
pub fn sample_templates() -> Vec<MessageTemplate> {
    vec![
        MessageTemplate::new(
            "welcome_message",
            TemplateCategory::Utility,
            "Hello {{1}}, welcome to {{2}}! How can we help you today?",
            &["Shop now", "Track order", "Contact support"],
        ),
        MessageTemplate::new(
            "order_confirmation",
            TemplateCategory::Utility,
            "Your order {{1}} has been confirmed! Total: {{2}}. Estimated delivery: {{3}}",
            &["Track order", "Modify order", "Customer service"],
        ),
        MessageTemplate::new(
            "appointment_reminder",
            TemplateCategory::Utility,
            "Reminder: You have an appointment with {{1}} on {{2}} at {{3}}",
            &["Confirm", "Reschedule", "Cancel"],
        ),
    ]
}
