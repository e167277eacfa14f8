pub mod bot_console;
pub mod chat_simulator;
pub mod console_service;
pub mod faq_matcher;
pub mod faq_store;
pub mod faq_transfer;
pub mod readiness_scorer;
pub mod sample_data;
pub mod template_store;
