pub mod bot_config;
pub mod deployment;
pub mod error;
pub mod faq;
pub mod template;
pub mod transcript;
