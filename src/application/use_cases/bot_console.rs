//! The single session context: every store, the bot settings, the chat
//! transcript and the RNG live here and are only reached through it.

use chrono::{DateTime, NaiveDate, Utc};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::chat_simulator::{pick_delay, ChatSession, ExchangeReply, PendingExchange};
use super::faq_store::FaqStore;
use super::faq_transfer::{self, ExportFile, ImportFormat, ImportReport};
use super::readiness_scorer::readiness_score;
use super::sample_data::{sample_faqs, sample_templates};
use super::template_store::TemplateStore;
use crate::domain::bot_config::{BotConfig, BotConfigPatch};
use crate::domain::deployment::{DeploymentSummary, ReadinessLevel, DEPLOY_MIN_SCORE};
use crate::domain::error::{AppError, Result};
use crate::domain::faq::{Faq, FaqCategory, FaqFilter, FaqInput, FaqPatch, FaqStatus};
use crate::domain::template::{MessageTemplate, TemplatePreview};
use crate::domain::transcript::{TestMetrics, TranscriptEntry};
use crate::infrastructure::config::SimulatorConfig;

/// List query: category/status filter plus an optional search term.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaqQuery {
    pub search: Option<String>,
    pub category: Option<FaqCategory>,
    pub status: Option<FaqStatus>,
}

pub struct BotConsole {
    config: BotConfig,
    faqs: FaqStore,
    templates: TemplateStore,
    session: ChatSession,
    api_connected: bool,
    deployed: bool,
    simulator: SimulatorConfig,
    rng: StdRng,
}

impl BotConsole {
    pub fn new(simulator: SimulatorConfig, rng: StdRng) -> Self {
        let config = BotConfig::default();
        let session = ChatSession::new(&config.welcome_message);
        Self {
            config,
            faqs: FaqStore::new(),
            templates: TemplateStore::new(),
            session,
            api_connected: false,
            deployed: false,
            simulator,
            rng,
        }
    }

    pub fn load_sample_data(&mut self) -> Result<()> {
        for faq in sample_faqs() {
            self.faqs.add(faq)?;
        }
        for template in sample_templates() {
            self.templates.upsert(template)?;
        }
        info!(
            faqs = self.faqs.len(),
            templates = self.templates.len(),
            "Sample data loaded"
        );
        Ok(())
    }

    // ---- bot settings ----

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn replace_config(&mut self, config: BotConfig) -> Result<BotConfig> {
        let config = config.normalized();
        config.validate()?;
        self.config = config.clone();
        info!(bot = %self.config.display_name(), "Bot configuration saved");
        Ok(config)
    }

    pub fn patch_config(&mut self, patch: BotConfigPatch) -> Result<BotConfig> {
        let next = patch.apply_to(&self.config);
        self.replace_config(next)
    }

    // ---- FAQs ----

    pub fn faqs(&self) -> &FaqStore {
        &self.faqs
    }

    pub fn add_faq(&mut self, input: FaqInput) -> Result<Faq> {
        self.faqs.add(input)
    }

    pub fn update_faq(&mut self, id: i64, patch: FaqPatch) -> Result<Faq> {
        self.faqs.update(id, patch)
    }

    pub fn remove_faq(&mut self, id: i64) -> bool {
        self.faqs.remove(id)
    }

    pub fn find_faq(&self, id: i64) -> Result<Faq> {
        self.faqs
            .find(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("FAQ {}", id)))
    }

    pub fn list_faqs(&self, query: &FaqQuery) -> Vec<Faq> {
        let filtered = self.faqs.filter(&FaqFilter {
            category: query.category,
            status: query.status,
        });

        match query.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                filtered
                    .into_iter()
                    .filter(|faq| faq.mentions(&term))
                    .collect()
            }
            _ => filtered,
        }
    }

    // ---- templates ----

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn save_template(&mut self, template: MessageTemplate) -> Result<MessageTemplate> {
        self.templates.upsert(template)
    }

    pub fn remove_template(&mut self, name: &str) -> bool {
        self.templates.remove(name)
    }

    pub fn template(&self, name: &str) -> Result<MessageTemplate> {
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Template {}", name)))
    }

    pub fn template_preview(&self, name: &str) -> Result<TemplatePreview> {
        self.template(name).map(|template| template.preview())
    }

    // ---- chat simulator ----

    pub fn transcript(&self) -> &[TranscriptEntry] {
        self.session.transcript()
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn metrics(&self) -> TestMetrics {
        self.session.metrics()
    }

    pub fn begin_exchange(&mut self, text: &str) -> Result<PendingExchange> {
        let delay = pick_delay(
            &mut self.rng,
            self.simulator.min_delay_ms,
            self.simulator.max_delay_ms,
        );
        self.session.begin(text, delay)
    }

    pub fn complete_exchange(&mut self, exchange_id: Uuid) -> Result<ExchangeReply> {
        self.session
            .complete(exchange_id, self.faqs.all(), &mut self.rng)
    }

    pub fn clear_chat(&mut self) {
        self.session.clear(&self.config.welcome_message);
    }

    // ---- connectivity & readiness ----

    pub fn api_connected(&self) -> bool {
        self.api_connected
    }

    pub fn set_api_connected(&mut self, connected: bool) {
        self.api_connected = connected;
    }

    pub fn readiness_score(&self) -> u8 {
        readiness_score(
            &self.config,
            self.faqs.len(),
            self.templates.len(),
            self.api_connected,
            self.session.metrics().has_run(),
        )
    }

    pub fn summary(&self) -> DeploymentSummary {
        let score = self.readiness_score();
        DeploymentSummary {
            bot_name: self.config.display_name(),
            faq_count: self.faqs.len(),
            template_count: self.templates.len(),
            language: self.config.language.label().to_string(),
            api_connected: self.api_connected,
            score,
            level: ReadinessLevel::from_score(score),
            deployed: self.deployed,
        }
    }

    /// Refuses while the readiness score is under the deploy minimum.
    pub fn ensure_deployable(&self) -> Result<u8> {
        let score = self.readiness_score();
        if score < DEPLOY_MIN_SCORE {
            return Err(AppError::ValidationError(format!(
                "Your bot is not ready for deployment. Current score: {}%. Please complete the configuration.",
                score
            )));
        }
        Ok(score)
    }

    pub fn mark_deployed(&mut self) {
        self.deployed = true;
    }

    // ---- import / export ----

    pub fn import_faqs(&mut self, bytes: &[u8], format: ImportFormat) -> Result<ImportReport> {
        let content = faq_transfer::decode_import(bytes);
        faq_transfer::import_faqs(&mut self.faqs, &content, format)
    }

    pub fn export_faqs(&self, date: NaiveDate) -> Result<ExportFile> {
        faq_transfer::export_faqs(self.faqs.all(), date)
    }

    pub fn export_config(&self, now: DateTime<Utc>) -> Result<ExportFile> {
        faq_transfer::export_config(&self.config, self.faqs.all(), self.templates.list(), now)
    }
}
