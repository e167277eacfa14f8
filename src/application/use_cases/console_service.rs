use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex as AsyncMutex, MutexGuard};
use tracing::{error, info, warn};

use super::bot_console::BotConsole;
use super::chat_simulator::ExchangeReply;
use super::faq_transfer::{ExportFile, ImportFormat, ImportReport};
use crate::domain::deployment::DeploymentSummary;
use crate::domain::error::{AppError, Result};
use crate::domain::transcript::TestSuite;
use crate::infrastructure::storage;
use crate::infrastructure::whatsapp::{ConnectivityProbe, ProbeOutcome};

/// One message of a test suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SuiteStep {
    Replied { reply: ExchangeReply },
    Skipped { message: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    Faqs,
    Config,
}

/// Async front of the console. The console lock is never held across a
/// simulated delay.
pub struct ConsoleService {
    console: Arc<AsyncMutex<BotConsole>>,
    probe: Arc<dyn ConnectivityProbe + Send + Sync>,
    deploy_delay: Duration,
    export_dir: PathBuf,
}

impl ConsoleService {
    pub fn new(
        console: BotConsole,
        probe: Arc<dyn ConnectivityProbe + Send + Sync>,
        deploy_delay: Duration,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            console: Arc::new(AsyncMutex::new(console)),
            probe,
            deploy_delay,
            export_dir,
        }
    }

    /// Direct access for the synchronous console operations.
    pub async fn console(&self) -> MutexGuard<'_, BotConsole> {
        self.console.lock().await
    }

    /// Records the user message, waits the typing delay, then answers.
    ///
    /// The reply runs on its own task, so the exchange still completes when
    /// the caller stops waiting for it.
    pub async fn send_message(&self, text: &str) -> Result<ExchangeReply> {
        let pending = self.console.lock().await.begin_exchange(text)?;

        let console = Arc::clone(&self.console);
        let reply = tokio::spawn(async move {
            tokio::time::sleep(pending.delay).await;
            let reply = console.lock().await.complete_exchange(pending.id);
            reply
        });

        reply.await.map_err(|e| {
            error!(error = %e, "Reply task failed");
            AppError::Internal(format!("Reply task failed: {}", e))
        })?
    }

    /// Quick-reply taps go through the same path as typed messages.
    pub async fn send_quick_reply(&self, reply: &str) -> Result<ExchangeReply> {
        self.send_message(reply).await
    }

    /// Sends every message of `suite` one after another. Empty messages are
    /// reported as skipped instead of aborting the run.
    pub async fn run_suite(&self, suite: TestSuite) -> Result<Vec<SuiteStep>> {
        let mut steps = Vec::new();
        for message in suite.messages() {
            match self.send_message(&message).await {
                Ok(reply) => steps.push(SuiteStep::Replied { reply }),
                Err(AppError::ValidationError(reason)) => {
                    warn!(reason = %reason, "Suite message skipped");
                    steps.push(SuiteStep::Skipped { message, reason });
                }
                Err(e) => return Err(e),
            }
        }
        info!(suite = ?suite, steps = steps.len(), "Test suite finished");
        Ok(steps)
    }

    pub async fn check_api(&self) -> Result<ProbeOutcome> {
        let outcome = self.probe.check().await?;
        self.console.lock().await.set_api_connected(outcome.connected);
        Ok(outcome)
    }

    /// Simulated deployment, refused below the minimum readiness score.
    pub async fn deploy(&self) -> Result<DeploymentSummary> {
        let score = self.console.lock().await.ensure_deployable()?;
        info!(score, "Deployment started");

        tokio::time::sleep(self.deploy_delay).await;

        let mut console = self.console.lock().await;
        console.mark_deployed();
        let summary = console.summary();
        info!(bot = %summary.bot_name, "Bot deployed");
        Ok(summary)
    }

    pub async fn import_faqs(&self, bytes: &[u8], format: ImportFormat) -> Result<ImportReport> {
        self.console.lock().await.import_faqs(bytes, format)
    }

    /// Imports from a file on disk; the format follows the file extension.
    pub async fn import_faqs_from_path(&self, path: &Path) -> Result<ImportReport> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        let format = ImportFormat::from_filename(filename).ok_or_else(|| {
            AppError::ValidationError(format!("Unsupported import file: {}", path.display()))
        })?;

        let bytes = storage::read_import_file(path)?;
        self.import_faqs(&bytes, format).await
    }

    pub async fn export(&self, kind: ExportKind) -> Result<ExportFile> {
        let now = Utc::now();
        let console = self.console.lock().await;
        match kind {
            ExportKind::Faqs => console.export_faqs(now.date_naive()),
            ExportKind::Config => console.export_config(now),
        }
    }

    /// Writes an export into the configured export directory.
    pub async fn save_export(&self, kind: ExportKind) -> Result<PathBuf> {
        let file = self.export(kind).await?;
        storage::write_export_file(&self.export_dir, &file.filename, &file.content).map_err(|e| {
            error!(error = %e, "Failed to save export");
            e
        })
    }
}
