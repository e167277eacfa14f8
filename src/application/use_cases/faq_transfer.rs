//! FAQ import and export.
//!
//! Imports are all-or-nothing per file: the whole payload is parsed and
//! converted before anything touches the store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use super::faq_store::FaqStore;
use crate::domain::bot_config::BotConfig;
use crate::domain::error::{AppError, Result};
use crate::domain::faq::{Faq, FaqCategory, FaqStatus};
use crate::domain::template::MessageTemplate;
use crate::infrastructure::csv::{CsvParser, FaqCsvRow};
use crate::shared::text::{clean_labels, is_blank, split_labels};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportFormat {
    Json,
    Csv,
}

impl ImportFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".json") {
            Some(ImportFormat::Json)
        } else if lower.ends_with(".csv") {
            Some(ImportFormat::Csv)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub format: ImportFormat,
    /// Records or rows read from the file.
    pub parsed: usize,
    /// Dropped for missing question or answer.
    pub dropped: usize,
    pub added: usize,
    pub skipped_duplicates: usize,
    pub reassigned_ids: usize,
}

/// A serialized snapshot ready to be downloaded or written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub filename: String,
    pub content: String,
}

/// Full-config export: the bot settings with FAQs and templates nested in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    #[serde(flatten)]
    pub config: BotConfig,
    pub faqs: Vec<Faq>,
    pub templates: Vec<MessageTemplate>,
    pub export_date: DateTime<Utc>,
}

/// Lenient shape for imported JSON records; only question and answer
/// are needed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedFaq {
    id: Option<i64>,
    #[serde(default)]
    question: String,
    #[serde(default)]
    answer: String,
    #[serde(default, deserialize_with = "lenient_category")]
    category: FaqCategory,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    status: FaqStatus,
    #[serde(default)]
    quick_replies: Vec<String>,
}

/// Unknown or non-string categories fall back to `general`, as in CSV rows.
fn lenient_category<'de, D>(deserializer: D) -> std::result::Result<FaqCategory, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|category| category.parse().ok())
        .unwrap_or_default())
}

/// Decodes raw upload bytes; anything that is not UTF-8 is read as
/// Windows-1252.
pub fn decode_import(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(content) => content.to_string(),
        Err(_) => {
            let (content, _, had_errors) = encoding_rs::WINDOWS_1252.decode(bytes);
            if had_errors {
                warn!("Import contained bytes outside Windows-1252");
            }
            content.into_owned()
        }
    }
}

/// Parses `content` and merges the valid records into `store`.
/// On a parse error the store is left exactly as it was.
pub fn import_faqs(store: &mut FaqStore, content: &str, format: ImportFormat) -> Result<ImportReport> {
    let (parsed, records) = match format {
        ImportFormat::Json => parse_json(content)?,
        ImportFormat::Csv => parse_csv(content)?,
    };
    let dropped = parsed - records.len();

    let with_ids: Vec<Faq> = records
        .into_iter()
        .map(|(id, mut faq)| {
            faq.id = id.unwrap_or_else(|| store.next_id());
            faq
        })
        .collect();

    let merge = store.merge(with_ids);
    let report = ImportReport {
        format,
        parsed,
        dropped,
        added: merge.added,
        skipped_duplicates: merge.skipped_duplicates,
        reassigned_ids: merge.reassigned_ids,
    };
    info!(
        format = ?format,
        parsed = report.parsed,
        dropped = report.dropped,
        added = report.added,
        "FAQ import finished"
    );
    Ok(report)
}

fn parse_json(content: &str) -> Result<(usize, Vec<(Option<i64>, Faq)>)> {
    let imported: Vec<ImportedFaq> = serde_json::from_str(content)
        .map_err(|e| AppError::ParseError(format!("Invalid FAQ JSON: {}", e)))?;
    let parsed = imported.len();

    let records = imported
        .into_iter()
        .filter(|record| !is_blank(&record.question) && !is_blank(&record.answer))
        .map(|record| {
            let faq = Faq {
                id: 0,
                question: record.question.trim().to_string(),
                answer: record.answer.trim().to_string(),
                category: record.category,
                keywords: clean_labels(&record.keywords),
                status: record.status,
                quick_replies: clean_labels(&record.quick_replies),
            };
            (record.id, faq)
        })
        .collect();

    Ok((parsed, records))
}

fn parse_csv(content: &str) -> Result<(usize, Vec<(Option<i64>, Faq)>)> {
    let rows = CsvParser::new().parse_content(content)?;
    let parsed = rows.len();

    let records = rows
        .into_iter()
        .filter(|row| !is_blank(&row.question) && !is_blank(&row.answer))
        .map(|row| (None, faq_from_row(row)))
        .collect();

    Ok((parsed, records))
}

fn faq_from_row(row: FaqCsvRow) -> Faq {
    Faq {
        id: 0,
        question: row.question,
        answer: row.answer,
        category: row.category.parse().unwrap_or_default(),
        keywords: split_labels(&row.keywords, ';'),
        status: FaqStatus::Active,
        quick_replies: Vec::new(),
    }
}

/// `faqs-YYYY-MM-DD.json`, pretty JSON with 2-space indentation.
pub fn export_faqs(faqs: &[Faq], date: NaiveDate) -> Result<ExportFile> {
    let content = serde_json::to_string_pretty(faqs)
        .map_err(|e| AppError::Internal(format!("Failed to serialize FAQs: {}", e)))?;
    Ok(ExportFile {
        filename: format!("faqs-{}.json", date.format("%Y-%m-%d")),
        content,
    })
}

/// `bot-config-YYYY-MM-DD.json` with FAQs, templates and the export time.
pub fn export_config(
    config: &BotConfig,
    faqs: &[Faq],
    templates: &[MessageTemplate],
    now: DateTime<Utc>,
) -> Result<ExportFile> {
    let snapshot = ConfigSnapshot {
        config: config.clone(),
        faqs: faqs.to_vec(),
        templates: templates.to_vec(),
        export_date: now,
    };
    let content = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| AppError::Internal(format!("Failed to serialize bot config: {}", e)))?;
    Ok(ExportFile {
        filename: format!("bot-config-{}.json", now.format("%Y-%m-%d")),
        content,
    })
}
