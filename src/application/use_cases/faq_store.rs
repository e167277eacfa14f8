use tracing::{debug, info};
use validator::Validate;

use crate::domain::error::{AppError, Result};
use crate::domain::faq::{Faq, FaqFilter, FaqInput, FaqPatch};

/// Ordered in-memory FAQ list. Storage order is insertion order and is the
/// order the matcher scans.
#[derive(Debug, Default, Clone)]
pub struct FaqStore {
    faqs: Vec<Faq>,
    last_id: i64,
}

/// Outcome of merging imported records into the store.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeReport {
    pub added: usize,
    pub skipped_duplicates: usize,
    pub reassigned_ids: usize,
}

impl FaqStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.faqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faqs.is_empty()
    }

    pub fn all(&self) -> &[Faq] {
        &self.faqs
    }

    pub fn add(&mut self, input: FaqInput) -> Result<Faq> {
        let input = input.normalized();
        input.validate()?;

        let id = self.next_id();
        let faq = Faq::from_input(id, input);
        self.faqs.push(faq.clone());
        info!(faq_id = id, category = %faq.category, "FAQ added");
        Ok(faq)
    }

    pub fn update(&mut self, id: i64, patch: FaqPatch) -> Result<Faq> {
        let position = self
            .position(id)
            .ok_or_else(|| AppError::NotFound(format!("FAQ {}", id)))?;

        let input = patch.apply_to(&self.faqs[position]).normalized();
        input.validate()?;

        let updated = Faq::from_input(id, input);
        self.faqs[position] = updated.clone();
        info!(faq_id = id, "FAQ updated");
        Ok(updated)
    }

    /// Returns `false` when no FAQ has this id; the store is untouched.
    pub fn remove(&mut self, id: i64) -> bool {
        match self.position(id) {
            Some(position) => {
                self.faqs.remove(position);
                info!(faq_id = id, "FAQ deleted");
                true
            }
            None => {
                debug!(faq_id = id, "FAQ delete ignored, id not found");
                false
            }
        }
    }

    pub fn find(&self, id: i64) -> Option<&Faq> {
        self.faqs.iter().find(|faq| faq.id == id)
    }

    pub fn filter(&self, filter: &FaqFilter) -> Vec<Faq> {
        self.faqs
            .iter()
            .filter(|faq| filter.accepts(faq))
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search over question, answer and keywords.
    /// An empty term returns everything.
    pub fn search(&self, term: &str) -> Vec<Faq> {
        let term = term.trim().to_lowercase();
        self.faqs
            .iter()
            .filter(|faq| faq.mentions(&term))
            .cloned()
            .collect()
    }

    /// Appends already-parsed records. Records missing a question or answer
    /// are expected to be dropped by the caller.
    ///
    /// An id that collides with a stored record is skipped if the record is
    /// identical and re-assigned otherwise, so ids stay unique.
    pub fn merge(&mut self, records: Vec<Faq>) -> MergeReport {
        let mut report = MergeReport::default();

        for mut record in records {
            if let Some(existing) = self.find(record.id) {
                if *existing == record {
                    report.skipped_duplicates += 1;
                    continue;
                }
                record.id = self.next_id();
                report.reassigned_ids += 1;
            }
            self.last_id = self.last_id.max(record.id);
            self.faqs.push(record);
            report.added += 1;
        }

        info!(
            added = report.added,
            skipped = report.skipped_duplicates,
            reassigned = report.reassigned_ids,
            "FAQs merged"
        );
        report
    }

    /// Time-derived id, bumped past every id handed out so far. Once an
    /// imported id has taken `i64::MAX`, the first free id from now is used.
    pub fn next_id(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let id = match self.last_id.checked_add(1) {
            Some(next) => now.max(next),
            None => self.free_id_from(now),
        };
        self.last_id = self.last_id.max(id);
        id
    }

    fn free_id_from(&self, start: i64) -> i64 {
        (start..=i64::MAX)
            .find(|id| self.find(*id).is_none())
            .unwrap_or(start)
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.faqs.iter().position(|faq| faq.id == id)
    }
}
