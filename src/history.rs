use std::collections::{BTreeMap, HashSet};

use log::{info, warn};
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{
    ExtractionError,
    bulletin::Bulletin,
    bulletin_extractor::extract_document,
    category::{CATEGORIES, Category},
    period::{Period, PeriodResolver},
};

/// Region key to value, kept in region table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionalValues(Vec<(&'static str, f64)>);

impl RegionalValues {
    pub fn insert(&mut self, key: &'static str, value: f64) {
        self.0.push((key, value));
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RegionalValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One category's value for one bulletin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRecord {
    pub id: i64,
    #[serde(rename = "datetime")]
    pub date: chrono::NaiveDate,
    pub label: String,
    pub value: f64,
    #[serde(rename = "ccaa", skip_serializing_if = "Option::is_none")]
    pub regions: Option<RegionalValues>,
}

impl PeriodRecord {
    pub fn new(period: &Period, value: f64, regions: Option<RegionalValues>) -> Self {
        Self {
            id: period.id,
            date: period.date,
            label: period.label.clone(),
            value,
            regions,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CategoryHistory {
    pub category: &'static Category,
    pub records: Vec<PeriodRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentOutcome {
    Extracted { period_id: i64 },
    Skipped(ExtractionError),
}

/// The per-run accumulator. Owned by whoever drives the run and consumed by
/// [`PriceHistories::finalize`].
pub struct PriceHistories {
    histories: Vec<CategoryHistory>,
    seen_periods: HashSet<i64>,
}

impl PriceHistories {
    pub fn new() -> Self {
        Self::for_categories(&CATEGORIES)
    }

    pub fn for_categories(categories: &'static [Category]) -> Self {
        let histories = categories
            .iter()
            .map(|category| CategoryHistory {
                category,
                records: Vec::new(),
            })
            .collect();
        Self {
            histories,
            seen_periods: HashSet::new(),
        }
    }

    /// Extracts every category from `bulletin`. Records are appended only if
    /// all categories succeed; otherwise nothing from this bulletin is kept.
    pub fn ingest(&mut self, bulletin: &Bulletin, resolver: &PeriodResolver) -> DocumentOutcome {
        match self.try_ingest(bulletin, resolver) {
            Ok(period_id) => DocumentOutcome::Extracted { period_id },
            Err(e) => DocumentOutcome::Skipped(e),
        }
    }

    fn try_ingest(
        &mut self,
        bulletin: &Bulletin,
        resolver: &PeriodResolver,
    ) -> Result<i64, ExtractionError> {
        let period = resolver.resolve(&bulletin.file_name)?;
        if self.seen_periods.contains(&period.id) {
            return Err(ExtractionError::DuplicatePeriod { id: period.id });
        }

        let categories: Vec<&'static Category> =
            self.histories.iter().map(|h| h.category).collect();
        let records = extract_document(bulletin, &period, &categories)?;

        for (history, record) in self.histories.iter_mut().zip(records) {
            history.records.push(record);
        }
        self.seen_periods.insert(period.id);
        Ok(period.id)
    }

    pub fn histories(&self) -> &[CategoryHistory] {
        &self.histories
    }

    /// Sorts every history by period id. Must only run once all documents
    /// have been ingested.
    pub fn finalize(mut self) -> Vec<CategoryHistory> {
        for history in &mut self.histories {
            // Stable, so records sharing an id keep insertion order.
            history.records.sort_by_key(|record| record.id);
        }
        self.histories
    }
}

impl Default for PriceHistories {
    fn default() -> Self {
        Self::new()
    }
}

/// Tally of document outcomes for one run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub extracted: usize,
    pub skipped: Vec<(String, ExtractionError)>,
}

impl RunReport {
    pub fn record(&mut self, file_name: &str, outcome: DocumentOutcome) {
        match outcome {
            DocumentOutcome::Extracted { period_id } => {
                info!("Extracted period {period_id} from {file_name}");
                self.extracted += 1;
            }
            DocumentOutcome::Skipped(reason) => {
                warn!("Skipping {file_name}: {reason}");
                self.skipped.push((file_name.to_string(), reason));
            }
        }
    }

    pub fn skip_causes(&self) -> BTreeMap<&'static str, usize> {
        let mut causes = BTreeMap::new();
        for (_, reason) in &self.skipped {
            *causes.entry(reason.kind()).or_insert(0) += 1;
        }
        causes
    }

    pub fn log_summary(&self) {
        info!(
            "Extracted {} documents, skipped {}",
            self.extracted,
            self.skipped.len()
        );
        for (cause, count) in self.skip_causes() {
            info!("  {count} skipped: {cause}");
        }
    }
}
