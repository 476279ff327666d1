//! Mock source for testing purposes.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::Mutex;

use crate::models::{Author, CatalogRecord, Category};
use crate::query::ExecutionParams;
use crate::sources::{ArxivApi, SourceError};

/// A recorded call to [`MockSource::search`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSearch {
    pub query: String,
    pub params: ExecutionParams,
}

/// A mock source that returns predefined records and remembers every request
#[derive(Debug, Default)]
pub struct MockSource {
    records: Mutex<Vec<CatalogRecord>>,
    failure: Mutex<Option<String>>,
    calls: Mutex<Vec<RecordedSearch>>,
}

impl MockSource {
    /// Create a new mock source that returns no records
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source returning `records`
    pub fn with_records(records: Vec<CatalogRecord>) -> Self {
        let source = Self::new();
        source.set_records(records);
        source
    }

    /// Set the records to return
    pub fn set_records(&self, records: Vec<CatalogRecord>) {
        let mut guard = self.records.lock().unwrap_or_else(|e| e.into_inner());
        *guard = records;
    }

    /// Make every subsequent search fail with an API error
    pub fn fail_with(&self, message: impl Into<String>) {
        let mut guard = self.failure.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(message.into());
    }

    /// All searches executed so far
    pub fn calls(&self) -> Vec<RecordedSearch> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl ArxivApi for MockSource {
    async fn search(
        &self,
        query: &str,
        params: &ExecutionParams,
    ) -> Result<Vec<CatalogRecord>, SourceError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedSearch {
                query: query.to_string(),
                params: params.clone(),
            });

        if let Some(message) = self.failure.lock().unwrap_or_else(|e| e.into_inner()).clone() {
            return Err(SourceError::Api(message));
        }

        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(records
            .iter()
            .take(params.max_results as usize)
            .cloned()
            .collect())
    }
}

/// Helper function to create a mock record for testing.
pub fn make_record(id: &str, title: &str) -> CatalogRecord {
    let published = Utc
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .single()
        .unwrap_or_default();
    let mut record = CatalogRecord::new(id, title, published);
    record.summary = format!("Abstract of {}", title);
    record.authors = vec![Author::new("Test Author")];
    record.categories = vec![Category::new("cs.AI")];
    record.primary_category = Category::new("cs.AI");
    record.abstract_url = format!("http://arxiv.org/abs/{}", id);
    record.pdf_url = format!("http://arxiv.org/pdf/{}", id);
    record
}
