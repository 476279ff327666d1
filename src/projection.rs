//! Result projection: full catalog records to caller-selected views.

use bitflags::bitflags;

use crate::models::{CatalogRecord, RecordView};

bitflags! {
    /// Set of [`RecordView`] attributes to populate
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Fields: u16 {
        const ID = 1 << 0;
        const TITLE = 1 << 1;
        const PUBLISHED = 1 << 2;
        const UPDATED = 1 << 3;
        const SUMMARY = 1 << 4;
        const AUTHORS = 1 << 5;
        const CATEGORIES = 1 << 6;
        const PRIMARY_CATEGORY = 1 << 7;
        const LINKS = 1 << 8;
        const COMMENT = 1 << 9;
        const JOURNAL_REFERENCE = 1 << 10;
        const DOI = 1 << 11;
        const ABSTRACT_URL = 1 << 12;
        const PDF_URL = 1 << 13;
    }
}

/// Accepted field names, lower-case, and the attributes each selects
const FIELD_ALIASES: &[(&str, Fields)] = &[
    ("id", Fields::ID),
    ("title", Fields::TITLE),
    ("published", Fields::PUBLISHED),
    ("updated", Fields::UPDATED),
    ("summary", Fields::SUMMARY),
    ("abstract", Fields::SUMMARY),
    ("authors", Fields::AUTHORS),
    ("author", Fields::AUTHORS),
    ("categories", Fields::CATEGORIES),
    ("category", Fields::CATEGORIES),
    ("primarycategory", Fields::PRIMARY_CATEGORY),
    ("primary_category", Fields::PRIMARY_CATEGORY),
    ("links", Fields::LINKS),
    ("link", Fields::LINKS),
    ("comment", Fields::COMMENT),
    ("journalreference", Fields::JOURNAL_REFERENCE),
    ("journal_reference", Fields::JOURNAL_REFERENCE),
    ("journal", Fields::JOURNAL_REFERENCE),
    ("doi", Fields::DOI),
    ("abstracturl", Fields::ABSTRACT_URL),
    ("abstract_url", Fields::ABSTRACT_URL),
    ("pdfurl", Fields::PDF_URL),
    ("pdf_url", Fields::PDF_URL),
    ("pdf", Fields::PDF_URL),
];

impl Fields {
    /// Look up a single field name, ignoring case
    pub fn from_alias(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        FIELD_ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, fields)| *fields)
    }

    /// Resolve requested names into a selection
    ///
    /// No names selects everything. Unknown names contribute nothing, so a
    /// request made only of unknown names selects nothing.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        if names.is_empty() {
            return Fields::all();
        }
        names
            .iter()
            .filter_map(|name| Fields::from_alias(name.as_ref()))
            .fold(Fields::empty(), |acc, f| acc | f)
    }
}

/// Project `record` down to the requested fields
pub fn project<S: AsRef<str>>(record: &CatalogRecord, requested_fields: &[S]) -> RecordView {
    project_fields(record, Fields::from_names(requested_fields))
}

/// Project `record` down to an already-resolved selection
pub fn project_fields(record: &CatalogRecord, fields: Fields) -> RecordView {
    let pick = |flag: Fields| fields.contains(flag);

    RecordView {
        id: pick(Fields::ID).then(|| record.id.clone()),
        title: pick(Fields::TITLE).then(|| record.title.clone()),
        published: pick(Fields::PUBLISHED).then_some(record.published),
        updated: pick(Fields::UPDATED).then_some(record.updated),
        summary: pick(Fields::SUMMARY).then(|| record.summary.clone()),
        authors: pick(Fields::AUTHORS).then(|| record.authors.clone()),
        categories: pick(Fields::CATEGORIES).then(|| record.categories.clone()),
        primary_category: pick(Fields::PRIMARY_CATEGORY).then(|| record.primary_category.clone()),
        links: pick(Fields::LINKS).then(|| record.links.clone()),
        comment: pick(Fields::COMMENT).then(|| record.comment.clone()),
        journal_reference: pick(Fields::JOURNAL_REFERENCE)
            .then(|| record.journal_reference.clone()),
        doi: pick(Fields::DOI).then(|| record.doi.clone()),
        abstract_url: pick(Fields::ABSTRACT_URL).then(|| record.abstract_url.clone()),
        pdf_url: pick(Fields::PDF_URL).then(|| record.pdf_url.clone()),
    }
}
