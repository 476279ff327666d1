//! Core data models for search criteria, catalog records and result views.

mod criteria;
mod record;
mod view;

pub use criteria::SearchCriteria;
pub use record::{Author, CatalogRecord, Category, Link};
pub use view::{RecordView, SearchResults};
