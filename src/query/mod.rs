//! Query composition: search criteria to arXiv query expressions.
//!
//! [`compose`] is a pure function of the criteria and a caller-supplied "now".
//! Precedence between the submission-window inputs:
//!
//! 1. `submitted_relative`, only when both absolute bounds are empty
//! 2. `submitted_since` / `submitted_before`, any subset; a missing lower bound
//!    is the beginning of time, a missing upper bound is "now"
//! 3. no date clause
//!
//! ```rust
//! use arxiv_mcp::models::SearchCriteria;
//! use arxiv_mcp::query::compose;
//!
//! let criteria = SearchCriteria::new().title("quantum").author("Smith");
//! let (expression, params) = compose(&criteria, chrono::Utc::now()).unwrap();
//! assert_eq!(expression.to_string(), "ti:quantum au:Smith");
//! assert_eq!(params.max_results, 20);
//! ```

mod composer;
mod relative;

pub use composer::{
    beginning_of_time, compose, Clause, ExecutionParams, FieldPrefix, QueryExpression, SortBy,
    SortOrder, DATE_FORMAT, DEFAULT_MAX_RESULTS, WIRE_DATE_FORMAT,
};
pub use relative::{parse_relative_date, RelativeOffset, TimeUnit};

/// Errors raised while composing a query
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Relative date does not have exactly two tokens
    #[error("invalid relative date format: {0}")]
    InvalidFormat(String),

    /// Relative date count is not a non-negative integer
    #[error("invalid number in relative date: {0}")]
    InvalidNumber(String),

    /// Relative date unit is not day(s), week(s), month(s) or year(s)
    #[error("invalid time unit in relative date: {0}")]
    InvalidUnit(String),

    /// Absolute date does not match `YYYY-MM-DD`
    #[error("invalid {field} date '{value}': expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    /// Relative offset reaches past the representable calendar
    #[error("relative date out of range: {0}")]
    OutOfRange(String),
}
