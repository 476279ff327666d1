//! Translation of [`SearchCriteria`] into an arXiv query expression.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::relative::parse_relative_date;
use super::QueryError;
use crate::models::SearchCriteria;

/// Number of results requested when the caller leaves `max` unset or zero
pub const DEFAULT_MAX_RESULTS: u32 = 20;

/// Input format for `submitted_since` / `submitted_before`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// arXiv wire format for `submittedDate` bounds (minute precision, GMT)
pub const WIRE_DATE_FORMAT: &str = "%Y%m%d%H%M";

/// Sort field for arXiv results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Relevance,
    LastUpdatedDate,
    SubmittedDate,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::LastUpdatedDate => "lastUpdatedDate",
            SortBy::SubmittedDate => "submittedDate",
        }
    }
}

/// Sort order for arXiv results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

/// Field prefix of a text clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPrefix {
    Title,
    Author,
    Abstract,
    Category,
    All,
}

impl FieldPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldPrefix::Title => "ti",
            FieldPrefix::Author => "au",
            FieldPrefix::Abstract => "abs",
            FieldPrefix::Category => "cat",
            FieldPrefix::All => "all",
        }
    }
}

/// One `prefix:value` fragment of a query expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Field { prefix: FieldPrefix, value: String },
    SubmittedDate {
        since: DateTime<Utc>,
        before: DateTime<Utc>,
    },
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Field { prefix, value } => write!(f, "{}:{}", prefix.as_str(), value),
            Clause::SubmittedDate { since, before } => write!(
                f,
                "submittedDate:[{} TO {}]",
                since.format(WIRE_DATE_FORMAT),
                before.format(WIRE_DATE_FORMAT)
            ),
        }
    }
}

/// Conjunction of clauses, rendered space-separated in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryExpression {
    clauses: Vec<Clause>,
}

impl QueryExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl fmt::Display for QueryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

/// Parameters passed alongside the query string to the search API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    pub max_results: u32,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub id_list: Vec<String>,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            sort_by: SortBy::Relevance,
            sort_order: SortOrder::Descending,
            id_list: Vec::new(),
        }
    }
}

/// Earliest instant used for an open-ended `submitted_since`
pub fn beginning_of_time() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .unwrap_or(NaiveDate::MIN)
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Build the query expression and execution parameters for `criteria`
///
/// `now` is the single evaluation instant for the request: it closes relative
/// windows and absolute windows without an upper bound.
pub fn compose(
    criteria: &SearchCriteria,
    now: DateTime<Utc>,
) -> Result<(QueryExpression, ExecutionParams), QueryError> {
    let mut expression = QueryExpression::new();

    let text_fields = [
        (FieldPrefix::Title, &criteria.title),
        (FieldPrefix::Author, &criteria.author),
        (FieldPrefix::Abstract, &criteria.abstract_text),
        (FieldPrefix::Category, &criteria.subject_category),
        (FieldPrefix::All, &criteria.all),
    ];
    for (prefix, value) in text_fields {
        if !value.is_empty() {
            expression.push(Clause::Field {
                prefix,
                value: value.clone(),
            });
        }
    }

    if let Some((since, before)) = resolve_window(criteria, now)? {
        expression.push(Clause::SubmittedDate { since, before });
    }

    let params = ExecutionParams {
        max_results: criteria
            .max_results
            .filter(|&max| max > 0)
            .unwrap_or(DEFAULT_MAX_RESULTS),
        id_list: criteria.id_list.clone(),
        ..ExecutionParams::default()
    };

    tracing::debug!(
        query = %expression,
        max_results = params.max_results,
        ids = params.id_list.len(),
        "Composed arXiv query"
    );

    Ok((expression, params))
}

/// Pick the effective submission window
///
/// A relative expression wins only when neither absolute bound is set.
fn resolve_window(
    criteria: &SearchCriteria,
    now: DateTime<Utc>,
) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>, QueryError> {
    let has_since = !criteria.submitted_since.is_empty();
    let has_before = !criteria.submitted_before.is_empty();

    if !criteria.submitted_relative.is_empty() && !has_since && !has_before {
        let offset = parse_relative_date(&criteria.submitted_relative)?;
        return Ok(Some((offset.before(now)?, now)));
    }

    if !has_since && !has_before {
        return Ok(None);
    }

    let since = if has_since {
        parse_date("submitted_since", &criteria.submitted_since)?
    } else {
        beginning_of_time()
    };
    let before = if has_before {
        parse_date("submitted_before", &criteria.submitted_before)?
    } else {
        now
    };

    Ok(Some((since, before)))
}

/// True for exactly four digits, `-`, two digits, `-`, two digits
fn is_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parse a `YYYY-MM-DD` date as midnight UTC
///
/// chrono alone accepts unpadded fields, leading whitespace and a sign, so
/// the fixed shape is checked first.
fn parse_date(field: &'static str, value: &str) -> Result<DateTime<Utc>, QueryError> {
    let invalid = || QueryError::InvalidDate {
        field,
        value: value.to_string(),
    };
    if !is_iso_date_shape(value) {
        return Err(invalid());
    }
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 9, 45, 0).unwrap()
    }

    fn query_string(criteria: &SearchCriteria) -> String {
        compose(criteria, fixed_now()).unwrap().0.to_string()
    }

    #[test]
    fn test_empty_criteria() {
        let (expression, params) = compose(&SearchCriteria::new(), fixed_now()).unwrap();
        assert!(expression.is_empty());
        assert_eq!(expression.to_string(), "");
        assert_eq!(params.max_results, 20);
        assert_eq!(params.sort_by, SortBy::Relevance);
        assert_eq!(params.sort_order, SortOrder::Descending);
        assert!(params.id_list.is_empty());
    }

    #[test]
    fn test_single_text_fields() {
        assert_eq!(
            query_string(&SearchCriteria::new().title("quantum computing")),
            "ti:quantum computing"
        );
        assert_eq!(query_string(&SearchCriteria::new().author("Einstein")), "au:Einstein");
        assert_eq!(
            query_string(&SearchCriteria::new().abstract_text("machine learning")),
            "abs:machine learning"
        );
        assert_eq!(
            query_string(&SearchCriteria::new().subject_category("cs.AI")),
            "cat:cs.AI"
        );
        assert_eq!(
            query_string(&SearchCriteria::new().all("neural networks")),
            "all:neural networks"
        );
    }

    #[test]
    fn test_clause_order_is_fixed() {
        assert_eq!(
            query_string(&SearchCriteria::new().title("quantum").author("Smith")),
            "ti:quantum au:Smith"
        );

        let criteria = SearchCriteria::new()
            .all("graphs")
            .subject_category("math.CO")
            .abstract_text("coloring")
            .author("Erdos")
            .title("chromatic");
        assert_eq!(
            query_string(&criteria),
            "ti:chromatic au:Erdos abs:coloring cat:math.CO all:graphs"
        );
    }

    #[test]
    fn test_values_are_verbatim() {
        assert_eq!(
            query_string(&SearchCriteria::new().title("  spaced   out ")),
            "ti:  spaced   out "
        );
    }

    #[test]
    fn test_absolute_window() {
        let criteria = SearchCriteria::new()
            .title("AI")
            .submitted_since("2023-01-01")
            .submitted_before("2023-12-31");
        assert_eq!(
            query_string(&criteria),
            "ti:AI submittedDate:[202301010000 TO 202312310000]"
        );
    }

    #[test]
    fn test_half_open_windows() {
        let since_only = SearchCriteria::new().submitted_since("2020-06-01");
        assert_eq!(
            query_string(&since_only),
            "submittedDate:[202006010000 TO 202405150945]"
        );

        let before_only = SearchCriteria::new().submitted_before("2020-06-01");
        assert_eq!(
            query_string(&before_only),
            "submittedDate:[000101010000 TO 202006010000]"
        );
    }

    #[test]
    fn test_relative_window() {
        let now = fixed_now();
        let criteria = SearchCriteria::new()
            .title("machine learning")
            .submitted_relative("7 days");
        let (expression, _) = compose(&criteria, now).unwrap();

        assert_eq!(
            expression.clauses()[1],
            Clause::SubmittedDate {
                since: now - Duration::days(7),
                before: now,
            }
        );
        assert_eq!(
            expression.to_string(),
            "ti:machine learning submittedDate:[202405080945 TO 202405150945]"
        );
    }

    #[test]
    fn test_absolute_bound_overrides_relative() {
        let criteria = SearchCriteria::new()
            .submitted_relative("7 days")
            .submitted_since("2021-01-01");
        assert_eq!(
            query_string(&criteria),
            "submittedDate:[202101010000 TO 202405150945]"
        );

        // The relative expression is not even parsed once an absolute bound wins
        let criteria = SearchCriteria::new()
            .submitted_relative("garbage")
            .submitted_before("2021-01-01");
        assert!(compose(&criteria, fixed_now()).is_ok());
    }

    #[test]
    fn test_invalid_dates() {
        let err = compose(
            &SearchCriteria::new().title("test").submitted_since("invalid-date"),
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidDate {
                field: "submitted_since",
                value: "invalid-date".to_string(),
            }
        );

        let err = compose(
            &SearchCriteria::new().title("test").submitted_before("2023/12/31"),
            fixed_now(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            QueryError::InvalidDate { field: "submitted_before", .. }
        ));
    }

    #[test]
    fn test_dates_must_be_zero_padded_iso() {
        for value in ["2023-1-5", " 2023-01-01", "+2023-01-01", "2023-01-01 ", "12023-01-01", "2023-02-30"] {
            let err = compose(&SearchCriteria::new().submitted_since(value), fixed_now()).unwrap_err();
            assert_eq!(
                err,
                QueryError::InvalidDate {
                    field: "submitted_since",
                    value: value.to_string(),
                },
                "{:?} should be rejected",
                value
            );
        }

        let err = compose(&SearchCriteria::new().submitted_before("2023-12-1"), fixed_now()).unwrap_err();
        assert!(matches!(
            err,
            QueryError::InvalidDate { field: "submitted_before", .. }
        ));
    }

    #[test]
    fn test_invalid_relative() {
        let err = compose(
            &SearchCriteria::new().title("test").submitted_relative("invalid"),
            fixed_now(),
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::InvalidFormat(_)));
    }

    #[test]
    fn test_execution_params() {
        let criteria = SearchCriteria::new()
            .max_results(5)
            .id_list(["2301.00001", "2301.00002"]);
        let (_, params) = compose(&criteria, fixed_now()).unwrap();
        assert_eq!(params.max_results, 5);
        assert_eq!(params.id_list, vec!["2301.00001", "2301.00002"]);

        let (_, params) = compose(&SearchCriteria::new().max_results(0), fixed_now()).unwrap();
        assert_eq!(params.max_results, DEFAULT_MAX_RESULTS);
    }

    #[test]
    fn test_id_list_is_additive() {
        let criteria = SearchCriteria::new().title("ignored?").id_list(["2301.00001"]);
        let (expression, params) = compose(&criteria, fixed_now()).unwrap();
        assert_eq!(expression.to_string(), "ti:ignored?");
        assert_eq!(params.id_list, vec!["2301.00001"]);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let criteria = SearchCriteria::new()
            .title("transformers")
            .subject_category("cs.CL")
            .submitted_relative("3 months")
            .max_results(50);
        let first = compose(&criteria, fixed_now()).unwrap();
        let second = compose(&criteria, fixed_now()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.0.to_string(), second.0.to_string());
    }
}
