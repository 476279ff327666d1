//! Search criteria accepted by the `arxiv-search` tool.

use serde::{Deserialize, Serialize};

/// Caller-supplied search criteria
///
/// Every field is optional. Empty strings are treated the same as absent
/// values so that clients which send `""` for unused fields behave the same as
/// clients which omit them. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchCriteria {
    /// Title text (`ti:`)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,

    /// Author name (`au:`)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub author: String,

    /// Abstract text (`abs:`)
    #[serde(rename = "abstract", skip_serializing_if = "String::is_empty")]
    pub abstract_text: String,

    /// arXiv taxonomy tag (`cat:`)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subject_category: String,

    /// Lower bound of the submission window, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub submitted_since: String,

    /// Upper bound of the submission window, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub submitted_before: String,

    /// Window ending now, e.g. `7 days` or `3 months`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub submitted_relative: String,

    /// Text matched across title, author, abstract and category (`all:`)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub all: String,

    /// Explicit arXiv identifiers to fetch
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub id_list: Vec<String>,

    /// Maximum number of results; zero or absent means the default
    #[serde(rename = "max", skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,

    /// Fields to include in each result; empty means all
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub return_fields: Vec<String>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn abstract_text(mut self, text: impl Into<String>) -> Self {
        self.abstract_text = text.into();
        self
    }

    pub fn subject_category(mut self, category: impl Into<String>) -> Self {
        self.subject_category = category.into();
        self
    }

    pub fn all(mut self, text: impl Into<String>) -> Self {
        self.all = text.into();
        self
    }

    pub fn submitted_since(mut self, date: impl Into<String>) -> Self {
        self.submitted_since = date.into();
        self
    }

    pub fn submitted_before(mut self, date: impl Into<String>) -> Self {
        self.submitted_before = date.into();
        self
    }

    pub fn submitted_relative(mut self, relative: impl Into<String>) -> Self {
        self.submitted_relative = relative.into();
        self
    }

    pub fn id_list<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.id_list = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_results(mut self, max: u32) -> Self {
        self.max_results = Some(max);
        self
    }

    pub fn return_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.return_fields = fields.into_iter().map(Into::into).collect();
        self
    }
}
