//! Search-criteria handling for logbook service queries.
//!
//! The service's search endpoint takes its filters as a flat query-parameter
//! string. [`SearchCriteria`] captures the filters the client UI collects and
//! [`SearchCriteria::to_query_string`] serializes them in the order and under
//! the parameter names the service expects. Values are carried verbatim;
//! percent-encoding is the transport layer's concern.

use serde::{Deserialize, Serialize};

/// Filters for a logbook search request.
///
/// Field names follow the service's JSON convention (camelCase). Empty
/// strings and empty lists are treated as "not set".
///
/// ## Examples
///
/// ```
/// use logmark_lib::search::SearchCriteria;
///
/// let criteria = SearchCriteria {
///     logbooks: vec!["operations".to_string()],
///     title: Some("cooldown".to_string()),
///     ..Default::default()
/// };
/// let query = criteria.to_query_string();
/// assert!(query.contains("logbooks=operations"));
/// assert!(query.contains("title=cooldown"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Logbooks to search in.
    pub logbooks: Vec<String>,
    /// Tags the entries must carry.
    pub tags: Vec<String>,
    /// Start of the time range, as a service time expression (e.g. `12 hours`).
    pub start_date: Option<String>,
    /// End of the time range, as a service time expression (e.g. `now`).
    pub end_date: Option<String>,
    /// Title substring filter.
    pub title: Option<String>,
    /// Body text filter (the service calls this `desc`).
    pub text: Option<String>,
    /// Entry level filter.
    pub level: Option<String>,
    /// Author filter (the service calls this `owner`).
    pub owner: Option<String>,
}

impl SearchCriteria {
    /// Builds the service query string for these criteria.
    ///
    /// Parameters appear in a fixed order: `logbooks`, `tags`, `start`,
    /// `end`, `title`, `desc`, `level`, `owner`. List parameters are
    /// comma-joined and omitted when empty; `start` and `end` are always
    /// present (empty value when unset), matching the service contract.
    pub fn to_query_string(&self) -> String {
        let mut params: Vec<String> = Vec::new();

        if !self.logbooks.is_empty() {
            params.push(format!("logbooks={}", self.logbooks.join(",")));
        }
        if !self.tags.is_empty() {
            params.push(format!("tags={}", self.tags.join(",")));
        }
        params.push(format!(
            "start={}",
            self.start_date.as_deref().unwrap_or_default()
        ));
        params.push(format!(
            "end={}",
            self.end_date.as_deref().unwrap_or_default()
        ));
        for (name, value) in [
            ("title", &self.title),
            ("desc", &self.text),
            ("level", &self.level),
            ("owner", &self.owner),
        ] {
            if let Some(value) = value
                && !value.is_empty()
            {
                params.push(format!("{name}={value}"));
            }
        }

        params.join("&")
    }
}
