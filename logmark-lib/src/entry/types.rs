//! Type definitions for log entries returned by the logbook service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single log entry as returned by the service's search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Service-assigned entry id.
    pub id: u64,
    /// Entry title.
    pub title: String,
    /// Author of the entry.
    #[serde(default)]
    pub owner: Option<String>,
    /// Raw markdown body.
    #[serde(default)]
    pub description: Option<String>,
    /// Creation time, transported as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_date: DateTime<Utc>,
    /// Logbooks the entry belongs to.
    #[serde(default)]
    pub logbooks: Vec<Logbook>,
    /// Tags attached to the entry.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Free-form properties (name + attribute list).
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Uploaded attachments.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// A logbook the service knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logbook {
    /// Logbook name.
    pub name: String,
    /// Logbook owner, if any.
    #[serde(default)]
    pub owner: Option<String>,
}

/// A tag attached to log entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Tag name.
    pub name: String,
}

/// A named property with a list of attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Attribute list, possibly empty.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

/// A name/value attribute of a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Attribute value.
    pub value: String,
}

/// An attachment uploaded with a log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Attachment id, referenced from embedded-image markup.
    pub id: String,
    /// Original file name, if recorded.
    #[serde(default)]
    pub filename: Option<String>,
}
