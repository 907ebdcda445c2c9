//! Domain types shared by the cache and the screening pipeline.

use serde::{Deserialize, Serialize};

/// A single literature search result.
///
/// - `title`/`authors`/`journal`: citation fields as the upstream source
///   reports them
/// - `year`: kept as text since traditional-literature sources report
///   non-numeric values
/// - `doi`: identifier or URL, whichever the source exposes
/// - `abstract_text`: abstract or snippet, possibly truncated upstream
///
/// The cache stores sequences of these without interpreting any field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub title: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub journal: String,
    #[serde(default)]
    pub doi: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
}

impl SearchRecord {
    /// Minimal record with only a title, for sources that return bare links.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors: String::new(),
            year: String::new(),
            journal: String::new(),
            doi: String::new(),
            abstract_text: String::new(),
        }
    }
}
