//! Paper records as fetched from OpenAlex.
//!
//! Records are accepted permissively: absent or `null` fields fall back to a
//! documented default instead of rejecting the record, so one bad entry never
//! aborts a batch.
//!
//! | field              | default      |
//! |--------------------|--------------|
//! | `id`, `title`      | `""`         |
//! | `publication_year` | `0`          |
//! | `doi`              | `None`       |
//! | `cited_by_count`   | `0`          |
//! | `authorships`      | `[]`         |
//! | `referenced_works` | `[]`         |
//! | `author.id`        | `""`         |
//! | `author.display_name` | `"Unknown"` |
//!
//! The same defaults apply to values of the wrong JSON type.

use crate::error::{NetworkError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

/// Display name used when an authorship carries no name
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// One academic publication with metadata, authorship and outbound citations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_year")]
    pub publication_year: i32,
    #[serde(default, deserialize_with = "lenient_doi")]
    pub doi: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub cited_by_count: u64,
    #[serde(default, deserialize_with = "lenient_authorships")]
    pub authorships: Vec<Authorship>,
    /// Identifiers of works this paper cites, possibly outside the dataset
    #[serde(default, deserialize_with = "lenient_strings")]
    pub referenced_works: Vec<String>,
}

/// Authorship entry, shaped like OpenAlex's `{ "author": { ... } }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Authorship {
    #[serde(default, deserialize_with = "lenient_author")]
    pub author: AuthorRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRef {
    /// May be empty; such authors are ignored by the collaboration network
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default = "unknown_author", deserialize_with = "lenient_display_name")]
    pub display_name: String,
}

impl Default for AuthorRef {
    fn default() -> Self {
        Self {
            id: String::new(),
            display_name: unknown_author(),
        }
    }
}

impl PaperRecord {
    /// Authors on this paper that carry an id, in listing order
    pub fn identified_authors(&self) -> impl Iterator<Item = &AuthorRef> {
        self.authorships
            .iter()
            .map(|a| &a.author)
            .filter(|a| !a.id.is_empty())
    }
}

fn unknown_author() -> String {
    UNKNOWN_AUTHOR.to_string()
}

// Every field goes through `serde_json::Value` so that a wrong-typed value
// falls back to its default instead of failing the whole array.

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_owned).unwrap_or_default())
}

fn lenient_display_name<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .map(str::to_owned)
        .unwrap_or_else(unknown_author))
}

fn lenient_doi<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_owned))
}

fn lenient_year<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_i64()
        .and_then(|y| i32::try_from(y).ok())
        .unwrap_or(0))
}

fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_u64().unwrap_or(0))
}

/// Non-string items are dropped; a non-array becomes an empty list
fn lenient_strings<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default())
}

/// Entries that are not objects become an authorship without id
fn lenient_authorships<'de, D>(deserializer: D) -> std::result::Result<Vec<Authorship>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_author<'de, D>(deserializer: D) -> std::result::Result<AuthorRef, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Load a JSON array of paper records.
///
/// A missing file is reported as [`NetworkError::MissingInput`] so the caller
/// can abort before producing any artifact. Array elements that are not
/// objects are skipped with a warning; fields inside a record never reject it.
pub fn load_papers(path: &Path) -> Result<Vec<PaperRecord>> {
    if !path.exists() {
        return Err(NetworkError::MissingInput(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let raw: Vec<Value> = serde_json::from_str(&content)?;
    let total = raw.len();

    let papers: Vec<PaperRecord> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value(item) {
            Ok(paper) => Some(paper),
            Err(e) => {
                warn!(index = idx, error = %e, "Skipping malformed paper record");
                None
            }
        })
        .collect();

    info!(
        count = papers.len(),
        skipped = total - papers.len(),
        path = ?path,
        "Loaded papers"
    );
    Ok(papers)
}

/// Save a paper list as pretty-printed JSON
pub fn save_papers(path: &Path, papers: &[PaperRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(papers)?;
    std::fs::write(path, content)?;
    info!(count = papers.len(), path = ?path, "Saved papers");
    Ok(())
}

/// Summary numbers for a fetched dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub total_papers: usize,
    /// `(min, max)` publication year, `None` for an empty dataset
    pub year_range: Option<(i32, i32)>,
    pub total_citations: u64,
    pub mean_citations: f64,
}

impl DatasetStats {
    pub fn from_papers(papers: &[PaperRecord]) -> Self {
        let years = papers.iter().map(|p| p.publication_year);
        let year_range = years.clone().min().zip(years.max());
        let total_citations: u64 = papers.iter().map(|p| p.cited_by_count).sum();
        let mean_citations = if papers.is_empty() {
            0.0
        } else {
            total_citations as f64 / papers.len() as f64
        };

        Self {
            total_papers: papers.len(),
            year_range,
            total_citations,
            mean_citations,
        }
    }
}
