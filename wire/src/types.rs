//! Request/response shapes for the backend REST API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::format::truncate_chars;

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

// =============================================================================
// LISTINGS
// =============================================================================

/// Paginated list envelope returned by newer list endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
}

/// A list response: either a bare JSON array or a [`Page`] envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Page(Page<T>),
    Items(Vec<T>),
}

impl<T> Listing<T> {
    /// Unwrap the listed items regardless of envelope.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Page(page) => page.items,
            Self::Items(items) => items,
        }
    }
}

// =============================================================================
// SOURCES
// =============================================================================

/// Kind of origin a source collects from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceType {
    Facebook,
    News,
    Rss,
    Statistics,
    OfficialPublication,
    /// A type this build does not know yet; kept verbatim.
    Other(String),
}

impl SourceType {
    /// All known types, in form order.
    pub const KNOWN: [Self; 5] =
        [Self::Facebook, Self::News, Self::Rss, Self::Statistics, Self::OfficialPublication];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Facebook => "facebook",
            Self::News => "news",
            Self::Rss => "rss",
            Self::Statistics => "statistics",
            Self::OfficialPublication => "official_publication",
            Self::Other(raw) => raw,
        }
    }

    /// Human-facing label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Facebook => "Facebook",
            Self::News => "Hírek",
            Self::Rss => "RSS Feed",
            Self::Statistics => "Statisztikák",
            Self::OfficialPublication => "Magyar Közlöny",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for SourceType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "facebook" => Self::Facebook,
            "news" => Self::News,
            "rss" => Self::Rss,
            "statistics" => Self::Statistics,
            "official_publication" => Self::OfficialPublication,
            _ => Self::Other(raw),
        }
    }
}

impl From<SourceType> for String {
    fn from(kind: SourceType) -> Self {
        match kind {
            SourceType::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

/// Collection schedule attached to a source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,
}

/// A configured origin the backend collects posts from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub source_type: SourceType,
    pub identifier: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub source_group_id: String,
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub schedule: Option<Schedule>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Source {
    /// Name when set and non-blank, otherwise the identifier.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => &self.identifier,
        }
    }
}

/// Create/update body for a source. `None` fields are not sent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewSource {
    pub source_type: SourceType,
    pub identifier: String,
    pub source_group_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
}

impl From<&Source> for NewSource {
    fn from(source: &Source) -> Self {
        Self {
            source_type: source.source_type.clone(),
            identifier: source.identifier.clone(),
            source_group_id: source.source_group_id.clone(),
            name: source.name.clone(),
            config: (!source.config.is_empty()).then(|| source.config.clone()),
            is_active: Some(source.is_active),
            schedule: source.schedule.clone(),
        }
    }
}

/// A named set of sources owned by one user. Every source belongs to one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceGroup {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl SourceGroup {
    /// Picker label: `name (description)` when a description is set.
    #[must_use]
    pub fn label(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => format!("{} ({description})", self.name),
            _ => self.name.clone(),
        }
    }
}

/// Create body for a source group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewSourceGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// POSTS
// =============================================================================

/// A unit of collected content with provenance metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, alias = "_id")]
    pub id: String,
    pub source_id: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
    pub content: String,
    #[serde(default)]
    pub title: Option<String>,
    pub posted_at: String,
    #[serde(default)]
    pub collected_at: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Post {
    /// Title when present, otherwise the first `limit` characters of the
    /// content with an ellipsis when it was cut.
    #[must_use]
    pub fn headline(&self, limit: usize) -> String {
        if let Some(title) = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            return title.to_owned();
        }
        excerpt(&self.content, limit)
    }

    /// Label for the source chip: the collector-provided name, else the id.
    #[must_use]
    pub fn source_label(&self) -> &str {
        self.source.as_deref().filter(|s| !s.is_empty()).unwrap_or(&self.source_id)
    }

    /// Link to the original post, when the collector recorded one.
    #[must_use]
    pub fn original_link(&self) -> Option<&str> {
        self.metadata.get("link").and_then(Value::as_str).filter(|s| !s.is_empty())
    }
}

/// The first `limit` characters of `text`, with `...` appended when cut.
#[must_use]
pub fn excerpt(text: &str, limit: usize) -> String {
    let cut = truncate_chars(text, limit);
    if cut.len() < text.len() { format!("{cut}...") } else { cut.to_owned() }
}

/// Filters for the post listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub source_id: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PostFilter {
    #[must_use]
    pub fn recent(limit: u32) -> Self {
        Self { limit: Some(limit), ..Self::default() }
    }
}

// =============================================================================
// COLLECTION
// =============================================================================

/// Response of a collection trigger.
///
/// Covers both the task-dispatch shape (`task_id`, `status`, `message`) and
/// the synchronous result shape (`posts_found`, `posts_saved`, `errors`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionTrigger {
    pub source_id: String,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub posts_found: Option<u64>,
    #[serde(default)]
    pub posts_saved: Option<u64>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Collection bookkeeping for one source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStatus {
    pub source_id: String,
    pub is_active: bool,
    #[serde(default)]
    pub last_collected_at: Option<String>,
    #[serde(default)]
    pub last_collection_status: Option<String>,
}

// =============================================================================
// FACT-CHECKS
// =============================================================================

/// Backend-computed verdict over a post's claims.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verdict {
    Verified,
    True,
    PartiallyTrue,
    Disputed,
    False,
    Other(String),
}

/// Visual grouping of verdicts for badges and icons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerdictTone {
    Positive,
    Mixed,
    Warning,
    Negative,
    Unknown,
}

impl Verdict {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Verified => "verified",
            Self::True => "true",
            Self::PartiallyTrue => "partially_true",
            Self::Disputed => "disputed",
            Self::False => "false",
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Verified => "Igazolt",
            Self::True => "Igaz",
            Self::PartiallyTrue => "Részben Igaz",
            Self::Disputed => "Vitatható",
            Self::False => "Hamis",
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn tone(&self) -> VerdictTone {
        match self {
            Self::Verified | Self::True => VerdictTone::Positive,
            Self::PartiallyTrue => VerdictTone::Mixed,
            Self::Disputed => VerdictTone::Warning,
            Self::False => VerdictTone::Negative,
            Self::Other(_) => VerdictTone::Unknown,
        }
    }
}

impl From<String> for Verdict {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "verified" => Self::Verified,
            "true" => Self::True,
            "partially_true" => Self::PartiallyTrue,
            "disputed" => Self::Disputed,
            "false" => Self::False,
            _ => Self::Other(raw),
        }
    }
}

impl From<Verdict> for String {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

/// A checkable statement extracted from a post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbers: Option<Vec<String>>,
}

/// Supporting or contradicting material found for a claim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub source: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub relevance_score: f64,
}

impl Reference {
    /// Title, else URL, else empty.
    #[must_use]
    pub fn heading(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.url.as_deref())
            .unwrap_or_default()
    }

    /// Snippet, falling back to the stored content excerpt.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        self.snippet
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .or_else(|| self.content.as_deref().filter(|c| !c.is_empty()).map(|c| excerpt(c, 240)))
    }
}

/// Outcome of a fact-check run for a single post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FactCheckResult {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub post_id: String,
    #[serde(default)]
    pub claims: Vec<Claim>,
    pub verdict: Verdict,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub checked_at: String,
    #[serde(default)]
    pub checked_by: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl FactCheckResult {
    /// The first eight characters of the post id, for compact list rows.
    #[must_use]
    pub fn short_post_id(&self) -> &str {
        truncate_chars(&self.post_id, 8)
    }

    /// Stable key for list rendering: result id, else post id.
    #[must_use]
    pub fn row_key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.post_id)
    }
}

/// Response of a fact-check trigger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckTrigger {
    pub post_id: String,
    #[serde(default)]
    pub task_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Filters for the fact-check result listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FactCheckFilter {
    pub post_id: Option<String>,
    pub verdict: Option<Verdict>,
    pub limit: Option<u32>,
}

impl FactCheckFilter {
    #[must_use]
    pub fn recent(limit: u32) -> Self {
        Self { limit: Some(limit), ..Self::default() }
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Statistics provider with a dataset search/collect API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatsProvider {
    Eurostat,
    Ksh,
}

impl StatsProvider {
    /// Path segment under `/statistics`.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Eurostat => "eurostat",
            Self::Ksh => "ksh",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Eurostat => "EUROSTAT",
            Self::Ksh => "KSH",
        }
    }
}

/// Dataset search response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetSearch {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub results: Vec<Value>,
}

/// A dataset hit reduced to what the result list shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetHit {
    pub code: String,
    pub label: String,
}

impl DatasetSearch {
    /// Extract code/label pairs from the provider-specific result objects.
    ///
    /// Providers disagree on key names; hits without any code are skipped.
    #[must_use]
    pub fn hits(&self) -> Vec<DatasetHit> {
        self.results
            .iter()
            .filter_map(|item| {
                let code = first_str(item, &["code", "dataset_code", "id"])?;
                let label = first_str(item, &["label", "title", "name"]).unwrap_or(code);
                Some(DatasetHit { code: code.to_owned(), label: label.to_owned() })
            })
            .collect()
    }
}

fn first_str<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| item.get(*key).and_then(Value::as_str))
        .filter(|s| !s.is_empty())
}

/// Dataset metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub code: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

/// Response of a dataset collection trigger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetCollection {
    pub success: bool,
    pub dataset_code: String,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// HEALTH
// =============================================================================

/// Backend health probe response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

impl Health {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
