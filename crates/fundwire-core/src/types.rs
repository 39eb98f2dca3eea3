//! Core data model: timeline posts, rewrite outcomes, records, and the
//! dashboard row shape consumed by the static dashboard table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reserved literal the rewrite oracle returns for off-template input.
pub const SENTINEL: &str = "null";

/// A post fetched from a watched timeline. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelinePost {
    /// Upstream post id — the natural dedup key.
    pub id: String,
    /// Full post text (note-tweet text when present, else the legacy text).
    pub text: String,
    /// Canonical `https://x.com/{handle}/status/{id}` link.
    pub url: String,
    /// Media attachment URLs, in upstream order.
    pub media: Vec<String>,
}

/// Result of running one post through the template validator/rewriter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The post matched the announcement template; carries the rewritten text.
    Conforming(String),
    /// The oracle answered with the sentinel: not a funding announcement.
    NonConforming,
    /// The oracle was unreachable or misbehaved; the item should be retried
    /// on a later run.
    TransientFailure(String),
}

/// Whether the announced project already has a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HasToken {
    /// Serialized with the localized literals the dashboard expects.
    #[serde(rename = "ada")]
    Yes,
    #[serde(rename = "belum")]
    No,
}

impl std::fmt::Display for HasToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HasToken::Yes => write!(f, "ada"),
            HasToken::No => write!(f, "belum"),
        }
    }
}

/// Fields extracted from a rewritten announcement. Exists iff a project name
/// was located; everything else is best-effort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredFields {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_token: Option<HasToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_handle: Option<String>,
}

/// One accumulated announcement. Append-only across runs; only the
/// `published`/`published_at` pair ever changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    /// Rewritten announcement text (Bahasa Melayu description).
    pub text: String,
    /// Link back to the source post.
    pub url: String,
    #[serde(default)]
    pub media: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<StructuredFields>,
    #[serde(default)]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Record {
    /// Title used when republishing: the extracted project name when present,
    /// else the first line of the rewritten text.
    #[must_use]
    pub fn title(&self) -> &str {
        if let Some(fields) = &self.fields {
            return &fields.name;
        }
        self.text.lines().next().unwrap_or_default().trim()
    }
}

/// Flat row consumed by the dashboard table. Absent values become `"-"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardRow {
    pub nama: String,
    pub dana: String,
    pub fasa: String,
    pub ada_token: String,
    pub pelabur: String,
    pub deskripsi: String,
    pub twitter: String,
    pub tweet_url: String,
}

impl DashboardRow {
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        let dash = || "-".to_string();
        let or_dash = |v: &Option<String>| v.clone().filter(|s| !s.is_empty()).unwrap_or_else(dash);

        match &record.fields {
            Some(fields) => Self {
                nama: if fields.name.is_empty() {
                    dash()
                } else {
                    fields.name.clone()
                },
                dana: or_dash(&fields.amount),
                fasa: or_dash(&fields.stage),
                ada_token: fields.has_token.map_or_else(dash, |t| t.to_string()),
                pelabur: or_dash(&fields.investors),
                deskripsi: or_dash(&fields.description),
                twitter: or_dash(&fields.social_handle),
                tweet_url: record.url.clone(),
            },
            None => Self {
                nama: dash(),
                dana: dash(),
                fasa: dash(),
                ada_token: dash(),
                pelabur: dash(),
                deskripsi: dash(),
                twitter: dash(),
                tweet_url: record.url.clone(),
            },
        }
    }
}

/// Returns `true` when `text` is the oracle's non-conformance sentinel.
///
/// The oracle occasionally wraps its answer in whitespace or a markdown code
/// fence; both are stripped before the case-insensitive compare.
#[must_use]
pub fn is_sentinel(text: &str) -> bool {
    let mut t = text.trim();
    if let Some(stripped) = t.strip_prefix("```") {
        t = stripped.strip_suffix("```").unwrap_or(stripped).trim();
    }
    t.eq_ignore_ascii_case(SENTINEL)
}
