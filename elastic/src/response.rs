//! Typed Elasticsearch responses

use serde::{Deserialize, Serialize};

use crate::dict::Dict;

/// Acknowledgement returned by index and mapping calls
///
/// e.g. `{"acknowledged":true}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Success {
    pub acknowledged: bool,
}

/// Error envelope
///
/// e.g. `{"error":{"root_cause":[...],"type":"index_not_found_exception","reason":"no such index"},"status":404}`,
/// or on 1.x engines `{"error":"IndexMissingException[[gb] missing]","status":404}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    pub error: ErrorKind,
    pub status: u16,
}

/// The `error` member of a [`Failure`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorKind {
    Detail(ErrorDetail),
    /// Plain message sent by 1.x engines
    Message(String),
}

impl ErrorKind {
    pub fn detail(&self) -> Option<&ErrorDetail> {
        match self {
            ErrorKind::Detail(detail) => Some(detail),
            ErrorKind::Message(_) => None,
        }
    }

    /// Human readable reason
    pub fn reason(&self) -> &str {
        match self {
            ErrorKind::Detail(detail) => &detail.reason,
            ErrorKind::Message(message) => message,
        }
    }

    /// Exception type, e.g. `index_not_found_exception`; `None` for plain messages
    pub fn error_type(&self) -> Option<&str> {
        self.detail().map(|detail| detail.error_type.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub root_cause: Vec<Dict>,
    #[serde(rename = "type")]
    pub error_type: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caused_by: Option<Dict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(default, rename = "resource.type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, rename = "resource.id", skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

/// Per-shard outcome counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShardStats {
    pub total: u32,
    pub successful: u32,
    pub failed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped: Option<u32>,
}

/// Result of a `_validate/query` call
///
/// e.g. `{"valid":false,"_shards":{...},"explanations":[{"index":"gb","valid":false,"error":"..."}]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(rename = "_shards", default, skip_serializing_if = "Option::is_none")]
    pub shards: Option<ShardStats>,
    #[serde(default)]
    pub explanations: Vec<Dict>,
}

/// Search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub took: u64,
    pub timed_out: bool,
    #[serde(rename = "_shards")]
    pub shards: ShardStats,
    pub hits: Hits,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Dict>,
    #[serde(rename = "_scroll_id", default, skip_serializing_if = "Option::is_none")]
    pub scroll_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hits {
    pub total: TotalHits,
    pub max_score: Option<f64>,
    pub hits: Vec<SearchHit>,
}

/// Hit count, a bare number before 7.x and an object after
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Count(u64),
    Object { value: u64, relation: String },
}

impl TotalHits {
    pub fn value(&self) -> u64 {
        match self {
            TotalHits::Count(n) => *n,
            TotalHits::Object { value, .. } => *value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score")]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Dict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Dict>,
}

/// Tokens produced by an `_analyze` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResult {
    pub tokens: Vec<AnalyzeToken>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeToken {
    pub token: String,
    pub start_offset: u32,
    pub end_offset: u32,
    #[serde(rename = "type")]
    pub token_type: String,
    pub position: u32,
}

/// Outcome of indexing a single document
///
/// e.g. `{"_index":"my_index","_type":"groups","_id":"1","_version":1,"_shards":{...},"created":true}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertResult {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version")]
    pub version: u64,
    #[serde(rename = "_shards", default, skip_serializing_if = "Option::is_none")]
    pub shards: Option<ShardStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// Outcome of a `_bulk` call; per-item results are passed through as-is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkResult {
    pub took: u64,
    pub errors: bool,
    pub items: Vec<Dict>,
}
