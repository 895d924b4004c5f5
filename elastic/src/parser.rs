//! Response decoding
//!
//! A parser tries an ordered list of response shapes against the raw body
//! and returns the first one that deserializes. A body matching none of
//! them decodes to [`Decoded::Unparsed`], which keeps "the engine returned
//! an error" ([`Decoded::Failure`]) distinguishable from "the response was
//! not understood".

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::response::{
    AnalyzeResult, BulkResult, Failure, InsertResult, SearchResult, Success, ValidationResult,
};

/// A decoded response body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Decoded {
    Search(SearchResult),
    Insert(InsertResult),
    Bulk(BulkResult),
    Analyze(AnalyzeResult),
    Validation(ValidationResult),
    Success(Success),
    Failure(Failure),
    /// Any JSON document, for calls without a typed response
    Raw(Value),
    /// Body text that matched none of the expected shapes
    Unparsed(String),
}

impl Decoded {
    pub fn is_failure(&self) -> bool {
        matches!(self, Decoded::Failure(_))
    }

    pub fn is_unparsed(&self) -> bool {
        matches!(self, Decoded::Unparsed(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Decoded::Search(_) => "search",
            Decoded::Insert(_) => "insert",
            Decoded::Bulk(_) => "bulk",
            Decoded::Analyze(_) => "analyze",
            Decoded::Validation(_) => "validation",
            Decoded::Success(_) => "success",
            Decoded::Failure(_) => "failure",
            Decoded::Raw(_) => "raw",
            Decoded::Unparsed(_) => "unparsed",
        }
    }
}

/// Response shapes a parser can try
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Search,
    Insert,
    Bulk,
    Analyze,
    Validation,
    Success,
    Failure,
    Raw,
}

impl Shape {
    fn decode(self, data: &[u8]) -> Option<Decoded> {
        match self {
            Shape::Search => serde_json::from_slice(data).ok().map(Decoded::Search),
            Shape::Insert => serde_json::from_slice(data).ok().map(Decoded::Insert),
            Shape::Bulk => serde_json::from_slice(data).ok().map(Decoded::Bulk),
            Shape::Analyze => serde_json::from_slice(data).ok().map(Decoded::Analyze),
            Shape::Validation => serde_json::from_slice(data).ok().map(Decoded::Validation),
            Shape::Success => serde_json::from_slice(data).ok().map(Decoded::Success),
            Shape::Failure => serde_json::from_slice(data).ok().map(Decoded::Failure),
            Shape::Raw => serde_json::from_slice(data).ok().map(Decoded::Raw),
        }
    }
}

/// Decode `data` as the first matching shape
pub fn decode(data: &[u8], shapes: &[Shape]) -> Decoded {
    for shape in shapes {
        if let Some(decoded) = shape.decode(data) {
            debug!(shape = ?shape, "decoded response");
            return decoded;
        }
    }

    let text = String::from_utf8_lossy(data).into_owned();
    warn!("Failed to parse response: {}", text);
    Decoded::Unparsed(text)
}

/// Strategy for decoding the body of one kind of API call
pub trait Parser: Send + Sync {
    fn parse(&self, data: &[u8]) -> Decoded;
}

/// Search and explain responses
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResultParser;

impl Parser for SearchResultParser {
    fn parse(&self, data: &[u8]) -> Decoded {
        decode(data, &[Shape::Search, Shape::Success, Shape::Failure])
    }
}

/// Single-document indexing responses
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertResultParser;

impl Parser for InsertResultParser {
    fn parse(&self, data: &[u8]) -> Decoded {
        decode(data, &[Shape::Insert, Shape::Success, Shape::Failure])
    }
}

/// Index, mapping, alias and shard management responses
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexResultParser;

impl Parser for IndexResultParser {
    fn parse(&self, data: &[u8]) -> Decoded {
        decode(data, &[Shape::Success, Shape::Failure])
    }
}

/// `_validate/query` responses
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateResultParser;

impl Parser for ValidateResultParser {
    fn parse(&self, data: &[u8]) -> Decoded {
        decode(data, &[Shape::Validation, Shape::Failure])
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeResultParser;

impl Parser for AnalyzeResultParser {
    fn parse(&self, data: &[u8]) -> Decoded {
        decode(data, &[Shape::Analyze, Shape::Failure])
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BulkResultParser;

impl Parser for BulkResultParser {
    fn parse(&self, data: &[u8]) -> Decoded {
        decode(data, &[Shape::Bulk, Shape::Failure])
    }
}

/// Keeps any JSON body as a [`Value`], e.g. mapping or refresh responses
#[derive(Debug, Clone, Copy, Default)]
pub struct RawParser;

impl Parser for RawParser {
    fn parse(&self, data: &[u8]) -> Decoded {
        decode(data, &[Shape::Failure, Shape::Raw])
    }
}
