//! Fluent request builders for the Elasticsearch REST API
//!
//! The crate assembles nested JSON request bodies (queries, aggregations,
//! index settings, mappings, analyzers) from small composable builders and
//! hands the rendered URL and body to a [`Transport`].
//!
//! # Builders
//!
//! - [`Object`] / [`Bool`] - query clauses (`match`, `term`, `bool`, ...)
//! - [`Aggregation`] / [`Bucket`] - aggregation trees
//! - [`Index`] / [`Analyzer`] - index settings and analysis chains
//! - [`Mapping`] / [`DocType`] / [`Template`] - field mappings
//! - [`Search`], [`Bulk`], [`Insert`], [`Alias`], [`Analyze`], [`ShardMgmtOp`]
//!   - request wrappers bound to a URL
//!
//! # Example
//!
//! ```
//! use elastic::{Bool, Object, Query};
//!
//! let query = Object::new("query").add_query(
//!     Bool::new()
//!         .add_must(Object::match_query().add("title", "quick"))
//!         .add_must(Object::match_query().add("body", "fox")),
//! );
//! assert_eq!(
//!     query.to_string(),
//!     r#"{"bool":{"must":[{"match":{"title":"quick"}},{"match":{"body":"fox"}}]}}"#
//! );
//! assert_eq!(query.name(), "query");
//! ```

pub mod aggregation;
pub mod alias;
pub mod analyze;
pub mod bulk;
pub mod client;
pub mod config;
pub mod dict;
pub mod error;
pub mod index;
pub mod insert;
pub mod mapping;
pub mod parser;
pub mod query;
pub mod response;
pub mod search;
pub mod shard_mgmt;
pub mod transport;
pub mod url;

pub use aggregation::{Aggregation, Bucket};
pub use alias::Alias;
pub use analyze::Analyze;
pub use bulk::{Bulk, Operation};
pub use client::Elasticsearch;
pub use config::ClientConfig;
pub use dict::{promote, Dict};
pub use error::Error;
pub use index::{Analyzer, Index};
pub use insert::Insert;
pub use mapping::{DocType, Mapping, Template};
pub use parser::{Decoded, Parser};
pub use query::{Bool, Object, Query};
pub use search::Search;
pub use shard_mgmt::ShardMgmtOp;
pub use transport::{HttpTransport, Method, Transport};

pub use serde_json::Value;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, Error>;
