//! Bulk indexing
//!
//! The body is newline-delimited JSON: an action line followed by the
//! document it applies to.
//!
//! ```text
//! {"index":{"_id":1}}
//! {"price":10,"productID":"XHDK-A-1293-#fJ3"}
//! ```

use std::fmt;

use serde_json::Value;

use crate::client::Elasticsearch;
use crate::dict::{self, Dict};
use crate::parser::{BulkResultParser, Decoded};
use crate::transport::Method;
use crate::Result;

pub const BULK: &str = "bulk";
pub const INDEX: &str = "index";
pub const ID: &str = "_id";

/// One document to index
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    id: i64,
    doc: Dict,
}

impl Operation {
    pub fn new(id: i64) -> Self {
        Self { id, doc: Dict::new() }
    }

    /// Operation for an existing JSON object
    pub fn from_document(id: i64, doc: Dict) -> Self {
        Self { id, doc }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn add(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.doc.insert(name.into(), value.into());
        self
    }

    /// Set a multi-valued field; no values stores `null`
    pub fn add_multiple<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.doc.insert(name.into(), dict::multiple(values));
        self
    }

    fn action(&self) -> Dict {
        dict::single(INDEX, Value::Object(dict::single(ID, Value::from(self.id))))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&dict::to_string(&self.doc))
    }
}

/// A bulk request: POST /:index/:type/_bulk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bulk {
    url: String,
    ops: Vec<Dict>,
}

impl Bulk {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ops: Vec::new(),
        }
    }

    pub fn add_operation(mut self, op: Operation) -> Self {
        self.ops.push(op.action());
        self.ops.push(op.doc);
        self
    }

    /// Number of queued operations
    pub fn len(&self) -> usize {
        self.ops.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST /:index/:type/_bulk
    ///
    /// The engine requires the last line to be newline terminated.
    pub async fn post(&self, client: &Elasticsearch) -> Result<Decoded> {
        let body = format!("{}\n", self);
        client
            .execute(Method::POST, &self.url, Some(body), &BulkResultParser)
            .await
    }
}

impl fmt::Display for Bulk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.ops.iter().map(dict::to_string).collect();
        f.write_str(&lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bulk() {
        let bulk = Bulk::default()
            .add_operation(Operation::new(1).add("price", 10).add("productID", "XHDK-A-1293-#fJ3"))
            .add_operation(Operation::new(2).add("price", 20).add("productID", "KDKE-B-9947-#kL5"));
        assert_eq!(
            bulk.to_string(),
            "{\"index\":{\"_id\":1}}\n\
             {\"price\":10,\"productID\":\"XHDK-A-1293-#fJ3\"}\n\
             {\"index\":{\"_id\":2}}\n\
             {\"price\":20,\"productID\":\"KDKE-B-9947-#kL5\"}"
        );
        assert_eq!(bulk.len(), 2);
    }

    #[test]
    fn test_empty_bulk() {
        let bulk = Bulk::default();
        assert!(bulk.is_empty());
        assert_eq!(bulk.to_string(), "");
    }

    #[test]
    fn test_operation_multiple_values() {
        let op = Operation::new(7).add_multiple("tags", ["search", "open_source"]);
        assert_eq!(op.to_string(), r#"{"tags":["search","open_source"]}"#);
        assert_eq!(op.id(), 7);
    }

    #[test]
    fn test_operation_without_values_stores_null() {
        let op = Operation::new(8).add_multiple("tags", Vec::<&str>::new());
        assert_eq!(op.to_string(), r#"{"tags":null}"#);
    }

    #[test]
    fn test_operation_from_document() {
        let doc = match json!({"title": "War and Peace"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let bulk = Bulk::default().add_operation(Operation::from_document(3, doc));
        assert_eq!(
            bulk.to_string(),
            "{\"index\":{\"_id\":3}}\n{\"title\":\"War and Peace\"}"
        );
    }
}
