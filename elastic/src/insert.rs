//! Single document indexing

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::client::Elasticsearch;
use crate::error::Error;
use crate::parser::{Decoded, InsertResultParser};
use crate::transport::Method;
use crate::Result;

/// An insert request: PUT /:index/:type/:id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insert {
    url: String,
    doc: Option<(i64, Value)>,
}

impl Insert {
    /// `url` is the `/:index/:type` prefix, the id is appended on send
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            doc: None,
        }
    }

    /// Set the document to store under `id`
    pub fn document(mut self, id: i64, doc: impl Into<Value>) -> Self {
        self.doc = Some((id, doc.into()));
        self
    }

    /// Set the document from any serializable value
    pub fn document_from<T: Serialize>(self, id: i64, doc: &T) -> Result<Self> {
        let value = serde_json::to_value(doc)?;
        Ok(self.document(id, value))
    }

    /// Document URL, the bare `/:index/:type` prefix until a document is set
    pub fn url(&self) -> String {
        match &self.doc {
            Some((id, _)) => format!("{}/{}", self.url, id),
            None => self.url.clone(),
        }
    }

    /// PUT /:index/:type/:id
    pub async fn put(&self, client: &Elasticsearch) -> Result<Decoded> {
        let Some((_, doc)) = &self.doc else {
            return Err(Error::InvalidArgument(format!(
                "no document set for insert into {}",
                self.url
            )));
        };
        client
            .execute(Method::PUT, &self.url(), Some(doc.to_string()), &InsertResultParser)
            .await
    }
}

impl fmt::Display for Insert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.doc {
            Some((_, doc)) => write!(f, "{}", doc),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[test]
    fn test_insert() {
        let insert = Insert::default().document(
            1,
            json!({"title": "War and Peace", "author": "Leo Tolstoy"}),
        );
        assert_eq!(insert.to_string(), r#"{"author":"Leo Tolstoy","title":"War and Peace"}"#);
    }

    #[test]
    fn test_insert_url() {
        let insert = Insert::new("http://localhost:9200/library/book").document(42, json!({}));
        assert_eq!(insert.url(), "http://localhost:9200/library/book/42");
    }

    #[test]
    fn test_insert_serializable() {
        #[derive(Serialize)]
        struct Book {
            title: &'static str,
            pages: u32,
        }

        let insert = Insert::default()
            .document_from(5, &Book { title: "Dune", pages: 412 })
            .unwrap();
        assert_eq!(insert.to_string(), r#"{"pages":412,"title":"Dune"}"#);
    }

    #[test]
    fn test_insert_without_document() {
        let insert = Insert::new("http://localhost:9200/library/book");
        assert_eq!(insert.to_string(), "");
        assert_eq!(insert.url(), "http://localhost:9200/library/book");
    }
}
