//! Search, explain and validate requests

use std::fmt;

use serde_json::Value;

use crate::client::Elasticsearch;
use crate::dict::{self, Dict};
use crate::parser::{Decoded, RawParser, SearchResultParser, ValidateResultParser};
use crate::query::Query;
use crate::transport::Method;
use crate::url::{url_string, Params};
use crate::Result;

pub const SEARCH: &str = "search";
pub const EXPLAIN: &str = "explain";
pub const VALIDATE: &str = "validate";
pub const SOURCE: &str = "_source";
pub const SEARCH_TYPE: &str = "search_type";
pub const SCROLL: &str = "scroll";
pub const PRETTY: &str = "pretty";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchKind {
    Search,
    Explain,
    Validate,
}

/// A search request
///
/// Also used for `_explain` and `_validate/query` calls, which take the
/// same body but answer with a different response shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Search {
    url: String,
    params: Params,
    query: Dict,
    kind: SearchKind,
}

impl Search {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_kind(url, SearchKind::Search)
    }

    pub(crate) fn explain(url: impl Into<String>) -> Self {
        Self::with_kind(url, SearchKind::Explain)
    }

    pub(crate) fn validate(url: impl Into<String>) -> Self {
        Self::with_kind(url, SearchKind::Validate)
    }

    fn with_kind(url: impl Into<String>, kind: SearchKind) -> Self {
        Self {
            url: url.into(),
            params: Params::new(),
            query: Dict::new(),
            kind,
        }
    }

    /// Add a url parameter, e.g. `search_type`, `sort` or `explain`
    ///
    /// An empty value renders the parameter as a bare flag.
    pub fn add_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Ask the engine for an indented response
    pub fn pretty(self) -> Self {
        self.add_param(PRETTY, "")
    }

    /// Keep a scroll context alive for `keep_alive` (e.g. `1m`)
    pub fn scroll(self, keep_alive: impl Into<String>) -> Self {
        self.add_param(SCROLL, keep_alive)
    }

    /// Set a top-level clause such as `query` or `filter`
    pub fn add_query(mut self, query: impl Query) -> Self {
        self.query.insert(query.name().to_string(), query.body());
        self
    }

    /// Set a top-level argument, e.g. `size` or `from`
    pub fn add(mut self, argument: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(argument.into(), value.into());
        self
    }

    /// Restrict the returned `_source` to `field`; repeatable
    pub fn add_source(mut self, field: impl Into<String>) -> Self {
        dict::array_entry(&mut self.query, SOURCE).push(Value::String(field.into()));
        self
    }

    pub fn url_string(&self) -> String {
        url_string(&self.url, &self.params)
    }

    /// Request body, `None` when nothing was added
    pub fn body(&self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(dict::to_string(&self.query))
        }
    }

    /// GET /:index/:type/_search
    pub async fn get(&self, client: &Elasticsearch) -> Result<Decoded> {
        let url = self.url_string();
        match self.kind {
            SearchKind::Search => {
                client
                    .execute(Method::GET, &url, self.body(), &SearchResultParser)
                    .await
            }
            SearchKind::Explain => client.execute(Method::GET, &url, self.body(), &RawParser).await,
            SearchKind::Validate => {
                client
                    .execute(Method::GET, &url, self.body(), &ValidateResultParser)
                    .await
            }
        }
    }
}

impl fmt::Display for Search {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Bool, Object};
    use serde_json::json;

    fn search() -> Search {
        Search::new("/")
    }

    #[test]
    fn test_empty_search_has_no_body() {
        assert_eq!(search().body(), None);
        assert_eq!(search().to_string(), "");
    }

    #[test]
    fn test_search_with_source_filter() {
        let s = search()
            .add_query(Object::new("query").add_query(Object::match_all()))
            .add_source("title")
            .add_source("created");
        assert_eq!(
            s.to_string(),
            r#"{"_source":["title","created"],"query":{"match_all":{}}}"#
        );
    }

    #[test]
    fn test_search_arguments() {
        let s = search()
            .add_query(Object::new("query").add_query(
                Bool::new().add_should(Object::match_query().add("title", "War and Peace")),
            ))
            .add("size", 5)
            .add("from", 10);
        let body: Value = serde_json::from_str(&s.body().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "from": 10,
                "size": 5,
                "query": {"bool": {"should": {"match": {"title": "War and Peace"}}}}
            })
        );
    }

    #[test]
    fn test_add_query_overwrites_top_level_clause() {
        let s = search()
            .add_query(Object::new("query").add_query(Object::match_all()))
            .add_query(Object::new("query").add_query(Object::term().add("a", 1)));
        assert_eq!(s.to_string(), r#"{"query":{"term":{"a":1}}}"#);
    }

    #[test]
    fn test_params() {
        let s = Search::new("http://h/idx/_search")
            .pretty()
            .scroll("1m")
            .add_param("sort", "name.raw");
        assert_eq!(s.url_string(), "http://h/idx/_search?pretty&scroll=1m&sort=name.raw");
    }
}
