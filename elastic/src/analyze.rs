//! Analyze API: shows how a text is split into tokens

use crate::client::Elasticsearch;
use crate::parser::{AnalyzeResultParser, Decoded};
use crate::transport::Method;
use crate::url::{url_string, Params};
use crate::Result;

pub const ANALYZE: &str = "analyze";
pub const FIELD: &str = "field";
pub const ANALYZER: &str = "analyzer";
pub const TOKENIZER: &str = "tokenizer";
pub const FILTERS: &str = "filters";

/// An analyze request: GET /:index/_analyze
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analyze {
    url: String,
    params: Params,
}

impl Analyze {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Params::new(),
        }
    }

    /// Analyze with the analyzer mapped to `field`
    pub fn field(self, field: impl Into<String>) -> Self {
        self.add_param(FIELD, field)
    }

    /// Analyze with the analyzer called `name`
    pub fn analyzer(self, name: impl Into<String>) -> Self {
        self.add_param(ANALYZER, name)
    }

    /// e.g. `tokenizer=standard` or `filters=lowercase`
    pub fn add_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn url_string(&self) -> String {
        url_string(&self.url, &self.params)
    }

    /// GET /:index/_analyze with `text` as body
    pub async fn get(&self, client: &Elasticsearch, text: &str) -> Result<Decoded> {
        let body = if text.is_empty() { None } else { Some(text.to_string()) };
        client
            .execute(Method::GET, &self.url_string(), body, &AnalyzeResultParser)
            .await
    }
}
