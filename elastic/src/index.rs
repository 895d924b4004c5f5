//! Index creation and settings

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::client::Elasticsearch;
use crate::dict::{self, Dict};
use crate::mapping::{Mapping, MAPPINGS};
use crate::parser::{Decoded, IndexResultParser, RawParser};
use crate::search::PRETTY;
use crate::transport::Method;
use crate::url::{url_string, Params};
use crate::Result;

pub const SETTINGS: &str = "settings";
pub const ANALYSIS: &str = "analysis";
pub const ALIAS: &str = "_alias";

// Settings
pub const NUMBER_OF_SHARDS: &str = "number_of_shards";
pub const NUMBER_OF_REPLICAS: &str = "number_of_replicas";
pub const REFRESH_INTERVAL: &str = "refresh_interval";

// Analysis sections
pub const ANALYZER: &str = "analyzer";
pub const TOKENIZER: &str = "tokenizer";
pub const FILTER: &str = "filter";
pub const CHAR_FILTER: &str = "char_filter";

// Analyzer attributes
pub const TYPE: &str = "type";
pub const STOPWORDS: &str = "stopwords";
pub const MIN_SHINGLE_SIZE: &str = "min_shingle_size";
pub const MAX_SHINGLE_SIZE: &str = "max_shingle_size";
pub const OUTPUT_UNIGRAMS: &str = "output_unigrams";

/// An index definition: PUT|DELETE /:index
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    url: String,
    params: Params,
    dict: Dict,
}

impl Index {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Params::new(),
            dict: Dict::new(),
        }
    }

    /// Replace the whole `settings` object
    pub fn settings(mut self, settings: Dict) -> Self {
        self.dict.insert(SETTINGS.to_string(), Value::Object(settings));
        self
    }

    /// Nest `mapping` under `mappings.<doctype>`
    pub fn mappings(mut self, doctype: impl Into<String>, mapping: &Mapping) -> Self {
        dict::object_entry(&mut self.dict, MAPPINGS)
            .insert(doctype.into(), Value::Object(mapping.body().clone()));
        self
    }

    /// Target `/:index/_alias/:alias` instead of the index itself
    pub fn set_alias(mut self, alias: &str) -> Self {
        self.url = format!("{}/{}/{}", self.url, ALIAS, alias);
        self
    }

    pub fn add_setting(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        dict::object_entry(&mut self.dict, SETTINGS).insert(name.into(), value.into());
        self
    }

    pub fn set_shards_nb(self, number: u32) -> Self {
        self.add_setting(NUMBER_OF_SHARDS, number)
    }

    pub fn set_replicas_nb(self, number: u32) -> Self {
        self.add_setting(NUMBER_OF_REPLICAS, number)
    }

    /// e.g. `1s`, or `-1` to disable refresh
    pub fn set_refresh_interval(self, interval: impl Into<String>) -> Self {
        self.add_setting(REFRESH_INTERVAL, interval.into())
    }

    /// Register an analysis section under `settings.analysis`
    ///
    /// Entries already present in the same section are merged key by key, so
    /// several analyzers can contribute to one `filter` or `analyzer` section.
    pub fn add_analyzer(mut self, analyzer: Analyzer) -> Self {
        let analysis = dict::object_entry(dict::object_entry(&mut self.dict, SETTINGS), ANALYSIS);
        let section = dict::object_entry(analysis, &analyzer.name);
        for (entry, attributes) in analyzer.entries {
            dict::merge(dict::object_entry(section, &entry), attributes);
        }
        self
    }

    pub fn pretty(mut self) -> Self {
        self.params.insert(PRETTY.to_string(), String::new());
        self
    }

    pub fn url_string(&self) -> String {
        url_string(&self.url, &self.params)
    }

    pub fn body(&self) -> &Dict {
        &self.dict
    }

    /// PUT /:index
    pub async fn put(&self, client: &Elasticsearch) -> Result<Decoded> {
        let body = dict::to_string(&self.dict);
        client
            .execute(Method::PUT, &self.url_string(), Some(body), &IndexResultParser)
            .await
    }

    /// DELETE /:index
    pub async fn delete(&self, client: &Elasticsearch) -> Result<Decoded> {
        client
            .execute(Method::DELETE, &self.url_string(), None, &IndexResultParser)
            .await
    }

    /// GET /:index, returns settings and mappings as raw JSON
    pub async fn get(&self, client: &Elasticsearch) -> Result<Decoded> {
        client
            .execute(Method::GET, &self.url_string(), None, &RawParser)
            .await
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&dict::to_string(&self.dict))
    }
}

/// One section of the analysis settings (`analyzer`, `filter`,
/// `char_filter` or `tokenizer`) with its named entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analyzer {
    name: String,
    entries: BTreeMap<String, Dict>,
}

impl Analyzer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Set one attribute of `entry`
    pub fn add_attribute(
        mut self,
        entry: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.entries
            .entry(entry.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    /// Set several attributes of `entry` at once
    pub fn add_attributes(mut self, entry: impl Into<String>, attributes: Dict) -> Self {
        dict::merge(self.entries.entry(entry.into()).or_default(), attributes);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Dict = self
            .entries
            .iter()
            .map(|(name, attributes)| (name.clone(), Value::Object(attributes.clone())))
            .collect();
        f.write_str(&dict::to_string(&dict::single(&self.name, Value::Object(entries))))
    }
}
