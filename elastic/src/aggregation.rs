//! Aggregation builders
//!
//! An [`Aggregation`] request holds root [`Bucket`]s under `aggs`. A bucket
//! carries metrics keyed by metric name and may nest child buckets under its
//! own `aggs` key, to any depth.
//!
//! ```
//! use elastic::aggregation::{Bucket, AVG, FIELD};
//! use elastic::Value;
//!
//! let tree = Bucket::new("b1")
//!     .add_metric(AVG, FIELD, "price")
//!     .add_bucket(Bucket::new("b2").add_term(FIELD, "make"));
//! let parsed: Value = serde_json::from_str(&tree.to_string()).unwrap();
//! assert_eq!(parsed, serde_json::json!({"b1": {
//!     "avg": {"field": "price"},
//!     "aggs": {"b2": {"terms": {"field": "make"}}}
//! }}));
//! ```

use std::fmt;

use serde_json::Value;

use crate::client::Elasticsearch;
use crate::dict::{self, Dict};
use crate::parser::{Decoded, SearchResultParser};
use crate::query::Query;
use crate::search::SEARCH_TYPE;
use crate::transport::Method;
use crate::url::{url_string, Params};
use crate::Result;

/// Abbreviated key of the aggregation section
pub const AGGS: &str = "aggs";
pub const AGGREGATIONS: &str = "aggregations";
pub const QUERY: &str = "query";
pub const POST_FILTER: &str = "post_filter";

// Buckets
pub const TERMS: &str = "terms";
pub const SIGNIFICANT_TERMS: &str = "significant_terms";
pub const HISTOGRAM: &str = "histogram";
pub const DATE_HISTOGRAM: &str = "date_histogram";
pub const RANGE: &str = "range";
pub const GLOBAL: &str = "global";
pub const FILTER: &str = "filter";

// Metrics
pub const COUNT: &str = "count";
pub const SUM: &str = "sum";
pub const AVG: &str = "avg";
pub const MIN: &str = "min";
pub const MAX: &str = "max";
pub const STATS: &str = "stats";
/// Variety of statistics (avg, count, std_deviation, ...)
pub const EXTENDED_STATS: &str = "extended_stats";
pub const CARDINALITY: &str = "cardinality";
pub const PERCENTILES: &str = "percentiles";
pub const PERCENTILE_RANKS: &str = "percentile_ranks";
pub const TOP_HITS: &str = "top_hits";

// Parameters
pub const FIELD: &str = "field";
/// Width of each histogram bucket, e.g. `10` or `"month"`
pub const INTERVAL: &str = "interval";
/// Number of terms to generate
pub const SIZE: &str = "size";
/// Date format of date histogram bucket keys
pub const FORMAT: &str = "format";
/// Forces empty buckets to be returned when set to 0
pub const MIN_DOC_COUNT: &str = "min_doc_count";
/// Extends the bucket range past the bounds of the actual data
pub const EXTENDED_BOUNDS: &str = "extended_bounds";
pub const ORDER: &str = "order";
pub const PRECISION_THRESHOLD: &str = "precision_threshold";
pub const PERCENTS: &str = "percents";
pub const VALUES: &str = "values";

/// An aggregation request: GET /:index/:type/_search
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    url: String,
    params: Params,
    aggs: Dict,
    extra: Dict,
}

impl Aggregation {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Params::new(),
            aggs: Dict::new(),
            extra: Dict::new(),
        }
    }

    /// Add a root bucket
    pub fn add(mut self, bucket: Bucket) -> Self {
        self.aggs.insert(bucket.name, Value::Object(bucket.query));
        self
    }

    /// Scope the aggregation to documents matching `query`
    pub fn add_query(mut self, query: impl Query) -> Self {
        dict::object_entry(&mut self.extra, QUERY).insert(query.name().to_string(), query.body());
        self
    }

    /// Filter the returned hits without changing the aggregation scope
    pub fn add_post_filter(mut self, query: impl Query) -> Self {
        dict::object_entry(&mut self.extra, POST_FILTER)
            .insert(query.name().to_string(), query.body());
        self
    }

    /// Set a top-level argument next to `aggs`, e.g. `size: 0`
    pub fn add_argument(mut self, argument: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(argument.into(), value.into());
        self
    }

    /// Set the `search_type` url parameter, e.g. `count`
    pub fn set_search_type(self, search_type: impl Into<String>) -> Self {
        self.add_param(SEARCH_TYPE, search_type)
    }

    pub fn add_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn url_string(&self) -> String {
        url_string(&self.url, &self.params)
    }

    /// Request body, `None` until a bucket is added
    pub fn body(&self) -> Option<String> {
        if self.aggs.is_empty() {
            return None;
        }
        let mut dict = self.extra.clone();
        dict.insert(AGGS.to_string(), Value::Object(self.aggs.clone()));
        Some(dict::to_string(&dict))
    }

    /// GET /:index/:type/_search
    pub async fn get(&self, client: &Elasticsearch) -> Result<Decoded> {
        client
            .execute(Method::GET, &self.url_string(), self.body(), &SearchResultParser)
            .await
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body().unwrap_or_default())
    }
}

/// A named bucket of an aggregation tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bucket {
    name: String,
    query: Dict,
}

impl Bucket {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: Dict::new(),
        }
    }

    /// Set a parameter of the `terms` bucket
    pub fn add_term(self, name: &str, value: impl Into<Value>) -> Self {
        self.add_metric(TERMS, name, value)
    }

    /// Set `name` to `value` inside the `metric` object
    ///
    /// Repeated calls for the same metric accumulate parameters; a repeated
    /// parameter name is replaced.
    pub fn add_metric(mut self, metric: &str, name: &str, value: impl Into<Value>) -> Self {
        dict::object_entry(&mut self.query, metric).insert(name.to_string(), value.into());
        self
    }

    /// Set `name` to a whole parameter object, e.g. a `date_histogram` with
    /// field, interval and format
    pub fn add_dict(mut self, name: impl Into<String>, value: Dict) -> Self {
        self.query.insert(name.into(), Value::Object(value));
        self
    }

    /// Nest `bucket` under this bucket's `aggs`
    pub fn add_bucket(mut self, bucket: Bucket) -> Self {
        dict::object_entry(&mut self.query, AGGS).insert(bucket.name, Value::Object(bucket.query));
        self
    }

    pub fn query(&self) -> &Dict {
        &self.query
    }
}

impl Query for Bucket {
    fn name(&self) -> &str {
        &self.name
    }

    fn body(&self) -> Value {
        Value::Object(self.query.clone())
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&dict::to_string(&dict::single(&self.name, self.body())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Object;
    use serde_json::json;

    fn aggs() -> Aggregation {
        Aggregation::new("/")
    }

    fn parsed(s: &str) -> Value {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn test_no_bucket_no_body() {
        assert_eq!(aggs().body(), None);
        assert_eq!(aggs().add_query(Object::match_all()).to_string(), "");
    }

    #[test]
    fn test_single_terms_bucket() {
        let a = aggs().add(Bucket::new("colors").add_term(FIELD, "color"));
        assert_eq!(a.to_string(), r#"{"aggs":{"colors":{"terms":{"field":"color"}}}}"#);
    }

    #[test]
    fn test_nested_buckets() {
        let a = aggs().add(
            Bucket::new("colors")
                .add_term(FIELD, "color")
                .add_bucket(Bucket::new("avg_price").add_metric(AVG, FIELD, "price"))
                .add_bucket(
                    Bucket::new("make")
                        .add_term(FIELD, "make")
                        .add_bucket(Bucket::new("min_price").add_metric(MIN, FIELD, "price"))
                        .add_bucket(Bucket::new("max_price").add_metric(MAX, FIELD, "price")),
                ),
        );
        assert_eq!(
            parsed(&a.to_string()),
            json!({"aggs": {"colors": {
                "terms": {"field": "color"},
                "aggs": {
                    "avg_price": {"avg": {"field": "price"}},
                    "make": {
                        "terms": {"field": "make"},
                        "aggs": {
                            "min_price": {"min": {"field": "price"}},
                            "max_price": {"max": {"field": "price"}}
                        }
                    }
                }
            }}})
        );
    }

    #[test]
    fn test_metric_parameters_accumulate() {
        let a = aggs().add(
            Bucket::new("makes")
                .add_term(FIELD, "make")
                .add_term(SIZE, 10)
                .add_bucket(Bucket::new("stats").add_metric(EXTENDED_STATS, FIELD, "price")),
        );
        assert_eq!(
            parsed(&a.to_string()),
            json!({"aggs": {"makes": {
                "terms": {"field": "make", "size": 10},
                "aggs": {"stats": {"extended_stats": {"field": "price"}}}
            }}})
        );
    }

    #[test]
    fn test_repeated_metric_parameter_replaces() {
        let b = Bucket::new("b").add_metric(AVG, FIELD, "price").add_metric(AVG, FIELD, "cost");
        assert_eq!(b.body(), json!({"avg": {"field": "cost"}}));
    }

    #[test]
    fn test_add_dict_date_histogram() {
        let mut histogram = Dict::new();
        histogram.insert(FIELD.into(), json!("sold"));
        histogram.insert(INTERVAL.into(), json!("month"));
        histogram.insert(FORMAT.into(), json!("yyyy-MM-dd"));
        let b = Bucket::new("sales")
            .add_dict(DATE_HISTOGRAM, histogram)
            .add_bucket(Bucket::new("distinct_colors").add_metric(CARDINALITY, FIELD, "color"));
        assert_eq!(
            b.body(),
            json!({
                "date_histogram": {"field": "sold", "interval": "month", "format": "yyyy-MM-dd"},
                "aggs": {"distinct_colors": {"cardinality": {"field": "color"}}}
            })
        );
    }

    #[test]
    fn test_query_scope() {
        let a = aggs()
            .add_query(Object::match_query().add("make", "ford"))
            .add(Bucket::new("colors").add_term(FIELD, "color"));
        assert_eq!(
            parsed(&a.to_string()),
            json!({
                "aggs": {"colors": {"terms": {"field": "color"}}},
                "query": {"match": {"make": "ford"}}
            })
        );
    }

    #[test]
    fn test_query_scope_nested_filter() {
        let a = aggs()
            .add_query(Object::filtered().add_query(Object::filter().add_query(
                Object::range().add_query(Object::new("price").add("gte", 10000)),
            )))
            .add(Bucket::new("single_avg_price").add_metric(AVG, FIELD, "price"));
        assert_eq!(
            parsed(&a.to_string()),
            json!({
                "aggs": {"single_avg_price": {"avg": {"field": "price"}}},
                "query": {"filtered": {"filter": {"range": {"price": {"gte": 10000}}}}}
            })
        );
    }

    #[test]
    fn test_post_filter_is_sibling_of_aggs() {
        let a = aggs()
            .add_query(Object::match_query().add("make", "ford"))
            .add_post_filter(Object::term().add("color", "green"))
            .add(Bucket::new("all_colors").add_term(FIELD, "color"))
            .add_argument(SIZE, 0);
        assert_eq!(
            parsed(&a.to_string()),
            json!({
                "size": 0,
                "query": {"match": {"make": "ford"}},
                "post_filter": {"term": {"color": "green"}},
                "aggs": {"all_colors": {"terms": {"field": "color"}}}
            })
        );
    }

    #[test]
    fn test_search_type_param() {
        let a = Aggregation::new("http://h/cars/transactions/_search").set_search_type(COUNT);
        assert_eq!(a.url_string(), "http://h/cars/transactions/_search?search_type=count");
    }

    #[test]
    fn test_bucket_nesting_copies_child() {
        let child = Bucket::new("child").add_metric(AVG, FIELD, "price");
        let parent = Bucket::new("parent").add_bucket(child.clone());
        let _child = child.add_metric(MAX, FIELD, "price");
        assert_eq!(
            parent.body(),
            json!({"aggs": {"child": {"avg": {"field": "price"}}}})
        );
    }
}
