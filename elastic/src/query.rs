//! Query clause builders
//!
//! Every clause is a name plus a JSON object body. [`Object`] is the general
//! purpose builder; [`Bool`] combines other clauses into `must`, `must_not`,
//! `should` and `filter` slots.
//!
//! Adding a second clause under a key that already holds one promotes the
//! key to an array of both, in call order:
//!
//! ```
//! use elastic::{Object, Query};
//!
//! let q = Object::new("")
//!     .add_query(Object::new("match").add("title", "fox"))
//!     .add_query(Object::new("match").add("body", "fox"));
//! assert_eq!(q.to_string(), r#"{"match":[{"title":"fox"},{"body":"fox"}]}"#);
//! ```

use std::fmt;

use serde_json::Value;

use crate::dict::{self, Dict};

pub const QUERY: &str = "query";
pub const FILTER: &str = "filter";
pub const FILTERED: &str = "filtered";
pub const BOOL: &str = "bool";
pub const MUST: &str = "must";
pub const MUST_NOT: &str = "must_not";
pub const SHOULD: &str = "should";
pub const MATCH: &str = "match";
pub const MATCH_ALL: &str = "match_all";
pub const MULTI_MATCH: &str = "multi_match";
pub const TERM: &str = "term";
pub const TERMS: &str = "terms";
pub const EXISTS: &str = "exists";
pub const RANGE: &str = "range";
pub const DIS_MAX: &str = "dis_max";
pub const QUERIES: &str = "queries";
pub const MINIMUM_SHOULD_MATCH: &str = "minimum_should_match";
pub const DISABLE_COORD: &str = "disable_coord";

/// A named clause that can be nested into another builder
pub trait Query {
    /// Key the clause is stored under in its parent
    fn name(&self) -> &str;

    /// The clause body, copied out of the builder
    fn body(&self) -> Value;
}

impl<Q: Query + ?Sized> Query for &Q {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn body(&self) -> Value {
        (**self).body()
    }
}

/// General purpose clause builder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    name: String,
    kv: Dict,
}

impl Object {
    /// Create an empty clause. An empty name is used for a bare top-level body.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kv: Dict::new(),
        }
    }

    /// `term` filter
    pub fn term() -> Self {
        Self::new(TERM)
    }

    /// `terms` filter, like `term` but matching any of several values
    pub fn terms() -> Self {
        Self::new(TERMS)
    }

    /// `exists` filter
    pub fn exists() -> Self {
        Self::new(EXISTS)
    }

    /// `match` query
    pub fn match_query() -> Self {
        Self::new(MATCH)
    }

    pub fn match_all() -> Self {
        Self::new(MATCH_ALL)
    }

    pub fn multi_match() -> Self {
        Self::new(MULTI_MATCH)
    }

    pub fn range() -> Self {
        Self::new(RANGE)
    }

    pub fn filtered() -> Self {
        Self::new(FILTERED)
    }

    pub fn filter() -> Self {
        Self::new(FILTER)
    }

    /// `dis_max` query; feed its sub-queries with [`Object::add_queries`]
    pub fn dis_max() -> Self {
        Self::new(DIS_MAX)
    }

    /// Set `key` to `value`, replacing any previous value
    pub fn add(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kv.insert(key.into(), value.into());
        self
    }

    /// Set `key` to an array of `values`
    ///
    /// An empty iterator stores `null`.
    pub fn add_multiple<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.kv.insert(key.into(), dict::multiple(values));
        self
    }

    /// Nest a clause under its own name, promoting to an array on collision
    pub fn add_query(mut self, query: impl Query) -> Self {
        dict::insert_promoted(&mut self.kv, query.name(), query.body());
        self
    }

    /// Nest every clause as `{name: body}` under `wrapper`
    ///
    /// Two or more clauses produce `{wrapper: [{n1: b1}, {n2: b2}, ...]}`.
    pub fn add_queries<I, Q>(mut self, wrapper: &str, queries: I) -> Self
    where
        I: IntoIterator<Item = Q>,
        Q: Query,
    {
        for query in queries {
            let wrapped = dict::single(query.name(), query.body());
            dict::insert_promoted(&mut self.kv, wrapper, Value::Object(wrapped));
        }
        self
    }

    /// Read access to the accumulated body
    pub fn kv(&self) -> &Dict {
        &self.kv
    }

    pub fn into_dict(self) -> Dict {
        self.kv
    }
}

impl Query for Object {
    fn name(&self) -> &str {
        &self.name
    }

    fn body(&self) -> Value {
        Value::Object(self.kv.clone())
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&dict::to_string(&self.kv))
    }
}

/// Boolean clause combining other clauses
///
/// Each slot is independent: one clause renders as `{slot: {name: body}}`,
/// two or more as `{slot: [{name: body}, ...]}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bool {
    kv: Dict,
}

impl Bool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clause that must match
    pub fn add_must(mut self, query: impl Query) -> Self {
        self.add_clause(MUST, query);
        self
    }

    /// Clause that must not match
    pub fn add_must_not(mut self, query: impl Query) -> Self {
        self.add_clause(MUST_NOT, query);
        self
    }

    /// Clause that should match
    pub fn add_should(mut self, query: impl Query) -> Self {
        self.add_clause(SHOULD, query);
        self
    }

    /// Clause that must match without contributing to the score
    pub fn add_filter(mut self, query: impl Query) -> Self {
        self.add_clause(FILTER, query);
        self
    }

    /// Scalar parameter such as `minimum_should_match` or `disable_coord`
    pub fn add(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kv.insert(key.into(), value.into());
        self
    }

    pub fn kv(&self) -> &Dict {
        &self.kv
    }

    fn add_clause(&mut self, slot: &str, query: impl Query) {
        let clause = dict::single(query.name(), query.body());
        dict::insert_promoted(&mut self.kv, slot, Value::Object(clause));
    }
}

impl Query for Bool {
    fn name(&self) -> &str {
        BOOL
    }

    fn body(&self) -> Value {
        Value::Object(self.kv.clone())
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&dict::to_string(&dict::single(BOOL, self.body())))
    }
}
