//! Index aliases

use std::fmt;

use serde_json::Value;

use crate::client::Elasticsearch;
use crate::dict::{self, Dict};
use crate::parser::{Decoded, IndexResultParser};
use crate::transport::Method;
use crate::Result;

pub const ALIASES: &str = "_aliases";
pub const ACTIONS: &str = "actions";
pub const ADD: &str = "add";
pub const REMOVE: &str = "remove";

/// A batch of alias actions: POST /_aliases
///
/// The engine applies the whole batch atomically, which is how an alias is
/// switched from one index to another without downtime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alias {
    url: String,
    dict: Dict,
}

impl Alias {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            dict: Dict::new(),
        }
    }

    /// Append `{operation: {"index": index, "alias": alias}}` to `actions`
    pub fn add_action(mut self, operation: &str, index: &str, alias: &str) -> Self {
        let mut target = Dict::new();
        target.insert("index".to_string(), Value::String(index.to_string()));
        target.insert("alias".to_string(), Value::String(alias.to_string()));
        let action = dict::single(operation, Value::Object(target));
        dict::array_entry(&mut self.dict, ACTIONS).push(Value::Object(action));
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST /_aliases
    pub async fn post(&self, client: &Elasticsearch) -> Result<Decoded> {
        client
            .execute(Method::POST, &self.url, Some(self.to_string()), &IndexResultParser)
            .await
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&dict::to_string(&self.dict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions() {
        let alias = Alias::default()
            .add_action(REMOVE, "my_index_v1", "my_index")
            .add_action(ADD, "my_index_v2", "my_index");
        assert_eq!(
            alias.to_string(),
            r#"{"actions":[{"remove":{"alias":"my_index","index":"my_index_v1"}},{"add":{"alias":"my_index","index":"my_index_v2"}}]}"#
        );
    }

    #[test]
    fn test_empty_alias() {
        assert_eq!(Alias::default().to_string(), "{}");
    }
}
