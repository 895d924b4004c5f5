//! Shard management calls: refresh, flush and optimize

use crate::client::Elasticsearch;
use crate::parser::{Decoded, RawParser};
use crate::transport::Method;
use crate::url::{url_string, Params};
use crate::Result;

/// Make recently indexed documents visible to search
pub const REFRESH: &str = "refresh";
/// Commit segments and truncate the translog
pub const FLUSH: &str = "flush";
/// Merge segments, e.g. down to `max_num_segments`
pub const OPTIMIZE: &str = "optimize";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShardMgmtOp {
    url: String,
    params: Params,
}

impl ShardMgmtOp {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Params::new(),
        }
    }

    /// e.g. `wait_for_ongoing` for flush, `max_num_segments=1` for optimize
    pub fn add_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn url_string(&self) -> String {
        url_string(&self.url, &self.params)
    }

    /// POST /:index/_refresh|_flush|_optimize
    pub async fn post(&self, client: &Elasticsearch) -> Result<Decoded> {
        client
            .execute(Method::POST, &self.url_string(), None, &RawParser)
            .await
    }
}
