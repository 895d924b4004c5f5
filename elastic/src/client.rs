//! Elasticsearch client
//!
//! The client knows the engine address and owns the transport. Its factory
//! methods return request builders bound to the right URL; the builders'
//! `get`/`put`/`post`/`delete` methods hand the rendered request back to
//! [`Elasticsearch::execute`].

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::aggregation::Aggregation;
use crate::alias::{Alias, ALIASES};
use crate::analyze::{Analyze, ANALYZE};
use crate::bulk::{Bulk, BULK};
use crate::config::ClientConfig;
use crate::error::Error;
use crate::index::Index;
use crate::insert::Insert;
use crate::mapping::{Mapping, MAPPING};
use crate::parser::{Decoded, Parser};
use crate::search::{Search, EXPLAIN, SEARCH, VALIDATE};
use crate::shard_mgmt::{ShardMgmtOp, FLUSH, OPTIMIZE, REFRESH};
use crate::transport::{HttpTransport, Method, Transport};
use crate::url::request_url;
use crate::Result;

/// Entry point for building and sending requests
#[derive(Clone)]
pub struct Elasticsearch {
    addr: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Elasticsearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Elasticsearch")
            .field("addr", &self.addr)
            .finish_non_exhaustive()
    }
}

impl Elasticsearch {
    /// Client for `addr` (`host:port`) using a default HTTP transport
    pub fn new(addr: impl Into<String>) -> Self {
        Self::with_transport(addr, Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(addr: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            addr: addr.into(),
            transport,
        }
    }

    /// Client using the address and timeouts from `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        if config.addr.is_empty() || config.addr.contains("://") {
            return Err(Error::InvalidArgument(format!(
                "addr must be host:port without scheme, got '{}'",
                config.addr
            )));
        }
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::with_transport(config.addr.clone(), Arc::new(transport)))
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// URL of an `_endpoint` call scoped to an index, type and document
    pub fn request_url(&self, index: &str, doc_type: &str, id: Option<i64>, endpoint: &str) -> String {
        request_url(&self.addr, index, doc_type, id, endpoint)
    }

    /// GET /:index/:type/_search
    pub fn search(&self, index: &str, doc_type: &str) -> Search {
        Search::new(self.request_url(index, doc_type, None, SEARCH))
    }

    /// GET /:index/:type/:id/_explain
    ///
    /// Explains why a document does or does not match the query.
    pub fn explain(&self, index: &str, doc_type: &str, id: i64) -> Search {
        Search::explain(self.request_url(index, doc_type, Some(id), EXPLAIN))
    }

    /// GET /:index/:type/_validate/query
    pub fn validate(&self, index: &str, doc_type: &str, explain: bool) -> Search {
        let url = format!("{}/query", self.request_url(index, doc_type, None, VALIDATE));
        let search = Search::validate(url);
        if explain {
            search.add_param("explain", "")
        } else {
            search
        }
    }

    /// GET /:index/:type/_search with an aggregation body
    pub fn aggs(&self, index: &str, doc_type: &str) -> Aggregation {
        Aggregation::new(self.request_url(index, doc_type, None, SEARCH))
    }

    /// PUT|DELETE /:index
    pub fn index(&self, index: &str) -> Index {
        Index::new(format!("http://{}/{}", self.addr, index))
    }

    /// GET|PUT /:index/:type/_mapping, or /:index when no type is given
    pub fn mapping(&self, index: &str, doc_type: &str) -> Mapping {
        if doc_type.is_empty() {
            Mapping::new(format!("http://{}/{}", self.addr, index))
        } else {
            Mapping::new(self.request_url(index, doc_type, None, MAPPING))
        }
    }

    /// POST /_aliases
    pub fn alias(&self) -> Alias {
        Alias::new(format!("http://{}/{}", self.addr, ALIASES))
    }

    /// POST /:index/:type/_bulk
    pub fn bulk(&self, index: &str, doc_type: &str) -> Bulk {
        Bulk::new(self.request_url(index, doc_type, None, BULK))
    }

    /// PUT /:index/:type/:id
    pub fn insert(&self, index: &str, doc_type: &str) -> Insert {
        Insert::new(format!("http://{}/{}/{}", self.addr, index, doc_type))
    }

    /// GET /:index/_analyze
    pub fn analyze(&self, index: &str) -> Analyze {
        Analyze::new(self.request_url(index, "", None, ANALYZE))
    }

    /// POST /:index/_refresh, makes recently added documents searchable
    pub fn refresh(&self, index: &str) -> ShardMgmtOp {
        ShardMgmtOp::new(self.request_url(index, "", None, REFRESH))
    }

    /// POST /:index/_flush, commits and truncates the translog
    pub fn flush(&self, index: &str) -> ShardMgmtOp {
        ShardMgmtOp::new(self.request_url(index, "", None, FLUSH))
    }

    /// POST /:index/_optimize, merges segments
    pub fn optimize(&self, index: &str) -> ShardMgmtOp {
        ShardMgmtOp::new(self.request_url(index, "", None, OPTIMIZE))
    }

    /// Send a request and decode the response with `parser`
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
        parser: &dyn Parser,
    ) -> Result<Decoded> {
        info!("{} {}", method, url);
        if let Some(ref body) = body {
            debug!("request body: {}", body);
        }

        let data = self.transport.execute(method, url, body).await?;
        let decoded = parser.parse(&data);
        debug!("response decoded as {}", decoded.kind());
        Ok(decoded)
    }
}
