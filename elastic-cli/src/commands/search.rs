use anyhow::Result;
use elastic::{Elasticsearch, Object};

use super::print_decoded;

pub async fn run_search(
    client: &Elasticsearch,
    index: &str,
    doc_type: &str,
    field: &str,
    text: Option<&str>,
    size: Option<u64>,
) -> Result<()> {
    let clause = match text {
        Some(text) => Object::match_query().add(field, text),
        None => Object::match_all(),
    };
    let mut search = client
        .search(index, doc_type)
        .add_query(Object::new("query").add_query(clause));
    if let Some(size) = size {
        search = search.add("size", size);
    }

    let decoded = search.get(client).await?;
    print_decoded(&decoded)
}
