use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};
use elastic::{Bulk, Decoded, Elasticsearch, Operation, Value};

/// Send one bulk request and report per-item failures
async fn flush_batch(client: &Elasticsearch, bulk: &Bulk) -> Result<usize> {
    let count = bulk.len();
    match bulk.post(client).await? {
        Decoded::Bulk(result) => {
            if result.errors {
                tracing::warn!("Bulk request of {} docs reported item errors", count);
            }
            tracing::info!("Indexed {} docs in {}ms", count, result.took);
            Ok(count)
        }
        other => {
            super::print_decoded(&other)?;
            bail!("Bulk request failed")
        }
    }
}

pub async fn run_bulk(
    client: &Elasticsearch,
    index: &str,
    doc_type: &str,
    input: &Path,
    id_field: &str,
    batch_size: usize,
) -> Result<()> {
    if batch_size == 0 {
        bail!("--batch-size must be at least 1");
    }

    let file = File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let reader = BufReader::new(file);

    let mut bulk = client.bulk(index, doc_type);
    let mut total = 0;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        let doc = match serde_json::from_str::<Value>(&line)
            .with_context(|| format!("Invalid JSON on line {}", line_no + 1))?
        {
            Value::Object(doc) => doc,
            _ => bail!("Line {} is not a JSON object", line_no + 1),
        };
        let id = doc
            .get(id_field)
            .and_then(Value::as_i64)
            .with_context(|| format!("Line {} has no integer '{}' field", line_no + 1, id_field))?;

        bulk = bulk.add_operation(Operation::from_document(id, doc));
        if bulk.len() >= batch_size {
            total += flush_batch(client, &bulk).await?;
            bulk = client.bulk(index, doc_type);
        }
    }

    if !bulk.is_empty() {
        total += flush_batch(client, &bulk).await?;
    }

    println!("Indexed {} documents into {}/{}", total, index, doc_type);
    Ok(())
}
