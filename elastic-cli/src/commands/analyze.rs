use anyhow::{bail, Result};
use elastic::{Decoded, Elasticsearch};

use super::print_decoded;

pub async fn run_analyze(
    client: &Elasticsearch,
    index: &str,
    analyzer: Option<String>,
    field: Option<String>,
    text: &str,
) -> Result<()> {
    if field.is_some() && index.is_empty() {
        bail!("--field needs an --index holding its mapping");
    }

    let mut analyze = client.analyze(index);
    if let Some(field) = field {
        analyze = analyze.field(field);
    } else if let Some(analyzer) = analyzer {
        analyze = analyze.analyzer(analyzer);
    }

    match analyze.get(client, text).await? {
        Decoded::Analyze(result) => {
            for token in &result.tokens {
                println!(
                    "{:>3}  {:<20} [{}..{}] {}",
                    token.position, token.token, token.start_offset, token.end_offset, token.token_type
                );
            }
            Ok(())
        }
        other => print_decoded(&other),
    }
}
