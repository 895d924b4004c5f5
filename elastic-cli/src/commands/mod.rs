pub mod analyze;
pub mod bulk;
pub mod search;

pub use analyze::run_analyze;
pub use bulk::run_bulk;
pub use search::run_search;

use anyhow::Result;
use elastic::Decoded;

/// Print a decoded response as indented JSON
pub fn print_decoded(decoded: &Decoded) -> Result<()> {
    if let Decoded::Unparsed(text) = decoded {
        println!("{}", text);
    } else {
        println!("{}", serde_json::to_string_pretty(decoded)?);
    }
    Ok(())
}
