//! `review-sift sources` — list available review sources.

use crate::cli::output::{self, Styled};
use crate::source::Source;
use anyhow::Result;
use serde_json::json;

pub fn run() -> Result<()> {
    if output::is_json() {
        let list: Vec<_> = Source::ALL
            .iter()
            .map(|s| json!({ "name": s.as_str(), "description": s.description() }))
            .collect();
        output::print_json(&list);
        return Ok(());
    }

    let s = Styled::new();
    println!();
    println!("  {}", s.bold("Sources:"));
    println!();
    for src in Source::ALL {
        let default = if src == Source::default() {
            s.dim(" (default)")
        } else {
            String::new()
        };
        println!("    {:<10} {}{default}", src.as_str(), src.description());
    }
    println!();
    Ok(())
}
