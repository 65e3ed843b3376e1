//! Simple match example: load a netlist snapshot and resolve one query.

use netmatch::prelude::*;
use std::path::Path;

fn main() -> Result<(), NetmatchError> {
    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .unwrap_or_else(|| "tests/fixtures/small_netlist.json".to_string());
    let net = args.next().unwrap_or_else(|| "c[1:2]".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example simple_match [netlist.json] [net-pattern]");
        std::process::exit(1);
    }

    let engine = MatchingEngine::from_index(NetlistIndex::from_json_file(path)?);
    let (nets, templates) = engine.find_matches(None, &net, false, false);

    println!("Query '{}' in top cell '{}'", net, engine.top_cell());
    println!("Templates: {}", templates.join(", "));
    for n in &nets {
        println!("  - {}", n);
    }
    if nets.is_empty() {
        println!("No matching nets.");
    }
    Ok(())
}
