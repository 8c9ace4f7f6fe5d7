//! Info command implementation.

use oxihuff::tree::symbol_label;
use oxihuff::{CodeTable, ContainerStats, HuffmanDecoder};
use serde::Serialize;
use std::path::Path;

/// Machine-readable `info --json` report.
#[derive(Serialize)]
struct InfoReport<'a> {
    file: String,
    #[serde(flatten)]
    stats: &'a ContainerStats,
    codes: &'a CodeTable,
}

pub fn cmd_info(file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(file)?;
    let stats = ContainerStats::from_bytes(&data)?;
    let container = HuffmanDecoder::new().inspect(&data)?;

    if json {
        let report = InfoReport {
            file: file.display().to_string(),
            stats: &stats,
            codes: &container.table,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Container Information");
    println!("=====================");
    println!("File: {}", file.display());
    println!("Size: {} bytes", stats.total_bytes);
    println!();
    println!("Layout:");
    println!("  Padding: {} bits", stats.padding);
    println!(
        "  Payload: {} bytes ({} bits)",
        stats.payload_bytes, stats.payload_bits
    );
    println!("  Table: {} bytes", stats.table_bytes);
    println!("  Length field: {} digits", stats.length_digits);
    println!();
    println!("Code table:");
    println!("  Symbols: {}", stats.symbols);
    println!("  Max code length: {} bits", stats.max_code_len);

    if !container.table.is_empty() {
        println!();
        println!("{:>8}  Code", "Symbol");
        println!("{}", "-".repeat(40));
        for (symbol, code) in container.table.iter() {
            println!("{:>8}  {}", symbol_label(symbol), code);
        }
    }

    Ok(())
}
