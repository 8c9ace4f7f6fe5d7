//! Test command implementation.

use oxihuff::HuffmanDecoder;
use std::path::Path;

pub fn cmd_test(file: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(file)?;

    println!("Testing {}", file.display());

    match HuffmanDecoder::new().decode(&data) {
        Ok(decoded) => {
            if verbose {
                println!("  OK: {} bytes decoded", decoded.len());
            }
        }
        Err(e) => {
            println!("  FAILED: {}", e);
            if e.is_internal() {
                println!("  (the payload does not match its code table)");
            }
            std::process::exit(2);
        }
    }

    println!();
    println!("All data OK");
    Ok(())
}
