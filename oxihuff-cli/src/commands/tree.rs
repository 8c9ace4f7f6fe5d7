//! Tree command implementation.

use super::InputMode;
use oxihuff::HuffmanEncoder;
use oxihuff::tree::symbol_label;

pub fn cmd_tree(input: &str, mode: InputMode) -> Result<(), Box<dyn std::error::Error>> {
    let source = mode.resolve(input)?;
    let data = source.read()?;
    let analysis = HuffmanEncoder::new().analyze(&data);

    println!("Input: {}", source.describe());

    let Some(tree) = &analysis.tree else {
        println!("Empty input, no tree");
        return Ok(());
    };

    println!(
        "Symbols: {}  Depth: {}  Encoded: {} bits",
        tree.leaf_count(),
        tree.depth(),
        analysis.encoded_bits()
    );
    println!();
    print!("{}", tree);
    println!();

    println!("{:>8} {:>10}  Code", "Symbol", "Count");
    println!("{}", "-".repeat(40));
    for (symbol, count) in analysis.frequencies.iter() {
        let code = analysis
            .table
            .get(symbol)
            .map(ToString::to_string)
            .unwrap_or_default();
        println!("{:>8} {:>10}  {}", symbol_label(symbol), count, code);
    }

    Ok(())
}
