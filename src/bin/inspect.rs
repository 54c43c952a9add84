// Dump and verify one emitted dataset file.
// Run with: cargo run --bin basket_inspect -- dataset/orders0.data
// File: src/bin/inspect.rs
use std::env;
use std::path::Path;
use std::process::exit;

use crossterm::style::Stylize;

use basket_core::persistence::read_dataset;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: basket_inspect <dataset-file>");
        exit(2);
    }

    let path = Path::new(&args[1]);
    let dataset = match read_dataset(path) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            exit(1);
        }
    };

    // read_dataset already ran the invariant checks.
    println!("{}: {}", path.display(), "valid".green());
    println!("  item_count: {}", dataset.item_count);
    println!("  orders:     {}", dataset.orders.len());

    let occurrences: usize = dataset.orders.iter().map(|o| o.items.len()).sum();
    let subs: usize = dataset.orders.iter().map(|o| o.subs.len()).sum();
    println!("  item occurrences:  {}", occurrences);
    println!("  substitution sets: {}", subs);

    for (slot, order) in dataset.orders.iter().enumerate() {
        println!(
            "  order {:>3}: {:>3} items, {:>2} subs",
            slot,
            order.items.len(),
            order.subs.len()
        );
    }
}
