// File: src/bin/main.rs
use std::io::{stdout, Write};
use std::path::Path;
use std::process::exit;

use crossterm::cursor::MoveToColumn;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};

use basket_core::core::engine::{DatasetGenerator, BASE_SEED, DATASET_ITERATIONS};
use basket_core::error::DatasetResult;
use basket_core::input;

const INPUT_DIR: &str = ".";
const OUTPUT_DIR: &str = "dataset";

fn main() {
    if let Err(e) = run() {
        println!();
        eprintln!("[ERROR] {}", e);
        exit(1);
    }
}

fn run() -> DatasetResult<()> {
    println!("Loading input tables from '{}'", INPUT_DIR);
    let tables = input::load_tables(Path::new(INPUT_DIR))?;
    let mut generator = DatasetGenerator::new(tables, BASE_SEED);

    let missing = generator.catalog().missing_aisle_items().len();
    if missing > 0 {
        eprintln!(
            "[WARN] {} cataloged item(s) have no aisle assignment and never receive substitutions",
            missing
        );
    }

    println!(
        "Generating {} iterations into '{}/'",
        DATASET_ITERATIONS, OUTPUT_DIR
    );
    for iteration in 0..DATASET_ITERATIONS {
        draw_progress(iteration);
        generator.run_iteration(iteration, Path::new(OUTPUT_DIR))?;
    }
    draw_progress(DATASET_ITERATIONS);
    println!();

    let stats = generator.stats();
    println!("{}", "Run complete.".green());
    println!("  datasets written:           {}", stats.datasets_written);
    println!("  out-of-range items dropped: {}", stats.out_of_range_dropped);
    println!(
        "  substitutions attached:     {}",
        stats.substitutions_attached
    );
    println!(
        "  substitutions pruned empty: {}",
        stats.substitutions_pruned_empty
    );
    println!("  missing-aisle skips:        {}", stats.missing_aisle_skips);
    println!(
        "  saturated-aisle skips:      {}",
        stats.saturated_aisle_skips
    );
    Ok(())
}

/// Redraws the `|***-------|` iteration bar in place. Rendering problems
/// are ignored; the bar is cosmetic.
fn draw_progress(done: usize) {
    let mut out = stdout();
    let bar: String = (0..DATASET_ITERATIONS)
        .map(|slot| if slot < done { '*' } else { '-' })
        .collect();
    let _ = execute!(out, MoveToColumn(0), Clear(ClearType::CurrentLine));
    let _ = write!(out, "|{}|", bar);
    let _ = out.flush();
}
