//! CLI tool for sheetgrid - paginates a JSON print job and outputs the pages
//!
//! Usage:
//!   sheetgrid_cli <job.json>              # Output pages JSON to stdout
//!   sheetgrid_cli <job.json> -o out.json  # Output pages JSON to file
//!   sheetgrid_cli <job.json> --summary    # Print a per-page summary instead

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use sheetgrid::print::{paginate, PrintJob};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: sheetgrid_cli <job.json> [-o output.json | --summary]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let summary = args.len() > 2 && args[2] == "--summary";
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    // Read input file
    let json = match fs::read_to_string(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let job = match PrintJob::from_json(&json) {
        Ok(job) => job,
        Err(e) => {
            eprintln!("Error loading print job: {}", e);
            std::process::exit(1);
        }
    };

    let pages = match paginate(&job) {
        Ok(pages) => pages,
        Err(e) => {
            eprintln!("Error paginating: {}", e);
            std::process::exit(1);
        }
    };

    if summary {
        for page in &pages {
            let sheet = job.sheets.get(page.sheet).map_or("?", |s| s.name.as_str());
            println!(
                "page {:>3}  {:<16} rows {:>5}..{:<5} cols {:>4}..{:<4} scale {:.2}",
                page.page_number,
                sheet,
                page.row_range.start,
                page.row_range.end,
                page.col_range.start,
                page.col_range.end,
                page.scale
            );
        }
        eprintln!("{} pages", pages.len());
        return;
    }

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&pages) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
