//! # Folio CLI
//!
//! Usage:
//!   folio records.json -o report.pdf
//!   echo '{ ... }' | folio -o report.pdf
//!   folio records.json --table -o list.pdf
//!   folio --example > records.json

use std::env;
use std::fs;
use std::io::{self, Read};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Handle --example flag
    if args.iter().any(|a| a == "--example") {
        print!("{}", example_records_json());
        return;
    }

    // Read input
    let input = if args.len() > 1 && !args[1].starts_with('-') {
        fs::read_to_string(&args[1]).expect("Failed to read input file")
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .expect("Failed to read stdin");
        buf
    };

    // Parse output path
    let output_path = args
        .windows(2)
        .find(|w| w[0] == "-o")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| "report.pdf".to_string());

    let tabular = args.iter().any(|a| a == "--table");

    let result = if tabular {
        folio::generate_tabular_json(&input)
    } else {
        folio::generate_summary_json(&input)
    };

    match result {
        Ok(pdf_bytes) => {
            fs::write(&output_path, &pdf_bytes).expect("Failed to write PDF");
            eprintln!("✓ Written {} bytes to {}", pdf_bytes.len(), output_path);
        }
        Err(e) => {
            eprintln!("✗ Failed to generate report: {}", e);
            std::process::exit(1);
        }
    }
}

fn example_records_json() -> &'static str {
    r##"{
  "criteria": {
    "status": "Published",
    "date_from": "2023-01-01",
    "date_to": "2024-12-31"
  },
  "active_entities": ["Ada Lovelace", "Grace Hopper"],
  "records": [
    {
      "id": "d1",
      "title": "Machine Learning for Predictive Maintenance in Industrial IoT Systems",
      "category": "Research Paper",
      "entity": "Ada Lovelace",
      "status": "Published",
      "date": "2024-03-15"
    },
    {
      "id": "d2",
      "title": "A Survey of Page-Native Layout Engines",
      "category": "Conference Paper",
      "entity": "Grace Hopper",
      "status": "Published",
      "date": "2023-11-02"
    },
    {
      "id": "d3",
      "title": "Compiler-Assisted Dataflow Verification",
      "category": "Patent",
      "entity": "Ada Lovelace",
      "status": "Published",
      "date": "2023-06-20"
    }
  ]
}
"##
}
