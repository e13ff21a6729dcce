//! CLI tool for splitgrid - renders a JSON grid document to static markup
//!
//! Usage:
//!   splitgrid_cli <grid.json>              # Output HTML to stdout
//!   splitgrid_cli <grid.json> -o out.html  # Output HTML to file
//!
//! Set `RUST_LOG=splitgrid=debug` to trace rendering on stderr.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use splitgrid::{render_document, GridDocument};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: splitgrid_cli <grid.json> [-o output.html]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    let json = match fs::read_to_string(input_path) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let document = match GridDocument::from_json(&json) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error parsing grid document: {}", e);
            std::process::exit(1);
        }
    };

    let html = match render_document(&document) {
        Ok(m) => m.to_html(),
        Err(e) => {
            eprintln!("Error rendering grid: {}", e);
            std::process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &html) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(html.as_bytes()).unwrap();
            println!();
        }
    }
}
