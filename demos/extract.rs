//! Extracts `lang.json` and `sourcemap.json` from a decompiled game into the current directory.
//!
//! Usage: `cargo run --example extract -- path/to/deltarune`

use std::{env::args, process::ExitCode};
use textdump_rs_lib::ExtractorBuilder;

fn main() -> ExitCode {
    let Some(source_path) = args().nth(1) else {
        eprintln!("Usage: extract path/to/deltarune");
        return ExitCode::FAILURE;
    };

    match ExtractorBuilder::new().logging(true).build().extract(&source_path) {
        Ok(extracted) => {
            for (chapter, text) in &extracted.lang {
                let keys: usize = text.values().map(|table| table.len()).sum();
                println!("Chapter {chapter}: {keys} keys");
            }

            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
