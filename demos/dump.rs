//! Renders `lang.json`, `sourcemap.json` and Korean `<chapter>.json` tables from the current directory into
//! `rendered.json`, `rendered.json.js` and plain text transcripts.
//!
//! Usage: `cargo run --example dump -- [output directory]`

use std::{env::args, process::ExitCode};
use textdump_rs_lib::DumperBuilder;

fn main() -> ExitCode {
    let output_path: String = args().nth(1).unwrap_or_else(|| ".".to_owned());

    match DumperBuilder::new()
        .output_path(&output_path)
        .logging(true)
        .build()
        .dump()
    {
        Ok(rendered) => {
            for (chapter, groups) in &rendered {
                let entries: usize = groups.values().map(|group| group.len()).sum();
                println!("Chapter {chapter}: {entries} entries in {} groups", groups.len());
            }

            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
