//!Library for turning DELTARUNE's decompiled text into a browsable textdump and plain text transcripts.
//!
//! [`Extractor`] collects English and Japanese text of every chapter from the game code and translation files, and
//! [`Dumper`] renders it, together with optional Korean tables, into HTML fragments grouped and ordered the way
//! the text appears in the game.

mod functions;
pub use functions::read_to_string_without_bom;

pub mod assemble;
pub mod constants;
pub mod dump;
pub mod extract;
pub mod group;
pub mod order;
pub mod render;
pub mod statics;
pub mod stretch;
pub mod types;

pub use assemble::{assemble, plainify, render_entry, render_plain};
pub use dump::{Dumper, DumperBuilder};
pub use extract::{Extractor, ExtractorBuilder};
pub use group::groupify;
pub use order::{sort_key, sort_keys, SortKey};
pub use render::render;
pub use stretch::stretch;
pub use types::{Error, Language, SourceLocation};
