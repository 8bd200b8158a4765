//! Record source for RightMove BLM feeds.

pub mod parse;
pub mod record;

pub use parse::{parse_str, read_file};
pub use record::{BlmDocument, BlmHeader, Record};
