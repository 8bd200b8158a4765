//! Error taxonomy for the conversion pipeline.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("file ({}) not found", .0.display())]
    FileNotFound(PathBuf),

    /// Any failure from the BLM record source, flattened to its message.
    #[error("invalid BLM input: {0}")]
    InvalidInput(String),

    #[error("invalid BLM records: nothing found")]
    EmptySource,

    #[error("missing required fields: {}.", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("{0} is required")]
    RequiredFieldMissing(&'static str),

    #[error("json encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_lists_every_name() {
        let err = ConvertError::MissingFields(vec!["TOWN".into(), "PRICE".into()]);
        assert_eq!(err.to_string(), "missing required fields: TOWN, PRICE.");
    }

    #[test]
    fn file_not_found_carries_path() {
        let err = ConvertError::FileNotFound(PathBuf::from("feeds/nope.blm"));
        let msg = err.to_string();
        assert!(msg.contains("feeds/nope.blm"));
        assert!(msg.contains("not found"));
    }
}
