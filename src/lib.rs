//! Convert RightMove BLM (V3) property feeds into JSON.
//!
//! Pipeline:
//! - `blm`: tokenize a feed into records (field name -> value)
//! - `validate`: check the first record for the V3 required fields
//! - `listing`: validating constructors for `Address` and `Property`
//! - `convert`: tie it together and emit `{"properties": [...]}`

pub mod blm;
pub mod convert;
pub mod error;
pub mod listing;
pub mod validate;

pub use blm::Record;
pub use convert::Converter;
pub use error::{ConvertError, Result};
pub use listing::{Address, Listing, Property};
pub use validate::{REQUIRED_FIELDS, missing_fields, validate_structure};
