//! Domain values emitted by the converter.
//!
//! JSON shape:
//! {
//!   "properties": [
//!     {
//!       "agentRef": "A1_001",
//!       "propertyAddress": {
//!         "address1": "1 High Street",
//!         "address2": "Headingley",
//!         "address3": null,
//!         "address4": null,
//!         "town": "Leeds",
//!         "postcode1": "LS6",
//!         "postcode2": "3AB"
//!       }
//!     }
//!   ]
//! }

pub mod address;
pub mod property;

pub use address::Address;
pub use property::Property;

use serde::Serialize;

/// Top-level output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub properties: Vec<Property>,
}
