//! Structural check of a feed against the BLM V3 required-field set.

use crate::blm::Record;
use crate::error::{ConvertError, Result};

/// Required fields from the RightMove datafeed format, V3.
///
/// See <https://www.rightmove.co.uk/ps/pdf/guides/RightmoveDatafeedFormatV3iOVS_1.6.pdf>.
/// Changing this list changes which feeds are accepted.
pub const REQUIRED_FIELDS: [&str; 20] = [
    "AGENT_REF",
    "ADDRESS_1",
    "ADDRESS_2",
    "TOWN",
    "POSTCODE1",
    "POSTCODE2",
    "FEATURE1",
    "FEATURE2",
    "FEATURE3",
    "SUMMARY",
    "DESCRIPTION",
    "BRANCH_ID",
    "STATUS_ID",
    "BEDROOMS",
    "PRICE",
    "PROP_SUB_ID",
    "DISPLAY_ADDRESS",
    "PUBLISHED_FLAG",
    "TRANS_TYPE_ID",
    "MEDIA_IMAGE_00",
];

/// Required field names absent from `record`, in `REQUIRED_FIELDS` order.
pub fn missing_fields(record: &Record) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|name| !record.contains_key(*name))
        .collect()
}

/// Only the first record is inspected; the rest of the feed is assumed to
/// share its shape.
pub fn validate_structure(records: &[Record]) -> Result<()> {
    let first = records.first().ok_or(ConvertError::EmptySource)?;

    let missing = missing_fields(first);
    if !missing.is_empty() {
        return Err(ConvertError::MissingFields(
            missing.into_iter().map(str::to_string).collect(),
        ));
    }

    Ok(())
}
