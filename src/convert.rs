//! BLM records -> JSON listing document.

use crate::blm::{self, Record};
use crate::error::{ConvertError, Result};
use crate::listing::{Address, Listing, Property};
use crate::validate::validate_structure;
use std::path::Path;
use tracing::{debug, info, warn};

/// Holds a structurally valid feed. Construction fails rather than producing
/// an unvalidated converter.
#[derive(Debug, Clone)]
pub struct Converter {
    records: Vec<Record>,
}

impl Converter {
    /// Read a BLM file and validate it.
    ///
    /// Reader failures of any kind surface as `InvalidInput` with the
    /// reader's message chain.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConvertError::FileNotFound(path.to_path_buf()));
        }

        let doc = blm::read_file(path)
            .map_err(|e| ConvertError::InvalidInput(format!("{:#}", e)))?;
        info!(
            path = %path.display(),
            records = doc.records.len(),
            "loaded BLM feed"
        );

        Self::from_records(doc.records)
    }

    pub fn from_records(records: Vec<Record>) -> Result<Self> {
        validate_structure(&records)?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Build the output document.
    ///
    /// Only the first record is converted; any further records are skipped.
    pub fn listing(&self) -> Result<Listing> {
        // Never empty: `from_records` rejects an empty feed.
        let Some(first) = self.records.first() else {
            return Err(ConvertError::EmptySource);
        };

        if self.records.len() > 1 {
            warn!(
                skipped = self.records.len() - 1,
                "only the first BLM record is converted"
            );
        }

        let property = assemble_property(first)?;
        debug!(agent_ref = property.agent_ref(), "assembled property");

        Ok(Listing {
            properties: vec![property],
        })
    }

    /// Compact JSON text for the listing.
    pub fn as_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.listing()?)?)
    }

    pub fn as_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.listing()?)?)
    }
}

/// Agent ref is checked before any address part.
fn assemble_property(record: &Record) -> Result<Property> {
    let property = Property::new(value(record, "AGENT_REF"))?;

    let address = Address::new(
        value(record, "ADDRESS_1"),
        value(record, "ADDRESS_2"),
        optional(record, "ADDRESS_3"),
        optional(record, "ADDRESS_4"),
        value(record, "TOWN"),
        value(record, "POSTCODE1"),
        value(record, "POSTCODE2"),
    )?;

    Ok(property.with_address(address))
}

/// Missing fields read as "".
fn value<'a>(record: &'a Record, field: &str) -> &'a str {
    record.get(field).map(String::as_str).unwrap_or("")
}

/// Only a missing key reads as absent; an empty value stays "".
fn optional<'a>(record: &'a Record, field: &str) -> Option<&'a str> {
    record.get(field).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::REQUIRED_FIELDS;
    use pretty_assertions::assert_eq;

    fn record() -> Record {
        let mut r: Record = REQUIRED_FIELDS
            .iter()
            .map(|f| (f.to_string(), "x".to_string()))
            .collect();
        r.insert("AGENT_REF".into(), "A1_001".into());
        r.insert("ADDRESS_1".into(), "1 High Street".into());
        r.insert("ADDRESS_2".into(), "Headingley".into());
        r.insert("TOWN".into(), "Leeds".into());
        r.insert("POSTCODE1".into(), "LS6".into());
        r.insert("POSTCODE2".into(), "3AB".into());
        r
    }

    #[test]
    fn emits_documented_shape() {
        let c = Converter::from_records(vec![record()]).unwrap();
        assert_eq!(
            c.as_json().unwrap(),
            r#"{"properties":[{"agentRef":"A1_001","propertyAddress":{"address1":"1 High Street","address2":"Headingley","address3":null,"address4":null,"town":"Leeds","postcode1":"LS6","postcode2":"3AB"}}]}"#
        );
    }

    #[test]
    fn optional_address_lines_pass_through() {
        let mut r = record();
        r.insert("ADDRESS_3".into(), "West Yorkshire".into());
        r.insert("ADDRESS_4".into(), String::new());

        let listing = Converter::from_records(vec![r]).unwrap().listing().unwrap();
        let addr = listing.properties[0].address().unwrap();
        assert_eq!(addr.address3(), Some("West Yorkshire"));
        assert_eq!(addr.address4(), Some(""));
    }

    #[test]
    fn empty_address_line_is_empty_string_missing_is_null() {
        let mut r = record();
        r.insert("ADDRESS_3".into(), String::new());

        let json = Converter::from_records(vec![r]).unwrap().as_json().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["properties"][0]["propertyAddress"]["address3"], "");
        assert_eq!(
            v["properties"][0]["propertyAddress"]["address4"],
            serde_json::Value::Null
        );
    }

    #[test]
    fn agent_ref_checked_before_address() {
        let mut r = record();
        r.insert("AGENT_REF".into(), String::new());
        r.insert("ADDRESS_1".into(), String::new());

        let c = Converter::from_records(vec![r]).unwrap();
        match c.as_json() {
            Err(ConvertError::RequiredFieldMissing(name)) => assert_eq!(name, "agentRef"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_town_fails_at_conversion() {
        let mut r = record();
        r.insert("TOWN".into(), String::new());

        let c = Converter::from_records(vec![r]).unwrap();
        let err = c.as_json().unwrap_err();
        assert_eq!(err.to_string(), "town is required");
    }

    #[test]
    fn only_first_record_is_converted() {
        let mut second = record();
        second.insert("AGENT_REF".into(), "B2_002".into());

        let c = Converter::from_records(vec![record(), second]).unwrap();
        let listing = c.listing().unwrap();
        assert_eq!(listing.properties.len(), 1);
        assert_eq!(listing.properties[0].agent_ref(), "A1_001");
        assert_eq!(c.records().len(), 2);
    }

    #[test]
    fn as_json_is_idempotent() {
        let c = Converter::from_records(vec![record()]).unwrap();
        assert_eq!(c.as_json().unwrap(), c.as_json().unwrap());
    }

    #[test]
    fn pretty_output_is_same_document() {
        let c = Converter::from_records(vec![record()]).unwrap();
        let compact: serde_json::Value = serde_json::from_str(&c.as_json().unwrap()).unwrap();
        let pretty: serde_json::Value = serde_json::from_str(&c.as_json_pretty().unwrap()).unwrap();
        assert_eq!(compact, pretty);
    }

    #[test]
    fn escapes_string_content() {
        let mut r = record();
        r.insert("ADDRESS_1".into(), "Flat \"A\", 1\\2 Ħigh St".into());

        let json = Converter::from_records(vec![r]).unwrap().as_json().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            v["properties"][0]["propertyAddress"]["address1"],
            "Flat \"A\", 1\\2 Ħigh St"
        );
    }

    #[test]
    fn converter_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Converter>();
    }
}
