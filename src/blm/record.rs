use std::collections::BTreeMap;

/// One row of a BLM feed: field name -> raw value (possibly empty).
pub type Record = BTreeMap<String, String>;

/// Values from the `#HEADER#` section that drive tokenizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlmHeader {
    pub version: String,
    /// `EOF` in the header: separates fields within a row.
    pub field_delimiter: char,
    /// `EOR` in the header: terminates a row.
    pub record_delimiter: char,
    pub property_count: Option<usize>,
    pub generated_date: Option<String>,
}

/// A parsed feed: header plus records keyed by the `#DEFINITION#` row.
#[derive(Debug, Clone)]
pub struct BlmDocument {
    pub header: BlmHeader,
    pub fields: Vec<String>,
    pub records: Vec<Record>,
}
