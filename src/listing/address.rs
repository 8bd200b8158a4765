//! Postal address of a listed property.
//!
//! Built through `Address::new`, which rejects empty required parts, so an
//! `Address` value is always complete.

use crate::error::{ConvertError, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    address1: String,
    address2: String,
    address3: Option<String>,
    address4: Option<String>,
    town: String,
    postcode1: String,
    postcode2: String,
}

impl Address {
    /// Checks run in a fixed order; the first empty required part is reported.
    pub fn new(
        address1: &str,
        address2: &str,
        address3: Option<&str>,
        address4: Option<&str>,
        town: &str,
        postcode1: &str,
        postcode2: &str,
    ) -> Result<Self> {
        require("address1", address1)?;
        require("address2", address2)?;
        require("town", town)?;
        require("postcode1", postcode1)?;
        require("postcode2", postcode2)?;

        Ok(Self {
            address1: address1.to_string(),
            address2: address2.to_string(),
            address3: address3.map(str::to_string),
            address4: address4.map(str::to_string),
            town: town.to_string(),
            postcode1: postcode1.to_string(),
            postcode2: postcode2.to_string(),
        })
    }

    pub fn address1(&self) -> &str {
        &self.address1
    }

    pub fn address2(&self) -> &str {
        &self.address2
    }

    pub fn address3(&self) -> Option<&str> {
        self.address3.as_deref()
    }

    pub fn address4(&self) -> Option<&str> {
        self.address4.as_deref()
    }

    pub fn town(&self) -> &str {
        &self.town
    }

    pub fn postcode1(&self) -> &str {
        &self.postcode1
    }

    pub fn postcode2(&self) -> &str {
        &self.postcode2
    }
}

pub(crate) fn require(name: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ConvertError::RequiredFieldMissing(name));
    }
    Ok(())
}
