use crate::error::Result;
use crate::listing::address::{Address, require};
use serde::Serialize;

/// A single listing keyed by the agent's reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    agent_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    property_address: Option<Address>,
}

impl Property {
    pub fn new(agent_ref: &str) -> Result<Self> {
        require("agentRef", agent_ref)?;
        Ok(Self {
            agent_ref: agent_ref.to_string(),
            property_address: None,
        })
    }

    /// Attach the address once it has been assembled.
    pub fn with_address(mut self, address: Address) -> Self {
        self.property_address = Some(address);
        self
    }

    pub fn agent_ref(&self) -> &str {
        &self.agent_ref
    }

    pub fn address(&self) -> Option<&Address> {
        self.property_address.as_ref()
    }
}
