//! Resource descriptors
//!
//! The uniform record every generator produces. A writer turns descriptors
//! into configuration blocks and import statements.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Provider tag carried by every descriptor
pub const PROVIDER: &str = "okta";

/// Flat attribute map
pub type Attributes = BTreeMap<String, String>;

/// One nested configuration block
pub type Block = Map<String, Value>;

/// Nested blocks keyed by block name.
///
/// Every entry renders as one block of that name, so a list of one map is
/// either a single nested block or a repeated block group with one entry. The
/// two share this encoding and render identically. See [`nested_block`].
pub type Extra = BTreeMap<String, Vec<Block>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("{kind}: empty external id")]
    EmptyId { kind: &'static str },

    #[error("{kind} {id}: empty resource name")]
    EmptyName { kind: &'static str, id: String },
}

/// A discovered remote object.
///
/// Immutable once assembled; fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceDescriptor {
    external_id: String,
    internal_name: String,
    resource_kind: &'static str,
    provider_tag: &'static str,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    attributes: Attributes,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    extra: Extra,
}

impl ResourceDescriptor {
    /// Assemble a full descriptor.
    pub fn assemble(
        external_id: impl Into<String>,
        internal_name: impl Into<String>,
        resource_kind: &'static str,
        attributes: Attributes,
        dependencies: Vec<String>,
        extra: Extra,
    ) -> Result<Self, AssemblyError> {
        let external_id = external_id.into();
        let internal_name = internal_name.into();

        if external_id.is_empty() {
            return Err(AssemblyError::EmptyId {
                kind: resource_kind,
            });
        }
        if internal_name.is_empty() {
            return Err(AssemblyError::EmptyName {
                kind: resource_kind,
                id: external_id,
            });
        }

        Ok(Self {
            external_id,
            internal_name,
            resource_kind,
            provider_tag: PROVIDER,
            attributes,
            dependencies,
            extra,
        })
    }

    /// Assemble a descriptor without attributes, dependencies or nested blocks.
    pub fn assemble_simple(
        external_id: impl Into<String>,
        internal_name: impl Into<String>,
        resource_kind: &'static str,
    ) -> Result<Self, AssemblyError> {
        Self::assemble(
            external_id,
            internal_name,
            resource_kind,
            Attributes::new(),
            Vec::new(),
            Extra::new(),
        )
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn internal_name(&self) -> &str {
        &self.internal_name
    }

    pub fn resource_kind(&self) -> &'static str {
        self.resource_kind
    }

    pub fn provider_tag(&self) -> &'static str {
        self.provider_tag
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn extra(&self) -> &Extra {
        &self.extra
    }

    /// True for descriptors carrying no configuration
    pub fn is_simple(&self) -> bool {
        self.attributes.is_empty() && self.dependencies.is_empty() && self.extra.is_empty()
    }
}

/// Wrap a single block so the writer renders it as one nested block.
///
/// Same encoding as a repeated group holding one entry.
pub fn nested_block(block: Block) -> Vec<Block> {
    vec![block]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_descriptor() {
        let res = ResourceDescriptor::assemble_simple("bnd1", "bnd1_acme", "okta_brand").unwrap();

        assert_eq!(res.external_id(), "bnd1");
        assert_eq!(res.internal_name(), "bnd1_acme");
        assert_eq!(res.resource_kind(), "okta_brand");
        assert_eq!(res.provider_tag(), PROVIDER);
        assert!(res.is_simple());
    }

    #[test]
    fn test_empty_id_rejected() {
        let err = ResourceDescriptor::assemble_simple("", "name", "okta_brand").unwrap_err();
        assert_eq!(err, AssemblyError::EmptyId { kind: "okta_brand" });
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = ResourceDescriptor::assemble_simple("id1", "", "okta_brand").unwrap_err();
        assert!(matches!(err, AssemblyError::EmptyName { .. }));
        assert_eq!(err.to_string(), "okta_brand id1: empty resource name");
    }

    #[test]
    fn test_single_nested_block_serialization() {
        let mut settings = Block::new();
        settings.insert("region".to_string(), json!("us-east-1"));

        let mut extra = Extra::new();
        extra.insert("settings".to_string(), nested_block(settings));

        let mut attributes = Attributes::new();
        attributes.insert("name".to_string(), "audit".to_string());

        let res = ResourceDescriptor::assemble(
            "0oa1",
            "audit",
            "okta_log_stream",
            attributes,
            vec![],
            extra,
        )
        .unwrap();

        assert!(!res.is_simple());
        assert_eq!(
            serde_json::to_value(&res).unwrap(),
            json!({
                "external_id": "0oa1",
                "internal_name": "audit",
                "resource_kind": "okta_log_stream",
                "provider_tag": "okta",
                "attributes": { "name": "audit" },
                "extra": { "settings": [ { "region": "us-east-1" } ] }
            })
        );
    }
}
