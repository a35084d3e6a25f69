//! Profile mappings
//!
//! The listing only carries source and target, so every mapping is fetched
//! again to read its property expressions.

use crate::okta::models::ProfileMapping;
use crate::okta::OktaService;
use crate::resource::{
    Attributes, Block, Extra, FetchContext, FetchError, Generator, ResourceDescriptor,
    ResourceSet,
};
use async_trait::async_trait;
use serde_json::Value;

pub struct ProfileMappingGenerator {
    service: OktaService,
}

impl ProfileMappingGenerator {
    pub const RESOURCE_KIND: &'static str = "okta_profile_mapping";

    pub fn new(service: OktaService) -> Self {
        Self { service }
    }
}

/// `source_to_target` when both names are known, else the id
fn mapping_label(mapping: &ProfileMapping) -> String {
    let source = mapping.source.as_ref().map(|s| s.name.as_str()).unwrap_or("");
    let target = mapping.target.as_ref().map(|t| t.name.as_str()).unwrap_or("");

    if source.is_empty() || target.is_empty() {
        mapping.id.clone()
    } else {
        format!("{}_to_{}", source, target)
    }
}

fn mapping_attributes(mapping: &ProfileMapping) -> Attributes {
    let mut attributes = Attributes::new();

    let endpoints = [("source_id", &mapping.source), ("target_id", &mapping.target)];
    for (key, endpoint) in endpoints {
        if let Some(endpoint) = endpoint.as_ref().filter(|e| !e.id.is_empty()) {
            attributes.insert(key.to_string(), endpoint.id.clone());
        }
    }

    attributes
}

/// One `mappings` block per mapped property, ordered by property name
fn mapping_blocks(mapping: &ProfileMapping) -> Vec<Block> {
    let Some(properties) = &mapping.properties else {
        return Vec::new();
    };

    properties
        .iter()
        .map(|(name, property)| {
            let mut block = Block::new();
            block.insert("id".to_string(), Value::String(name.clone()));
            block.insert(
                "expression".to_string(),
                Value::String(property.expression.clone()),
            );
            if let Some(push_status) = &property.push_status {
                block.insert("push_status".to_string(), Value::String(push_status.clone()));
            }
            block
        })
        .collect()
}

#[async_trait]
impl Generator for ProfileMappingGenerator {
    fn service(&self) -> &'static str {
        "profile_mapping"
    }

    fn resource_kind(&self) -> &'static str {
        Self::RESOURCE_KIND
    }

    async fn init_resources(&self) -> Result<Vec<ResourceDescriptor>, FetchError> {
        let client = self.service.client_v5();
        let listed = client
            .list_profile_mappings()
            .await
            .fetch_context("listing profile mappings")?;

        let mut resources = ResourceSet::new(Self::RESOURCE_KIND);
        for summary in &listed {
            let mapping = client
                .get_profile_mapping(&summary.id)
                .await
                .fetch_context_for("getting profile mapping", &summary.id)?;

            let mut extra = Extra::new();
            let blocks = mapping_blocks(&mapping);
            if !blocks.is_empty() {
                extra.insert("mappings".to_string(), blocks);
            }

            resources.push(ResourceDescriptor::assemble(
                &summary.id,
                self.service.resource_name(&mapping_label(&mapping)),
                Self::RESOURCE_KIND,
                mapping_attributes(&mapping),
                Vec::new(),
                extra,
            ));
        }

        Ok(resources.finish())
    }
}
