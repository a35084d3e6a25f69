//! Org features

use crate::okta::OktaService;
use crate::resource::{FetchContext, FetchError, Generator, ResourceDescriptor, ResourceSet};
use async_trait::async_trait;

pub struct FeatureGenerator {
    service: OktaService,
}

impl FeatureGenerator {
    pub const RESOURCE_KIND: &'static str = "okta_feature";

    pub fn new(service: OktaService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Generator for FeatureGenerator {
    fn service(&self) -> &'static str {
        "feature"
    }

    fn resource_kind(&self) -> &'static str {
        Self::RESOURCE_KIND
    }

    async fn init_resources(&self) -> Result<Vec<ResourceDescriptor>, FetchError> {
        let features = self
            .service
            .client_v5()
            .list_features()
            .await
            .fetch_context("listing features")?;

        let mut resources = ResourceSet::new(Self::RESOURCE_KIND);
        for feature in &features {
            resources.push(ResourceDescriptor::assemble_simple(
                &feature.id,
                self.service
                    .resource_name(&format!("{}_{}", feature.id, feature.name)),
                Self::RESOURCE_KIND,
            ));
        }

        Ok(resources.finish())
    }
}
