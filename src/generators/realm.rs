//! Realms

use crate::okta::models::Realm;
use crate::okta::OktaService;
use crate::resource::{FetchContext, FetchError, Generator, ResourceDescriptor, ResourceSet};
use async_trait::async_trait;

pub struct RealmGenerator {
    service: OktaService,
}

impl RealmGenerator {
    pub const RESOURCE_KIND: &'static str = "okta_realm";

    pub fn new(service: OktaService) -> Self {
        Self { service }
    }
}

fn realm_label(realm: &Realm) -> &str {
    realm
        .profile
        .as_ref()
        .map(|p| p.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(&realm.id)
}

#[async_trait]
impl Generator for RealmGenerator {
    fn service(&self) -> &'static str {
        "realm"
    }

    fn resource_kind(&self) -> &'static str {
        Self::RESOURCE_KIND
    }

    async fn init_resources(&self) -> Result<Vec<ResourceDescriptor>, FetchError> {
        let realms = self
            .service
            .client_v5()
            .list_realms()
            .await
            .fetch_context("listing realms")?;

        let mut resources = ResourceSet::new(Self::RESOURCE_KIND);
        for realm in &realms {
            resources.push(ResourceDescriptor::assemble_simple(
                &realm.id,
                self.service.resource_name(realm_label(realm)),
                Self::RESOURCE_KIND,
            ));
        }

        Ok(resources.finish())
    }
}
