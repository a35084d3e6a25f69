//! Admin roles

use crate::okta::OktaService;
use crate::resource::{FetchContext, FetchError, Generator, ResourceDescriptor, ResourceSet};
use async_trait::async_trait;

/// Every listed role is emitted as a custom admin role; built-in roles have
/// to be filtered out of the generated configuration by hand.
pub struct RoleGenerator {
    service: OktaService,
}

impl RoleGenerator {
    pub const RESOURCE_KIND: &'static str = "okta_admin_role_custom";

    pub fn new(service: OktaService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Generator for RoleGenerator {
    fn service(&self) -> &'static str {
        "role"
    }

    fn resource_kind(&self) -> &'static str {
        Self::RESOURCE_KIND
    }

    async fn init_resources(&self) -> Result<Vec<ResourceDescriptor>, FetchError> {
        let roles = self
            .service
            .client_v5()
            .list_roles()
            .await
            .fetch_context("listing roles")?;

        let mut resources = ResourceSet::new(Self::RESOURCE_KIND);
        for role in &roles.roles {
            resources.push(ResourceDescriptor::assemble_simple(
                &role.id,
                self.service
                    .resource_name(&format!("{}_{}", role.id, role.label)),
                Self::RESOURCE_KIND,
            ));
        }

        Ok(resources.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::okta::testing::StubApi;
    use serde_json::json;

    #[tokio::test]
    async fn test_roles() {
        let service = StubApi::new()
            .with(
                "list_roles",
                json!({ "roles": [ { "id": "cr0abc", "label": "Help Desk" } ], "_links": {} }),
            )
            .into_service();

        let resources = RoleGenerator::new(service).init_resources().await.unwrap();

        assert_eq!(resources[0].internal_name(), "cr0abc_help_desk");
        assert_eq!(resources[0].resource_kind(), "okta_admin_role_custom");
    }
}
