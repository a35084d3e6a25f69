//! Generator Registry
//!
//! Maps the service names accepted on the command line to generator
//! constructors, and runs a selection of them.

use super::descriptor::ResourceDescriptor;
use super::generator::Generator;
use crate::generators::{
    BrandGenerator, CaptchaGenerator, DomainGenerator, EmailDomainGenerator,
    EmailSenderGenerator, FeatureGenerator, LogStreamGenerator, ProfileMappingGenerator,
    RealmGenerator, RoleGenerator, ThemeGenerator,
};
use crate::okta::OktaService;

/// Registered service
#[derive(Clone, Copy)]
pub struct ServiceDef {
    pub name: &'static str,
    pub display_name: &'static str,
    constructor: fn(OktaService) -> Box<dyn Generator>,
}

impl std::fmt::Debug for ServiceDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceDef")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .finish()
    }
}

macro_rules! service {
    ($name:literal, $display:literal, $generator:ident) => {
        ServiceDef {
            name: $name,
            display_name: $display,
            constructor: |service| Box::new($generator::new(service)),
        }
    };
}

/// All services, in default run order
static SERVICES: &[ServiceDef] = &[
    service!("brand", "Brands", BrandGenerator),
    service!("theme", "Brand themes", ThemeGenerator),
    service!("domain", "Custom domains", DomainGenerator),
    service!("email_domain", "Email domains", EmailDomainGenerator),
    service!("email_sender", "Custom SMTP servers", EmailSenderGenerator),
    service!("captcha", "CAPTCHA instances", CaptchaGenerator),
    service!("feature", "Org features", FeatureGenerator),
    service!("log_stream", "Log streams", LogStreamGenerator),
    service!("profile_mapping", "Profile mappings", ProfileMappingGenerator),
    service!("realm", "Realms", RealmGenerator),
    service!("role", "Custom admin roles", RoleGenerator),
];

/// Get all registered services
pub fn get_services() -> &'static [ServiceDef] {
    SERVICES
}

/// Get all service names (for `--services` validation)
pub fn get_all_service_names() -> Vec<&'static str> {
    SERVICES.iter().map(|s| s.name).collect()
}

/// Get a service definition by name
pub fn get_service(name: &str) -> Option<&'static ServiceDef> {
    SERVICES.iter().find(|s| s.name == name)
}

/// Build the generator for a service
pub fn generator_for(name: &str, service: OktaService) -> Option<Box<dyn Generator>> {
    get_service(name).map(|def| (def.constructor)(service))
}

/// Run the named generators one after another.
///
/// Stops at the first failing generator; descriptors are only returned when
/// every generator succeeded.
pub async fn run_generators(
    names: &[&str],
    service: &OktaService,
) -> anyhow::Result<Vec<ResourceDescriptor>> {
    let mut generators = Vec::with_capacity(names.len());
    for name in names {
        let Some(generator) = generator_for(name, service.clone()) else {
            return Err(anyhow::anyhow!(
                "Unknown service: {} (available: {})",
                name,
                get_all_service_names().join(", ")
            ));
        };
        generators.push(generator);
    }

    let mut all = Vec::new();
    for generator in &generators {
        tracing::info!("running {} generator", generator.service());
        all.extend(generator.init_resources().await?);
    }

    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::okta::testing::StubApi;
    use serde_json::json;

    #[test]
    fn test_registry_names_are_unique() {
        let mut names = get_all_service_names();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_generator_kinds_match_names() {
        let service = StubApi::new().into_service();
        for def in get_services() {
            let generator = generator_for(def.name, service.clone()).unwrap();
            assert_eq!(generator.service(), def.name);
            assert!(generator.resource_kind().starts_with("okta_"));
        }
    }

    #[test]
    fn test_unknown_service() {
        let service = StubApi::new().into_service();
        assert!(generator_for("groups", service).is_none());
    }

    #[tokio::test]
    async fn test_run_generators_all_or_nothing() {
        let service = StubApi::new()
            .with("list_brands", json!([{ "id": "bnd1", "name": "Acme" }]))
            .into_service();

        let resources = run_generators(&["brand"], &service).await.unwrap();
        assert_eq!(resources.len(), 1);

        let err = run_generators(&["brand", "realm"], &service)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("listing realms"));
    }

    #[tokio::test]
    async fn test_run_generators_rejects_unknown_before_fetching() {
        let service = StubApi::new().into_service();
        let err = run_generators(&["nope"], &service).await.unwrap_err();
        assert!(err.to_string().starts_with("Unknown service: nope"));
    }
}
