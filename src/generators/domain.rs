//! Custom domains and email domains

use crate::okta::models::{Brand, EmailDomain};
use crate::okta::OktaService;
use crate::resource::{
    resolve, Attributes, CrossReferenceMap, EmbeddedTier, Extra, FetchContext, FetchError,
    Generator, MapTier, PropertyBag, PropertyTier, ResolutionTier, ResourceDescriptor, ResourceSet,
};
use async_trait::async_trait;

pub struct DomainGenerator {
    service: OktaService,
}

impl DomainGenerator {
    pub const RESOURCE_KIND: &'static str = "okta_domain";

    pub fn new(service: OktaService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Generator for DomainGenerator {
    fn service(&self) -> &'static str {
        "domain"
    }

    fn resource_kind(&self) -> &'static str {
        Self::RESOURCE_KIND
    }

    async fn init_resources(&self) -> Result<Vec<ResourceDescriptor>, FetchError> {
        let domains = self
            .service
            .client()
            .list_domains()
            .await
            .fetch_context("listing domains")?;

        let mut resources = ResourceSet::new(Self::RESOURCE_KIND);
        for domain in &domains.domains {
            resources.push(ResourceDescriptor::assemble_simple(
                &domain.id,
                self.service
                    .resource_name(&format!("{}_{}", domain.id, domain.domain)),
                Self::RESOURCE_KIND,
            ));
        }

        Ok(resources.finish())
    }
}

/// Well-known property some orgs return the owning brand under
const BRAND_ID_PROPERTY: &str = "brandId";

pub struct EmailDomainGenerator {
    service: OktaService,
}

impl EmailDomainGenerator {
    pub const RESOURCE_KIND: &'static str = "okta_email_domain";

    pub fn new(service: OktaService) -> Self {
        Self { service }
    }
}

fn email_domain_id(domain: &EmailDomain) -> Option<&str> {
    Some(domain.id.as_str())
}

fn embedded_brands(domain: &EmailDomain) -> Option<&[Brand]> {
    domain.embedded_brands()
}

fn additional_properties(domain: &EmailDomain) -> &PropertyBag {
    &domain.additional_properties
}

/// Owning brand of an email domain: brand listing, then embedded brands, then
/// the `brandId` property.
fn resolve_brand_id(domain: &EmailDomain, domain_to_brand: &CrossReferenceMap) -> Option<String> {
    let by_brand_listing = MapTier::new(domain_to_brand, email_domain_id);
    let by_embedded = EmbeddedTier::new(embedded_brands);
    let by_property = PropertyTier::new(additional_properties, BRAND_ID_PROPERTY);

    let tiers: [&dyn ResolutionTier<EmailDomain>; 3] =
        [&by_brand_listing, &by_embedded, &by_property];

    resolve(domain, &tiers)
}

fn email_domain_attributes(domain: &EmailDomain, brand_id: Option<&str>) -> Attributes {
    let mut attributes = Attributes::new();

    if let Some(brand_id) = brand_id {
        attributes.insert("brand_id".to_string(), brand_id.to_string());
    }
    if !domain.display_name.is_empty() {
        attributes.insert("display_name".to_string(), domain.display_name.clone());
    }
    if let Some(name) = domain.domain.as_deref().filter(|d| !d.is_empty()) {
        attributes.insert("domain".to_string(), name.to_string());
    }
    if let Some(user_name) = domain.user_name.as_deref().filter(|u| !u.is_empty()) {
        attributes.insert("user_name".to_string(), user_name.to_string());
    }

    attributes
}

#[async_trait]
impl Generator for EmailDomainGenerator {
    fn service(&self) -> &'static str {
        "email_domain"
    }

    fn resource_kind(&self) -> &'static str {
        Self::RESOURCE_KIND
    }

    async fn init_resources(&self) -> Result<Vec<ResourceDescriptor>, FetchError> {
        let client = self.service.client_v5();

        let brands = client
            .list_brands()
            .await
            .fetch_context("listing brands for email domains")?;
        let domain_to_brand = CrossReferenceMap::build(
            &brands,
            |brand| brand.email_domain_id.as_deref(),
            |brand| Some(brand.id.as_str()),
        );
        tracing::debug!(
            "{} of {} brands reference an email domain",
            domain_to_brand.len(),
            brands.len()
        );

        let email_domains = client
            .list_email_domains(&["brands"])
            .await
            .fetch_context("listing email domains")?;

        let mut resources = ResourceSet::new(Self::RESOURCE_KIND);
        for domain in &email_domains {
            let brand_id = resolve_brand_id(domain, &domain_to_brand);
            if brand_id.is_none() {
                tracing::debug!("no brand found for email domain {}", domain.id);
            }

            let dependencies = brand_id.iter().cloned().collect();
            resources.push(ResourceDescriptor::assemble(
                &domain.id,
                self.service
                    .resource_name(&format!("{}_{}", domain.id, domain.display_name)),
                Self::RESOURCE_KIND,
                email_domain_attributes(domain, brand_id.as_deref()),
                dependencies,
                Extra::new(),
            ));
        }

        Ok(resources.finish())
    }
}
