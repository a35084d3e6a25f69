//! API surfaces
//!
//! Generators only talk to Okta through these traits. [`OktaService`] bundles
//! both surfaces and is handed to every generator.

use super::models::{
    Brand, Captcha, DomainList, EmailDomain, EmailServerList, Feature, LogStream, ProfileMapping,
    Realm, RoleList, Theme,
};
use crate::resource::normalize_resource_name_with_random;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Older API surface, still the only one exposing custom domains
#[async_trait]
pub trait LegacyApi: Send + Sync {
    async fn list_domains(&self) -> Result<DomainList>;
}

/// Current management API surface
#[async_trait]
pub trait ManagementApi: Send + Sync {
    async fn list_brands(&self) -> Result<Vec<Brand>>;

    async fn list_brand_themes(&self, brand_id: &str) -> Result<Vec<Theme>>;

    /// `expand` names embedded collections to include, e.g. `brands`
    async fn list_email_domains(&self, expand: &[&str]) -> Result<Vec<EmailDomain>>;

    async fn list_email_servers(&self) -> Result<EmailServerList>;

    async fn list_captcha_instances(&self) -> Result<Vec<Captcha>>;

    async fn list_features(&self) -> Result<Vec<Feature>>;

    async fn list_log_streams(&self) -> Result<Vec<LogStream>>;

    async fn list_profile_mappings(&self) -> Result<Vec<ProfileMapping>>;

    async fn get_profile_mapping(&self, mapping_id: &str) -> Result<ProfileMapping>;

    async fn list_realms(&self) -> Result<Vec<Realm>>;

    async fn list_roles(&self) -> Result<RoleList>;
}

/// Shared session capability handed to each generator
#[derive(Clone)]
pub struct OktaService {
    legacy: Arc<dyn LegacyApi>,
    current: Arc<dyn ManagementApi>,
    random_suffix: bool,
}

impl OktaService {
    pub fn new(legacy: Arc<dyn LegacyApi>, current: Arc<dyn ManagementApi>) -> Self {
        Self {
            legacy,
            current,
            random_suffix: false,
        }
    }

    /// Build a service where one value serves both surfaces
    pub fn from_client<C>(client: C) -> Self
    where
        C: LegacyApi + ManagementApi + 'static,
    {
        let client = Arc::new(client);
        Self::new(client.clone(), client)
    }

    /// Append a random suffix to every generated resource name
    pub fn with_random_suffix(mut self, enabled: bool) -> Self {
        self.random_suffix = enabled;
        self
    }

    /// Legacy surface
    pub fn client(&self) -> &dyn LegacyApi {
        self.legacy.as_ref()
    }

    /// Current surface
    pub fn client_v5(&self) -> &dyn ManagementApi {
        self.current.as_ref()
    }

    /// Normalize a label according to this session's naming policy
    pub fn resource_name(&self, label: &str) -> String {
        normalize_resource_name_with_random(label, self.random_suffix)
    }
}
