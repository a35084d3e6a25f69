//! In-memory API stub for generator unit tests

use super::api::{LegacyApi, ManagementApi, OktaService};
use super::models::{
    Brand, Captcha, DomainList, EmailDomain, EmailServerList, Feature, LogStream, ProfileMapping,
    Realm, RoleList, Theme,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// Responses keyed by operation, e.g. `list_brands` or `get_profile_mapping:prm1`.
/// Operations without a response fail like an API error would.
#[derive(Default)]
pub struct StubApi {
    responses: HashMap<String, Value>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, operation: &str, response: Value) -> Self {
        self.responses.insert(operation.to_string(), response);
        self
    }

    pub fn into_service(self) -> OktaService {
        OktaService::from_client(self)
    }

    fn respond<T: DeserializeOwned>(&self, operation: String) -> Result<T> {
        let value = self
            .responses
            .get(&operation)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("API request failed: 500 ({})", operation))?;
        serde_json::from_value(value).with_context(|| format!("bad stub payload for {}", operation))
    }
}

#[async_trait]
impl LegacyApi for StubApi {
    async fn list_domains(&self) -> Result<DomainList> {
        self.respond("list_domains".into())
    }
}

#[async_trait]
impl ManagementApi for StubApi {
    async fn list_brands(&self) -> Result<Vec<Brand>> {
        self.respond("list_brands".into())
    }

    async fn list_brand_themes(&self, brand_id: &str) -> Result<Vec<Theme>> {
        self.respond(format!("list_brand_themes:{}", brand_id))
    }

    async fn list_email_domains(&self, expand: &[&str]) -> Result<Vec<EmailDomain>> {
        if expand.is_empty() {
            self.respond("list_email_domains".into())
        } else {
            self.respond(format!("list_email_domains?expand={}", expand.join(",")))
        }
    }

    async fn list_email_servers(&self) -> Result<EmailServerList> {
        self.respond("list_email_servers".into())
    }

    async fn list_captcha_instances(&self) -> Result<Vec<Captcha>> {
        self.respond("list_captcha_instances".into())
    }

    async fn list_features(&self) -> Result<Vec<Feature>> {
        self.respond("list_features".into())
    }

    async fn list_log_streams(&self) -> Result<Vec<LogStream>> {
        self.respond("list_log_streams".into())
    }

    async fn list_profile_mappings(&self) -> Result<Vec<ProfileMapping>> {
        self.respond("list_profile_mappings".into())
    }

    async fn get_profile_mapping(&self, mapping_id: &str) -> Result<ProfileMapping> {
        self.respond(format!("get_profile_mapping:{}", mapping_id))
    }

    async fn list_realms(&self) -> Result<Vec<Realm>> {
        self.respond("list_realms".into())
    }

    async fn list_roles(&self) -> Result<RoleList> {
        self.respond("list_roles".into())
    }
}
