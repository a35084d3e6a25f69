//! Okta Client
//!
//! REST implementation of both API surfaces on top of [`OktaHttpClient`].

use super::api::{LegacyApi, ManagementApi};
use super::http::OktaHttpClient;
use super::models::{
    Brand, Captcha, DomainList, EmailDomain, EmailServerList, Feature, LogStream, ProfileMapping,
    Realm, RoleList, Theme,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// Upper bound on followed pages for a single listing
const MAX_PAGES: usize = 1000;

/// Main Okta client
#[derive(Clone, Debug)]
pub struct OktaClient {
    pub http: OktaHttpClient,
    pub org_url: Url,
}

impl OktaClient {
    /// Create a new client for an org such as `https://acme.okta.com`
    pub fn new(org_url: &str, api_token: &str) -> Result<Self> {
        let org_url = Url::parse(org_url)
            .with_context(|| format!("Invalid Okta org URL: {}", org_url))?;
        let http = OktaHttpClient::new(api_token)?;

        Ok(Self { http, org_url })
    }

    /// Build an API URL from a path relative to the org root
    pub fn api_url(&self, path: &str) -> Result<String> {
        self.org_url
            .join(path)
            .map(String::from)
            .with_context(|| format!("Invalid API path: {}", path))
    }

    /// GET a single object
    async fn get_one<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.api_url(path)?;
        let page = self.http.get(&url).await?;
        serde_json::from_value(page.body)
            .with_context(|| format!("Unexpected response shape from {}", path))
    }

    /// GET a JSON array, following `Link: rel="next"` until exhausted
    async fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        let mut url = Some(self.api_url(path)?);
        let mut pages = 0;

        while let Some(current) = url.take() {
            pages += 1;
            if pages > MAX_PAGES {
                return Err(anyhow::anyhow!(
                    "Pagination for {} exceeded {} pages",
                    path,
                    MAX_PAGES
                ));
            }

            let page = self.http.get(&current).await?;
            let items: Vec<T> = match page.body {
                Value::Null => Vec::new(),
                body => serde_json::from_value(body)
                    .with_context(|| format!("Unexpected response shape from {}", path))?,
            };
            all_items.extend(items);

            url = page.next;
        }

        Ok(all_items)
    }
}

fn brand_themes_path(brand_id: &str) -> String {
    format!("/api/v1/brands/{}/themes", urlencoding::encode(brand_id))
}

fn email_domains_path(expand: &[&str]) -> String {
    if expand.is_empty() {
        "/api/v1/email-domains".to_string()
    } else {
        format!(
            "/api/v1/email-domains?expand={}",
            urlencoding::encode(&expand.join(","))
        )
    }
}

fn profile_mapping_path(mapping_id: &str) -> String {
    format!("/api/v1/mappings/{}", urlencoding::encode(mapping_id))
}

#[async_trait]
impl LegacyApi for OktaClient {
    async fn list_domains(&self) -> Result<DomainList> {
        self.get_one("/api/v1/domains").await
    }
}

#[async_trait]
impl ManagementApi for OktaClient {
    async fn list_brands(&self) -> Result<Vec<Brand>> {
        self.get_all("/api/v1/brands").await
    }

    async fn list_brand_themes(&self, brand_id: &str) -> Result<Vec<Theme>> {
        self.get_all(&brand_themes_path(brand_id)).await
    }

    async fn list_email_domains(&self, expand: &[&str]) -> Result<Vec<EmailDomain>> {
        self.get_all(&email_domains_path(expand)).await
    }

    async fn list_email_servers(&self) -> Result<EmailServerList> {
        self.get_one("/api/v1/email-servers").await
    }

    async fn list_captcha_instances(&self) -> Result<Vec<Captcha>> {
        self.get_all("/api/v1/captchas").await
    }

    async fn list_features(&self) -> Result<Vec<Feature>> {
        self.get_all("/api/v1/features").await
    }

    async fn list_log_streams(&self) -> Result<Vec<LogStream>> {
        self.get_all("/api/v1/logStreams").await
    }

    async fn list_profile_mappings(&self) -> Result<Vec<ProfileMapping>> {
        self.get_all("/api/v1/mappings").await
    }

    async fn get_profile_mapping(&self, mapping_id: &str) -> Result<ProfileMapping> {
        self.get_one(&profile_mapping_path(mapping_id)).await
    }

    async fn list_realms(&self) -> Result<Vec<Realm>> {
        self.get_all("/api/v1/realms").await
    }

    async fn list_roles(&self) -> Result<RoleList> {
        let path = "/api/v1/iam/roles";
        let mut roles = Vec::new();
        let mut url = Some(self.api_url(path)?);
        let mut pages = 0;

        while let Some(current) = url.take() {
            pages += 1;
            if pages > MAX_PAGES {
                return Err(anyhow::anyhow!(
                    "Pagination for {} exceeded {} pages",
                    path,
                    MAX_PAGES
                ));
            }

            let page = self.http.get(&current).await?;
            let list: RoleList = match page.body {
                Value::Null => RoleList::default(),
                body => serde_json::from_value(body)
                    .with_context(|| format!("Unexpected response shape from {}", path))?,
            };

            url = list.next_href().map(str::to_string).or(page.next);
            roles.extend(list.roles);
        }

        Ok(RoleList { roles, links: None })
    }
}
