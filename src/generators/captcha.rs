//! CAPTCHA instances

use crate::okta::OktaService;
use crate::resource::{FetchContext, FetchError, Generator, ResourceDescriptor, ResourceSet};
use async_trait::async_trait;

pub struct CaptchaGenerator {
    service: OktaService,
}

impl CaptchaGenerator {
    pub const RESOURCE_KIND: &'static str = "okta_captcha";

    pub fn new(service: OktaService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Generator for CaptchaGenerator {
    fn service(&self) -> &'static str {
        "captcha"
    }

    fn resource_kind(&self) -> &'static str {
        Self::RESOURCE_KIND
    }

    async fn init_resources(&self) -> Result<Vec<ResourceDescriptor>, FetchError> {
        let captchas = self
            .service
            .client_v5()
            .list_captcha_instances()
            .await
            .fetch_context("listing captcha instances")?;

        let mut resources = ResourceSet::new(Self::RESOURCE_KIND);
        for captcha in &captchas {
            resources.push(ResourceDescriptor::assemble_simple(
                &captcha.id,
                self.service
                    .resource_name(&format!("{}_{}", captcha.id, captcha.name)),
                Self::RESOURCE_KIND,
            ));
        }

        Ok(resources.finish())
    }
}
