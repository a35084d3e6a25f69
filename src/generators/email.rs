//! Custom SMTP email servers

use crate::okta::models::EmailServer;
use crate::okta::OktaService;
use crate::resource::{FetchContext, FetchError, Generator, ResourceDescriptor, ResourceSet};
use async_trait::async_trait;

pub struct EmailSenderGenerator {
    service: OktaService,
}

impl EmailSenderGenerator {
    pub const RESOURCE_KIND: &'static str = "okta_email_sender";

    pub fn new(service: OktaService) -> Self {
        Self { service }
    }
}

/// Alias, else host, else the id
fn sender_label(server: &EmailServer) -> &str {
    [server.alias.as_deref(), server.host.as_deref()]
        .into_iter()
        .flatten()
        .find(|label| !label.is_empty())
        .unwrap_or(&server.id)
}

#[async_trait]
impl Generator for EmailSenderGenerator {
    fn service(&self) -> &'static str {
        "email_sender"
    }

    fn resource_kind(&self) -> &'static str {
        Self::RESOURCE_KIND
    }

    async fn init_resources(&self) -> Result<Vec<ResourceDescriptor>, FetchError> {
        let servers = self
            .service
            .client_v5()
            .list_email_servers()
            .await
            .fetch_context("listing email servers")?;

        let mut resources = ResourceSet::new(Self::RESOURCE_KIND);
        for server in &servers.email_servers {
            resources.push(ResourceDescriptor::assemble_simple(
                &server.id,
                self.service.resource_name(sender_label(server)),
                Self::RESOURCE_KIND,
            ));
        }

        Ok(resources.finish())
    }
}
