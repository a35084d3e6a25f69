//! Log streams
//!
//! Streams come in several physical shapes; only the shapes listed in
//! [`LOG_STREAM_PRECEDENCE`] are exported, anything else is skipped.

use crate::okta::models::{LogStream, LogStreamShape, LOG_STREAM_PRECEDENCE};
use crate::okta::OktaService;
use crate::resource::{
    nested_block, Attributes, Block, Extra, FetchContext, FetchError, Generator,
    ResourceDescriptor, ResourceSet,
};
use async_trait::async_trait;
use serde_json::Value;

pub struct LogStreamGenerator {
    service: OktaService,
}

impl LogStreamGenerator {
    pub const RESOURCE_KIND: &'static str = "okta_log_stream";

    pub fn new(service: OktaService) -> Self {
        Self { service }
    }
}

/// Fields shared by every recognized shape
struct StreamParts<'a> {
    id: &'a str,
    name: &'a str,
    status: Option<&'a str>,
    shape: LogStreamShape,
    settings: Block,
}

fn settings_block(pairs: &[(&str, &str)]) -> Block {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

fn stream_parts(stream: &LogStream) -> Option<StreamParts<'_>> {
    match stream {
        LogStream::Aws(aws) => Some(StreamParts {
            id: &aws.id,
            name: &aws.name,
            status: aws.status.as_deref(),
            shape: LogStreamShape::Aws,
            settings: settings_block(&[
                ("account_id", aws.settings.account_id.as_str()),
                ("event_source_name", aws.settings.event_source_name.as_str()),
                ("region", aws.settings.region.as_str()),
            ]),
        }),
        LogStream::Splunk(splunk) => Some(StreamParts {
            id: &splunk.id,
            name: &splunk.name,
            status: splunk.status.as_deref(),
            shape: LogStreamShape::Splunk,
            settings: settings_block(&[
                ("edition", splunk.settings.edition.as_str()),
                ("host", splunk.settings.host.as_str()),
            ]),
        }),
        LogStream::Unrecognized(_) => None,
    }
}

#[async_trait]
impl Generator for LogStreamGenerator {
    fn service(&self) -> &'static str {
        "log_stream"
    }

    fn resource_kind(&self) -> &'static str {
        Self::RESOURCE_KIND
    }

    async fn init_resources(&self) -> Result<Vec<ResourceDescriptor>, FetchError> {
        let streams = self
            .service
            .client_v5()
            .list_log_streams()
            .await
            .fetch_context("listing log streams")?;

        let mut resources = ResourceSet::new(Self::RESOURCE_KIND);
        for stream in &streams {
            let Some(parts) = stream_parts(stream) else {
                resources.skip(&format!(
                    "log stream type not one of {:?}",
                    LOG_STREAM_PRECEDENCE
                        .iter()
                        .map(|s| s.type_tag())
                        .collect::<Vec<_>>()
                ));
                continue;
            };

            let mut attributes = Attributes::new();
            attributes.insert("name".to_string(), parts.name.to_string());
            attributes.insert("type".to_string(), parts.shape.type_tag().to_string());
            if let Some(status) = parts.status {
                attributes.insert("status".to_string(), status.to_string());
            }

            let mut extra = Extra::new();
            extra.insert("settings".to_string(), nested_block(parts.settings));

            resources.push(ResourceDescriptor::assemble(
                parts.id,
                self.service
                    .resource_name(&format!("{}_{}", parts.id, parts.name)),
                Self::RESOURCE_KIND,
                attributes,
                Vec::new(),
                extra,
            ));
        }

        Ok(resources.finish())
    }
}
