//! Okta management API payloads
//!
//! Only the fields the generators read are modelled. Unknown fields are
//! ignored, except on email domains where they are kept in a [`PropertyBag`].

use crate::resource::{Identified, PropertyBag};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email_domain_id: Option<String>,
}

impl Identified for Brand {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    #[serde(default)]
    pub primary_color_hex: Option<String>,
    #[serde(default)]
    pub secondary_color_hex: Option<String>,
    #[serde(default)]
    pub sign_in_page_touch_point_variant: Option<String>,
    #[serde(default)]
    pub end_user_dashboard_touch_point_variant: Option<String>,
    #[serde(default)]
    pub error_page_touch_point_variant: Option<String>,
    #[serde(default)]
    pub email_template_touch_point_variant: Option<String>,
}

/// Custom domain, served by the legacy surface
#[derive(Debug, Clone, Deserialize)]
pub struct Domain {
    pub id: String,
    #[serde(default)]
    pub domain: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DomainList {
    #[serde(default)]
    pub domains: Vec<Domain>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailDomain {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<EmailDomainEmbedded>,
    #[serde(flatten)]
    pub additional_properties: PropertyBag,
}

impl EmailDomain {
    pub fn embedded_brands(&self) -> Option<&[Brand]> {
        self.embedded.as_ref().map(|e| e.brands.as_slice())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailDomainEmbedded {
    #[serde(default)]
    pub brands: Vec<Brand>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailServer {
    pub id: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailServerList {
    #[serde(rename = "email-servers", default)]
    pub email_servers: Vec<EmailServer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Captcha {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Realm {
    pub id: String,
    #[serde(default)]
    pub profile: Option<RealmProfile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RealmProfile {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Role {
    pub id: String,
    #[serde(default)]
    pub label: String,
}

/// One page of custom roles. The roles endpoint pages through
/// `_links.next.href` in the body instead of a `Link` header.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleList {
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default, rename = "_links")]
    pub links: Option<Links>,
}

impl RoleList {
    pub fn next_href(&self) -> Option<&str> {
        self.links
            .as_ref()?
            .next
            .as_ref()
            .map(|link| link.href.as_str())
            .filter(|href| !href.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub next: Option<HrefLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HrefLink {
    pub href: String,
}

// =============================================================================
// Profile mappings
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileMapping {
    pub id: String,
    #[serde(default)]
    pub source: Option<MappingEndpoint>,
    #[serde(default)]
    pub target: Option<MappingEndpoint>,
    /// Only present on the detail endpoint
    #[serde(default)]
    pub properties: Option<BTreeMap<String, MappingProperty>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MappingEndpoint {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingProperty {
    #[serde(default)]
    pub expression: String,
    #[serde(default)]
    pub push_status: Option<String>,
}

// =============================================================================
// Log streams
// =============================================================================

/// Log stream, one of several physical shapes.
///
/// Shapes are tried in [`LOG_STREAM_PRECEDENCE`] order; payloads matching
/// none of them end up as [`LogStream::Unrecognized`].
#[derive(Debug, Clone)]
pub enum LogStream {
    Aws(LogStreamAws),
    Splunk(LogStreamSplunk),
    Unrecognized(Value),
}

/// Known log stream shapes, in selection order
pub const LOG_STREAM_PRECEDENCE: &[LogStreamShape] = &[LogStreamShape::Aws, LogStreamShape::Splunk];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStreamShape {
    Aws,
    Splunk,
}

impl LogStreamShape {
    /// Value of the `type` discriminator
    pub fn type_tag(self) -> &'static str {
        match self {
            LogStreamShape::Aws => "aws_eventbridge",
            LogStreamShape::Splunk => "splunk_cloud_logstreaming",
        }
    }

    fn parse(self, value: &Value) -> Option<LogStream> {
        if value.get("type").and_then(|v| v.as_str()) != Some(self.type_tag()) {
            return None;
        }
        match self {
            LogStreamShape::Aws => parse_shape(value).map(LogStream::Aws),
            LogStreamShape::Splunk => parse_shape(value).map(LogStream::Splunk),
        }
    }
}

fn parse_shape<T: DeserializeOwned>(value: &Value) -> Option<T> {
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::debug!("log stream payload did not match its declared shape: {}", e);
            None
        }
    }
}

impl From<Value> for LogStream {
    fn from(value: Value) -> Self {
        LOG_STREAM_PRECEDENCE
            .iter()
            .find_map(|shape| shape.parse(&value))
            .unwrap_or(LogStream::Unrecognized(value))
    }
}

impl<'de> Deserialize<'de> for LogStream {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(LogStream::from)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogStreamAws {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    pub settings: LogStreamAwsSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogStreamAwsSettings {
    pub account_id: String,
    pub event_source_name: String,
    pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogStreamSplunk {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    pub settings: LogStreamSplunkSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogStreamSplunkSettings {
    pub edition: String,
    pub host: String,
}
