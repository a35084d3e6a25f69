//! Generator contract
//!
//! One generator per resource kind. A run lists the remote objects, resolves
//! derived attributes and returns the complete descriptor list, or fails as a
//! whole with a [`FetchError`].

use super::descriptor::{AssemblyError, ResourceDescriptor};
use async_trait::async_trait;
use thiserror::Error;

/// A listing or detail call failed.
///
/// Carries the operation and, for per-item calls, the offending id.
#[derive(Debug, Error)]
#[error("error {operation}{}: {source:#}", id_suffix(.id))]
pub struct FetchError {
    pub operation: &'static str,
    pub id: Option<String>,
    #[source]
    pub source: anyhow::Error,
}

fn id_suffix(id: &Option<String>) -> String {
    id.as_deref().map(|id| format!(" {}", id)).unwrap_or_default()
}

impl FetchError {
    pub fn new(operation: &'static str, source: anyhow::Error) -> Self {
        Self {
            operation,
            id: None,
            source,
        }
    }

    pub fn for_item(operation: &'static str, id: &str, source: anyhow::Error) -> Self {
        Self {
            operation,
            id: Some(id.to_string()),
            source,
        }
    }
}

/// Attach fetch context to collaborator results.
pub trait FetchContext<T> {
    fn fetch_context(self, operation: &'static str) -> Result<T, FetchError>;

    fn fetch_context_for(self, operation: &'static str, id: &str) -> Result<T, FetchError>;
}

impl<T> FetchContext<T> for anyhow::Result<T> {
    fn fetch_context(self, operation: &'static str) -> Result<T, FetchError> {
        self.map_err(|e| FetchError::new(operation, e))
    }

    fn fetch_context_for(self, operation: &'static str, id: &str) -> Result<T, FetchError> {
        self.map_err(|e| FetchError::for_item(operation, id, e))
    }
}

#[async_trait]
pub trait Generator: Send + Sync {
    /// Service name used on the command line, e.g. `email_domain`
    fn service(&self) -> &'static str;

    /// Resource kind tag stamped on every descriptor, e.g. `okta_email_domain`
    fn resource_kind(&self) -> &'static str;

    /// Discover all objects of this kind.
    ///
    /// Either every descriptor is returned or none is.
    async fn init_resources(&self) -> Result<Vec<ResourceDescriptor>, FetchError>;
}

/// Accumulates descriptors for one run.
///
/// Items failing assembly are logged and skipped; siblings are unaffected.
#[derive(Debug)]
pub struct ResourceSet {
    resource_kind: &'static str,
    resources: Vec<ResourceDescriptor>,
    skipped: usize,
}

impl ResourceSet {
    pub fn new(resource_kind: &'static str) -> Self {
        Self {
            resource_kind,
            resources: Vec::new(),
            skipped: 0,
        }
    }

    pub fn push(&mut self, assembled: Result<ResourceDescriptor, AssemblyError>) {
        match assembled {
            Ok(resource) => self.resources.push(resource),
            Err(e) => {
                tracing::warn!("skipping item: {}", e);
                self.skipped += 1;
            }
        }
    }

    /// Record an item dropped before assembly, such as an unknown variant
    pub fn skip(&mut self, reason: &str) {
        tracing::debug!("{}: skipping item: {}", self.resource_kind, reason);
        self.skipped += 1;
    }

    pub fn finish(self) -> Vec<ResourceDescriptor> {
        tracing::info!(
            "{}: discovered {} resources ({} skipped)",
            self.resource_kind,
            self.resources.len(),
            self.skipped
        );
        self.resources
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_message() {
        let err = FetchError::new("listing brands", anyhow::anyhow!("API request failed: 500"));
        assert_eq!(err.to_string(), "error listing brands: API request failed: 500");
    }

    #[test]
    fn test_fetch_error_message_with_id() {
        let res: anyhow::Result<()> = Err(anyhow::anyhow!("API request failed: 404"));
        let err = res
            .fetch_context_for("getting profile mapping", "prm1")
            .unwrap_err();

        assert_eq!(err.id.as_deref(), Some("prm1"));
        assert_eq!(
            err.to_string(),
            "error getting profile mapping prm1: API request failed: 404"
        );
    }

    #[test]
    fn test_resource_set_skips_bad_items() {
        let mut set = ResourceSet::new("okta_brand");
        set.push(ResourceDescriptor::assemble_simple("bnd1", "acme", "okta_brand"));
        set.push(ResourceDescriptor::assemble_simple("", "acme", "okta_brand"));
        set.skip("unknown shape");

        let resources = set.finish();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].external_id(), "bnd1");
    }
}
