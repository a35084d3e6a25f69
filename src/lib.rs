//! Okta discovery
//!
//! Lists configuration objects in an Okta org (brands, themes, domains, email
//! senders, log streams, profile mappings, realms, roles, ...) and converts
//! each into a [`ResourceDescriptor`] ready for infrastructure-as-code
//! generation and `import`.
//!
//! # Example
//!
//! ```ignore
//! use okta_discover::okta::{OktaClient, OktaService};
//! use okta_discover::resource::run_generators;
//!
//! let client = OktaClient::new("https://acme.okta.com", &token)?;
//! let service = OktaService::from_client(client);
//! let resources = run_generators(&["brand", "email_domain"], &service).await?;
//! ```

pub mod config;
pub mod generators;
pub mod okta;
pub mod resource;

pub use resource::{FetchError, Generator, ResourceDescriptor};
