//! Okta API interaction module
//!
//! Everything the discovery pipeline needs from the outside world goes
//! through the surfaces defined here.
//!
//! # Module Structure
//!
//! - [`api`] - the legacy and current API surfaces plus the [`OktaService`] capability
//! - [`client`] - REST implementation of both surfaces
//! - [`http`] - HTTP utilities (auth header, pagination links, error formatting)
//! - [`models`] - typed API payloads
//!
//! # Example
//!
//! ```ignore
//! use okta_discover::okta::{OktaClient, OktaService};
//!
//! let client = OktaClient::new("https://acme.okta.com", &token)?;
//! let service = OktaService::from_client(client);
//! let brands = service.client_v5().list_brands().await?;
//! ```

pub mod api;
pub mod client;
pub mod http;
pub mod models;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{LegacyApi, ManagementApi, OktaService};
pub use client::OktaClient;
