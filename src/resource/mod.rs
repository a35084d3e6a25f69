//! Discovery-to-descriptor pipeline
//!
//! # Architecture
//!
//! - [`naming`] - label to resource name normalization
//! - [`resolver`] - tiered cross-reference resolution
//! - [`descriptor`] - the uniform [`ResourceDescriptor`] and its assembly
//! - [`generator`] - the per-kind [`Generator`] contract and [`FetchError`]
//! - [`registry`] - service name to generator lookup

pub mod descriptor;
pub mod generator;
pub mod naming;
mod registry;
pub mod resolver;

pub use descriptor::{
    nested_block, AssemblyError, Attributes, Block, Extra, ResourceDescriptor, PROVIDER,
};
pub use generator::{FetchContext, FetchError, Generator, ResourceSet};
pub use naming::{normalize_resource_name, normalize_resource_name_with_random, FALLBACK_NAME};
pub use registry::*;
pub use resolver::{
    resolve, CrossReferenceMap, EmbeddedTier, Identified, MapTier, PropertyBag, PropertyTier,
    ResolutionTier,
};
