//! Per-kind generators
//!
//! Each generator lists one kind of Okta object and turns it into
//! [`ResourceDescriptor`](crate::resource::ResourceDescriptor)s.

mod brand;
mod captcha;
mod domain;
mod email;
mod feature;
mod log_stream;
mod profile_mapping;
mod realm;
mod role;

pub use brand::{BrandGenerator, ThemeGenerator};
pub use captcha::CaptchaGenerator;
pub use domain::{DomainGenerator, EmailDomainGenerator};
pub use email::EmailSenderGenerator;
pub use feature::FeatureGenerator;
pub use log_stream::LogStreamGenerator;
pub use profile_mapping::ProfileMappingGenerator;
pub use realm::RealmGenerator;
pub use role::RoleGenerator;
