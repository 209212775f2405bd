//! Configuration module

mod site;

pub use site::CmsConfig;
pub use site::OrganizationConfig;
pub use site::SiteConfig;
