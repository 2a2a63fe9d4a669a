//! Configuration module

mod site;

pub use site::ContentConfig;
pub use site::SiteConfig;
