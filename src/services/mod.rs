//! Business logic services

pub mod resolver;
pub mod source;
pub mod thousandeyes;

pub use resolver::{find_first, lookup, resolve};
pub use source::AlertRuleSource;
pub use thousandeyes::ThousandEyesClient;
