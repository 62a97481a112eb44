//! Data models

mod alert_rule;
mod attributes;
mod criteria;

pub use alert_rule::*;
pub use attributes::*;
pub use criteria::*;
