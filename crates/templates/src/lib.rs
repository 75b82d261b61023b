//! forge-templates: the fixed template catalog (§3) and matcher (C7).

pub mod catalog;
pub mod matcher;

pub use catalog::{by_id, idf, CATALOG};
pub use matcher::match_template;
