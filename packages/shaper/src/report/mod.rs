//! Source reports: structural audit and tag frequencies.
//!
//! Both passes read the raw XML and return a value; printing is left to
//! the caller.

pub mod audit;
pub mod frequency;

pub use audit::{audit_document, audit_file, audit_xml, AuditReport, ElementAudit};
pub use frequency::{count_tags, tag_frequency_file, tag_frequency_xml, PairCount, TagFrequency};
