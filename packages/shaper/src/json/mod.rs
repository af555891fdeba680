//! JSON output generation for shaped documents.

mod writer;

pub use writer::{generate_json, save_json};
