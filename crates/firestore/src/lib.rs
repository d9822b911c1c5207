//! Firestore wire-format helpers for the toki data tools.
//!
//! Firestore wraps every field value in a single-key object naming its
//! type (`{"integerValue": "42"}`, `{"mapValue": {"fields": ...}}`, ...).
//! This crate converts between that tagged representation and plain JSON
//! values, and carries the small document/query helpers built on top of it.
//!
//! # Architecture
//!
//! - **value**: the typed-value codec (`encode_value` / `decode_value`)
//! - **document**: document-level encode/decode and resource-path handling
//! - **query**: structured query filter construction

pub mod document;
pub mod query;
pub mod value;

pub use document::{decode_document, document_path, encode_fields};
pub use query::{parse_filter, FilterError};
pub use value::{decode_value, encode_value, ValueError};
