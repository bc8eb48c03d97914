//! Entry documents: parsing and serializing the files that hold content values.
//!
//! Three layouts are supported:
//! - Markdown with YAML front matter (fields up top, body below)
//! - Plain YAML
//! - JSON

pub mod parser;
pub mod serializer;
pub mod types;

pub use parser::{EntryError, parse};
pub use serializer::serialize;
pub use types::{EntryDocument, EntryFormat};
