//! Core field types.
//!
//! Registration order is fixed by [`modules`]; it only matters when two
//! entries share a name, in which case the later one wins.

mod boolean;
mod date;
mod media;
mod number;
mod object;
mod select;
mod string;
mod uuid;

use std::cmp::Ordering;

use serde_yaml::Value;

use super::FieldModule;
use crate::types::validation::scalar_text;

pub use date::{date_rules, parse_date_value};
pub use media::{MediaKind, swap_prefix};
pub use select::select_values;
pub use string::string_rules;

/// All core modules, in registration order.
pub fn modules() -> Vec<(&'static str, FieldModule)> {
    vec![
        ("string", string::module()),
        ("text", string::text_module()),
        ("rich-text", string::rich_text_module()),
        ("code", string::code_module()),
        ("number", number::module()),
        ("boolean", boolean::module()),
        ("uuid", uuid::module()),
        ("date", date::module()),
        ("select", select::module()),
        ("image", media::module(MediaKind::Image)),
        ("file", media::module(MediaKind::File)),
        ("object", object::module()),
        ("block", object::block_module()),
    ]
}

/// Case-insensitive text ordering; values without a text form sort last.
pub fn compare_text(a: &Value, b: &Value) -> Ordering {
    match (scalar_text(a), scalar_text(b)) {
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
