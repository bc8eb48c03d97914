//! Field types shipped on top of the core set.
//!
//! Deployments register these after the core modules, so a custom module
//! registered under a core name replaces it.

mod color;

use super::FieldModule;

/// All shipped custom modules.
pub fn modules() -> Vec<(&'static str, FieldModule)> {
    vec![("color", color::module())]
}
