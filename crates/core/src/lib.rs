//! Field type registry and value pipeline for a Git-backed content editor.
//!
//! - [`config`]: the TOML app config and the `.pages.yml` content configuration
//! - [`entry`]: entry documents (front matter, YAML, JSON)
//! - [`fields`]: field modules, core and custom
//! - [`types`]: declarations, registry, validation, defaults, codec and sorting

#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod entry;
pub mod fields;
pub mod types;
