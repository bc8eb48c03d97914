//! Defaults command implementation.

use std::path::Path;

use pagefields_core::types::entry_defaults;

use super::Workspace;
use super::output::print_document;
use crate::DefaultsArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: DefaultsArgs) {
    let ws = Workspace::load(config, profile);
    let content_entry = ws.entry(&args.entry);

    let values = match entry_defaults(&content_entry.fields, &ws.cms, &ws.registry) {
        Ok(values) => values,
        Err(e) => {
            eprintln!("Error computing defaults of '{}': {}", args.entry, e);
            std::process::exit(1);
        }
    };

    print_document(&values, args.json);
}
