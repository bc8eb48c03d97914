//! Read and write command implementations.

use std::path::Path;

use pagefields_core::entry::{self, EntryDocument};
use pagefields_core::types::{read_entry, write_entry};

use super::output::print_document;
use super::{Workspace, entry_format, field_order, read_document};
use crate::{CodecArgs, WriteArgs};

/// Print a stored entry the way the editor sees it.
///
/// Fields that cannot be read keep their stored value and are reported on
/// stderr; the command still succeeds.
pub fn run_read(config: Option<&Path>, profile: Option<&str>, args: CodecArgs) {
    let ws = Workspace::load(config, profile);
    let content_entry = ws.entry(&args.entry);
    let path = ws.resolve_path(&args.file);
    let doc = read_document(&path, entry_format(content_entry, &path));

    let decoded = read_entry(&doc.fields, &content_entry.fields, &ws.cms, &ws.registry);
    for failure in &decoded.failures {
        eprintln!("Warning: {}: {}", failure.path, failure.message);
    }

    print_document(&decoded.values, args.json);
}

/// Convert edited values back to their stored form.
///
/// The result is serialized in the entry's own format, keeping any body.
pub fn run_write(config: Option<&Path>, profile: Option<&str>, args: WriteArgs) {
    let ws = Workspace::load(config, profile);
    let content_entry = ws.entry(&args.entry);
    let path = ws.resolve_path(&args.file);
    let format = entry_format(content_entry, &path);
    let doc = read_document(&path, format);

    let stored = match write_entry(&doc.fields, &content_entry.fields, &ws.cms, &ws.registry) {
        Ok(values) => values,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let order = field_order(content_entry);
    let stored_doc = EntryDocument { fields: stored, body: doc.body };
    let content = match entry::serialize(&stored_doc, format, Some(&order)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error serializing entry: {}", e);
            std::process::exit(1);
        }
    };

    if !args.in_place {
        print!("{}", content);
        return;
    }

    if let Err(e) = std::fs::write(&path, content) {
        eprintln!("Error writing {}: {}", path.display(), e);
        std::process::exit(1);
    }
    println!("Wrote {}", path.display());
}
