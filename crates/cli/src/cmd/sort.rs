//! Sort command implementation.

use std::borrow::Borrow;
use std::path::{Path, PathBuf};

use pagefields_core::types::{SortOrder, sort_entries};
use serde_yaml::Mapping;
use tabled::{settings::Style, Table, Tabled};

use super::output::{display_value, print_json, resolve_format};
use super::{Workspace, entry_format, read_document};
use crate::{OutputFormat, SortArgs};

/// An entry file and its field values.
struct SortItem {
    path: PathBuf,
    fields: Mapping,
}

impl Borrow<Mapping> for SortItem {
    fn borrow(&self) -> &Mapping {
        &self.fields
    }
}

#[derive(Tabled)]
struct SortRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: SortArgs) {
    let ws = Workspace::load(config, profile);
    let content_entry = ws.entry(&args.entry);

    let Some(field) = content_entry.fields.iter().find(|f| f.name == args.field) else {
        eprintln!("Error: Unknown field '{}' in entry '{}'", args.field, args.entry);
        std::process::exit(1);
    };

    let mut items: Vec<SortItem> = args
        .files
        .iter()
        .map(|file| {
            let path = ws.resolve_path(file);
            let doc = read_document(&path, entry_format(content_entry, &path));
            SortItem { path, fields: doc.fields }
        })
        .collect();

    let order = if args.desc { SortOrder::Descending } else { SortOrder::Ascending };
    if let Err(e) = sort_entries(&mut items, field, order, &ws.cms, &ws.registry) {
        eprintln!("Error sorting by '{}': {}", args.field, e);
        std::process::exit(1);
    }

    let key = field.name.as_str();
    match resolve_format(args.output, args.json, args.quiet) {
        OutputFormat::Table => {
            let rows: Vec<SortRow> = items
                .iter()
                .enumerate()
                .map(|(i, item)| SortRow {
                    position: i + 1,
                    path: item.path.display().to_string(),
                    value: display_value(item.fields.get(key)),
                })
                .collect();
            let table = Table::new(&rows).with(Style::rounded()).to_string();
            println!("{}", table);
        }
        OutputFormat::Json => {
            #[derive(serde::Serialize)]
            struct SortOutput<'a> {
                path: String,
                value: Option<&'a serde_yaml::Value>,
            }

            let output: Vec<SortOutput> = items
                .iter()
                .map(|item| SortOutput {
                    path: item.path.display().to_string(),
                    value: item.fields.get(key),
                })
                .collect();
            print_json(&output);
        }
        OutputFormat::Quiet => {
            for item in &items {
                println!("{}", item.path.display());
            }
        }
    }
}
