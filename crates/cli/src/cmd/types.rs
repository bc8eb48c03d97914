//! Types command implementation.

use std::path::Path;

use pagefields_core::fields::Capabilities;
use pagefields_core::types::FieldRegistry;
use tabled::{settings::Style, Table, Tabled};

use super::output::{print_json, resolve_format};
use crate::{OutputFormat, TypesArgs};

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "Type")]
    name: String,
    #[tabled(rename = "Origin")]
    origin: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Capabilities")]
    capabilities: String,
    #[tabled(rename = "Edit")]
    edit: String,
}

/// The registry does not depend on the profile, but a broken config is still reported.
pub fn run(config: Option<&Path>, profile: Option<&str>, args: TypesArgs) {
    if config.is_some() || profile.is_some() {
        if let Err(e) = pagefields_core::config::ConfigLoader::load(config, profile) {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    }

    let registry = match FieldRegistry::builtin() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error building field registry: {}", e);
            std::process::exit(1);
        }
    };

    match resolve_format(args.output, args.json, false) {
        OutputFormat::Json => print_types_json(&registry),
        OutputFormat::Quiet => {
            for name in registry.type_names() {
                println!("{}", name);
            }
        }
        OutputFormat::Table => print_types_table(&registry),
    }
}

fn capability_list(caps: Capabilities) -> Vec<&'static str> {
    [
        (caps.schema, "schema"),
        (caps.default_value, "default"),
        (caps.read, "read"),
        (caps.write, "write"),
        (caps.sort, "sort"),
    ]
    .into_iter()
    .filter_map(|(has, name)| has.then_some(name))
    .collect()
}

fn print_types_table(registry: &FieldRegistry) {
    let rows: Vec<TypeRow> = registry
        .type_names()
        .into_iter()
        .map(|name| TypeRow {
            name: name.to_string(),
            origin: registry.origin(name).map(|o| o.to_string()).unwrap_or_default(),
            label: registry.label(name).unwrap_or("-").to_string(),
            capabilities: registry
                .capabilities(name)
                .map(|caps| capability_list(caps).join(", "))
                .unwrap_or_default(),
            edit: registry
                .edit_component(name)
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

fn print_types_json(registry: &FieldRegistry) {
    #[derive(serde::Serialize)]
    struct TypeOutput<'a> {
        name: &'a str,
        origin: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<&'a str>,
        capabilities: Vec<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        edit_component: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        view_component: Option<String>,
    }

    let output: Vec<TypeOutput> = registry
        .type_names()
        .into_iter()
        .map(|name| TypeOutput {
            name,
            origin: registry.origin(name).map(|o| o.to_string()).unwrap_or_default(),
            label: registry.label(name),
            capabilities: registry.capabilities(name).map(capability_list).unwrap_or_default(),
            edit_component: registry.edit_component(name).map(|c| c.to_string()),
            view_component: registry.view_component(name).map(|c| c.to_string()),
        })
        .collect();

    print_json(&output);
}
