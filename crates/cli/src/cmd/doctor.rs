use pagefields_core::config::{ConfigLoader, SchemaLoader, default_config_path};
use pagefields_core::types::{FieldRegistry, resolve_entry};
use std::path::Path;

fn fail(message: impl std::fmt::Display) -> ! {
    println!("FAIL pgf doctor");
    println!("{message}");
    std::process::exit(1);
}

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL pgf doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };

    let cms = SchemaLoader::load(&rc.schema_path).unwrap_or_else(|e| fail(e));
    let registry = FieldRegistry::builtin().unwrap_or_else(|e| fail(e));

    // Every entry must resolve, so schema mistakes surface before editing.
    for name in cms.entry_names() {
        if let Err(e) = resolve_entry(name, &cms, &registry) {
            fail(format!("entry '{}': {}", name, e));
        }
    }

    println!("OK   pgf doctor");
    println!(
        "path: {}",
        config.map_or_else(
            || default_config_path().display().to_string(),
            |p| p.display().to_string()
        )
    );
    println!("profile: {}", rc.active_profile);
    println!("repo_root: {}", rc.repo_root.display());
    println!("schema: {}", rc.schema_path.display());
    println!("entries: {}", cms.content.len());
    println!("components: {}", cms.components.len());
    println!("field types: {}", registry.len());
}
