//! Validate command implementation.

use std::path::{Path, PathBuf};

use pagefields_core::entry::{self, EntryDocument};
use pagefields_core::types::{ValidationResult, resolve_fields, try_fix_entry};

use super::output::{print_json, resolve_format};
use super::{Workspace, entry_format, field_order, read_document};
use crate::{OutputFormat, ValidateArgs};

/// Validation outcome of one file.
struct FileResult {
    path: PathBuf,
    result: ValidationResult,
    fixes: Option<Vec<String>>,
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: ValidateArgs) {
    let ws = Workspace::load(config, profile);
    let content_entry = ws.entry(&args.entry);

    let validator = match resolve_fields(&content_entry.fields, &ws.cms, &ws.registry) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error resolving fields of '{}': {}", args.entry, e);
            std::process::exit(1);
        }
    };

    let mut total = 0;
    let mut valid_count = 0;
    let mut error_count = 0;
    let mut fixed_count = 0;
    let mut results: Vec<FileResult> = Vec::new();

    for file in &args.files {
        total += 1;
        let path = ws.resolve_path(file);
        let format = entry_format(content_entry, &path);
        let doc = read_document(&path, format);

        let result = validator.validate_entry(&doc.fields);
        if result.valid {
            valid_count += 1;
            if !result.warnings.is_empty() {
                results.push(FileResult { path, result, fixes: None });
            }
            continue;
        }

        if !args.fix {
            error_count += 1;
            results.push(FileResult { path, result, fixes: None });
            continue;
        }

        let fix_result = match try_fix_entry(
            &doc.fields,
            &content_entry.fields,
            &result.errors,
            &ws.cms,
            &ws.registry,
        ) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Error fixing {}: {}", path.display(), e);
                std::process::exit(1);
            }
        };

        if !fix_result.fixed {
            error_count += 1;
            results.push(FileResult { path, result, fixes: None });
            continue;
        }

        let fixed_doc = EntryDocument { fields: fix_result.values, body: doc.body };
        let order = field_order(content_entry);
        let written = entry::serialize(&fixed_doc, format, Some(&order))
            .map_err(|e| e.to_string())
            .and_then(|content| std::fs::write(&path, content).map_err(|e| e.to_string()));
        if let Err(e) = written {
            eprintln!("Warning: Failed to apply fixes to {}: {}", path.display(), e);
            error_count += 1;
            results.push(FileResult { path, result, fixes: None });
            continue;
        }

        fixed_count += 1;
        tracing::debug!(path = %path.display(), fixes = fix_result.fixes.len(), "applied fixes");

        // Whatever is still wrong after fixing is reported as remaining errors.
        let remaining = validator.validate_entry(&fixed_doc.fields);
        if !remaining.valid {
            error_count += 1;
        }
        results.push(FileResult { path, result: remaining, fixes: Some(fix_result.fixes) });
    }

    match resolve_format(args.output, args.json, args.quiet) {
        OutputFormat::Table => print_results_table(
            &results,
            total,
            valid_count,
            error_count,
            fixed_count,
            args.fix,
        ),
        OutputFormat::Json => {
            print_results_json(&results, total, valid_count, error_count, fixed_count)
        }
        OutputFormat::Quiet => print_results_quiet(&results),
    }

    // Exit with error code if any validation failures remain unfixed
    if error_count > 0 {
        std::process::exit(1);
    }
}

fn print_results_table(
    results: &[FileResult],
    total: usize,
    valid: usize,
    errors: usize,
    fixed: usize,
    fix_mode: bool,
) {
    if errors == 0 && fixed == 0 {
        println!("All {} entries validated successfully.", total);
    } else if fix_mode && fixed > 0 {
        println!(
            "Validation Results: {} valid, {} fixed, {} with errors (of {} total)",
            valid, fixed, errors, total
        );
    } else {
        println!(
            "Validation Results: {} valid, {} with errors (of {} total)",
            valid, errors, total
        );
    }

    for file in results {
        println!();
        println!("{}", file.path.display());

        if let Some(applied) = &file.fixes {
            for fix in applied {
                println!("  + {}", fix);
            }
        }
        for error in &file.result.errors {
            println!("  - {}", error);
        }
        for warning in &file.result.warnings {
            println!("  ~ {}", warning);
        }
    }
}

fn print_results_json(
    results: &[FileResult],
    total: usize,
    valid: usize,
    errors: usize,
    fixed: usize,
) {
    #[derive(serde::Serialize)]
    struct Output<'a> {
        total: usize,
        valid: usize,
        errors: usize,
        fixed: usize,
        results: Vec<EntryResult<'a>>,
    }

    #[derive(serde::Serialize)]
    struct EntryResult<'a> {
        path: String,
        valid: bool,
        errors: &'a [pagefields_core::types::ValidationError],
        warnings: &'a [String],
        #[serde(skip_serializing_if = "Option::is_none")]
        fixes_applied: Option<&'a [String]>,
    }

    let output = Output {
        total,
        valid,
        errors,
        fixed,
        results: results
            .iter()
            .map(|file| EntryResult {
                path: file.path.to_string_lossy().to_string(),
                valid: file.result.valid,
                errors: &file.result.errors,
                warnings: &file.result.warnings,
                fixes_applied: file.fixes.as_deref(),
            })
            .collect(),
    };

    print_json(&output);
}

fn print_results_quiet(results: &[FileResult]) {
    for file in results.iter().filter(|f| !f.result.valid) {
        println!("{}", file.path.display());
    }
}
