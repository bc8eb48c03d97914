//! Shared output formatting.

use serde::Serialize;

use crate::OutputFormat;

/// `--json` and `--quiet` override `--output`.
pub fn resolve_format(output: OutputFormat, json: bool, quiet: bool) -> OutputFormat {
    if json {
        OutputFormat::Json
    } else if quiet {
        OutputFormat::Quiet
    } else {
        output
    }
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a value as YAML, or as pretty JSON when `json` is set.
pub fn print_document<T: Serialize>(value: &T, json: bool) {
    if json {
        print_json(value);
        return;
    }
    match serde_yaml::to_string(value) {
        Ok(yaml) => print!("{}", yaml),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            std::process::exit(1);
        }
    }
}

/// One-line rendering of a field value for tables.
pub fn display_value(value: Option<&serde_yaml::Value>) -> String {
    use serde_yaml::Value;
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => serde_json::to_string(other).unwrap_or_else(|_| "?".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    #[test]
    fn test_flags_override_output() {
        assert!(matches!(resolve_format(OutputFormat::Table, true, true), OutputFormat::Json));
        assert!(matches!(resolve_format(OutputFormat::Table, false, true), OutputFormat::Quiet));
        assert!(matches!(resolve_format(OutputFormat::Json, false, false), OutputFormat::Json));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(None), "-");
        assert_eq!(display_value(Some(&Value::Null)), "-");
        assert_eq!(display_value(Some(&Value::String("Hi".into()))), "Hi");
        let list: Value = serde_yaml::from_str("[a, 1]").unwrap();
        assert_eq!(display_value(Some(&list)), r#"["a",1]"#);
    }
}
