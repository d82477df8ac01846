use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::Table;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;

/// Normalize backtick literals in JMESPath expressions.
///
/// The JMESPath specification allows "elided quotes" in backtick literals,
/// meaning `` `foo` `` is equivalent to `` `"foo"` ``. However, the Rust
/// jmespath crate requires valid JSON inside backticks.
///
/// This function converts unquoted string literals like `` `foo` `` to
/// properly quoted JSON strings like `` `"foo"` ``.
///
/// Examples:
/// - `` `foo` `` -> `` `"foo"` ``
/// - `` `true` `` -> `` `true` `` (unchanged, valid JSON boolean)
/// - `` `123` `` -> `` `123` `` (unchanged, valid JSON number)
/// - `` `"already quoted"` `` -> `` `"already quoted"` `` (unchanged)
fn normalize_backtick_literals(query: &str) -> String {
    static BACKTICK_RE: OnceLock<Regex> = OnceLock::new();
    let re = BACKTICK_RE.get_or_init(|| {
        // Match backtick-delimited content, handling escaped backticks
        Regex::new(r"`([^`\\]*(?:\\.[^`\\]*)*)`").unwrap()
    });

    re.replace_all(query, |caps: &regex::Captures| {
        let content = &caps[1];
        let trimmed = content.trim();

        // Check if it's already valid JSON
        if serde_json::from_str::<Value>(trimmed).is_ok() {
            // Already valid JSON (number, boolean, null, quoted string, array, object)
            format!("`{}`", content)
        } else {
            // Not valid JSON - treat as unquoted string literal and add quotes
            // Escape any double quotes in the content
            let escaped = trimmed.replace('\\', "\\\\").replace('"', "\\\"");
            format!("`\"{}\"`", escaped)
        }
    })
    .into_owned()
}

/// Apply a JMESPath query to an already-serialized value.
pub fn apply_query(value: &Value, query: &str) -> Result<Value> {
    let normalized = normalize_backtick_literals(query);
    let expr = jmespath::compile(&normalized)
        .with_context(|| format!("Invalid JMESPath expression: {}", query))?;
    let data =
        jmespath::Variable::from_serializable(value).context("Failed to prepare query input")?;
    let result = expr.search(data).context("JMESPath query failed")?;
    serde_json::to_value(result.as_ref()).context("Failed to serialize query result")
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Table,
}

pub fn print_output<T: Serialize>(
    data: T,
    format: OutputFormat,
    query: Option<&str>,
) -> Result<()> {
    let mut json_value = serde_json::to_value(data)?;

    // Apply JMESPath query if provided
    if let Some(query_str) = query {
        json_value = apply_query(&json_value, query_str)?;
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json_value)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(&json_value)?);
        }
        OutputFormat::Table => {
            print_as_table(&json_value)?;
        }
    }

    Ok(())
}

/// Print a non-error notice (deprecations) to stderr.
///
/// Warnings never affect control flow or exit status.
pub fn print_warning(message: &str) {
    eprint!("{}{}", "warning".yellow().bold(), ": ".bold());
    eprintln!("{}", message);
}

fn print_as_table(value: &Value) -> Result<()> {
    match value {
        Value::Array(arr) if !arr.is_empty() => {
            let mut table = Table::new();

            // Get headers from first object
            if let Value::Object(first) = &arr[0] {
                let headers: Vec<String> = first.keys().cloned().collect();
                table.set_header(&headers);

                // Add rows
                for item in arr {
                    if let Value::Object(obj) = item {
                        let row: Vec<String> = headers
                            .iter()
                            .map(|h| format_value(obj.get(h).unwrap_or(&Value::Null)))
                            .collect();
                        table.add_row(row);
                    }
                }
            } else {
                // Simple array of values
                table.set_header(vec!["Value"]);
                for item in arr {
                    table.add_row(vec![format_value(item)]);
                }
            }

            println!("{}", table);
        }
        Value::Object(obj) => {
            let mut table = Table::new();
            table.set_header(vec!["Key", "Value"]);

            for (key, val) in obj {
                table.add_row(vec![key.clone(), format_value(val)]);
            }

            println!("{}", table);
        }
        _ => {
            println!("{}", format_value(value));
        }
    }

    Ok(())
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_backtick_unquoted_string() {
        // Standard JMESPath backtick literal without quotes
        assert_eq!(
            normalize_backtick_literals(r#"[?name==`pool1`]"#),
            r#"[?name==`"pool1"`]"#
        );
    }

    #[test]
    fn test_normalize_backtick_already_quoted() {
        // Already properly quoted - should not double-quote
        assert_eq!(
            normalize_backtick_literals(r#"[?name==`"pool1"`]"#),
            r#"[?name==`"pool1"`]"#
        );
    }

    #[test]
    fn test_normalize_backtick_number() {
        // Numbers are valid JSON - should not be quoted
        assert_eq!(
            normalize_backtick_literals(r#"[?port==`8080`]"#),
            r#"[?port==`8080`]"#
        );
    }

    #[test]
    fn test_normalize_backtick_boolean() {
        // Booleans are valid JSON - should not be quoted
        assert_eq!(
            normalize_backtick_literals(r#"[?scaleSetEnabled==`true`]"#),
            r#"[?scaleSetEnabled==`true`]"#
        );
    }

    #[test]
    fn test_normalize_multiple_backticks() {
        // Multiple backtick literals in one expression
        assert_eq!(
            normalize_backtick_literals(r#"[?name==`pool1` && state==`active`]"#),
            r#"[?name==`"pool1"` && state==`"active"`]"#
        );
    }

    #[test]
    fn test_apply_query_filters_arrays() {
        let data = json!([
            {"name": "task1", "state": "active"},
            {"name": "task2", "state": "completed"},
            {"name": "task3", "state": "active"}
        ]);

        let filtered = apply_query(&data, "[?state==`active`].name").unwrap();
        assert_eq!(filtered, json!(["task1", "task3"]));
    }

    #[test]
    fn test_apply_query_single_quote_literal() {
        // Single quotes are raw string literals in JMESPath
        let data = json!([{"name": "task1"}]);
        let result = apply_query(&data, "[?name=='task1'] | [0].name").unwrap();
        assert_eq!(result, json!("task1"));
    }

    #[test]
    fn test_format_value_summarizes_containers() {
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!("westus")), "westus");
        assert_eq!(format_value(&json!([1, 2, 3])), "[3 items]");
        assert_eq!(format_value(&json!({"a": 1})), "{1 fields}");
    }
}
