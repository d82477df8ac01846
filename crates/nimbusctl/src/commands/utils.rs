//! Shared utilities for command implementations

use std::fs;
use std::io::{self, IsTerminal, Read, Write};

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::{CtlError, Result as CliResult};
use crate::models::network::AppGateway;
use crate::output;

/// Resolve the user-facing format choice into a concrete one.
///
/// `auto` prints a table on a terminal and JSON when piped, so pipeline
/// chaining works without an explicit `-o json`.
pub fn resolve_format(format: OutputFormat) -> output::OutputFormat {
    match format {
        OutputFormat::Json => output::OutputFormat::Json,
        OutputFormat::Yaml => output::OutputFormat::Yaml,
        OutputFormat::Table => output::OutputFormat::Table,
        OutputFormat::Auto => {
            if io::stdout().is_terminal() {
                output::OutputFormat::Table
            } else {
                output::OutputFormat::Json
            }
        }
    }
}

/// Serialize, apply the optional JMESPath query, and print.
pub fn emit<T: Serialize>(
    data: &T,
    format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    output::print_output(data, resolve_format(format), query).map_err(|e| CtlError::Output {
        message: e.to_string(),
    })
}

/// Read input, supporting @filename notation
pub fn read_file_input(input: &str) -> CliResult<String> {
    if let Some(filename) = input.strip_prefix('@') {
        fs::read_to_string(filename).map_err(|e| CtlError::FileError {
            path: filename.to_string(),
            message: e.to_string(),
        })
    } else {
        Ok(input.to_string())
    }
}

/// Read all of stdin; fails when stdin is a terminal (nothing is piped).
pub fn read_stdin(what: &str) -> CliResult<String> {
    if io::stdin().is_terminal() {
        return Err(CtlError::InvalidInput {
            message: format!("{what} expected on stdin; pipe it in or pass it as an argument"),
        });
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Read the pipeline gateway object from `--gateway` (string or @file) or
/// from stdin when the flag is omitted.
pub fn read_gateway(gateway: Option<&str>) -> CliResult<AppGateway> {
    let text = match gateway {
        Some(input) => read_file_input(input)?,
        None => read_stdin("gateway object")?,
    };
    serde_json::from_str(&text).map_err(|e| CtlError::InvalidInput {
        message: format!("invalid gateway JSON: {e}"),
    })
}

/// Prompts the user for confirmation
pub fn confirm_action(message: &str) -> CliResult<bool> {
    print!("Are you sure you want to {}? [y/N]: ", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y") || input.trim().eq_ignore_ascii_case("yes"))
}

/// Mandatory string parameters must be non-empty before dispatch.
pub fn require_non_empty(value: &str, what: &str) -> CliResult<()> {
    if value.trim().is_empty() {
        return Err(CtlError::InvalidInput {
            message: format!("{what} must not be empty"),
        });
    }
    Ok(())
}

/// Parse a KEY=VALUE pair.
pub fn parse_key_value(pair: &str) -> CliResult<(String, String)> {
    let Some((key, value)) = pair.split_once('=') else {
        return Err(CtlError::InvalidInput {
            message: format!("Invalid format '{pair}'. Expected 'key=value' format"),
        });
    };
    Ok((key.to_string(), value.to_string()))
}
