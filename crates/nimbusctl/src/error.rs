//! Error types for nimbusctl
//!
//! Defines structured error types using thiserror for better error handling and user experience.

use colored::Colorize;
use thiserror::Error;

/// Cargo-style diagnostic formatter for CLI errors.
///
/// Produces structured output like:
/// ```text
/// error: No profile configured. Use 'nimbusctl profile set' to configure one.
///
///   tip: create a profile:
///       nimbusctl profile set prod --token env:NIMBUS_TOKEN --subscription <id>
/// ```
pub struct CliDiagnostic {
    message: String,
    detail: Option<String>,
    tips: Vec<(String, Vec<String>)>,
}

impl CliDiagnostic {
    /// Start a new error diagnostic with the given message.
    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            detail: None,
            tips: Vec::new(),
        }
    }

    /// Add a detail line below the error message.
    #[allow(dead_code)]
    pub fn detail(mut self, text: &str) -> Self {
        self.detail = Some(text.to_string());
        self
    }

    /// Add a tip with optional example commands.
    pub fn tip(mut self, description: &str, commands: &[&str]) -> Self {
        self.tips.push((
            description.to_string(),
            commands.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Print the diagnostic to stderr with colored formatting.
    pub fn print(&self) {
        eprint!("{}{}", "error".red().bold(), ": ".bold());
        eprintln!("{}", self.message);

        if let Some(detail) = &self.detail {
            eprintln!("  {}", detail);
        }

        for (description, commands) in &self.tips {
            eprintln!();
            eprint!("  {}{}", "tip".yellow().bold(), ": ".bold());
            eprintln!("{}", description);
            for cmd in commands {
                eprintln!("      {}", cmd);
            }
        }
    }
}

/// Main error type for the nimbusctl application
#[derive(Error, Debug)]
pub enum CtlError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("No profile configured. Use 'nimbusctl profile set' to configure a profile.")]
    NoProfileConfigured,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("API error: {message}")]
    Api { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("File error for '{path}': {message}")]
    FileError { path: String, message: String },

    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Output formatting error: {message}")]
    Output { message: String },
}

/// Result type for nimbusctl operations
pub type Result<T> = std::result::Result<T, CtlError>;

impl CtlError {
    /// Get helpful suggestions for resolving this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            CtlError::ProfileNotFound { name } => vec![
                "List available profiles: nimbusctl profile list".to_string(),
                format!("Create profile '{}': nimbusctl profile set {}", name, name),
                "Check profile name spelling".to_string(),
            ],
            CtlError::NoProfileConfigured => vec![
                "Create a profile: nimbusctl profile set prod --token env:NIMBUS_TOKEN --subscription <id>".to_string(),
                "View profile documentation: nimbusctl profile --help".to_string(),
            ],
            CtlError::AuthenticationFailed { .. } => vec![
                "Check your credentials: nimbusctl profile show <profile>".to_string(),
                "Verify the token referenced by the profile is valid".to_string(),
                "Ensure the API endpoint URL is correct".to_string(),
            ],
            CtlError::Connection { .. } => vec![
                "Check network connectivity".to_string(),
                "Verify the endpoint URL is correct: nimbusctl profile show <profile>".to_string(),
            ],
            CtlError::Api { message } if message.contains("404") => vec![
                "Verify the resource name is correct".to_string(),
                "List available resources to find the correct name".to_string(),
                "Check that you're using the correct profile".to_string(),
            ],
            CtlError::InvalidInput { .. } => vec![
                "Check the command syntax: nimbusctl <command> --help".to_string(),
            ],
            CtlError::FileError { path, .. } => vec![
                format!("Check that file exists: {}", path),
                "Ensure file path is correct (use absolute path if needed)".to_string(),
            ],
            _ => vec![],
        }
    }

    /// Print a cargo-style diagnostic to stderr using colored formatting.
    pub fn print_diagnostic(&self) {
        let mut diag = CliDiagnostic::error(&format!("{}", self));

        for suggestion in self.suggestions() {
            diag = diag.tip(&suggestion, &[]);
        }

        diag.print();
    }
}

impl From<nimbus_mgmt::RestError> for CtlError {
    fn from(err: nimbus_mgmt::RestError) -> Self {
        use nimbus_mgmt::RestError;
        match err {
            RestError::AuthenticationFailed => CtlError::AuthenticationFailed {
                message: "check the configured token".to_string(),
            },
            RestError::NotFound => CtlError::Api {
                message: "404 Not Found: The requested resource does not exist".to_string(),
            },
            RestError::Api { code, message } => CtlError::Api {
                message: format!("HTTP {}: {}", code, message),
            },
            RestError::Server(msg) => CtlError::Api {
                message: format!("Server error (5xx): {}", msg),
            },
            RestError::Connection(msg) => CtlError::Connection { message: msg },
            RestError::Validation(msg) => CtlError::InvalidInput { message: msg },
            RestError::Deserialize(e) => CtlError::Api {
                message: format!("unexpected response body: {}", e),
            },
            RestError::Url(e) => CtlError::Configuration(format!("invalid API URL: {}", e)),
        }
    }
}

impl From<nimbusctl_core::ConfigError> for CtlError {
    fn from(err: nimbusctl_core::ConfigError) -> Self {
        use nimbusctl_core::ConfigError;
        match err {
            ConfigError::ProfileNotFound { name } => CtlError::ProfileNotFound { name },
            ConfigError::NoProfileConfigured => CtlError::NoProfileConfigured,
            other => CtlError::Configuration(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CtlError {
    fn from(err: serde_json::Error) -> Self {
        CtlError::Output {
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<std::io::Error> for CtlError {
    fn from(err: std::io::Error) -> Self {
        CtlError::Output {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<anyhow::Error> for CtlError {
    fn from(err: anyhow::Error) -> Self {
        CtlError::Configuration(format!("{:#}", err))
    }
}
