//! Error types for tap-workday
//!
//! This module defines the error hierarchy for the whole tap.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Errors fall into three groups: transport failures (network, non-success
//! status, SOAP faults), parse failures (malformed XML, missing envelope
//! paths) and local failures (configuration, templates, output). None of
//! them are retried; every error aborts the extract.

use thiserror::Error;

/// The main error type for tap-workday
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("SOAP fault {code}: {message}")]
    SoapFault { code: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Parse Errors
    // ============================================================================
    #[error("XML parsing error: {message}")]
    XmlParse { message: String },

    #[error("Expected element '{path}' not found in response")]
    MissingPath { path: String },

    #[error("Invalid record path '{path}': {message}")]
    InvalidRecordPath { path: String, message: String },

    // ============================================================================
    // Template Errors
    // ============================================================================
    #[error("Undefined variable in template: {variable}")]
    UndefinedVariable { variable: String },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Page limit of {limit} exceeded (service reported {total_pages} pages)")]
    PageLimitExceeded { limit: u32, total_pages: u64 },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Output error: {message}")]
    Output { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a SOAP fault error
    pub fn soap_fault(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SoapFault {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create an XML parse error
    pub fn xml(message: impl Into<String>) -> Self {
        Self::XmlParse {
            message: message.into(),
        }
    }

    /// Create a missing path error
    pub fn missing_path(path: impl Into<String>) -> Self {
        Self::MissingPath { path: path.into() }
    }

    /// Create an invalid record path error
    pub fn record_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRecordPath {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an undefined variable error
    pub fn undefined_var(variable: impl Into<String>) -> Self {
        Self::UndefinedVariable {
            variable: variable.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Network failure, non-success status or SOAP fault
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::HttpStatus { .. }
                | Error::SoapFault { .. }
                | Error::InvalidUrl(_)
        )
    }

    /// Malformed XML or a response missing the expected structure
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::XmlParse { .. } | Error::MissingPath { .. })
    }
}

/// Result type alias for tap-workday
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("username");
        assert_eq!(err.to_string(), "Missing required config field: username");

        let err = Error::http_status(500, "Internal error");
        assert_eq!(err.to_string(), "HTTP 500: Internal error");

        let err = Error::soap_fault("SOAP-ENV:Client", "Invalid username or password");
        assert_eq!(
            err.to_string(),
            "SOAP fault SOAP-ENV:Client: Invalid username or password"
        );

        let err = Error::PageLimitExceeded {
            limit: 10,
            total_pages: 99,
        };
        assert_eq!(
            err.to_string(),
            "Page limit of 10 exceeded (service reported 99 pages)"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::http_status(401, "").is_transport());
        assert!(Error::soap_fault("Client", "bad").is_transport());
        assert!(!Error::http_status(401, "").is_parse());

        assert!(Error::xml("unexpected EOF").is_parse());
        assert!(Error::missing_path("env_Envelope.env_Body").is_parse());
        assert!(!Error::xml("x").is_transport());

        assert!(!Error::config("test").is_transport());
        assert!(!Error::config("test").is_parse());
    }
}
