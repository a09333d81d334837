use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Argument parsing errors are reported by clap itself with code 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The run completed
    Success = 0,
    /// Any unrecoverable error (missing input, failed tool, malformed API response, I/O)
    ApplicationError = 1,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
        }
    }
}

/// Application-specific errors for SBOM building and CVE enrichment.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("Required input not found: {path}\n\n💡 Hint: {suggestion}")]
    InputNotFound { path: PathBuf, suggestion: String },

    #[error("Required tool '{tool}' is not installed or not on PATH\n\n💡 Hint: {hint}")]
    ToolNotInstalled { tool: String, hint: String },

    #[error("Command `{command}` failed: {details}")]
    ProcessFailed { command: String, details: String },

    #[error("Vulnerability database request failed: {url}\nDetails: {details}\n\n💡 Hint: Check your network connection, or set NVD_API_KEY to raise the rate limit")]
    ApiRequestFailed { url: String, details: String },

    #[error("Failed to parse vulnerability database response as JSON: {url}\nDetails: {details}")]
    MalformedApiResponse { url: String, details: String },

    #[error("Failed to parse SBOM document: {path}\nDetails: {details}\n\n💡 Hint: The file must be a CycloneDX JSON document")]
    SbomParseError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid target '{value}': {reason}\n\n💡 Hint: Targets are written as name:version, e.g. glibc:2.40")]
    InvalidTarget { value: String, reason: String },

    /// Validation error for configuration and builder values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 1);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (1)"
        );
    }

    #[test]
    fn test_input_not_found_display() {
        let error = SbomError::InputNotFound {
            path: PathBuf::from("gcc.tar.gz"),
            suggestion: "Place the archive in the working directory".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Required input not found"));
        assert!(display.contains("gcc.tar.gz"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_tool_not_installed_display() {
        let error = SbomError::ToolNotInstalled {
            tool: "syft".to_string(),
            hint: "Install syft".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("'syft' is not installed"));
        assert!(display.contains("Install syft"));
    }

    #[test]
    fn test_process_failed_display() {
        let error = SbomError::ProcessFailed {
            command: "cve-bin-tool -f json".to_string(),
            details: "exit status: 1".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("cve-bin-tool -f json"));
        assert!(display.contains("exit status: 1"));
    }

    #[test]
    fn test_malformed_api_response_display() {
        let error = SbomError::MalformedApiResponse {
            url: "https://services.nvd.nist.gov/rest/json/cves/2.0".to_string(),
            details: "expected value at line 1 column 1".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to parse vulnerability database response"));
        assert!(display.contains("expected value"));
    }

    #[test]
    fn test_invalid_target_display() {
        let error = SbomError::InvalidTarget {
            value: "glibc".to_string(),
            reason: "missing ':' separator".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid target 'glibc'"));
        assert!(display.contains("name:version"));
    }

    #[test]
    fn test_security_error_display() {
        let error = SbomError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("/test/symlink"));
        assert!(display.contains("Use a regular file instead"));
    }
}
