use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the query resolved and the command completed
    Success = 0,
    /// The query did not resolve to any cataloged model or file
    NotFound = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (catalog error, network error, file I/O error, etc.)
    ApplicationError = 3,
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
            ExitCode::NotFound => write!(f, "Not Found (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for model cataloging and analysis.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum AibomError {
    #[error("Query did not resolve to a cataloged model: {query}\n\n💡 Hint: try a full package URL such as pkg:huggingface/org/model, a hub URL, or an org/model repository name")]
    NotFound { query: String },

    #[error("Invalid identifier: {input}\nReason: {reason}\n\n💡 Hint: package URLs look like pkg:huggingface/org/model@revision")]
    InvalidIdentifier { input: String, reason: String },

    #[error("Invalid scan path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid directory containing model files")]
    InvalidScanPath { path: PathBuf, reason: String },

    #[error("No file corpus available for {purl}\nReason: {reason}\n\n💡 Hint: remote scanning is supported for the huggingface ecosystem; use --path for local files")]
    CorpusUnavailable { purl: String, reason: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for configuration and builder-style inputs
    #[error("Validation error: {message}")]
    Validation { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    // ExitCode tests
    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::NotFound.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(format!("{}", ExitCode::NotFound), "Not Found (1)");
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_exit_code_equality() {
        assert_eq!(ExitCode::Success, ExitCode::Success);
        assert_ne!(ExitCode::Success, ExitCode::ApplicationError);
    }

    // AibomError tests
    #[test]
    fn test_not_found_display() {
        let error = AibomError::NotFound {
            query: "no/such-model".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("did not resolve"));
        assert!(display.contains("no/such-model"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_invalid_identifier_display() {
        let error = AibomError::InvalidIdentifier {
            input: "pkg:".to_string(),
            reason: "missing ecosystem".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid identifier"));
        assert!(display.contains("missing ecosystem"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_invalid_scan_path_display() {
        let error = AibomError::InvalidScanPath {
            path: PathBuf::from("/invalid/path"),
            reason: "Directory does not exist".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid scan path"));
        assert!(display.contains("/invalid/path"));
        assert!(display.contains("Directory does not exist"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_corpus_unavailable_display() {
        let error = AibomError::CorpusUnavailable {
            purl: "pkg:github/org/repo".to_string(),
            reason: "no provider for ecosystem github".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("No file corpus available"));
        assert!(display.contains("pkg:github/org/repo"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_file_write_error_display() {
        let error = AibomError::FileWriteError {
            path: PathBuf::from("/test/output.json"),
            details: "Permission denied".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to write to file"));
        assert!(display.contains("/test/output.json"));
        assert!(display.contains("Permission denied"));
        assert!(display.contains("💡 Hint:"));
    }
}
