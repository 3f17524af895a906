//! Service error classification and handling
//!
//! Every failure of a remote call becomes a [`ServiceError`] value. Service
//! errors keep the IAM error code so callers can classify them without
//! string matching on messages.

use crate::operation::Operation;
use std::fmt;
use thiserror::Error;

/// Why a request failed before a service response was received
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// The endpoint host name could not be resolved
    NameResolution,
    /// The request or connection timed out
    Timeout,
    /// Any other connection-level failure
    Other,
}

/// A failed IAM invocation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service answered with an error
    #[error("{operation} failed: {message}")]
    Service {
        operation: Operation,
        code: Option<String>,
        message: String,
    },

    /// The request did not complete at the connection level
    #[error("{operation} failed: {message}")]
    Transport {
        operation: Operation,
        kind: TransportKind,
        message: String,
    },

    /// Name resolution failure, restated with the region that was targeted
    #[error(
        "Name resolution failure attempting to reach the IAM endpoint in region '{region}' \
         (as supplied with --region or resolved from the environment) for {operation}: {message}"
    )]
    NameResolution {
        operation: Operation,
        region: String,
        message: String,
    },

    /// The request could not be constructed locally
    #[error("{operation} request is invalid: {message}")]
    InvalidRequest { operation: Operation, message: String },

    /// The service client returned something the command cannot interpret
    #[error("{operation} returned a malformed response: {detail}")]
    MalformedResponse { operation: Operation, detail: String },

    /// No client could be created for the requested connection settings
    #[error("Failed to create IAM client: {message}")]
    Client { message: String },
}

/// Broad error categories used for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    AlreadyExists,
    Throttled,
    LimitExceeded,
    DeleteConflict,
    InvalidInput,
    AccessDenied,
    Connectivity,
    Other,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorCategory::NotFound => "not found",
            ErrorCategory::AlreadyExists => "already exists",
            ErrorCategory::Throttled => "throttled",
            ErrorCategory::LimitExceeded => "limit exceeded",
            ErrorCategory::DeleteConflict => "delete conflict",
            ErrorCategory::InvalidInput => "invalid input",
            ErrorCategory::AccessDenied => "access denied",
            ErrorCategory::Connectivity => "connectivity",
            ErrorCategory::Other => "other",
        };
        f.write_str(label)
    }
}

/// Known IAM error codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &["NoSuchEntity", "NoSuchEntityException"];

/// Known IAM error codes for "already exists" conditions
const ALREADY_EXISTS_CODES: &[&str] = &["EntityAlreadyExists", "EntityAlreadyExistsException"];

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &["Throttling", "ThrottlingException", "RequestLimitExceeded"];

/// Known IAM error codes for quota exhaustion
const LIMIT_CODES: &[&str] = &["LimitExceeded", "LimitExceededException"];

/// Resource still has attached entities
const DELETE_CONFLICT_CODES: &[&str] = &["DeleteConflict", "DeleteConflictException"];

/// Known IAM error codes for rejected input
const INVALID_INPUT_CODES: &[&str] = &[
    "InvalidInput",
    "ValidationError",
    "MalformedPolicyDocument",
    "PasswordPolicyViolation",
];

/// Known AWS error codes for credential and permission problems
const ACCESS_DENIED_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "InvalidClientTokenId",
    "SignatureDoesNotMatch",
    "ExpiredToken",
];

/// Substrings that identify a DNS lookup failure in a transport error chain
const NAME_RESOLUTION_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "Name or service not known",
    "nodename nor servname",
    "No such host is known",
    "Temporary failure in name resolution",
];

impl ServiceError {
    /// The operation that failed, when known
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ServiceError::Service { operation, .. }
            | ServiceError::Transport { operation, .. }
            | ServiceError::NameResolution { operation, .. }
            | ServiceError::InvalidRequest { operation, .. }
            | ServiceError::MalformedResponse { operation, .. } => Some(*operation),
            ServiceError::Client { .. } => None,
        }
    }

    /// IAM error code, for service errors
    pub fn code(&self) -> Option<&str> {
        match self {
            ServiceError::Service { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Classify this error using its code or transport kind
    pub fn category(&self) -> ErrorCategory {
        match self {
            ServiceError::Service { code: Some(c), .. } => categorize_code(c),
            ServiceError::Transport { .. } | ServiceError::NameResolution { .. } => {
                ErrorCategory::Connectivity
            }
            ServiceError::InvalidRequest { .. } => ErrorCategory::InvalidInput,
            _ => ErrorCategory::Other,
        }
    }

    /// Whether this is a transport failure caused by name resolution
    pub fn is_name_resolution_failure(&self) -> bool {
        matches!(
            self,
            ServiceError::Transport {
                kind: TransportKind::NameResolution,
                ..
            }
        )
    }

    /// Restate a name resolution failure with the region that was targeted.
    ///
    /// Every other error is returned unchanged.
    pub fn rewrap_name_resolution(self, region: &str) -> Self {
        match self {
            ServiceError::Transport {
                operation,
                kind: TransportKind::NameResolution,
                message,
            } => ServiceError::NameResolution {
                operation,
                region: region.to_string(),
                message,
            },
            other => other,
        }
    }

    /// Get a user-friendly suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ServiceError::Service { code: Some(c), .. } => suggestion_for_code(c),
            ServiceError::NameResolution { .. } => {
                Some("Check the --region / --endpoint-url values and your network connection.")
            }
            _ => None,
        }
    }
}

fn categorize_code(code: &str) -> ErrorCategory {
    if NOT_FOUND_CODES.contains(&code) {
        ErrorCategory::NotFound
    } else if ALREADY_EXISTS_CODES.contains(&code) {
        ErrorCategory::AlreadyExists
    } else if THROTTLING_CODES.contains(&code) {
        ErrorCategory::Throttled
    } else if LIMIT_CODES.contains(&code) {
        ErrorCategory::LimitExceeded
    } else if DELETE_CONFLICT_CODES.contains(&code) {
        ErrorCategory::DeleteConflict
    } else if INVALID_INPUT_CODES.contains(&code) {
        ErrorCategory::InvalidInput
    } else if ACCESS_DENIED_CODES.contains(&code) {
        ErrorCategory::AccessDenied
    } else {
        ErrorCategory::Other
    }
}

/// Whether an error message describes a DNS lookup failure
pub fn is_name_resolution_message(text: &str) -> bool {
    NAME_RESOLUTION_MARKERS
        .iter()
        .any(|marker| text.contains(marker))
}

/// Error code to user-friendly suggestion mapping
const SUGGESTIONS: &[(&str, &str)] = &[
    (
        "NoSuchEntity",
        "Check the name for typos; IAM names are case-sensitive for lookups.",
    ),
    (
        "EntityAlreadyExists",
        "Choose a different name or fetch the existing entity instead.",
    ),
    (
        "DeleteConflict",
        "Detach policies, remove group memberships, access keys and login profiles first.",
    ),
    (
        "LimitExceeded",
        "An IAM quota was reached. Request an increase via the Service Quotas console.",
    ),
    (
        "MalformedPolicyDocument",
        "Validate the policy JSON, including the Version and Statement elements.",
    ),
    (
        "PasswordPolicyViolation",
        "The password does not satisfy the account password policy.",
    ),
    (
        "Throttling",
        "AWS API rate limit hit. Wait a moment and run the command again.",
    ),
    (
        "ThrottlingException",
        "AWS API rate limit hit. Wait a moment and run the command again.",
    ),
    (
        "InvalidClientTokenId",
        "The access key is not valid. Check --profile or the AWS_* environment variables.",
    ),
    (
        "ExpiredToken",
        "The session token has expired. Refresh your credentials.",
    ),
    (
        "AccessDenied",
        "The caller lacks permission for this action.",
    ),
];

/// Get a user-friendly suggestion for a known error code.
fn suggestion_for_code(code: &str) -> Option<&'static str> {
    SUGGESTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| *s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(code: &str) -> ServiceError {
        ServiceError::Service {
            operation: Operation::GetUser,
            code: Some(code.to_string()),
            message: "msg".to_string(),
        }
    }

    #[test]
    fn not_found_codes() {
        for code in NOT_FOUND_CODES {
            assert_eq!(
                service(code).category(),
                ErrorCategory::NotFound,
                "Expected NotFound for code: {code}"
            );
        }
    }

    #[test]
    fn categories_by_code() {
        assert_eq!(service("EntityAlreadyExists").category(), ErrorCategory::AlreadyExists);
        assert_eq!(service("Throttling").category(), ErrorCategory::Throttled);
        assert_eq!(service("LimitExceeded").category(), ErrorCategory::LimitExceeded);
        assert_eq!(service("DeleteConflict").category(), ErrorCategory::DeleteConflict);
        assert_eq!(service("ValidationError").category(), ErrorCategory::InvalidInput);
        assert_eq!(service("AccessDenied").category(), ErrorCategory::AccessDenied);
        assert_eq!(service("SomeNewError").category(), ErrorCategory::Other);
    }

    #[test]
    fn missing_code_is_other() {
        let err = ServiceError::Service {
            operation: Operation::ListUsers,
            code: None,
            message: "boom".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Other);
        assert_eq!(err.code(), None);
    }

    #[test]
    fn transport_errors_keep_their_kind() {
        let err = ServiceError::Transport {
            operation: Operation::DeleteRole,
            kind: TransportKind::Timeout,
            message: "request timed out".to_string(),
        };
        assert!(matches!(
            err.clone(),
            ServiceError::Transport {
                kind: TransportKind::Timeout,
                ..
            }
        ));
        assert_eq!(err.category(), ErrorCategory::Connectivity);
        assert_eq!(err.operation(), Some(Operation::DeleteRole));
        assert_eq!(err.to_string(), "DeleteRole failed: request timed out");
    }

    #[test]
    fn category_labels() {
        assert_eq!(ErrorCategory::NotFound.to_string(), "not found");
        assert_eq!(ErrorCategory::DeleteConflict.to_string(), "delete conflict");
        assert_eq!(service("AccessDenied").category().to_string(), "access denied");
    }

    #[test]
    fn detects_name_resolution_messages() {
        assert!(is_name_resolution_message(
            "dispatch failure: io error: dns error: failed to lookup address information"
        ));
        assert!(is_name_resolution_message("Name or service not known"));
        assert!(!is_name_resolution_message("connection refused"));
        assert!(!is_name_resolution_message("operation timed out"));
    }

    #[test]
    fn rewrap_only_touches_name_resolution() {
        let dns = ServiceError::Transport {
            operation: Operation::GetUser,
            kind: TransportKind::NameResolution,
            message: "dns error".to_string(),
        };
        assert!(dns.is_name_resolution_failure());
        let rewrapped = dns.rewrap_name_resolution("eu-west-9");
        assert_eq!(
            rewrapped,
            ServiceError::NameResolution {
                operation: Operation::GetUser,
                region: "eu-west-9".to_string(),
                message: "dns error".to_string(),
            }
        );
        assert!(rewrapped.to_string().contains("eu-west-9"));

        let timeout = ServiceError::Transport {
            operation: Operation::GetUser,
            kind: TransportKind::Timeout,
            message: "timed out".to_string(),
        };
        assert_eq!(timeout.clone().rewrap_name_resolution("us-east-1"), timeout);

        let not_found = service("NoSuchEntity");
        assert_eq!(not_found.clone().rewrap_name_resolution("us-east-1"), not_found);
    }

    #[test]
    fn suggestions_for_known_codes() {
        for (code, _) in SUGGESTIONS {
            assert!(suggestion_for_code(code).is_some(), "No suggestion for code: {code}");
        }
        assert!(suggestion_for_code("SomeUnknownCode").is_none());
        assert!(service("DeleteConflict").suggestion().is_some());
    }
}
