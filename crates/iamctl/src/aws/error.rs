//! AWS SDK error classification
//!
//! Converts `SdkError` values into [`ServiceError`]s using the `.code()`
//! metadata instead of string matching on Debug output. Connection-level
//! failures are only inspected textually to tell DNS failures apart.

use aws_sdk_iam::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use iamctl_core::error::is_name_resolution_message;
use iamctl_core::{Operation, ServiceError, TransportKind};
use std::fmt::Debug;

/// Classify a failed SDK call
pub fn classify_sdk_error<E, R>(operation: Operation, err: SdkError<E, R>) -> ServiceError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: Debug,
{
    let context = DisplayErrorContext(&err).to_string();
    match &err {
        SdkError::TimeoutError(_) => transport_error(operation, true, context),
        SdkError::DispatchFailure(failure) => {
            transport_error(operation, failure.is_timeout(), context)
        }
        SdkError::ConstructionFailure(_) => ServiceError::InvalidRequest {
            operation,
            message: context,
        },
        SdkError::ResponseError(_) => ServiceError::MalformedResponse {
            operation,
            detail: context,
        },
        _ => service_error(operation, err.code(), err.message(), context),
    }
}

/// Build a transport error, recognising name resolution failures from the
/// full error chain text
pub fn transport_error(operation: Operation, timed_out: bool, context: String) -> ServiceError {
    let kind = if is_name_resolution_message(&context) {
        TransportKind::NameResolution
    } else if timed_out {
        TransportKind::Timeout
    } else {
        TransportKind::Other
    };
    ServiceError::Transport {
        operation,
        kind,
        message: context,
    }
}

/// Build a service error from the error metadata. Falls back to the
/// rendered error chain when the service sent no message.
pub fn service_error(
    operation: Operation,
    code: Option<&str>,
    message: Option<&str>,
    context: String,
) -> ServiceError {
    ServiceError::Service {
        operation,
        code: code.map(str::to_string),
        message: message.map(str::to_string).unwrap_or(context),
    }
}
