//! Translation from SDK errors to the typed taxonomy.

use aws_sdk_route53::error::{ProvideErrorMetadata, SdkError};
use awsops_core::OpsError;

/// Error codes that mean "slow down", not "broken request"
const THROTTLE_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "RequestLimitExceeded",
    "PriorRequestNotComplete",
];

/// Error codes that mean the credentials are missing, expired, or denied
const AUTH_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "UnauthorizedOperation",
    "AuthFailure",
    "InvalidClientTokenId",
    "ExpiredToken",
    "ExpiredTokenException",
];

/// Convert an SDK error into an [`OpsError`].
///
/// Service errors are bucketed by their AWS error code; anything without a
/// code (dispatch failures, timeouts, connection resets) is a transport
/// failure.
pub(crate) fn map_sdk_err<E>(operation: &'static str, err: &SdkError<E>) -> OpsError
where
    E: ProvideErrorMetadata,
{
    match err.code() {
        Some(code) if THROTTLE_CODES.contains(&code) => OpsError::Throttled { operation },
        Some(code) if AUTH_CODES.contains(&code) => OpsError::Unauthorized {
            message: err.message().unwrap_or(code).to_string(),
        },
        Some(code) => OpsError::Api {
            code: code.to_string(),
            message: err.message().unwrap_or("no message").to_string(),
        },
        None => OpsError::Transport(format!("{operation}: {err}")),
    }
}
