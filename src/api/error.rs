//! Faults that are not a remote rejection of a well-formed request
//!
//! Remote rejections of record operations are ordinary values
//! ([`RecordOutcome::Failed`](super::RecordOutcome::Failed)). The variants
//! here travel inside `anyhow::Error` and can be recovered with
//! `downcast_ref::<ApiError>()`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The service reported success but the body could not be interpreted
    #[error("malformed response (status {status}): {reason}")]
    MalformedResponse { status: u16, reason: String },

    /// SOAP fault returned by the metadata service
    #[error("SOAP fault {code}: {message}")]
    SoapFault { code: String, message: String },

    /// Non-success reply that carried no SOAP fault
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The login endpoint rejected the credentials
    #[error("authentication failed (status {status}): {body}")]
    AuthenticationFailed { status: u16, body: String },
}
