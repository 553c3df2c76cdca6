//! Error surface for composition and replay.
//!
//! Server-side failures abort the composing call before any response bytes
//! are written, so the surrounding framework can still emit a normal error
//! page. Client-side decoding failures discard the whole batch; per-fragment
//! problems are routed through the diagnostic hook instead and never appear
//! here.

use std::io;

use thiserror::Error;

/// Errors raised while composing a fragmented response.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ComposeError {
    /// The inbound request never declared fragment capability; the caller
    /// should branch to a full-page response instead.
    #[error("request did not carry the fragmented-capability signal")]
    IneligibleRequest,
    /// A descriptor configured more than one content origin.
    #[error("more than one content source was specified")]
    MultipleContentSources,
    /// A fragment's content origin could not be resolved.
    #[error("content source '{what}' could not be found")]
    ContentNotFound {
        /// File path or producer-reported name that failed to resolve.
        what: String,
    },
    /// Reading a file-backed source or writing to the response sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while decoding a fragmented response on the client.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClientError {
    /// The multipart body did not match the envelope framing; the whole
    /// batch is discarded.
    #[error("malformed envelope: {reason}")]
    MalformedEnvelope {
        /// What the decoder expected and did not find.
        reason: String,
    },
}

impl ClientError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ClientError::MalformedEnvelope {
            reason: reason.into(),
        }
    }
}
