//! Error types for the helper functions.
//!
//! # Design
//! Each HTTP failure stage gets its own variant so callers can tell "the
//! request never left" from "the server said no" from "the server answered
//! with garbage." Nothing is retried here; every error goes straight back to
//! the caller.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the HTTP helpers.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request could not be built: invalid URL, header, or method.
    #[error("error while creating HTTP request: {0}")]
    Construction(String),

    /// The request could not be delivered or no response came back.
    #[error("error while performing HTTP request: {0}")]
    Transport(String),

    /// A response arrived but its status was not 200.
    #[error("the HTTP request returned a non-OK response: {status}")]
    UnexpectedStatus { status: u16 },

    /// The response body could not be fully read.
    #[error("error while reading HTTP response body: {0}")]
    BodyRead(#[source] io::Error),

    /// The body is not valid JSON, or is JSON but not an object.
    #[error("error while unmarshaling HTTP response to JSON: {0}")]
    Decode(String),
}

impl HttpError {
    /// Status code carried by `UnexpectedStatus`, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::UnexpectedStatus { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::Decode(err.to_string())
    }
}

/// Errors returned by the process-environment helpers.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("could not resolve the current executable: {0}")]
    CurrentExe(#[source] io::Error),

    #[error("executable path has no parent directory: {}", .0.display())]
    NoParent(PathBuf),
}

/// Errors returned by the cloud collaborator wrappers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The named local file, remote object, or parameter does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An argument was rejected before reaching the provider.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    /// The provider rejected the call.
    #[error("provider error: {0}")]
    Provider(String),
}
