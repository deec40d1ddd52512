//! Resource clients: short URLs, text shares and files.
//!
//! # Design
//! Each client borrows the shared `Transport` and splits every operation
//! into `build_*` (validate and serialize, no I/O), `Transport::send` and
//! `parse_*` (decode the envelope). Errors that are already typed pass
//! through `?` untouched; anything else becomes the operation's generic
//! `NetworkError`.

mod file;
mod text;
mod url;

pub use file::{FileClient, UploadPayload};
pub use text::TextClient;
pub use url::UrlClient;

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{NetworkError, SeeError, ServiceError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Envelope;

pub const API_ERROR_CODE: &str = "API_ERROR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    CreateShortUrl,
    UpdateShortUrl,
    DeleteShortUrl,
    ListDomains,
    ListTags,
    CreateText,
    UpdateText,
    DeleteText,
    ListTextDomains,
    UploadFile,
    DeleteFile,
    ListFileDomains,
}

impl Operation {
    pub(crate) fn failure_message(self) -> &'static str {
        match self {
            Operation::CreateShortUrl => "Failed to create short URL",
            Operation::UpdateShortUrl => "Failed to update short URL",
            Operation::DeleteShortUrl => "Failed to delete short URL",
            Operation::ListDomains => "Failed to fetch domains",
            Operation::ListTags => "Failed to fetch tags",
            Operation::CreateText => "Failed to create text share",
            Operation::UpdateText => "Failed to update text share",
            Operation::DeleteText => "Failed to delete text share",
            Operation::ListTextDomains => "Failed to fetch text domains",
            Operation::UploadFile => "Failed to upload file",
            Operation::DeleteFile => "Failed to delete file",
            Operation::ListFileDomains => "Failed to fetch file domains",
        }
    }
}

/// Wrap a failure that is not one of the three error kinds.
fn unexpected(op: Operation, cause: impl Display, status: Option<u16>) -> SeeError {
    debug!(operation = ?op, %cause, "Unexpected failure");
    let message = op.failure_message();
    match status {
        Some(status) => NetworkError::with_status(message, status).into(),
        None => NetworkError::new(message).into(),
    }
}

fn api_error(op: Operation) -> SeeError {
    ServiceError::new(API_ERROR_CODE, op.failure_message()).into()
}

fn json_request<T: Serialize>(
    method: HttpMethod,
    path: &str,
    payload: &T,
    op: Operation,
) -> Result<HttpRequest, SeeError> {
    HttpRequest::new(method, path)
        .with_json(payload)
        .map_err(|e| unexpected(op, e, None))
}

fn parse_envelope<T: DeserializeOwned>(response: &HttpResponse, op: Operation) -> Result<Envelope<T>, SeeError> {
    serde_json::from_str(&response.body).map_err(|e| unexpected(op, e, Some(response.status)))
}

/// A success status with no body at all is a backend fault, not a
/// transport one.
fn parse_required<T: DeserializeOwned>(response: &HttpResponse, op: Operation) -> Result<Envelope<T>, SeeError> {
    if response.body.trim().is_empty() {
        return Err(api_error(op));
    }
    parse_envelope(response, op)
}

/// Listings are only trusted on a 200 that carries `data`.
fn parse_listing<T: DeserializeOwned>(response: &HttpResponse, op: Operation) -> Result<Envelope<T>, SeeError> {
    if response.status != 200 {
        return Err(api_error(op));
    }
    let envelope = parse_required::<T>(response, op)?;
    if envelope.data.is_none() {
        return Err(api_error(op));
    }
    Ok(envelope)
}
