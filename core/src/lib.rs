//! Blocking client for the See link, text and file sharing API.
//!
//! # Overview
//! `SeeClient` exposes three resource families: short URLs (`url()`),
//! text shares (`text()`) and file uploads (`file()`), over one
//! authenticated HTTP transport.
//!
//! # Design
//! - Every operation is `build_*` (validate and serialize, no I/O), one
//!   `Transport::send`, then `parse_*`. The pieces are public so a host can
//!   drive its own I/O.
//! - Input is validated before anything is sent; a `ValidationError` means
//!   no request went out.
//! - All network outcomes are classified exactly once into `ServiceError`
//!   or `NetworkError`.
//! - No retries. `SeeError::is_retryable` tells the caller which failures
//!   are worth another attempt.

pub mod classify;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod sdk;
pub mod transport;
pub mod types;
pub mod validator;

#[cfg(test)]
mod test_support;

pub use config::{ConfigUpdate, EnvDefaults, ProxySettings, SdkConfig};
pub use error::{NetworkError, Result, SeeError, ServiceError, TransportError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resources::{FileClient, TextClient, UploadPayload, UrlClient};
pub use sdk::SeeClient;
pub use transport::{Executor, Transport, UreqExecutor};
pub use types::*;
