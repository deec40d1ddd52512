//! The `SeeClient` facade.
//!
//! # Design
//! `SeeClient` owns the only `Transport` (and with it the live
//! `SdkConfig`). Resource clients are cheap borrowed views handed out by
//! `url()`, `text()` and `file()`; they hold a reference to the transport,
//! not a copy, so a config update is visible to all of them.
//!
//! # Concurrency
//! Every operation takes `&self` and may run from several threads at once.
//! `update_config` takes `&mut self`. A client that is both shared and
//! reconfigured needs an external lock; nothing here synchronizes, and the
//! last update wins.

use crate::config::{ConfigUpdate, SdkConfig};
use crate::error::Result;
use crate::resources::{FileClient, TextClient, UrlClient};
use crate::transport::Transport;
use crate::types::{DeleteShortUrl, DomainListResponse, ShortUrlResponse, ShortenRequest, TagListResponse, UpdateShortUrl};

#[derive(Debug)]
pub struct SeeClient {
    transport: Transport,
}

impl SeeClient {
    /// Build a client with a `ureq` transport, resolving the base URL and
    /// proxy from the environment.
    pub fn new(config: SdkConfig) -> Self {
        Self::with_transport(Transport::new(config))
    }

    pub fn with_transport(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn url(&self) -> UrlClient<'_> {
        UrlClient::new(&self.transport)
    }

    pub fn text(&self) -> TextClient<'_> {
        TextClient::new(&self.transport)
    }

    pub fn file(&self) -> FileClient<'_> {
        FileClient::new(&self.transport)
    }

    pub fn config(&self) -> &SdkConfig {
        self.transport.config()
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Apply a partial configuration change to the live transport. The next
    /// request uses it; nothing is rebuilt.
    pub fn update_config(&mut self, update: ConfigUpdate) {
        self.transport.update(update);
    }

    #[deprecated(note = "use `client.url().create(..)`")]
    pub fn create(&self, request: &ShortenRequest) -> Result<ShortUrlResponse> {
        self.url().create(request)
    }

    #[deprecated(note = "use `client.url().update(..)`")]
    pub fn update(&self, request: &UpdateShortUrl) -> Result<ShortUrlResponse> {
        self.url().update(request)
    }

    #[deprecated(note = "use `client.url().delete(..)`")]
    pub fn delete(&self, request: &DeleteShortUrl) -> Result<ShortUrlResponse> {
        self.url().delete(request)
    }

    #[deprecated(note = "use `client.url().list_domains()`")]
    pub fn list_domains(&self) -> Result<DomainListResponse> {
        self.url().list_domains()
    }

    #[deprecated(note = "use `client.url().list_tags()`")]
    pub fn list_tags(&self) -> Result<TagListResponse> {
        self.url().list_tags()
    }
}
