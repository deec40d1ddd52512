//! Short URL operations.
//!
//! Create, update and delete all go to `/shorten`, distinguished by method.
//! Delete sends its target in a JSON body even though it is a `DELETE`.

use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{
    DeleteShortUrl, DomainListResponse, ShortUrlResponse, ShortenRequest, TagListResponse, UpdateShortUrl,
};
use crate::validator::{validate_custom_code, validate_id, validate_url};

use super::{json_request, parse_envelope, parse_listing, parse_required, Operation};

const SHORTEN_PATH: &str = "/shorten";
const DOMAINS_PATH: &str = "/domains";
const TAGS_PATH: &str = "/tags";

/// Short URL operations.
#[derive(Debug, Clone, Copy)]
pub struct UrlClient<'a> {
    transport: &'a Transport,
}

impl<'a> UrlClient<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Validates the target URL, and the custom slug and expiration redirect
    /// when they are set.
    pub fn build_create(&self, request: &ShortenRequest) -> Result<HttpRequest> {
        validate_url(&request.target_url)?;
        if let Some(slug) = &request.custom_slug {
            validate_custom_code(slug)?;
        }
        if let Some(redirect) = &request.expiration_redirect_url {
            validate_url(redirect)?;
        }
        json_request(HttpMethod::Post, SHORTEN_PATH, request, Operation::CreateShortUrl)
    }

    pub fn build_update(&self, request: &UpdateShortUrl) -> Result<HttpRequest> {
        validate_id(&request.slug)?;
        validate_url(&request.target_url)?;
        json_request(HttpMethod::Put, SHORTEN_PATH, request, Operation::UpdateShortUrl)
    }

    pub fn build_delete(&self, request: &DeleteShortUrl) -> Result<HttpRequest> {
        validate_id(&request.slug)?;
        json_request(HttpMethod::Delete, SHORTEN_PATH, request, Operation::DeleteShortUrl)
    }

    pub fn build_list_domains(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, DOMAINS_PATH)
    }

    pub fn build_list_tags(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, TAGS_PATH)
    }

    pub fn parse_create(&self, response: &HttpResponse) -> Result<ShortUrlResponse> {
        parse_required(response, Operation::CreateShortUrl)
    }

    pub fn parse_update(&self, response: &HttpResponse) -> Result<ShortUrlResponse> {
        parse_envelope(response, Operation::UpdateShortUrl)
    }

    pub fn parse_delete(&self, response: &HttpResponse) -> Result<ShortUrlResponse> {
        parse_envelope(response, Operation::DeleteShortUrl)
    }

    pub fn parse_list_domains(&self, response: &HttpResponse) -> Result<DomainListResponse> {
        parse_listing(response, Operation::ListDomains)
    }

    pub fn parse_list_tags(&self, response: &HttpResponse) -> Result<TagListResponse> {
        parse_listing(response, Operation::ListTags)
    }

    /// Create a short URL.
    pub fn create(&self, request: &ShortenRequest) -> Result<ShortUrlResponse> {
        let req = self.build_create(request)?;
        let response = self.transport.send(req)?;
        self.parse_create(&response)
    }

    pub fn update(&self, request: &UpdateShortUrl) -> Result<ShortUrlResponse> {
        let req = self.build_update(request)?;
        let response = self.transport.send(req)?;
        self.parse_update(&response)
    }

    pub fn delete(&self, request: &DeleteShortUrl) -> Result<ShortUrlResponse> {
        let req = self.build_delete(request)?;
        let response = self.transport.send(req)?;
        self.parse_delete(&response)
    }

    /// Domains available for short links.
    pub fn list_domains(&self) -> Result<DomainListResponse> {
        let response = self.transport.send(self.build_list_domains())?;
        self.parse_list_domains(&response)
    }

    pub fn list_tags(&self) -> Result<TagListResponse> {
        let response = self.transport.send(self.build_list_tags())?;
        self.parse_list_tags(&response)
    }
}
