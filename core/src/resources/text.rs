//! Text shares: paste a body of text and get a short link to it.

use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{CreateText, DeleteText, DomainListResponse, TextActionResponse, TextCreateResponse, UpdateText};
use crate::validator::validate_id;

use super::{json_request, parse_envelope, parse_listing, parse_required, Operation};

const TEXT_PATH: &str = "/text";
const TEXT_DOMAINS_PATH: &str = "/text/domains";

/// Text share operations.
#[derive(Debug, Clone, Copy)]
pub struct TextClient<'a> {
    transport: &'a Transport,
}

impl<'a> TextClient<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub fn build_create(&self, request: &CreateText) -> Result<HttpRequest> {
        json_request(HttpMethod::Post, TEXT_PATH, request, Operation::CreateText)
    }

    pub fn build_update(&self, request: &UpdateText) -> Result<HttpRequest> {
        validate_id(&request.slug)?;
        json_request(HttpMethod::Put, TEXT_PATH, request, Operation::UpdateText)
    }

    pub fn build_delete(&self, request: &DeleteText) -> Result<HttpRequest> {
        validate_id(&request.slug)?;
        json_request(HttpMethod::Delete, TEXT_PATH, request, Operation::DeleteText)
    }

    pub fn build_list_domains(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, TEXT_DOMAINS_PATH)
    }

    pub fn parse_create(&self, response: &HttpResponse) -> Result<TextCreateResponse> {
        parse_required(response, Operation::CreateText)
    }

    pub fn parse_update(&self, response: &HttpResponse) -> Result<TextActionResponse> {
        parse_envelope(response, Operation::UpdateText)
    }

    pub fn parse_delete(&self, response: &HttpResponse) -> Result<TextActionResponse> {
        parse_envelope(response, Operation::DeleteText)
    }

    pub fn parse_list_domains(&self, response: &HttpResponse) -> Result<DomainListResponse> {
        parse_listing(response, Operation::ListTextDomains)
    }

    pub fn create(&self, request: &CreateText) -> Result<TextCreateResponse> {
        let req = self.build_create(request)?;
        let response = self.transport.send(req)?;
        self.parse_create(&response)
    }

    pub fn update(&self, request: &UpdateText) -> Result<TextActionResponse> {
        let req = self.build_update(request)?;
        let response = self.transport.send(req)?;
        self.parse_update(&response)
    }

    pub fn delete(&self, request: &DeleteText) -> Result<TextActionResponse> {
        let req = self.build_delete(request)?;
        let response = self.transport.send(req)?;
        self.parse_delete(&response)
    }

    pub fn list_domains(&self) -> Result<DomainListResponse> {
        let response = self.transport.send(self.build_list_domains())?;
        self.parse_list_domains(&response)
    }
}
