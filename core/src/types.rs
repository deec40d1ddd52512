//! Request and response DTOs for the See API.
//!
//! # Design
//! Every response shares the `{code, message, data}` envelope; only `data`
//! differs per resource. The envelope and every typed `data` payload keep
//! fields they do not model in `extra`, so a successful response reaches
//! the caller unmodified.
//! Optional request fields are left out of the JSON body when unset.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The backend answers with both numeric (`0`, `200`) and string (`"200"`)
/// codes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum EnvelopeCode {
    Number(i64),
    Text(String),
}

impl Default for EnvelopeCode {
    fn default() -> Self {
        EnvelopeCode::Number(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    #[serde(default)]
    pub code: EnvelopeCode,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Short URLs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortenRequest {
    pub domain: String,
    pub target_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<i64>>,
}

impl ShortenRequest {
    pub fn new(domain: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            target_url: target_url.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateShortUrl {
    pub domain: String,
    pub slug: String,
    pub target_url: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteShortUrl {
    pub domain: String,
    pub slug: String,
}

/// A created share link. Returned for both short URLs and text shares.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortUrl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_slug: Option<String>,
    #[serde(default)]
    pub short_url: String,
    #[serde(default)]
    pub slug: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainList {
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagList {
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub type ShortUrlResponse = Envelope<ShortUrl>;
pub type DomainListResponse = Envelope<DomainList>;
pub type TagListResponse = Envelope<TagList>;

// ---------------------------------------------------------------------------
// Text shares
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateText {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateText {
    pub content: String,
    pub domain: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteText {
    pub domain: String,
    pub slug: String,
}

pub type TextCreateResponse = Envelope<ShortUrl>;
/// Update and delete echo an arbitrary payload.
pub type TextActionResponse = Envelope<Value>;

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UploadedFile {
    pub file_id: i64,
    pub filename: String,
    pub hash: String,
    pub url: String,
    pub page: String,
    pub path: String,
    /// Deletion key.
    pub delete: String,
    pub size: u64,
    pub width: u32,
    pub height: u32,
    pub storename: String,
    pub upload_status: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub type FileUploadResponse = Envelope<UploadedFile>;
/// Deletion answers with `{code, message, success}` and no `data`.
pub type FileDeleteResponse = Envelope<Value>;
