//! File uploads and deletion.
//!
//! Upload bodies are opaque to the client: the caller supplies the bytes and
//! the headers that describe them, or builds a multipart form with
//! `UploadPayload::multipart`. Deletion addresses a file by hash in the
//! path, so the hash is percent-encoded as exactly one path segment.

use url::Url;
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{DomainListResponse, FileDeleteResponse, FileUploadResponse};
use crate::validator::validate_id;

use super::{parse_envelope, parse_listing, parse_required, unexpected, Operation};

const UPLOAD_PATH: &str = "/file/upload";
const FILE_DOMAINS_PATH: &str = "/file/domains";

// Only the path of this URL is used; the host never reaches the wire.
const DELETE_URL: &str = "http://localhost/file/delete";

/// An upload body the client does not interpret, plus the headers that
/// describe it. Headers here override the transport defaults, so a
/// multipart `Content-Type` replaces `application/json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPayload {
    pub body: Vec<u8>,
    pub headers: Vec<(String, String)>,
}

impl UploadPayload {
    pub fn raw(body: impl Into<Vec<u8>>, headers: Vec<(String, String)>) -> Self {
        Self {
            body: body.into(),
            headers,
        }
    }

    /// Encode `content` as a single-part `multipart/form-data` body.
    pub fn multipart(field: &str, filename: &str, content_type: &str, content: &[u8]) -> Self {
        let boundary = format!("----SeeSdkBoundary{}", Uuid::new_v4().simple());
        let filename = filename.replace('"', "%22");

        let mut body = Vec::with_capacity(content.len() + 256);
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Self {
            body,
            headers: vec![(
                "Content-Type".to_string(),
                format!("multipart/form-data; boundary={boundary}"),
            )],
        }
    }
}

/// File operations.
#[derive(Debug, Clone, Copy)]
pub struct FileClient<'a> {
    transport: &'a Transport,
}

impl<'a> FileClient<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub fn build_upload(&self, payload: UploadPayload) -> Result<HttpRequest> {
        if payload.body.is_empty() {
            return Err(ValidationError::new("File content cannot be empty").into());
        }
        let mut req = HttpRequest::new(HttpMethod::Post, UPLOAD_PATH);
        req.headers = payload.headers;
        req.body = Some(payload.body);
        Ok(req)
    }

    pub fn build_delete(&self, hash: &str) -> Result<HttpRequest> {
        validate_id(hash)?;
        Ok(HttpRequest::new(HttpMethod::Get, delete_path(hash.trim())?))
    }

    pub fn build_list_domains(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, FILE_DOMAINS_PATH)
    }

    pub fn parse_upload(&self, response: &HttpResponse) -> Result<FileUploadResponse> {
        parse_required(response, Operation::UploadFile)
    }

    pub fn parse_delete(&self, response: &HttpResponse) -> Result<FileDeleteResponse> {
        parse_envelope(response, Operation::DeleteFile)
    }

    pub fn parse_list_domains(&self, response: &HttpResponse) -> Result<DomainListResponse> {
        parse_listing(response, Operation::ListFileDomains)
    }

    pub fn upload(&self, payload: UploadPayload) -> Result<FileUploadResponse> {
        let req = self.build_upload(payload)?;
        let response = self.transport.send(req)?;
        self.parse_upload(&response)
    }

    /// Delete by content hash (or file id).
    pub fn delete(&self, hash: &str) -> Result<FileDeleteResponse> {
        let req = self.build_delete(hash)?;
        let response = self.transport.send(req)?;
        self.parse_delete(&response)
    }

    pub fn list_domains(&self) -> Result<DomainListResponse> {
        let response = self.transport.send(self.build_list_domains())?;
        self.parse_list_domains(&response)
    }
}

/// `/file/delete/{hash}` with `hash` encoded as a single segment, so `/`,
/// `?` and `#` cannot address another resource.
fn delete_path(hash: &str) -> Result<String> {
    // Dot segments are dropped by URL normalization instead of encoded.
    if matches!(hash, "." | "..") {
        return Err(ValidationError::new("ID cannot be a relative path segment").into());
    }
    let mut url = Url::parse(DELETE_URL).map_err(|e| unexpected(Operation::DeleteFile, e, None))?;
    url.path_segments_mut()
        .map_err(|()| unexpected(Operation::DeleteFile, "delete URL cannot carry a path", None))?
        .push(hash);
    Ok(url.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SdkConfig;
    use crate::error::SeeError;
    use crate::test_support::Recorder;

    fn transport(recorder: &Recorder) -> Transport {
        Transport::with_executor(
            SdkConfig::new("test-key").with_base_url("https://s.ee/api/v1"),
            recorder.clone(),
        )
    }

    #[test]
    fn upload_sends_body_and_caller_headers() {
        let recorder = Recorder::default();
        recorder.respond(
            200,
            r#"{"code":0,"data":{"delete":"del-key","file_id":123,"filename":"test.png","hash":"abc","height":100,"page":"p","path":"/p","size":1024,"storename":"s","upload_status":1,"url":"https://s.ee/f/abc","width":100},"message":"Success"}"#,
        );
        let transport = transport(&recorder);
        let payload = UploadPayload::raw(
            "fake-file-content",
            vec![("Content-Type".to_string(), "text/plain".to_string())],
        );
        let result = FileClient::new(&transport).upload(payload).unwrap();
        let file = result.data.unwrap();
        assert_eq!(file.hash, "abc");
        assert_eq!(file.delete, "del-key");
        assert_eq!(file.size, 1024);

        let call = &recorder.calls()[0];
        assert_eq!(call.request.path, "https://s.ee/api/v1/file/upload");
        assert_eq!(call.request.header("content-type"), Some("text/plain"));
        assert_eq!(call.request.header("authorization"), Some("test-key"));
        assert_eq!(call.request.body.as_deref(), Some(&b"fake-file-content"[..]));
    }

    #[test]
    fn multipart_payload_is_well_formed() {
        let payload = UploadPayload::multipart("file", "notes.txt", "text/plain", b"hello");
        let content_type = &payload.headers[0].1;
        let boundary = content_type
            .strip_prefix("multipart/form-data; boundary=")
            .unwrap();
        let body = String::from_utf8(payload.body).unwrap();
        assert!(body.starts_with(&format!("--{boundary}\r\n")));
        assert!(body.contains("name=\"file\"; filename=\"notes.txt\""));
        assert!(body.contains("\r\n\r\nhello\r\n"));
        assert!(body.ends_with(&format!("--{boundary}--\r\n")));
    }

    #[test]
    fn empty_upload_sends_nothing() {
        let recorder = Recorder::default();
        let transport = transport(&recorder);
        let err = FileClient::new(&transport)
            .upload(UploadPayload::raw(Vec::new(), Vec::new()))
            .unwrap_err();
        assert!(matches!(err, SeeError::Validation(_)));
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn delete_uses_get_with_hash_in_path() {
        let recorder = Recorder::default();
        recorder.respond(200, r#"{"code":"200","message":"Deleted","success":true}"#);
        let transport = transport(&recorder);
        let result = FileClient::new(&transport).delete("abc").unwrap();
        assert_eq!(result.message, "Deleted");
        assert_eq!(result.extra["success"], true);

        let call = &recorder.calls()[0];
        assert_eq!(call.request.method, HttpMethod::Get);
        assert_eq!(call.request.path, "https://s.ee/api/v1/file/delete/abc");
    }

    #[test]
    fn delete_encodes_hash_as_one_segment() {
        let recorder = Recorder::default();
        let transport = transport(&recorder);
        let client = FileClient::new(&transport);

        let req = client.build_delete("a/b?c").unwrap();
        assert_eq!(req.path, "/file/delete/a%2Fb%3Fc");
        let req = client.build_delete("abc#frag").unwrap();
        assert_eq!(req.path, "/file/delete/abc%23frag");
        let req = client.build_delete(" abc ").unwrap();
        assert_eq!(req.path, "/file/delete/abc");
    }

    #[test]
    fn delete_rejects_dot_segments() {
        let recorder = Recorder::default();
        let transport = transport(&recorder);
        for hash in [".", ".."] {
            let err = FileClient::new(&transport).delete(hash).unwrap_err();
            assert!(matches!(err, SeeError::Validation(_)), "{hash}");
        }
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn delete_rejects_blank_hash() {
        let recorder = Recorder::default();
        let transport = transport(&recorder);
        let err = FileClient::new(&transport).delete("").unwrap_err();
        assert!(matches!(err, SeeError::Validation(_)));
        assert!(recorder.calls().is_empty());
    }
}
