//! Turns raw transport outcomes into the client's error taxonomy.
//!
//! Every request passes through `classify` exactly once, inside
//! `Transport::send`. Resource clients only ever see a successful response
//! or an already-typed `SeeError`.

use serde_json::Value;
use tracing::debug;

use crate::error::{NetworkError, SeeError, ServiceError, TransportError};
use crate::http::HttpResponse;

pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Classify the outcome of one request.
///
/// - no response: `NetworkError` without a status
/// - a status but an unreadable body: `NetworkError` with that status
/// - 2xx: the response, untouched
/// - non-2xx with a JSON object body: `ServiceError` built from the body
/// - non-2xx with anything else: `NetworkError` with the status
pub fn classify(outcome: Result<HttpResponse, TransportError>) -> Result<HttpResponse, SeeError> {
    let response = outcome.map_err(|err| match &err {
        TransportError::Body { status, .. } => NetworkError::with_status(err.to_string(), *status),
        _ => NetworkError::new(err.to_string()),
    })?;
    if response.is_success() {
        return Ok(response);
    }
    Err(classify_failure(&response))
}

fn classify_failure(response: &HttpResponse) -> SeeError {
    let body = match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Object(body)) => body,
        _ => {
            debug!(status = response.status, "Error response is not a JSON envelope");
            return NetworkError::with_status(
                format!("Request failed with status code {}", response.status),
                response.status,
            )
            .into();
        }
    };

    let code = match body.get("code") {
        Some(Value::String(code)) if !code.is_empty() => code.clone(),
        Some(Value::Number(code)) => code.to_string(),
        _ => UNKNOWN_ERROR_CODE.to_string(),
    };
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .unwrap_or(UNKNOWN_ERROR_MESSAGE);

    let mut err = ServiceError::new(code, message);
    if let Some(details) = body
        .get("details")
        .or_else(|| body.get("data"))
        .filter(|details| !details.is_null())
    {
        err = err.with_details(details.clone());
    }
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn success_passes_through() {
        let ok = response(200, r#"{"code":200,"message":"success"}"#);
        assert_eq!(classify(Ok(ok.clone())).unwrap(), ok);
    }

    #[test]
    fn error_envelope_becomes_service_error() {
        let err = classify(Ok(response(
            400,
            r#"{"code":"INVALID_URL","message":"The provided URL is invalid"}"#,
        )))
        .unwrap_err();
        let service = err.as_service().expect("service error");
        assert_eq!(service.code(), "INVALID_URL");
        assert_eq!(service.message(), "The provided URL is invalid");
        assert!(service.details().is_none());
    }

    #[test]
    fn numeric_code_is_stringified() {
        let err = classify(Ok(response(500, r#"{"code":500,"message":"boom"}"#))).unwrap_err();
        assert_eq!(err.as_service().unwrap().code(), "500");
    }

    #[test]
    fn missing_fields_fall_back() {
        let err = classify(Ok(response(403, "{}"))).unwrap_err();
        let service = err.as_service().unwrap();
        assert_eq!(service.code(), UNKNOWN_ERROR_CODE);
        assert_eq!(service.message(), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn details_come_from_data() {
        let err = classify(Ok(response(
            422,
            r#"{"code":"SLUG_TAKEN","message":"taken","data":{"slug":"abc"}}"#,
        )))
        .unwrap_err();
        assert_eq!(err.as_service().unwrap().details().unwrap()["slug"], "abc");
    }

    #[test]
    fn non_json_failure_is_network_error_with_status() {
        let err = classify(Ok(response(502, "<html>Bad Gateway</html>"))).unwrap_err();
        let network = err.as_network().expect("network error");
        assert_eq!(network.status(), Some(502));
    }

    #[test]
    fn transport_failure_is_network_error() {
        let err = classify(Err(TransportError::Connect("dns lookup failed".to_string()))).unwrap_err();
        let network = err.as_network().expect("network error");
        assert_eq!(network.status(), None);
        assert!(network.message().contains("dns lookup failed"));

        let err = classify(Err(TransportError::Timeout)).unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn unreadable_body_keeps_status() {
        let err = classify(Err(TransportError::Body {
            status: 200,
            message: "body exceeds limit".to_string(),
        }))
        .unwrap_err();
        let network = err.as_network().expect("network error");
        assert_eq!(network.status(), Some(200));
        assert!(network.message().contains("body exceeds limit"));
        assert!(err.is_retryable());
    }
}
