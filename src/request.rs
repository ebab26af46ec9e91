//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::HeaderMap;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// An incoming HTTP request with its body fully collected.
pub struct Request {
    pub(crate) method: http::Method,
    pub(crate) path: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(method: http::Method, path: String, headers: HeaderMap, body: Bytes) -> Self {
        Self { method, path, headers, body, params: HashMap::new() }
    }

    pub fn method(&self) -> &http::Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Values that are not visible ASCII are skipped.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/comments/{id}`, `req.param("id")` on `/comments/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns the value of the named cookie, searching every `cookie` header.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.headers
            .get_all(http::header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v)
    }

    /// Deserialises the body as JSON.
    ///
    /// The content type is not checked; a body that is not valid JSON for
    /// `T` yields a [`JsonRejection`], which converts into `400 Bad Request`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, JsonRejection> {
        serde_json::from_slice(&self.body).map_err(JsonRejection)
    }
}

/// A request body that could not be deserialised.
#[derive(Debug, Error)]
#[error("invalid JSON body: {0}")]
pub struct JsonRejection(#[source] serde_json::Error);

impl IntoResponse for JsonRejection {
    fn into_response(self) -> Response {
        Response::builder()
            .status(Status::BadRequest)
            .text(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use serde::Deserialize;

    fn request(headers: HeaderMap, body: &'static str) -> Request {
        Request::new(http::Method::GET, "/".to_owned(), headers, Bytes::from_static(body.as_bytes()))
    }

    #[test]
    fn cookie_is_found_among_pairs() {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::COOKIE, HeaderValue::from_static("theme=dark; resultsPerPage=20"));
        let req = request(headers, "");

        assert_eq!(req.cookie("theme"), Some("dark"));
        assert_eq!(req.cookie("resultsPerPage"), Some("20"));
        assert_eq!(req.cookie("missing"), None);
    }

    #[test]
    fn header_lookup_ignores_case() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("abc"));
        let req = request(headers, "");

        assert_eq!(req.header("X-Request-Id"), Some("abc"));
    }

    #[test]
    fn json_body_deserialises_or_rejects() {
        #[derive(Deserialize)]
        struct Patch {
            text: String,
        }

        let ok = request(HeaderMap::new(), r#"{"text":"hi","extra":1}"#);
        assert_eq!(ok.json::<Patch>().unwrap().text, "hi");

        let bad = request(HeaderMap::new(), "not json");
        let rejection = bad.json::<Patch>().err().unwrap();
        assert_eq!(rejection.into_response().status_code(), http::StatusCode::BAD_REQUEST);
    }
}
