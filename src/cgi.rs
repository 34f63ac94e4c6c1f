//! Adapter for CGI-style environment maps, as handed to CGI scripts and
//! Rack-like server interfaces.
//!
//! The environment doubles as the header map: headers are looked up by their
//! candidate keys (`CONTENT_TYPE`, `HTTP_DATE`, `HTTP_AUTHORIZATION`, ...), and
//! headers written back by the signer are stored under their plain names
//! (`Date`, `Authorization`).

use std::collections::HashMap;

use crate::{HeaderError, RequestLike};

/// Keys consulted for the request method, in order.
const METHOD_KEYS: &[&str] = &["method", "REQUEST_METHOD"];
/// Keys consulted for the path, in order, when no `REQUEST_URI` is present.
const PATH_KEYS: &[&str] = &["PATH_INFO", "path"];

/// A request represented as a CGI-style environment map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CgiRequest {
    env: HashMap<String, String>,
}

impl CgiRequest {
    /// Creates a request from environment variables.
    pub fn new<I, K, V>(env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            env: env
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
    /// Convenience method for setting a variable
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
    /// Returns the value of an environment variable
    pub fn var(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }
    /// Consumes the request, returning the environment
    pub fn into_env(self) -> HashMap<String, String> {
        self.env
    }

    fn first_of(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|&key| self.env.get(key).cloned())
    }
}

impl From<HashMap<String, String>> for CgiRequest {
    fn from(env: HashMap<String, String>) -> Self {
        Self { env }
    }
}

impl RequestLike for CgiRequest {
    fn method(&self) -> Option<String> {
        self.first_of(METHOD_KEYS)
    }
    fn header(&self, name: &str) -> Option<String> {
        self.env.get(name).cloned()
    }
    fn set_header(&mut self, name: &str, value: &str) -> Result<(), HeaderError> {
        self.env.insert(name.into(), value.into());
        Ok(())
    }
    fn raw_uri(&self) -> Option<String> {
        self.env.get("REQUEST_URI").cloned()
    }
    fn path(&self) -> Option<String> {
        self.first_of(PATH_KEYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CanonicalizeError, CanonicalizeExt, HeaderField};

    const DATE: &str = "Thu, 10 Jul 2008 03:29:56 GMT";

    #[test]
    fn canonicalizes_environment() {
        let mut req = CgiRequest::new(vec![
            ("REQUEST_METHOD", "PUT"),
            ("PATH_INFO", "/notify"),
            ("CONTENT_TYPE", "text/plain"),
            ("HTTP_CONTENT_MD5", "blahblah"),
            ("HTTP_DATE", DATE),
        ]);
        assert_eq!(
            req.canonicalize().unwrap().as_str(),
            "PUT\ntext/plain\nblahblah\nThu, 10 Jul 2008 03:29:56 GMT\n/notify"
        );
    }

    #[test]
    fn prefers_request_uri() {
        let mut req = CgiRequest::new(vec![
            ("REQUEST_METHOD", "GET"),
            ("REQUEST_URI", "/script/notify?x=1"),
            ("PATH_INFO", "/notify"),
            ("HTTP_DATE", DATE),
        ]);
        assert!(req
            .canonicalize()
            .unwrap()
            .as_str()
            .ends_with("\n/script/notify"));
    }

    #[test]
    fn method_key_wins_over_request_method() {
        let req = CgiRequest::new(vec![("method", "POST"), ("REQUEST_METHOD", "GET")]);
        assert_eq!(RequestLike::method(&req).as_deref(), Some("POST"));
    }

    #[test]
    fn falls_back_to_path_key() {
        let req = CgiRequest::new(vec![("path", "/p")]);
        assert_eq!(RequestLike::path(&req).as_deref(), Some("/p"));
    }

    #[test]
    fn defaulted_date_is_stored_in_environment() {
        let mut req = CgiRequest::new(vec![("REQUEST_METHOD", "GET"), ("PATH_INFO", "/")]);
        req.canonicalize().unwrap();
        assert!(req.var("Date").is_some());
        assert_eq!(
            req.find_header(HeaderField::Date).as_deref(),
            req.var("Date")
        );
    }

    #[test]
    fn missing_method_is_unsupported() {
        let mut req = CgiRequest::new(vec![("PATH_INFO", "/"), ("HTTP_DATE", DATE)]);
        assert!(matches!(
            req.canonicalize(),
            Err(CanonicalizeError::UnsupportedRequestShape("method"))
        ));
    }

    #[test]
    fn missing_path_is_unsupported() {
        let mut req = CgiRequest::new(vec![("REQUEST_METHOD", "GET"), ("HTTP_DATE", DATE)]);
        assert!(matches!(
            req.canonicalize(),
            Err(CanonicalizeError::UnsupportedRequestShape("path"))
        ));
    }
}
