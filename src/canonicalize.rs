use std::fmt;

use chrono::Utc;
use thiserror::Error;

use crate::header::{HeaderError, HeaderField};
use crate::DATE_FORMAT;

/// The types of error which may occur whilst computing the canonical string
/// for a request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CanonicalizeError {
    /// The request did not expose one of the parts that make up the canonical
    /// string (`"method"` or `"path"`). This usually means the wrong adapter
    /// was used for the request.
    #[error("Unsupported request shape: could not resolve the {0}")]
    UnsupportedRequestShape(&'static str),
    /// The request refused to store the defaulted `Date` header.
    #[error(transparent)]
    InvalidHeader(#[from] HeaderError),
}

/// Base trait for all request types.
///
/// Implementations only expose what is needed to build the canonical string:
/// the method, raw header lookup, header mutation and the request path.
pub trait RequestLike {
    /// Returns the HTTP method, or `None` if the request does not carry one.
    fn method(&self) -> Option<String>;

    /// Returns the value stored under exactly this header key. Implementations
    /// backed by case-insensitive header maps may ignore case.
    fn header(&self, name: &str) -> Option<String>;

    /// Sets a header on the request, replacing any existing value. This
    /// *must* be reflected by later calls to `header()`.
    fn set_header(&mut self, name: &str, value: &str) -> Result<(), HeaderError>;

    /// Returns the request target exactly as it appeared on the request line,
    /// for request types which keep it around.
    fn raw_uri(&self) -> Option<String> {
        None
    }

    /// Returns the path component of the request.
    fn path(&self) -> Option<String>;

    /// Looks up a logical header field by trying each of its candidate keys
    /// in order.
    fn find_header(&self, field: HeaderField) -> Option<String> {
        field
            .candidates()
            .iter()
            .find_map(|&name| self.header(name))
    }
}

impl<T: RequestLike + ?Sized> RequestLike for &mut T {
    fn method(&self) -> Option<String> {
        (**self).method()
    }
    fn header(&self, name: &str) -> Option<String> {
        (**self).header(name)
    }
    fn set_header(&mut self, name: &str, value: &str) -> Result<(), HeaderError> {
        (**self).set_header(name, value)
    }
    fn raw_uri(&self) -> Option<String> {
        (**self).raw_uri()
    }
    fn path(&self) -> Option<String> {
        (**self).path()
    }
}

/// A computed canonical string, ready to be signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalString {
    content: String,
}

impl CanonicalString {
    /// Obtain a view of this canonical string as a string slice
    pub fn as_str(&self) -> &str {
        &self.content
    }
    /// Obtain a view of this canonical string as a byte slice
    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }
}

impl From<String> for CanonicalString {
    fn from(content: String) -> Self {
        Self { content }
    }
}

impl From<CanonicalString> for String {
    fn from(other: CanonicalString) -> Self {
        other.content
    }
}

impl fmt::Display for CanonicalString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.content)
    }
}

/// Computes the canonical string of a request.
///
/// The result has the form:
///
/// ```text
/// METHOD "\n" CONTENT-TYPE "\n" CONTENT-MD5 "\n" DATE "\n" PATH
/// ```
///
/// Missing `Content-Type` and `Content-MD5` headers are treated as empty. If
/// the request has no `Date` header, the current time is used and **written
/// back to the request** under `Date`, so that the header which is eventually
/// sent matches the one that was signed. Everything from the first `?` in the
/// path onwards is discarded. Values are not sanitized: a header containing a
/// newline is passed through as-is.
pub fn canonical_string(
    request: &mut dyn RequestLike,
) -> Result<CanonicalString, CanonicalizeError> {
    let method = request
        .method()
        .filter(|method| !method.is_empty())
        .ok_or(CanonicalizeError::UnsupportedRequestShape("method"))?;

    let content_type = request
        .find_header(HeaderField::ContentType)
        .unwrap_or_default();
    let content_md5 = request
        .find_header(HeaderField::ContentMd5)
        .unwrap_or_default();
    let date = match request.find_header(HeaderField::Date) {
        Some(date) => date,
        None => {
            let date = Utc::now().format(DATE_FORMAT).to_string();
            request.set_header(HeaderField::Date.as_str(), &date)?;
            date
        }
    };

    let path = request
        .raw_uri()
        .or_else(|| request.path())
        .map(|mut path| {
            if let Some(idx) = path.find('?') {
                path.truncate(idx);
            }
            path
        })
        .filter(|path| !path.is_empty())
        .ok_or(CanonicalizeError::UnsupportedRequestShape("path"))?;

    let headers = [content_type, content_md5, date].join("\n");

    Ok(CanonicalString {
        content: format!("{}\n{}\n{}", method, headers, path),
    })
}

/// A pluggable way of computing the canonical string of a request.
///
/// Any `Fn(&mut dyn RequestLike) -> Result<CanonicalString, CanonicalizeError>`
/// closure can be used as a strategy.
pub trait CanonicalStringStrategy: Send + Sync + 'static {
    /// Compute the canonical string for this request.
    fn canonical_string(
        &self,
        request: &mut dyn RequestLike,
    ) -> Result<CanonicalString, CanonicalizeError>;
}

impl<F> CanonicalStringStrategy for F
where
    F: Fn(&mut dyn RequestLike) -> Result<CanonicalString, CanonicalizeError>
        + Send
        + Sync
        + 'static,
{
    fn canonical_string(
        &self,
        request: &mut dyn RequestLike,
    ) -> Result<CanonicalString, CanonicalizeError> {
        self(request)
    }
}

/// The standard strategy, implemented by [`canonical_string`].
#[derive(Debug, Default, Copy, Clone)]
pub struct DefaultCanonicalizer;

impl CanonicalStringStrategy for DefaultCanonicalizer {
    fn canonical_string(
        &self,
        request: &mut dyn RequestLike,
    ) -> Result<CanonicalString, CanonicalizeError> {
        canonical_string(request)
    }
}

/// Extension method for computing the canonical string of a request.
pub trait CanonicalizeExt {
    /// Compute the canonical representation of this request. May add a `Date`
    /// header to the request.
    fn canonicalize(&mut self) -> Result<CanonicalString, CanonicalizeError>;
}

impl<T: RequestLike> CanonicalizeExt for T {
    fn canonicalize(&mut self) -> Result<CanonicalString, CanonicalizeError> {
        canonical_string(self)
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use http::Method;

    use super::*;
    use crate::cgi::CgiRequest;
    use crate::mock_request::MockRequest;

    fn notify_request(url: &str) -> MockRequest {
        MockRequest::new(Method::PUT, url)
            .with_header("Content-Type", "text/plain")
            .with_header("Content-MD5", "blahblah")
            .with_header("Date", "Thu, 10 Jul 2008 03:29:56 GMT")
    }

    /// Only exposes headers, to exercise the shape checks.
    struct HeadersOnly(Option<String>);

    impl RequestLike for HeadersOnly {
        fn method(&self) -> Option<String> {
            self.0.clone()
        }
        fn header(&self, _name: &str) -> Option<String> {
            None
        }
        fn set_header(&mut self, _name: &str, _value: &str) -> Result<(), HeaderError> {
            Ok(())
        }
        fn path(&self) -> Option<String> {
            None
        }
    }

    #[test]
    fn builds_canonical_string() {
        let mut req = notify_request("http://localhost/notify");
        assert_eq!(
            req.canonicalize().unwrap().as_str(),
            "PUT\ntext/plain\nblahblah\nThu, 10 Jul 2008 03:29:56 GMT\n/notify"
        );
    }

    #[test]
    fn strips_query_string() {
        let mut with_query = notify_request("http://localhost/notify?x=1");
        let mut without_query = notify_request("http://localhost/notify");
        assert_eq!(
            with_query.canonicalize().unwrap(),
            without_query.canonicalize().unwrap()
        );
    }

    #[test]
    fn missing_optional_headers_are_empty() {
        let mut req = MockRequest::new(Method::GET, "http://localhost/")
            .with_header("Date", "Thu, 10 Jul 2008 03:29:56 GMT");
        assert_eq!(
            req.canonicalize().unwrap().as_str(),
            "GET\n\n\nThu, 10 Jul 2008 03:29:56 GMT\n/"
        );
    }

    #[test]
    fn missing_date_is_written_back() {
        let mut req = MockRequest::new(Method::GET, "http://localhost/");
        assert!(req.find_header(HeaderField::Date).is_none());

        let first = req.canonicalize().unwrap();
        let date = req
            .find_header(HeaderField::Date)
            .expect("Date header to be defaulted");
        DateTime::parse_from_rfc2822(&date).expect("Date to be an HTTP date");
        assert!(first.as_str().contains(&date));

        // The defaulted header is now used as-is
        assert_eq!(req.canonicalize().unwrap(), first);
    }

    #[test]
    fn newlines_are_not_sanitized() {
        let mut req = CgiRequest::new(vec![
            ("REQUEST_METHOD", "POST"),
            ("PATH_INFO", "/a"),
            ("CONTENT_TYPE", "text/plain\nx"),
            ("HTTP_DATE", "Thu, 10 Jul 2008 03:29:56 GMT"),
        ]);
        assert_eq!(
            req.canonicalize().unwrap().as_str(),
            "POST\ntext/plain\nx\n\nThu, 10 Jul 2008 03:29:56 GMT\n/a"
        );
    }

    #[test]
    fn unresolved_method_is_an_error() {
        let err = canonical_string(&mut HeadersOnly(None)).unwrap_err();
        assert!(matches!(
            err,
            CanonicalizeError::UnsupportedRequestShape("method")
        ));
    }

    #[test]
    fn unresolved_path_is_an_error() {
        let err = canonical_string(&mut HeadersOnly(Some("GET".into()))).unwrap_err();
        assert!(matches!(
            err,
            CanonicalizeError::UnsupportedRequestShape("path")
        ));
    }

    #[test]
    fn closures_are_strategies() {
        let strategy = |req: &mut dyn RequestLike| -> Result<CanonicalString, CanonicalizeError> {
            Ok(req.method().unwrap_or_default().into())
        };
        let mut req = notify_request("http://localhost/notify");
        assert_eq!(strategy.canonical_string(&mut req).unwrap().as_str(), "PUT");
    }
}
