use std::fmt;

use thiserror::Error;

/// A header value that a request type refused to store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HeaderError {
    /// The header name cannot be represented by the request type.
    #[error("Invalid header name: {0:?}")]
    InvalidName(String),
    /// The header value cannot be represented by the request type.
    #[error("Invalid value for header {name:?}: {value:?}")]
    InvalidValue {
        /// Name of the header being set
        name: String,
        /// The rejected value
        value: String,
    },
}

/// The logical header fields read while canonicalizing and verifying a request.
///
/// Depending on the request type, the same field may be stored under a
/// hyphenated name (`Content-Type`), an upper-case name, or a CGI-style
/// environment key (`CONTENT_TYPE`, `HTTP_DATE`). Each field knows the ordered
/// list of keys to try; the first one present wins.
#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum HeaderField {
    /// `Content-Type`
    ContentType,
    /// `Content-MD5`
    ContentMd5,
    /// `Date`
    Date,
    /// `Authorization`
    Authorization,
}

impl HeaderField {
    /// The name used when the field is written back to a request.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderField::ContentType => "Content-Type",
            HeaderField::ContentMd5 => "Content-MD5",
            HeaderField::Date => "Date",
            HeaderField::Authorization => "Authorization",
        }
    }

    /// Candidate keys, in lookup order.
    pub fn candidates(&self) -> &'static [&'static str] {
        match self {
            HeaderField::ContentType => &[
                "Content-Type",
                "CONTENT-TYPE",
                "CONTENT_TYPE",
                "HTTP_CONTENT_TYPE",
            ],
            HeaderField::ContentMd5 => &[
                "Content-MD5",
                "CONTENT-MD5",
                "CONTENT_MD5",
                "HTTP_CONTENT_MD5",
            ],
            HeaderField::Date => &["Date", "DATE", "HTTP_DATE"],
            HeaderField::Authorization => &["Authorization", "HTTP_AUTHORIZATION"],
        }
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_name_is_tried_first() {
        for field in &[
            HeaderField::ContentType,
            HeaderField::ContentMd5,
            HeaderField::Date,
            HeaderField::Authorization,
        ] {
            assert_eq!(field.candidates()[0], field.as_str());
        }
    }

    #[test]
    fn cgi_keys_are_candidates() {
        assert!(HeaderField::ContentType
            .candidates()
            .contains(&"CONTENT_TYPE"));
        assert!(HeaderField::Date.candidates().contains(&"HTTP_DATE"));
        assert!(HeaderField::Authorization
            .candidates()
            .contains(&"HTTP_AUTHORIZATION"));
    }
}
