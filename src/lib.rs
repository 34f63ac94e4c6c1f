#![deny(missing_docs)]
//! HMAC-SHA1 authentication of HTTP requests using a shared secret.
//!
//! A client computes a canonical string from selected parts of the request,
//! signs it with the secret belonging to its access key ID, and sends the
//! result in the `Authorization` header:
//!
//! ```text
//! Authorization: AuthHMAC <access-key-id>:<base64(HMAC-SHA1(secret, canonical-string))>
//! ```
//!
//! where the canonical string is:
//!
//! ```text
//! METHOD "\n" CONTENT-TYPE "\n" CONTENT-MD5 "\n" DATE "\n" PATH
//! ```
//!
//! The server looks up the secret for the access key ID in its credential
//! store, recomputes the signature and compares the two. The secret itself is
//! never transmitted.
//!
//! ## Features
//!
//! This crate can be used with multiple different HTTP clients and/or servers.
//! Requests from the [http](https://crates.io/crates/http) crate, CGI-style
//! environment maps ([`cgi::CgiRequest`]) and the [`mock_request::MockRequest`]
//! type are always supported. Other client/server-specific implementations are
//! gated by correspondingly named features.
//!
//! ### Supported crates:
//!
//! | Crate / Feature name                              | Client/Server | Notes                                  |
//! | ------------------------------------------------- | ------------- | -------------------------------------- |
//! | [reqwest](https://crates.io/crates/reqwest)       | Client        | Supports blocking and non-blocking requests. |
//!
//! ## Example usage
//!
//! ```rust
//! use auth_hmac::*;
//!
//! let config = AuthHmac::new(SimpleCredentialStore::new(vec![("my-key-id", "secret")]));
//!
//! let mut req = http::Request::put("http://localhost/notify")
//!     .header("Content-Type", "text/plain")
//!     .body(())
//!     .unwrap();
//!
//! // Adds a `Date` header if missing, then sets `Authorization`
//! req.sign(&config, "my-key-id").unwrap();
//!
//! assert!(req.authenticated(&config));
//! ```
//!
//! The canonical string can be computed differently by configuring a
//! [`CanonicalStringStrategy`]; the service ID prefixing the header is
//! configurable too:
//!
//! ```rust
//! use auth_hmac::*;
//!
//! let config = AuthHmac::new(SimpleCredentialStore::new(vec![("my-key-id", "secret")]))
//!     .with_service_id("MyService");
//! assert_eq!(config.service_id(), "MyService");
//! ```

const DATE_FORMAT: &str = "%a, %d %b %Y %T GMT";

#[macro_use]
mod macros;

mod algorithm;
pub use algorithm::*;

mod header;
pub use header::*;

mod canonicalize;
pub use canonicalize::*;

mod credentials;
pub use credentials::*;

mod config;
pub use config::*;

mod signing;
pub use signing::*;

mod verifying;
pub use verifying::*;

mod http_impls;

pub mod cgi;

/// Module containg a mock request type which implements `RequestLike` for
/// testing.
pub mod mock_request;

#[cfg(feature = "reqwest")]
mod reqwest_impls;
