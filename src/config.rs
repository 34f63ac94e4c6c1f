use std::fmt;
use std::sync::Arc;

use crate::algorithm::hmac_sha1_base64;
use crate::canonicalize::{
    CanonicalString, CanonicalStringStrategy, CanonicalizeError, DefaultCanonicalizer,
    RequestLike,
};
use crate::credentials::{CredentialStore, SimpleCredentialStore};
use crate::signing::{SigningError, SigningExt};
use crate::verifying::VerifyingExt;

/// The service ID used when none is configured.
pub const DEFAULT_SERVICE_ID: &str = "AuthHMAC";

/// Signs and verifies requests against a credential store.
///
/// An instance is created once per configuration and reused for any number of
/// requests; it holds no per-request state. The `Authorization` header it
/// produces and accepts has the form:
///
/// ```text
/// <service-id> <access-key-id>:<signature>
/// ```
#[derive(Clone)]
pub struct AuthHmac {
    credentials: Arc<dyn CredentialStore>,
    service_id: String,
    canonical_string_strategy: Arc<dyn CanonicalStringStrategy>,
}

impl fmt::Debug for AuthHmac {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // The store may hold secrets in its own debug output.
        f.debug_struct("AuthHmac")
            .field("service_id", &self.service_id)
            .finish_non_exhaustive()
    }
}

impl AuthHmac {
    /// Creates a new instance using the default service ID and canonical
    /// string strategy.
    pub fn new<CS: CredentialStore>(credentials: CS) -> Self {
        AuthHmac {
            credentials: Arc::new(credentials),
            service_id: DEFAULT_SERVICE_ID.into(),
            canonical_string_strategy: Arc::new(DefaultCanonicalizer),
        }
    }

    /// Returns the credential store.
    pub fn credentials(&self) -> &dyn CredentialStore {
        &*self.credentials
    }
    /// Returns the service ID which prefixes the `Authorization` header.
    ///
    /// This is `AuthHMAC` by default.
    pub fn service_id(&self) -> &str {
        &self.service_id
    }
    /// Sets the service ID which prefixes the `Authorization` header (in-place).
    pub fn set_service_id(&mut self, service_id: &str) -> &mut Self {
        self.service_id = service_id.into();
        self
    }
    /// Sets the service ID which prefixes the `Authorization` header.
    pub fn with_service_id(mut self, service_id: &str) -> Self {
        self.set_service_id(service_id);
        self
    }
    /// Returns the strategy used to compute canonical strings.
    pub fn canonical_string_strategy(&self) -> &dyn CanonicalStringStrategy {
        &*self.canonical_string_strategy
    }
    /// Sets the strategy used to compute canonical strings (in-place).
    pub fn set_canonical_string_strategy<S: CanonicalStringStrategy>(
        &mut self,
        strategy: S,
    ) -> &mut Self {
        self.canonical_string_strategy = Arc::new(strategy);
        self
    }
    /// Sets the strategy used to compute canonical strings.
    pub fn with_canonical_string_strategy<S: CanonicalStringStrategy>(
        mut self,
        strategy: S,
    ) -> Self {
        self.set_canonical_string_strategy(strategy);
        self
    }

    /// Computes the canonical string of a request using the configured
    /// strategy. The default strategy adds a `Date` header if one is missing.
    pub fn canonical_string(
        &self,
        request: &mut dyn RequestLike,
    ) -> Result<CanonicalString, CanonicalizeError> {
        self.canonical_string_strategy.canonical_string(request)
    }

    /// Computes the signature of a request for the given secret.
    pub fn signature(
        &self,
        request: &mut dyn RequestLike,
        secret: &[u8],
    ) -> Result<String, CanonicalizeError> {
        let canonical_string = self.canonical_string(request)?;
        Ok(hmac_sha1_base64(secret, canonical_string.as_bytes()))
    }

    /// Computes the `Authorization` header value for a request, without
    /// attaching it.
    pub fn authorization(
        &self,
        request: &mut dyn RequestLike,
        access_key_id: &str,
        secret: &[u8],
    ) -> Result<String, CanonicalizeError> {
        let signature = self.signature(request, secret)?;
        Ok(format!("{} {}:{}", self.service_id, access_key_id, signature))
    }

    /// Signs a request with a single access key ID and secret, using the
    /// default configuration.
    pub fn sign_with<R: RequestLike>(
        request: &mut R,
        access_key_id: &str,
        secret: &[u8],
    ) -> Result<(), SigningError> {
        Self::one_shot(access_key_id, secret).sign_request(request, access_key_id)
    }

    /// Returns true if a request was signed with the given access key ID and
    /// secret, using the default configuration.
    pub fn authenticated_with<R: RequestLike>(
        request: &mut R,
        access_key_id: &str,
        secret: &[u8],
    ) -> bool {
        request.authenticated(&Self::one_shot(access_key_id, secret))
    }

    /// Signs a request in place, setting its `Authorization` header.
    pub fn sign_request<R: RequestLike>(
        &self,
        request: &mut R,
        access_key_id: &str,
    ) -> Result<(), SigningError> {
        request.sign(self, access_key_id)
    }

    fn one_shot(access_key_id: &str, secret: &[u8]) -> Self {
        Self::new(SimpleCredentialStore::new(vec![(access_key_id, secret)]))
    }
}
