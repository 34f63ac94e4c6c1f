use thiserror::Error;

use crate::canonicalize::{CanonicalizeError, RequestLike};
use crate::config::AuthHmac;
use crate::header::{HeaderError, HeaderField};

/// The types of error which may occur whilst signing a request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SigningError {
    /// The credential store has no secret for this access key ID.
    #[error("Unknown credential: no secret for access key ID {0:?}")]
    UnknownCredential(String),
    /// The canonical string of the request could not be computed.
    #[error(transparent)]
    Canonicalize(#[from] CanonicalizeError),
    /// The request refused to store the `Authorization` header.
    #[error(transparent)]
    InvalidHeader(#[from] HeaderError),
}

/// Import this trait to get access to the `sign` and `signed` methods on all
/// types implementing `RequestLike`.
pub trait SigningExt: Sized {
    /// Sign the request, returning it with the `Authorization` header set.
    fn signed(mut self, config: &AuthHmac, access_key_id: &str) -> Result<Self, SigningError> {
        self.sign(config, access_key_id)?;
        Ok(self)
    }

    /// Sign the request in place, setting its `Authorization` header. A `Date`
    /// header is added first if the request does not have one.
    fn sign(&mut self, config: &AuthHmac, access_key_id: &str) -> Result<(), SigningError>;
}

impl<R: RequestLike> SigningExt for R {
    fn sign(&mut self, config: &AuthHmac, access_key_id: &str) -> Result<(), SigningError> {
        let secret = config
            .credentials()
            .secret_for(access_key_id)
            .ok_or_else(|| SigningError::UnknownCredential(access_key_id.into()))?;

        let auth_header = config.authorization(self, access_key_id, &secret)?;

        info!("Signing request with access key ID {:?}", access_key_id);

        self.set_header(HeaderField::Authorization.as_str(), &auth_header)?;

        Ok(())
    }
}
