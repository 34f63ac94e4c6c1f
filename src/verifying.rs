use crate::algorithm::signatures_match;
use crate::canonicalize::RequestLike;
use crate::config::AuthHmac;
use crate::header::HeaderField;

/// Splits an `Authorization` header value of the form
/// `<service-id> <access-key-id>:<signature>` into the access key ID and the
/// claimed signature.
///
/// The access key ID runs up to the first `:`; everything after it is the
/// signature. Both must be non-empty. The value must start with the service
/// ID: `X AuthHMAC key:sig` is rejected rather than searched for a match.
pub fn parse_authorization<'a>(service_id: &str, value: &'a str) -> Option<(&'a str, &'a str)> {
    let rest = value.strip_prefix(service_id)?.strip_prefix(' ')?;
    let (access_key_id, signature) = rest.split_once(':')?;
    if access_key_id.is_empty() || signature.is_empty() {
        return None;
    }
    Some((access_key_id, signature))
}

/// Import this trait to get access to the `authenticated` method on all types
/// implementing `RequestLike`.
///
/// Verification never fails with an error: a missing or malformed
/// `Authorization` header, an unknown access key and a wrong signature all
/// produce the same negative result.
pub trait VerifyingExt {
    /// Returns the access key ID the request was signed with, if the signature
    /// is valid. Computing the canonical string may add a `Date` header to the
    /// request.
    fn authenticated_access_key(&mut self, config: &AuthHmac) -> Option<String>;

    /// Returns true if the request carries a valid signature.
    fn authenticated(&mut self, config: &AuthHmac) -> bool {
        self.authenticated_access_key(config).is_some()
    }
}

impl<R: RequestLike> VerifyingExt for R {
    fn authenticated_access_key(&mut self, config: &AuthHmac) -> Option<String> {
        let auth_header = match self.find_header(HeaderField::Authorization) {
            Some(value) => value,
            None => {
                debug!("Request has no Authorization header");
                return None;
            }
        };

        let (access_key_id, provided_signature) =
            match parse_authorization(config.service_id(), &auth_header) {
                Some(parts) => parts,
                None => {
                    debug!(
                        "Authorization header does not match the {} scheme",
                        config.service_id()
                    );
                    return None;
                }
            };

        let secret = match config.credentials().secret_for(access_key_id) {
            Some(secret) => secret,
            None => {
                debug!("Unknown access key ID {:?}", access_key_id);
                return None;
            }
        };

        let expected_signature = match config.signature(self, &secret) {
            Ok(signature) => signature,
            Err(e) => {
                debug!("Could not compute signature: {}", e);
                return None;
            }
        };

        if signatures_match(&expected_signature, provided_signature) {
            Some(access_key_id.to_owned())
        } else {
            debug!("Signature mismatch for access key ID {:?}", access_key_id);
            None
        }
    }
}
