use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;

/// HMAC keyed with SHA-1, the only signature algorithm used by the
/// `Authorization` scheme.
pub type HmacSha1 = Hmac<Sha1>;

/// Returns the base64-encoded (standard alphabet, padded) HMAC-SHA1 of
/// `bytes_to_sign`, keyed by `secret`.
pub fn hmac_sha1_base64(secret: &[u8], bytes_to_sign: &[u8]) -> String {
    let mut mac = HmacSha1::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(bytes_to_sign);
    base64::encode(mac.finalize().into_bytes()).trim().to_owned()
}

/// Compares a claimed signature against the expected one in constant time.
pub(crate) fn signatures_match(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}
