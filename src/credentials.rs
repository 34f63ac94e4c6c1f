use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// The signing and verification processes use this trait to find the shared
/// secret belonging to an access key ID.
///
/// You do not need to implement this yourself: the `SimpleCredentialStore` type
/// provides an in-memory store, and plain `HashMap<String, String>`s work too.
pub trait CredentialStore: Debug + Send + Sync + 'static {
    /// Returns the secret for the given access key ID, or `None` if the key is
    /// not known.
    fn secret_for(&self, access_key_id: &str) -> Option<Vec<u8>>;
}

impl CredentialStore for HashMap<String, String> {
    fn secret_for(&self, access_key_id: &str) -> Option<Vec<u8>> {
        self.get(access_key_id).map(|secret| secret.as_bytes().to_vec())
    }
}

impl<T: CredentialStore + ?Sized> CredentialStore for Arc<T> {
    fn secret_for(&self, access_key_id: &str) -> Option<Vec<u8>> {
        (**self).secret_for(access_key_id)
    }
}

/// Implementation of a simple in-memory credential store.
#[derive(Default, Clone)]
pub struct SimpleCredentialStore {
    secrets: HashMap<String, Vec<u8>>,
}

impl SimpleCredentialStore {
    /// Initializes the store from a list of access key IDs and secrets.
    pub fn new<I, S, K>(credentials: I) -> Self
    where
        I: IntoIterator<Item = (S, K)>,
        S: Into<String>,
        K: AsRef<[u8]>,
    {
        Self {
            secrets: credentials
                .into_iter()
                .map(|(access_key_id, secret)| (access_key_id.into(), secret.as_ref().to_vec()))
                .collect(),
        }
    }

    /// Adds a secret to the store, replacing any existing secret for the same
    /// access key ID.
    pub fn add<K: AsRef<[u8]>>(&mut self, access_key_id: &str, secret: K) {
        self.secrets
            .insert(access_key_id.into(), secret.as_ref().to_vec());
    }
    /// Removes the secret for the specified access key ID
    pub fn remove(&mut self, access_key_id: &str) {
        self.secrets.remove(access_key_id);
    }
    /// Clears all secrets from the store
    pub fn clear(&mut self) {
        self.secrets.clear();
    }
}

// Secrets stay out of debug output.
impl Debug for SimpleCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_set().entries(self.secrets.keys()).finish()
    }
}

impl CredentialStore for SimpleCredentialStore {
    fn secret_for(&self, access_key_id: &str) -> Option<Vec<u8>> {
        self.secrets.get(access_key_id).cloned()
    }
}
