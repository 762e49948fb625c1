use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::OnceCell;

// Stand-in secret for accounts that do not exist.
const PLACEHOLDER_PASSWORD: &str = "placeholder-password-for-unknown-accounts";

/// Salted password hashing for seller credentials.
///
/// The salt and parameters are embedded in the PHC string produced by
/// [`CredentialManager::hash`], so no separate salt column is needed.
#[derive(Clone, Default)]
pub struct CredentialManager {
    argon2: Argon2<'static>,
    placeholder_hash: OnceCell<String>,
}

impl CredentialManager {
    pub fn new() -> Self {
        let credentials = Self::default();
        credentials.placeholder_hash();
        credentials
    }

    /// Hashes `plaintext` with a freshly generated salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)?
            .to_string();
        Ok(password_hash)
    }

    /// Returns true iff `plaintext` matches `stored_hash`.
    ///
    /// A stored value that does not parse as a password hash is a mismatch,
    /// not an error.
    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(stored_hash) {
            Ok(h) => h,
            Err(_) => return false,
        };
        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Burns one full verification for a login whose account was not found,
    /// so it takes as long as a wrong password would. Always false.
    pub fn verify_unknown(&self, plaintext: &str) -> bool {
        let _ = self.verify(plaintext, self.placeholder_hash());
        false
    }

    fn placeholder_hash(&self) -> &str {
        self.placeholder_hash.get_or_init(|| {
            self.hash(PLACEHOLDER_PASSWORD).unwrap_or_else(|e| {
                tracing::error!("Failed to build placeholder hash: {}", e);
                String::new()
            })
        })
    }
}
