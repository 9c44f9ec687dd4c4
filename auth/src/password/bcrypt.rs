use super::errors::PasswordError;

/// Work factor applied when no explicit cost is requested.
pub const DEFAULT_COST: u32 = 10;

/// Password hashing implementation.
///
/// Provides salted, adaptive one-way hashing (internally uses bcrypt).
/// The stored string embeds the cost and salt, so verification needs nothing else.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a new password hasher with the default work factor.
    ///
    /// # Returns
    /// PasswordHasher instance configured with cost 10
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Create a password hasher with a custom work factor.
    ///
    /// # Arguments
    /// * `cost` - bcrypt cost (log2 of the number of rounds, 4..=31)
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password.
    ///
    /// A fresh random salt is generated on every call, so two hashes of the
    /// same password differ.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt string (`$2b$<cost>$<salt+digest>`)
    ///
    /// # Errors
    /// * `HashingFailed` - Invalid cost or password rejected by bcrypt
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        ::bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Malformed stored hashes verify as `false` rather than erroring, so
    /// callers cannot tell a corrupt record apart from a wrong password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        ::bcrypt::verify(password, hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
