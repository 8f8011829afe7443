//! Argon2id password hashing for account credentials.
//!
//! Hashes are stored as PHC strings, so the cost used at registration
//! travels with each hash and verification keeps working after the
//! configured cost changes.

use argon2::password_hash::{
    self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use argon2::{Algorithm, Argon2, Params, Version};

use scribe_core::ports::{AuthError, PasswordService};

/// Work factors for new hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

pub struct Argon2PasswordService {
    hasher: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            hasher: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
        }
    }

    /// Use explicit work factors; rejects values Argon2 cannot run with.
    pub fn with_cost(cost: HashCost) -> Result<Self, AuthError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| AuthError::HashingError(format!("invalid hash cost: {e}")))?;

        Ok(Self {
            hasher: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        if password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .hasher
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(phc.to_string())
    }

    /// A wrong password is `Ok(false)`; an unreadable stored hash is an error.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let stored = PasswordHash::new(hash)
            .map_err(|e| AuthError::HashingError(format!("stored hash unreadable: {e}")))?;

        if password.is_empty() {
            return Ok(false);
        }

        match self.hasher.verify_password(password.as_bytes(), &stored) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::HashingError(e.to_string())),
        }
    }
}
