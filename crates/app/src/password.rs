//! Argon2id password hashing and verification.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use questionnaire_domain::error::QuestionnaireError;

/// Password checked against unknown usernames so both failure paths cost the same.
const DUMMY_PASSWORD: &str = "questionnaire-dummy-password";

/// Hashes and verifies passwords with Argon2id.
pub struct CredentialHasher {
    argon2: Argon2<'static>,
    dummy_hash: String,
}

impl CredentialHasher {
    /// Build a hasher with explicit Argon2id cost parameters.
    ///
    /// The hash checked for unknown usernames is computed here, with the
    /// same parameters as real accounts.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::PasswordHash`] if that hash cannot be computed.
    pub fn with_params(params: Params) -> Result<Self, QuestionnaireError> {
        let mut hasher = Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            dummy_hash: String::new(),
        };
        hasher.dummy_hash = hasher.hash(DUMMY_PASSWORD)?;
        Ok(hasher)
    }

    /// Build a hasher from raw Argon2id costs: memory in KiB, passes, and lanes.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::PasswordHash`] when the costs are out of range.
    pub fn with_costs(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, QuestionnaireError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| QuestionnaireError::PasswordHash(err.to_string()))?;
        Self::with_params(params)
    }

    /// Hash `password` into a PHC string with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::PasswordHash`] if hashing fails.
    pub fn hash(&self, password: &str) -> Result<String, QuestionnaireError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| QuestionnaireError::PasswordHash(err.to_string()))
    }

    /// Check `password` against a stored PHC string.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionnaireError::PasswordHash`] if the stored hash cannot be parsed.
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool, QuestionnaireError> {
        let parsed = PasswordHash::new(stored)
            .map_err(|err| QuestionnaireError::PasswordHash(err.to_string()))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Burn one verification for a username that does not exist.
    pub fn verify_dummy(&self, password: &str) {
        if let Err(err) = self.verify(password, &self.dummy_hash) {
            tracing::error!(error = %err, "dummy password hash is unreadable");
        }
    }
}

#[cfg(test)]
pub(crate) fn fast_hasher() -> CredentialHasher {
    CredentialHasher::with_costs(Params::MIN_M_COST, 1, 1).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_verify_matching_password() {
        let hasher = fast_hasher();
        let hash = hasher.hash("hunter2").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("hunter2", &hash).unwrap());
        assert!(!hasher.verify("hunter3", &hash).unwrap());
    }

    #[test]
    fn should_salt_each_hash() {
        let hasher = fast_hasher();
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn should_reject_out_of_range_costs() {
        assert!(CredentialHasher::with_costs(0, 0, 0).is_err());
    }

    #[test]
    fn should_report_unparseable_stored_hash() {
        let result = fast_hasher().verify("pw", "not-a-phc-string");
        assert!(matches!(result, Err(QuestionnaireError::PasswordHash(_))));
    }

    #[test]
    fn should_prepare_parseable_dummy_hash_up_front() {
        let hasher = fast_hasher();

        let parsed = PasswordHash::new(&hasher.dummy_hash).unwrap();
        assert_eq!(parsed.algorithm.as_str(), "argon2id");
        assert!(hasher.verify(DUMMY_PASSWORD, &hasher.dummy_hash).unwrap());
        assert!(!hasher.verify("anything", &hasher.dummy_hash).unwrap());
    }
}
