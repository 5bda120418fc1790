// src/utils/password.rs

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// パスワード最小文字数
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// パスワード関連のエラー
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingError(#[from] argon2::password_hash::Error),

    #[error("Weak password: {0}")]
    WeakPassword(String),
}

/// パスワードハッシュ管理
pub struct PasswordManager {
    argon2: Argon2<'static>,
}

impl PasswordManager {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// パスワードをハッシュ化（最小文字数チェック込み）
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::WeakPassword(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// パスワードを検証
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let manager = PasswordManager::new();
        let hash = manager.hash_password("correct-horse-battery").unwrap();

        assert!(manager.verify_password("correct-horse-battery", &hash).unwrap());
        assert!(!manager.verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_short_password_rejected() {
        let manager = PasswordManager::new();
        let result = manager.hash_password("short");
        assert!(matches!(result, Err(PasswordError::WeakPassword(_))));
    }
}
