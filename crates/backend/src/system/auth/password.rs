use anyhow::{anyhow, Result};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a password with Argon2id and a random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| anyhow!("Stored password hash is malformed: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Minimum requirements for a new password:
/// at least 8 characters, with at least one letter and one digit
pub fn validate_password_strength(password: &str) -> Result<()> {
    if password.chars().count() < 8 {
        return Err(anyhow!("La contraseña debe tener al menos 8 caracteres"));
    }
    if !password.chars().any(|c| c.is_alphabetic()) {
        return Err(anyhow!("La contraseña debe contener al menos una letra"));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(anyhow!("La contraseña debe contener al menos un número"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("secreto123").unwrap();
        assert!(verify_password("secreto123", &hash).unwrap());
        assert!(!verify_password("otra-cosa", &hash).unwrap());
    }

    #[test]
    fn strength_rules() {
        assert!(validate_password_strength("abc1").is_err()); // too short
        assert!(validate_password_strength("12345678").is_err()); // no letter
        assert!(validate_password_strength("abcdefgh").is_err()); // no digit
        assert!(validate_password_strength("secreto123").is_ok());
    }
}
