// Password hashing, bcrypt with the library default cost

use bcrypt::{hash, verify, DEFAULT_COST};

pub fn hash_password(password: &str) -> Result<String, String> {
    hash(password, DEFAULT_COST).map_err(|e| e.to_string())
}

pub fn verify_password(password: &str, hashed: &str) -> Result<bool, String> {
    verify(password, hashed).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hashed = hash_password("correct horse").expect("hash");
        assert!(verify_password("correct horse", &hashed).expect("verify"));
    }

    #[test]
    fn wrong_password_rejected() {
        let hashed = hash_password("correct horse").expect("hash");
        assert!(!verify_password("battery staple", &hashed).expect("verify"));
    }
}
