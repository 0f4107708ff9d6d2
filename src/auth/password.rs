//! Salted, iterated SHA-256 password hashes.
//!
//! Encoded form: `sha256$<iterations>$<salt hex>$<digest hex>`.

use sha2::{Digest, Sha256};

const ALGORITHM: &str = "sha256";
const SALT_LEN: usize = 16;
pub const DEFAULT_ITERATIONS: u32 = 10_000;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let salt: [u8; SALT_LEN] = rand::random();
    encode(password, &salt, DEFAULT_ITERATIONS)
}

/// Check a password against an encoded hash. Malformed hashes never match.
pub fn verify_password(password: &str, encoded: &str) -> bool {
    let mut parts = encoded.split('$');
    let (Some(algorithm), Some(iterations), Some(salt), Some(expected), None) =
        (parts.next(), parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if algorithm != ALGORITHM {
        return false;
    }
    let (Ok(iterations), Some(salt)) = (iterations.parse::<u32>(), from_hex(salt)) else {
        return false;
    };

    let actual = digest(password, &salt, iterations);
    constant_time_eq(to_hex(&actual).as_bytes(), expected.as_bytes())
}

fn encode(password: &str, salt: &[u8], iterations: u32) -> String {
    let hash = digest(password, salt, iterations);
    format!("{}${}${}${}", ALGORITHM, iterations, to_hex(salt), to_hex(&hash))
}

fn digest(password: &str, salt: &[u8], iterations: u32) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let mut current = hasher.finalize();

    for _ in 1..iterations.max(1) {
        let mut hasher = Sha256::new();
        hasher.update(current);
        hasher.update(password.as_bytes());
        current = hasher.finalize();
    }

    current.to_vec()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn from_hex(text: &str) -> Option<Vec<u8>> {
    if text.len() % 2 != 0 {
        return None;
    }
    (0..text.len())
        .step_by(2)
        .map(|i| text.get(i..i + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()))
        .collect()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
