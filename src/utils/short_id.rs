//! Random short-ID generation.
//!
//! Draws identifiers of a configured length from a configured alphabet using
//! OS entropy. Uniqueness is not this module's concern: the creation path
//! probes the store and retries, and the storage layer's unique constraint is
//! the final arbiter under concurrent creation.

/// Settings for short-ID generation, carried explicitly by the creation path.
#[derive(Debug, Clone)]
pub struct ShortIdConfig {
    pub length: usize,
    pub alphabet: String,
    /// Collision retries before the creation path reports ID-space exhaustion.
    pub max_attempts: usize,
}

impl Default for ShortIdConfig {
    fn default() -> Self {
        Self {
            length: 6,
            alphabet: crate::config::DEFAULT_ALPHABET.to_string(),
            max_attempts: 5,
        }
    }
}

/// Generates a random short ID from the configured alphabet.
///
/// Uses `getrandom` for entropy. Each output character is drawn by reducing a
/// random byte modulo the alphabet size; with the default 62-symbol alphabet
/// the bias is negligible for identifier purposes.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare) or if
/// the alphabet is empty; [`crate::config::Config::validate`] rejects empty
/// alphabets before any generator runs.
pub fn generate_short_id(config: &ShortIdConfig) -> String {
    let alphabet: Vec<char> = config.alphabet.chars().collect();
    assert!(!alphabet.is_empty(), "short-ID alphabet must not be empty");

    let mut buffer = vec![0u8; config.length];
    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    buffer
        .iter()
        .map(|&b| alphabet[b as usize % alphabet.len()])
        .collect()
}
