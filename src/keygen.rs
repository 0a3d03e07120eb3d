//! Random key generation.
//!
//! Used by controllers to mint cache-busting strings and by models that need
//! short random identifiers. Keys are drawn uniformly from the union of the
//! requested character classes.

use rand::Rng;

/// Character classes a generated key may draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    Digits,
    LowerAlpha,
    UpperAlpha,
}

impl KeyClass {
    fn alphabet(self) -> &'static [u8] {
        match self {
            KeyClass::Digits => b"0123456789",
            KeyClass::LowerAlpha => b"abcdefghijklmnopqrstuvwxyz",
            KeyClass::UpperAlpha => b"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeyGenerator;

impl KeyGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate a key of `length` characters drawn from `classes`.
    ///
    /// An empty class list falls back to digits so callers always get a key
    /// of the requested length.
    pub fn generate_standard(&self, length: usize, classes: &[KeyClass]) -> String {
        let mut pool: Vec<u8> = Vec::new();
        for class in classes {
            pool.extend_from_slice(class.alphabet());
        }
        if pool.is_empty() {
            pool.extend_from_slice(KeyClass::Digits.alphabet());
        }

        let mut rng = rand::thread_rng();
        (0..length)
            .map(|_| pool[rng.gen_range(0..pool.len())] as char)
            .collect()
    }
}
