//! Generator for externally visible identifiers.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Mints the external ids handed out to clients.
#[derive(Clone, Debug)]
pub enum StringGenerator {
    /// Alphanumeric string of `len` characters from the thread-local CSPRNG.
    Random { len: usize },
    /// Always the same string. For tests.
    Fixed(String),
}

impl StringGenerator {
    pub const DEFAULT_LEN: usize = 20;

    pub fn generate(&self) -> String {
        match self {
            Self::Random { len } => rand::rng()
                .sample_iter(&Alphanumeric)
                .take(*len)
                .map(char::from)
                .collect(),
            Self::Fixed(s) => s.clone(),
        }
    }
}

impl Default for StringGenerator {
    fn default() -> Self {
        Self::Random { len: Self::DEFAULT_LEN }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_strings_have_requested_length() {
        let g = StringGenerator::default();
        let a = g.generate();
        let b = g.generate();
        assert_eq!(a.len(), StringGenerator::DEFAULT_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn fixed_repeats() {
        let g = StringGenerator::Fixed("superRandomString".into());
        assert_eq!(g.generate(), "superRandomString");
        assert_eq!(g.generate(), "superRandomString");
    }
}
