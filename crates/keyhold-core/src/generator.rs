//! Random password generation.

use rand::Rng;

pub const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Which character classes to draw from, and how many characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub length: usize,
    pub letters: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: 16,
            letters: true,
            digits: true,
            symbols: true,
        }
    }
}

impl GeneratorOptions {
    /// Union of the enabled classes. Falls back to letters when none is.
    pub fn charset(&self) -> Vec<char> {
        let mut charset = String::new();
        if self.letters {
            charset.push_str(LETTERS);
        }
        if self.digits {
            charset.push_str(DIGITS);
        }
        if self.symbols {
            charset.push_str(SYMBOLS);
        }
        if charset.is_empty() {
            charset.push_str(LETTERS);
        }
        charset.chars().collect()
    }
}

/// Draw `options.length` characters uniformly from the charset.
pub fn generate(options: &GeneratorOptions) -> String {
    generate_with(options, &mut rand::thread_rng())
}

pub fn generate_with<R: Rng + ?Sized>(options: &GeneratorOptions, rng: &mut R) -> String {
    let charset = options.charset();
    (0..options.length)
        .map(|_| charset[rng.gen_range(0..charset.len())])
        .collect()
}

/// Rendering class of a generated character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Symbol,
    Digit,
    Normal,
}

pub fn classify(c: char) -> CharClass {
    if SYMBOLS.contains(c) {
        CharClass::Symbol
    } else if c.is_ascii_digit() {
        CharClass::Digit
    } else {
        CharClass::Normal
    }
}
