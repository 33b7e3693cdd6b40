//! Arabic script -> Latin converter

use lazy_static::lazy_static;

use super::table;
use super::trie::SubstitutionTrie;

lazy_static! {
    static ref DEFAULT: Transliterator = Transliterator::new();
}

/// Greedy longest-match transliterator
#[derive(Debug)]
pub struct Transliterator {
    trie: SubstitutionTrie,
}

impl Default for Transliterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Transliterator {
    /// Transliterator over the built-in Southern Uzbek tables
    pub fn new() -> Self {
        Self::from_entries(table::entries())
    }

    /// Transliterator over a custom table
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, &'static str)>,
    {
        Self {
            trie: SubstitutionTrie::from_entries(entries),
        }
    }

    /// Replace the longest matching key at each position
    /// Characters that start no key are copied unchanged
    pub fn transliterate(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut result = String::with_capacity(text.len());
        let mut i = 0;

        while i < chars.len() {
            match self.trie.longest_match(&chars, i) {
                Some((len, latin)) => {
                    result.push_str(latin);
                    i += len;
                }
                None => {
                    result.push(chars[i]);
                    i += 1;
                }
            }
        }

        result
    }

    /// Transliterate a word and drop anything that does not print
    /// (control and format characters such as ZWNJ, non-space whitespace)
    pub fn transliterate_word(&self, word: &str) -> String {
        self.transliterate(word)
            .chars()
            .filter(|&c| is_printable(c))
            .collect()
    }
}

/// Transliterate with the built-in tables
pub fn transliterate(text: &str) -> String {
    DEFAULT.transliterate(text)
}

/// Transliterate a single word with the built-in tables, dropping
/// non-printing characters
pub fn transliterate_word(word: &str) -> String {
    DEFAULT.transliterate_word(word)
}

fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !matches!(
        c,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
    )
}
