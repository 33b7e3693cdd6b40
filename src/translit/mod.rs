//! Southern Uzbek Arabic script -> Latin transliteration
//!
//! Static substitution tables compiled once into a character trie and
//! applied greedily, longest match first.
//!
//! ```
//! use lutfiy::translit::transliterate;
//! assert_eq!(transliterate("کتاب"), "ktab");
//! assert_eq!(transliterate("نگ"), "ng");
//! ```

mod converter;
pub mod table;
mod trie;

pub use converter::{transliterate, transliterate_word, Transliterator};
pub use trie::SubstitutionTrie;
