//! Longest-match lookup over substitution keys

use std::collections::HashMap;

#[derive(Debug, Default)]
struct Node {
    children: HashMap<char, usize>,
    output: Option<&'static str>,
}

/// Character trie mapping script sequences to their replacement
///
/// Nodes live in one `Vec`; node 0 is the root.
#[derive(Debug)]
pub struct SubstitutionTrie {
    nodes: Vec<Node>,
}

impl Default for SubstitutionTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl SubstitutionTrie {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Build from `(key, replacement)` pairs; a repeated key keeps the last
    /// replacement
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, &'static str)>,
    {
        let mut trie = Self::new();
        for (key, replacement) in entries {
            trie.insert(key, replacement);
        }
        trie
    }

    /// Add or overwrite a key. Empty keys are ignored.
    pub fn insert(&mut self, key: &str, replacement: &'static str) {
        if key.is_empty() {
            return;
        }

        let mut node_idx = 0;
        for c in key.chars() {
            node_idx = match self.nodes[node_idx].children.get(&c) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node_idx].children.insert(c, next);
                    next
                }
            };
        }
        self.nodes[node_idx].output = Some(replacement);
    }

    /// Longest key that starts at `text[start]`
    ///
    /// Returns the key length in characters and its replacement.
    pub fn longest_match(&self, text: &[char], start: usize) -> Option<(usize, &'static str)> {
        let mut node_idx = 0;
        let mut best = None;

        for (len, c) in text.iter().skip(start).enumerate() {
            match self.nodes[node_idx].children.get(c) {
                Some(&next) => node_idx = next,
                None => break,
            }
            if let Some(output) = self.nodes[node_idx].output {
                best = Some((len + 1, output));
            }
        }

        best
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.output.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
