//! Token counting for the context budget.

use tiktoken_rs::{cl100k_base, CoreBPE};

/// Counts tokens the way the remote model will, or close enough to budget
/// by. Only the count is ever used; exact token ids do not matter.
pub trait Tokenizer: Send + Sync {
    fn encode(&self, text: &str) -> Vec<u32>;

    fn count(&self, text: &str) -> usize {
        self.encode(text).len()
    }
}

/// BPE tokenizer matching the gpt-3.5 model family.
pub struct BpeTokenizer {
    bpe: CoreBPE,
}

impl BpeTokenizer {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self { bpe: cl100k_base()? })
    }
}

impl Tokenizer for BpeTokenizer {
    fn encode(&self, text: &str) -> Vec<u32> {
        self.bpe
            .encode_with_special_tokens(text)
            .into_iter()
            .map(|id| id as u32)
            .collect()
    }
}

/// Character-count estimate, roughly four characters per token. Stands in
/// when the BPE data cannot be loaded and keeps tests deterministic.
pub struct HeuristicTokenizer {
    chars_per_token: usize,
}

impl HeuristicTokenizer {
    pub fn new() -> Self {
        Self { chars_per_token: 4 }
    }
}

impl Default for HeuristicTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for HeuristicTokenizer {
    fn encode(&self, text: &str) -> Vec<u32> {
        (0..self.count(text) as u32).collect()
    }

    fn count(&self, text: &str) -> usize {
        text.chars().count() / self.chars_per_token
    }
}
