use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::generator::text::Token;

/// Starter vocabulary: the shortest, most frequent words.
pub const BEGINNER_WORDS: &[&str] = &["a", "in", "not", "on", "as", "it", "is", "the"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordOrder {
    /// Walk the vocabulary in order, wrapping around.
    Cycle,
    /// Reshuffle the vocabulary on every pass.
    Shuffled { seed: u64 },
}

pub struct Vocabulary {
    words: Vec<&'static str>,
}

impl Vocabulary {
    pub fn beginner() -> Self {
        Self::new(BEGINNER_WORDS.to_vec())
    }

    pub fn new(words: Vec<&'static str>) -> Self {
        Self { words }
    }

    /// Pick `word_count` words, repeating the vocabulary as needed.
    pub fn pick(&self, word_count: usize, order: WordOrder) -> Vec<&'static str> {
        if self.words.is_empty() {
            return Vec::new();
        }

        match order {
            WordOrder::Cycle => (0..word_count)
                .map(|i| self.words[i % self.words.len()])
                .collect(),
            WordOrder::Shuffled { seed } => {
                let mut rng = SmallRng::seed_from_u64(seed);
                let mut picked = Vec::with_capacity(word_count);
                let mut pass = self.words.clone();
                while picked.len() < word_count {
                    pass.shuffle(&mut rng);
                    let take = (word_count - picked.len()).min(pass.len());
                    picked.extend_from_slice(&pass[..take]);
                }
                picked
            }
        }
    }

    pub fn generate(&self, word_count: usize, order: WordOrder) -> String {
        self.pick(word_count, order).join(" ")
    }

    /// Practice tokens: words separated by space tokens, no trailing space.
    pub fn build_tokens(&self, word_count: usize, order: WordOrder) -> Vec<Token> {
        let words = self.pick(word_count, order);
        let mut tokens = Vec::new();
        for (i, word) in words.iter().enumerate() {
            tokens.extend(word.chars().map(Token::char));
            if i + 1 < words.len() {
                tokens.push(Token::space());
            }
        }
        tokens
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::beginner()
    }
}
