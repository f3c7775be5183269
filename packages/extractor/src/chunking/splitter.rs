//! Text splitters.

use regex::Regex;
use std::sync::LazyLock;

use super::config::ChunkConfig;
use crate::error::Result;

/// Sentence: a run of text up to and including terminal punctuation and
/// the whitespace after it, or the remainder of the line.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SENTENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]*[.!?]+\s*|[^.!?]+$").expect("valid regex"));

/// Trait for splitting provision text into chunks.
///
/// Implementations decide what a token is and where windows break. An empty
/// or whitespace-only text yields no chunks.
pub trait TextSplitter {
    /// Split text into ordered chunks.
    fn split_text(&self, text: &str) -> Vec<String>;
}

/// Splits on sentence boundaries into overlapping windows of words.
///
/// A token is a whitespace-delimited word. Lines and sentences are packed
/// into a chunk until the next one would exceed the chunk size; the next
/// chunk starts with as many trailing sentences of the previous chunk as fit
/// in the overlap. Sentences longer than a chunk are cut into word windows.
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

/// A sentence or word window with its token count.
#[derive(Debug, Clone)]
struct Piece {
    text: String,
    tokens: usize,
}

impl SentenceSplitter {
    /// Create a splitter, validating the sizes.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        ChunkConfig::new(chunk_size, chunk_overlap).map(|config| Self::from_config(&config))
    }

    /// Create a splitter from an already validated configuration.
    #[must_use]
    pub fn from_config(config: &ChunkConfig) -> Self {
        Self {
            chunk_size: config.chunk_size(),
            chunk_overlap: config.chunk_overlap(),
        }
    }

    fn pieces(&self, text: &str) -> Vec<Piece> {
        let mut pieces: Vec<Piece> = Vec::new();

        for line in text.split_inclusive('\n') {
            for sentence in SENTENCE_PATTERN.find_iter(line).map(|m| m.as_str()) {
                let words: Vec<&str> = sentence.split_whitespace().collect();
                if words.is_empty() {
                    // Keep blank lines attached to the previous sentence
                    if let Some(last) = pieces.last_mut() {
                        last.text.push_str(sentence);
                    }
                    continue;
                }

                if words.len() <= self.chunk_size {
                    pieces.push(Piece {
                        text: sentence.to_string(),
                        tokens: words.len(),
                    });
                    continue;
                }

                for window in words.chunks(self.chunk_size) {
                    pieces.push(Piece {
                        text: format!("{} ", window.join(" ")),
                        tokens: window.len(),
                    });
                }
            }
        }

        pieces
    }

    /// Trailing pieces of a finished chunk that fit in the overlap.
    fn overlap_of(&self, pieces: &[Piece]) -> (Vec<Piece>, usize) {
        let mut kept = Vec::new();
        let mut tokens = 0;
        for piece in pieces.iter().rev() {
            if tokens + piece.tokens > self.chunk_overlap {
                break;
            }
            tokens += piece.tokens;
            kept.push(piece.clone());
        }
        kept.reverse();
        (kept, tokens)
    }
}

fn join(pieces: &[Piece]) -> String {
    pieces
        .iter()
        .map(|p| p.text.as_str())
        .collect::<String>()
        .trim()
        .to_string()
}

impl TextSplitter for SentenceSplitter {
    fn split_text(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current: Vec<Piece> = Vec::new();
        let mut current_tokens = 0;

        for piece in self.pieces(text) {
            if !current.is_empty() && current_tokens + piece.tokens > self.chunk_size {
                chunks.push(join(&current));

                let (mut kept, mut kept_tokens) = self.overlap_of(&current);
                while !kept.is_empty() && kept_tokens + piece.tokens > self.chunk_size {
                    kept_tokens -= kept.remove(0).tokens;
                }
                current = kept;
                current_tokens = kept_tokens;
            }
            current_tokens += piece.tokens;
            current.push(piece);
        }

        if !current.is_empty() {
            chunks.push(join(&current));
        }

        chunks
    }
}
