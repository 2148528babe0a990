//! Document chunking.
//!
//! This module provides the [`TextSplitter`] trait and its
//! [`RecursiveSplitter`] implementation, which splits text on a priority
//! list of natural separators (paragraphs, lines, sentences, whitespace)
//! and falls back to a hard character cut when no natural split point
//! fits. Splitting is deterministic: identical input and parameters
//! always produce identical chunks.

use crate::config::RagConfig;
use crate::document::{Chunk, Document};
use crate::error::{RagError, Result};

/// Separator priority used by [`RecursiveSplitter`], coarsest first.
const SEPARATORS: [&str; 6] = ["\n\n", "\n", ". ", "! ", "? ", " "];

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s with text and metadata but no
/// embeddings. Embeddings are attached later by the [`Index`](crate::Index).
pub trait TextSplitter: Send + Sync {
    /// Split a document into ordered chunks.
    ///
    /// Returns an empty `Vec` if the document has empty text. Each
    /// returned chunk has an empty embedding vector.
    fn split(&self, document: &Document) -> Vec<Chunk>;
}

/// Splits text recursively by natural separators, stitching consecutive
/// chunks together with a fixed character overlap.
///
/// Each produced chunk is at most `chunk_size` characters long, and every
/// chunk after the first starts with the last `chunk_overlap` characters
/// of its predecessor. Lengths are counted in characters, not bytes, so
/// multi-byte input never splits mid-codepoint.
///
/// # Example
///
/// ```rust,ignore
/// use ragline::RecursiveSplitter;
///
/// let splitter = RecursiveSplitter::new(512, 100)?;
/// let chunks = splitter.split(&document);
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveSplitter {
    /// Create a new `RecursiveSplitter`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Validation`] if `chunk_size` is zero or
    /// `chunk_overlap >= chunk_size`. Parameters are rejected here, at
    /// construction, never at call time.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RagError::Validation("chunk_size must be greater than zero".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(RagError::Validation(format!(
                "chunk_overlap ({chunk_overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self { chunk_size, chunk_overlap })
    }

    /// Create a splitter from a validated [`RagConfig`].
    pub fn from_config(config: &RagConfig) -> Result<Self> {
        Self::new(config.chunk_size, config.chunk_overlap)
    }
}

impl TextSplitter for RecursiveSplitter {
    fn split(&self, document: &Document) -> Vec<Chunk> {
        let text = document.text.as_str();
        if text.is_empty() {
            return Vec::new();
        }

        // A document that already fits is returned whole. Otherwise split
        // into bodies short enough that prefixing the overlap still keeps
        // every chunk within chunk_size.
        let bodies = if char_len(text) <= self.chunk_size {
            vec![text.to_string()]
        } else {
            let max_body = self.chunk_size - self.chunk_overlap;
            split_to_fit(text, max_body, &SEPARATORS)
        };

        let mut chunks = Vec::with_capacity(bodies.len());
        let mut previous: Option<String> = None;

        for (ordinal, body) in bodies.into_iter().enumerate() {
            let chunk_text = match &previous {
                Some(prev) if self.chunk_overlap > 0 => {
                    let mut stitched =
                        String::with_capacity(self.chunk_overlap + body.len());
                    stitched.push_str(char_tail(prev, self.chunk_overlap));
                    stitched.push_str(&body);
                    stitched
                }
                _ => body,
            };

            let mut metadata = document.metadata.clone();
            metadata.insert("source_label".to_string(), document.source_label.clone());

            chunks.push(Chunk {
                id: format!("{}_{ordinal}", document.id),
                text: chunk_text.clone(),
                ordinal,
                document_id: document.id.clone(),
                embedding: Vec::new(),
                metadata,
            });

            previous = Some(chunk_text);
        }

        chunks
    }
}

/// Split `text` into pieces of at most `max_len` characters, preferring
/// the given separators in order and hard-cutting when none remain.
///
/// Separators stay attached to the end of the segment they terminate, so
/// concatenating the returned pieces reproduces `text` exactly.
fn split_to_fit(text: &str, max_len: usize, separators: &[&str]) -> Vec<String> {
    if char_len(text) <= max_len {
        return if text.is_empty() { Vec::new() } else { vec![text.to_string()] };
    }

    let Some((separator, remaining)) = separators.split_first() else {
        return hard_cut(text, max_len);
    };

    let mut pieces: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for segment in text.split_inclusive(*separator) {
        let segment_len = char_len(segment);
        if segment_len > max_len {
            // A single segment too large for this level is split with the
            // next, finer separator.
            if !current.is_empty() {
                pieces.push(std::mem::take(&mut current));
                current_len = 0;
            }
            pieces.extend(split_to_fit(segment, max_len, remaining));
        } else if current_len + segment_len <= max_len {
            current.push_str(segment);
            current_len += segment_len;
        } else {
            pieces.push(std::mem::take(&mut current));
            current.push_str(segment);
            current_len = segment_len;
        }
    }

    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
}

/// Cut text into pieces of exactly `max_len` characters (the last piece
/// may be shorter).
fn hard_cut(text: &str, max_len: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(max_len).map(|piece| piece.iter().collect()).collect()
}

/// Number of characters in `text`.
fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// The last `n` characters of `text`, or all of it when shorter.
fn char_tail(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    let total = char_len(text);
    if total <= n {
        return text;
    }
    match text.char_indices().nth(total - n) {
        Some((index, _)) => &text[index..],
        None => text,
    }
}
