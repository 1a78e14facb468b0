//! Character-bounded text chunking.
//!
//! Splits extracted document text into overlapping chunks small enough to be
//! pasted into an LLM prompt, cutting at paragraph, line, sentence and word
//! boundaries before resorting to hard character cuts.

mod helpers;
mod strategies;
mod types;

pub use strategies::chunk_text;
pub use types::{
    Chunk, ChunkConfig, ChunkConfigError, DEFAULT_MAX_CHUNK_CHARS, DEFAULT_OVERLAP_CHARS,
};

#[cfg(test)]
mod tests;
