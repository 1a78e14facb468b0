//! Chunk configuration and output types.

use thiserror::Error;

// ── Configuration ───────────────────────────────────────────────────────────

/// Maximum characters per chunk used by the upload path.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 1000;
/// Characters repeated between adjacent chunks used by the upload path.
pub const DEFAULT_OVERLAP_CHARS: usize = 200;

/// Configuration for the chunking engine. Lengths count `char`s, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Hard upper bound on a chunk's length (default: 1000).
    pub max_chunk_chars: usize,
    /// Upper bound on the text carried over from the previous chunk (default: 200).
    pub overlap_chars: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            overlap_chars: DEFAULT_OVERLAP_CHARS,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkConfigError {
    #[error("max_chunk_chars must be greater than zero")]
    ZeroMaxChunk,
    #[error("overlap_chars ({overlap}) must be smaller than max_chunk_chars ({max})")]
    OverlapTooLarge { overlap: usize, max: usize },
}

impl ChunkConfig {
    pub fn validate(&self) -> Result<(), ChunkConfigError> {
        if self.max_chunk_chars == 0 {
            return Err(ChunkConfigError::ZeroMaxChunk);
        }
        if self.overlap_chars >= self.max_chunk_chars {
            return Err(ChunkConfigError::OverlapTooLarge {
                overlap: self.overlap_chars,
                max: self.max_chunk_chars,
            });
        }
        Ok(())
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A chunk of text with enough metadata to map it back onto the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 0-based index within the document.
    pub index: usize,
    /// The chunk text, including any leading overlap.
    pub content: String,
    /// Character offset of `content` in the original text.
    pub char_offset: usize,
    /// Length in chars of the leading text repeated from the previous chunk.
    pub overlap_chars: usize,
}

impl Chunk {
    /// The part of the chunk not already present in the previous one.
    pub fn fresh_text(&self) -> &str {
        match self.content.char_indices().nth(self.overlap_chars) {
            Some((byte, _)) => &self.content[byte..],
            None => "",
        }
    }
}
