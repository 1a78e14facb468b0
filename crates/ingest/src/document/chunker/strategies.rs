//! Merge split pieces into bounded, overlapping chunks.

use std::collections::VecDeque;

use super::helpers::{char_len, split_to_fit};
use super::types::{Chunk, ChunkConfig};

/// Chunk `text` into pieces of at most `config.max_chunk_chars` chars.
///
/// Each chunk after the first starts with up to `config.overlap_chars` chars
/// of whole pieces taken from the end of the previous chunk. Stripping that
/// overlap from every chunk and concatenating gives back `text` exactly.
/// Whitespace-only input yields no chunks.
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Vec<Chunk> {
    if text.trim().is_empty() || config.max_chunk_chars == 0 {
        return Vec::new();
    }

    let pieces = split_to_fit(text, config.max_chunk_chars);
    merge_with_overlap(&pieces, config)
}

/// Greedy merge. `window` holds the pieces of the chunk being built; the
/// first `carried` of them were already emitted as part of the previous chunk.
fn merge_with_overlap(pieces: &[&str], config: &ChunkConfig) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut window: VecDeque<(&str, usize)> = VecDeque::new();
    let mut window_len = 0usize;
    let mut carried = 0usize;
    // Chars of the input covered by the fresh parts of emitted chunks.
    let mut consumed = 0usize;

    for &piece in pieces {
        let len = char_len(piece);

        if window_len + len > config.max_chunk_chars && window.len() > carried {
            consumed += emit(&mut chunks, &window, carried, consumed);

            carried = window.len();
            while window_len > config.overlap_chars {
                if let Some((_, dropped)) = window.pop_front() {
                    window_len -= dropped;
                    carried -= 1;
                }
            }
        }

        // Only carried pieces can be left here; shed them until the new one fits.
        while window_len + len > config.max_chunk_chars {
            match window.pop_front() {
                Some((_, dropped)) => {
                    window_len -= dropped;
                    carried -= 1;
                }
                None => break,
            }
        }

        window.push_back((piece, len));
        window_len += len;
    }

    if window.len() > carried {
        emit(&mut chunks, &window, carried, consumed);
    }

    chunks
}

/// Push the window as a chunk and return how many fresh chars it added.
fn emit(
    chunks: &mut Vec<Chunk>,
    window: &VecDeque<(&str, usize)>,
    carried: usize,
    consumed: usize,
) -> usize {
    let overlap_chars: usize = window.iter().take(carried).map(|(_, len)| len).sum();
    let fresh_chars: usize = window.iter().skip(carried).map(|(_, len)| len).sum();
    let content: String = window.iter().map(|(piece, _)| *piece).collect();

    chunks.push(Chunk {
        index: chunks.len(),
        content,
        char_offset: consumed - overlap_chars,
        overlap_chars,
    });
    fresh_chars
}
