//! Tests for the chunking engine.

use super::helpers::char_len;
use super::strategies::chunk_text;
use super::types::{Chunk, ChunkConfig, ChunkConfigError};

fn config(max: usize, overlap: usize) -> ChunkConfig {
    ChunkConfig {
        max_chunk_chars: max,
        overlap_chars: overlap,
    }
}

/// Strip each chunk's overlap and glue the rest back together.
fn reassemble(chunks: &[Chunk]) -> String {
    chunks.iter().map(Chunk::fresh_text).collect()
}

fn assert_within_bound(chunks: &[Chunk], max: usize) {
    for chunk in chunks {
        assert!(
            char_len(&chunk.content) <= max,
            "chunk {} has {} chars (max {max})",
            chunk.index,
            char_len(&chunk.content)
        );
    }
}

// ── Basics ──────────────────────────────────────────────────────────

#[test]
fn empty_and_blank_text_produce_no_chunks() {
    assert!(chunk_text("", &ChunkConfig::default()).is_empty());
    assert!(chunk_text(" \n\n\t \n", &ChunkConfig::default()).is_empty());
}

#[test]
fn short_text_is_a_single_chunk() {
    let chunks = chunk_text("Hello world", &ChunkConfig::default());
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, "Hello world");
    assert_eq!(chunks[0].overlap_chars, 0);
    assert_eq!(chunks[0].char_offset, 0);
}

#[test]
fn repeated_sentences_split_into_several_bounded_chunks() {
    let text = "This is a test document. ".repeat(100);
    let chunks = chunk_text(&text, &ChunkConfig::default());
    assert!(chunks.len() > 1, "text splitting did not happen");
    assert_within_bound(&chunks, 1000);
    assert_eq!(reassemble(&chunks), text);
}

#[test]
fn indices_are_sequential() {
    let text = "word ".repeat(500);
    let chunks = chunk_text(&text, &config(100, 20));
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.index, i);
    }
}

// ── Boundaries ──────────────────────────────────────────────────────

#[test]
fn paragraph_breaks_are_preferred_cut_points() {
    let para = "x".repeat(40);
    let text = format!("{para}\n\n{para}\n\n{para}");
    let chunks = chunk_text(&text, &config(90, 0));
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].content, format!("{para}\n\n{para}\n\n"));
    assert_eq!(chunks[1].content, para);
}

#[test]
fn unbroken_text_falls_back_to_hard_cuts() {
    let text = "z".repeat(250);
    let chunks = chunk_text(&text, &config(100, 0));
    assert_eq!(chunks.len(), 3);
    assert_within_bound(&chunks, 100);
    assert_eq!(reassemble(&chunks), text);
}

#[test]
fn multibyte_text_is_measured_in_chars() {
    let text = "héllo wörld ".repeat(50);
    let chunks = chunk_text(&text, &config(64, 16));
    assert_within_bound(&chunks, 64);
    assert_eq!(reassemble(&chunks), text);
}

// ── Overlap ─────────────────────────────────────────────────────────

#[test]
fn adjacent_chunks_share_overlap_text() {
    let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa ".repeat(20);
    let chunks = chunk_text(&text, &config(120, 30));
    assert!(chunks.len() > 2);

    for pair in chunks.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        assert!(next.overlap_chars > 0 && next.overlap_chars <= 30);
        let overlap: String = next.content.chars().take(next.overlap_chars).collect();
        assert!(
            prev.content.ends_with(&overlap),
            "{overlap:?} is not a suffix of chunk {}",
            prev.index
        );
    }
}

#[test]
fn zero_overlap_produces_disjoint_chunks() {
    let text = "one two three four five six seven eight nine ten ".repeat(10);
    let chunks = chunk_text(&text, &config(50, 0));
    assert!(chunks.iter().all(|c| c.overlap_chars == 0));
    let joined: String = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(joined, text);
}

#[test]
fn char_offsets_point_into_the_source() {
    let text = "Lorem ipsum dolor sit amet. Consectetur adipiscing elit. ".repeat(30);
    let chunks = chunk_text(&text, &config(200, 50));
    let chars: Vec<char> = text.chars().collect();
    for chunk in &chunks {
        let len = char_len(&chunk.content);
        let slice: String = chars[chunk.char_offset..chunk.char_offset + len].iter().collect();
        assert_eq!(slice, chunk.content);
    }
}

#[test]
fn chunking_is_deterministic() {
    let text = "Some text. More text here! And a question? Yes.\n".repeat(40);
    let cfg = config(150, 40);
    assert_eq!(chunk_text(&text, &cfg), chunk_text(&text, &cfg));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn default_config_is_valid() {
    assert_eq!(ChunkConfig::default().validate(), Ok(()));
}

#[test]
fn invalid_configs_are_rejected() {
    assert_eq!(config(0, 0).validate(), Err(ChunkConfigError::ZeroMaxChunk));
    assert_eq!(
        config(100, 100).validate(),
        Err(ChunkConfigError::OverlapTooLarge { overlap: 100, max: 100 })
    );
}
