//! Text splitting utilities used by the chunking strategy.
//!
//! Every helper returns slices of its input, in order, with separators kept
//! on the preceding piece, so the pieces always concatenate back to the input.

/// Length in chars.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Separator levels, tried in order until a piece fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Paragraph,
    Line,
    Sentence,
    Word,
    Char,
}

impl Level {
    fn next(self) -> Self {
        match self {
            Level::Paragraph => Level::Line,
            Level::Line => Level::Sentence,
            Level::Sentence => Level::Word,
            Level::Word | Level::Char => Level::Char,
        }
    }
}

/// Split `text` at sentence boundaries (`. `, `! `, `? ` followed by uppercase
/// or newline). The trailing space stays with the sentence it ends.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;

    let mut i = 0;
    while i + 1 < bytes.len() {
        let is_terminal = bytes[i] == b'.' || bytes[i] == b'!' || bytes[i] == b'?';
        if is_terminal && bytes[i + 1] == b' ' {
            // end-of-string acts like newline
            let after_space = bytes.get(i + 2).copied().unwrap_or(b'\n');
            if after_space.is_ascii_uppercase() || after_space == b'\n' {
                let end = i + 2;
                sentences.push(&text[start..end]);
                start = end;
                i = end;
                continue;
            }
        }
        i += 1;
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// Cut `text` into windows of at most `max_chars` chars, on char boundaries.
pub(crate) fn hard_cut(text: &str, max_chars: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let end = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(end);
        pieces.push(head);
        rest = tail;
    }
    pieces
}

fn split_at_level(text: &str, level: Level, max_chars: usize) -> Vec<&str> {
    match level {
        Level::Paragraph => text.split_inclusive("\n\n").collect(),
        Level::Line => text.split_inclusive('\n').collect(),
        Level::Sentence => split_sentences(text),
        Level::Word => text.split_inclusive(' ').collect(),
        Level::Char => hard_cut(text, max_chars),
    }
}

/// Split `text` into pieces of at most `max_chars` chars, preferring
/// paragraph, then line, then sentence, then word boundaries before falling
/// back to hard character cuts.
pub(crate) fn split_to_fit(text: &str, max_chars: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    split_recursive(text, max_chars, Level::Paragraph, &mut pieces);
    pieces
}

fn split_recursive<'a>(text: &'a str, max_chars: usize, level: Level, out: &mut Vec<&'a str>) {
    if text.is_empty() {
        return;
    }
    if char_len(text) <= max_chars {
        out.push(text);
        return;
    }
    for piece in split_at_level(text, level, max_chars) {
        split_recursive(piece, max_chars, level.next(), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentences_keep_their_trailing_space() {
        let parts = split_sentences("One. Two! three. Four?");
        assert_eq!(parts, vec!["One. ", "Two! three. ", "Four?"]);
    }

    #[test]
    fn hard_cut_respects_multibyte_chars() {
        let parts = hard_cut("ééééé", 2);
        assert_eq!(parts, vec!["éé", "éé", "é"]);
    }

    #[test]
    fn split_prefers_paragraphs() {
        let text = "aaaa\n\nbbbb\n\ncccc";
        let parts = split_to_fit(text, 8);
        assert_eq!(parts, vec!["aaaa\n\n", "bbbb\n\n", "cccc"]);
    }

    #[test]
    fn split_descends_to_words_then_chars() {
        let text = "tiny enormouslylongword";
        let parts = split_to_fit(text, 6);
        assert!(parts.iter().all(|p| char_len(p) <= 6), "{parts:?}");
        assert_eq!(parts.concat(), text);
        assert_eq!(parts[0], "tiny ");
    }
}
