//! Word-aligned chunking of input text.
//!
//! The summarization model enforces a hard input limit, so long input is
//! split into word-bounded segments before it ever reaches the engine.
//! Words are never split mid-word: a single word longer than the budget
//! passes through as its own chunk, and any resulting model error surfaces
//! from the engine, not from here.

/// Maximum serialized character length of one chunk.
pub const CHUNK_BUDGET: usize = 1024;

/// Split `text` into word-aligned chunks of at most `budget` characters.
///
/// Words (maximal whitespace-separated runs) are packed greedily. The
/// running length charges one separator character per appended word,
/// including the first word of a chunk; when a word would overflow the
/// budget, the current chunk is closed and the word opens a fresh chunk
/// whose running length is the bare word length, with no separator charge.
/// The asymmetry between the two branches is intentional and determines
/// where packing boundaries fall.
///
/// Lengths count Unicode scalar values, not bytes. Empty or
/// whitespace-only input yields no chunks.
#[must_use]
pub fn chunk_text(text: &str, budget: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current_chunk: Vec<&str> = Vec::new();
    let mut current_length = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_length + word_len + 1 <= budget {
            current_chunk.push(word);
            current_length += word_len + 1;
        } else {
            if !current_chunk.is_empty() {
                chunks.push(current_chunk.join(" "));
            }
            current_chunk = vec![word];
            current_length = word_len;
        }
    }

    if !current_chunk.is_empty() {
        chunks.push(current_chunk.join(" "));
    }

    chunks
}
