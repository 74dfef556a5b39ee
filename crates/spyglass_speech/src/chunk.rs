//! Text chunking for the synthesis endpoint's per-request length cap.

/// Longest text accepted per synthesis request, in characters.
pub const CHUNK_MAX_CHARS: usize = 200;

/// Split text into chunks of at most `max` characters, preferring
/// whitespace boundaries.
///
/// Words are packed greedily into chunks; a single word longer than `max`
/// is hard-split at the character level. Whitespace between words
/// collapses to a single space, and blank input yields no chunks.
///
/// # Examples
///
/// ```
/// use spyglass_speech::chunk_text;
///
/// let chunks = chunk_text("hello world", 200);
/// assert_eq!(chunks, vec!["hello world".to_string()]);
/// ```
pub fn chunk_text(text: &str, max: usize) -> Vec<String> {
    debug_assert!(max > 0);

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();

        if word_chars > max {
            // Oversized word: flush what we have and hard-split the word.
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_chars = 0;
            }
            let mut piece = String::new();
            let mut piece_chars = 0usize;
            for c in word.chars() {
                if piece_chars == max {
                    chunks.push(std::mem::take(&mut piece));
                    piece_chars = 0;
                }
                piece.push(c);
                piece_chars += 1;
            }
            if !piece.is_empty() {
                chunks.push(piece);
            }
            continue;
        }

        // +1 for the separating space
        let needed = if current.is_empty() {
            word_chars
        } else {
            current_chars + 1 + word_chars
        };

        if needed > max {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_chars = word_chars;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_chars = needed;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
