use tracing::debug;

/// A contiguous slice of the normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Sequential chunk index (1-based)
    pub index: usize,

    /// Chunk text
    pub text: String,
}

impl Chunk {
    /// Creates a new chunk.
    #[must_use]
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Returns the length in characters.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Collapses every whitespace run into a single space and trims both ends.
///
/// Besides Unicode whitespace, the ASCII information separators
/// (U+001C..=U+001F) also count as whitespace. Line structure is not
/// preserved.
///
/// ```
/// assert_eq!(bundle_split::normalize("Hello\n\nWorld   !"), "Hello World !");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split(is_separator).filter(|w| !w.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Splits text into fixed-size character windows.
#[derive(Debug, Clone, Copy)]
pub struct Splitter {
    max_chars: usize,
}

impl Splitter {
    /// Creates a splitter producing chunks of at most `max_chars` characters.
    ///
    /// A zero limit is treated as one; configuration rejects zero before
    /// reaching here.
    #[must_use]
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars: max_chars.max(1),
        }
    }

    /// Partitions `text` into consecutive chunks.
    ///
    /// Every chunk but the last holds exactly `max_chars` characters, and the
    /// chunks concatenated in order reproduce `text`. Boundaries fall on
    /// character boundaries, never inside a multi-byte sequence.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut count = 0;

        for (offset, _) in text.char_indices() {
            if count == self.max_chars {
                chunks.push(Chunk::new(chunks.len() + 1, &text[start..offset]));
                start = offset;
                count = 0;
            }
            count += 1;
        }

        if start < text.len() {
            chunks.push(Chunk::new(chunks.len() + 1, &text[start..]));
        }

        debug!(
            "Created {} chunks from {} bytes (max {} chars)",
            chunks.len(),
            text.len(),
            self.max_chars
        );

        chunks
    }
}
