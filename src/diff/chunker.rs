//! Recursive separator-based text splitter.
//!
//! Splits a text body into overlapping chunks that fit a size budget,
//! preferring the most natural boundary available: paragraph breaks,
//! then line breaks, then spaces, then arbitrary characters.
//!
//! All sizes and offsets are counted in characters (Unicode scalar
//! values), never bytes, so multi-byte text is never cut mid-character.
//!
//! Separators stay attached to the end of the piece they terminate, so
//! no whitespace is lost: dropping the first `chunk_overlap` characters
//! of every chunk but the first and concatenating the rest reproduces
//! the input exactly.

use thiserror::Error;

/// Separator preference order. The empty string splits between any two
/// characters and always terminates the recursion.
pub const DEFAULT_SEPARATORS: &[&str] = &["\n\n", "\n", " ", ""];

/// Errors from splitter construction.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChunkError {
    #[error("chunk overlap ({overlap}) must be smaller than chunk size ({size})")]
    InvalidOverlap { size: usize, overlap: usize },
}

/// One excerpt of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Zero-based position in the chunk sequence.
    pub index: usize,
    pub content: String,
    /// Character offset of `content` within the body.
    pub start_offset: usize,
    /// Length of `content` in characters.
    pub length: usize,
}

impl Chunk {
    /// Whether the chunk carries nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// End byte offset of an atomic piece plus its character count.
#[derive(Debug, Clone, Copy)]
struct Span {
    end: usize,
    chars: usize,
}

/// Splitter configured with a size budget and overlap.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl TextSplitter {
    /// Create a splitter. Fails unless `chunk_overlap < chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, ChunkError> {
        if chunk_overlap >= chunk_size {
            return Err(ChunkError::InvalidOverlap {
                size: chunk_size,
                overlap: chunk_overlap,
            });
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Replace the separator preference list.
    ///
    /// The empty separator is appended when missing so splitting can
    /// always fall back to single characters.
    pub fn with_separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seps: Vec<String> = separators.into_iter().map(Into::into).collect();
        seps.retain(|s| !s.is_empty());
        seps.push(String::new());
        self.separators = seps;
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Split `body` into ordered, overlapping chunks.
    ///
    /// An empty body yields no chunks. A body that already fits yields a
    /// single chunk with no overlap applied.
    pub fn split(&self, body: &str) -> Vec<Chunk> {
        if body.is_empty() {
            return Vec::new();
        }

        let total_chars = body.chars().count();
        if total_chars <= self.chunk_size {
            return vec![Chunk {
                index: 0,
                content: body.to_string(),
                start_offset: 0,
                length: total_chars,
            }];
        }

        // Every piece must fit next to an overlap seed.
        let budget = self.chunk_size - self.chunk_overlap;
        let separators: Vec<&str> = self.separators.iter().map(String::as_str).collect();
        let mut spans = Vec::new();
        atomize(body, 0, body.len(), &separators, budget, &mut spans);

        self.pack(body, &spans)
    }

    /// Greedily fill chunks with consecutive pieces, seeding each new
    /// chunk with the trailing `chunk_overlap` characters of the last.
    fn pack(&self, body: &str, spans: &[Span]) -> Vec<Chunk> {
        let mut chunks = Vec::new();

        let mut buf_start = 0usize;
        let mut buf_end = 0usize;
        let mut buf_chars = 0usize;
        let mut buf_start_char = 0usize;
        let mut end_char = 0usize;
        let mut has_new = false;

        for span in spans {
            if has_new && buf_chars + span.chars > self.chunk_size {
                chunks.push(Chunk {
                    index: chunks.len(),
                    content: body[buf_start..buf_end].to_string(),
                    start_offset: buf_start_char,
                    length: buf_chars,
                });

                // buf_chars > chunk_overlap here because span.chars <= budget
                buf_start += tail_start(&body[buf_start..buf_end], self.chunk_overlap);
                buf_chars = self.chunk_overlap;
                buf_start_char = end_char - self.chunk_overlap;
            }

            buf_end = span.end;
            buf_chars += span.chars;
            end_char += span.chars;
            has_new = true;
        }

        if has_new {
            chunks.push(Chunk {
                index: chunks.len(),
                content: body[buf_start..buf_end].to_string(),
                start_offset: buf_start_char,
                length: buf_chars,
            });
        }

        chunks
    }
}

/// Split `body` with the default separators.
pub fn split(body: &str, chunk_size: usize, chunk_overlap: usize) -> Result<Vec<Chunk>, ChunkError> {
    Ok(TextSplitter::new(chunk_size, chunk_overlap)?.split(body))
}

/// Break `body[start..end]` into contiguous pieces of at most `budget`
/// characters, using the first separator in `separators` that occurs
/// and recursing into oversized pieces with the remaining ones.
fn atomize(
    body: &str,
    start: usize,
    end: usize,
    separators: &[&str],
    budget: usize,
    out: &mut Vec<Span>,
) {
    let text = &body[start..end];
    let chars = text.chars().count();
    if chars <= budget {
        out.push(Span { end, chars });
        return;
    }

    let Some(pos) = separators
        .iter()
        .position(|sep| sep.is_empty() || text.contains(sep))
    else {
        // Only reachable when the list lacks a terminal "": fall back to characters.
        push_chars(text, start, out);
        return;
    };

    let separator = separators[pos];
    if separator.is_empty() {
        push_chars(text, start, out);
        return;
    }

    let rest = &separators[pos + 1..];
    let mut piece_start = start;
    for (offset, _) in text.match_indices(separator) {
        let piece_end = start + offset + separator.len();
        atomize(body, piece_start, piece_end, rest, budget, out);
        piece_start = piece_end;
    }
    if piece_start < end {
        atomize(body, piece_start, end, rest, budget, out);
    }
}

fn push_chars(text: &str, start: usize, out: &mut Vec<Span>) {
    for (offset, ch) in text.char_indices() {
        out.push(Span {
            end: start + offset + ch.len_utf8(),
            chars: 1,
        });
    }
}

/// Byte offset within `text` where its last `count` characters begin.
fn tail_start(text: &str, count: usize) -> usize {
    if count == 0 {
        return text.len();
    }
    text.char_indices()
        .rev()
        .nth(count - 1)
        .map(|(i, _)| i)
        .unwrap_or(0)
}
