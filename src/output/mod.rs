//! Output: the generated-text renderer (stdout) and status lines (stderr).

pub mod terminal;

use std::io;

use colored::Colorize;

pub use terminal::TerminalRenderer;

/// Sink for generated text.
///
/// Implementations write in arrival order and never reorder or hold
/// back tokens.
pub trait OutputRenderer {
    /// Section heading such as "AI Review:".
    fn heading(&mut self, text: &str) -> io::Result<()>;

    /// One streamed fragment, flushed immediately.
    fn token(&mut self, token: &str) -> io::Result<()>;

    /// Visible boundary between two chunk reviews.
    fn chunk_delimiter(&mut self) -> io::Result<()>;

    /// A complete, non-streamed result printed in one piece.
    fn message(&mut self, text: &str) -> io::Result<()>;

    /// End of output.
    fn finish(&mut self) -> io::Result<()>;
}

/// Progress line on stderr.
pub fn info(msg: &str) {
    eprintln!("{}", msg.blue());
}

/// Positive progress line on stderr.
pub fn success(msg: &str) {
    eprintln!("{}", msg.green());
}

/// Soft-stop line on stderr, e.g. nothing to process.
pub fn notice(msg: &str) {
    eprintln!("{}", msg.yellow());
}
