//! Terminal renderer: streamed review text with chunk delimiters.

use std::io::{self, IsTerminal, Write};

use colored::Colorize;

use crate::output::OutputRenderer;

/// Line written between two chunk reviews.
pub const CHUNK_DELIMITER: &str = "---";

/// Renderer writing plain generated text to any `Write`.
///
/// Headings are colored only when `color` is set, so piped output stays
/// free of escape codes.
pub struct TerminalRenderer<W: Write> {
    writer: W,
    color: bool,
}

impl TerminalRenderer<io::Stdout> {
    /// Renderer on stdout, colored when stdout is a terminal.
    pub fn stdout() -> Self {
        let stdout = io::stdout();
        let color = stdout.is_terminal();
        Self::new(stdout, color)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(writer: W, color: bool) -> Self {
        Self { writer, color }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputRenderer for TerminalRenderer<W> {
    fn heading(&mut self, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.writer, "{}", text.green().bold())?;
        } else {
            writeln!(self.writer, "{text}")?;
        }
        self.writer.flush()
    }

    fn token(&mut self, token: &str) -> io::Result<()> {
        self.writer.write_all(token.as_bytes())?;
        self.writer.flush()
    }

    fn chunk_delimiter(&mut self) -> io::Result<()> {
        write!(self.writer, "\n\n{CHUNK_DELIMITER}\n\n")?;
        self.writer.flush()
    }

    fn message(&mut self, text: &str) -> io::Result<()> {
        write!(self.writer, "\n{}\n\n", text.trim())?;
        self.writer.flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        writeln!(self.writer)?;
        self.writer.flush()
    }
}
