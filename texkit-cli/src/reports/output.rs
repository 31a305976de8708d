//! Rendering reports to a terminal-like writer.

use std::io::{self, Write};

/// Semantic sink for reports.
///
/// Reports say *what* to show, the implementation decides how it looks.
pub trait Output {
    /// A heading line, rendered as `name:`.
    fn heading(&mut self, name: &str);

    /// A `key: value` line.
    fn field(&mut self, key: &str, value: &str);

    /// An indented list entry with a one-character marker (`-`, `+`).
    fn entry(&mut self, marker: char, text: &str);

    /// A labelled block of verbatim text, such as a generated file.
    fn block(&mut self, label: &str, content: &str);

    /// A plain line.
    fn line(&mut self, text: &str);

    /// An empty line.
    fn blank(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Plain-text output to any writer, stdout by default.
///
/// Write errors don't interrupt rendering; the first one is kept and
/// returned by [`finish`](TerminalOutput::finish).
pub struct TerminalOutput<W: Write = io::Stdout> {
    writer: W,
    error: Option<io::Error>,
}

impl TerminalOutput {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Flush the writer and hand it back, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn emit(&mut self, text: std::fmt::Arguments<'_>) {
        if self.error.is_none() {
            if let Err(e) = writeln!(self.writer, "{}", text) {
                self.error = Some(e);
            }
        }
    }
}

impl<W: Write> Output for TerminalOutput<W> {
    fn heading(&mut self, name: &str) {
        self.emit(format_args!("{}:", name));
    }

    fn field(&mut self, key: &str, value: &str) {
        self.emit(format_args!("{}: {}", key, value));
    }

    fn entry(&mut self, marker: char, text: &str) {
        self.emit(format_args!("  {} {}", marker, text));
    }

    fn block(&mut self, label: &str, content: &str) {
        self.emit(format_args!("── {} ──", label));
        self.emit(format_args!("{}", content.trim_end()));
    }

    fn line(&mut self, text: &str) {
        self.emit(format_args!("{}", text));
    }

    fn blank(&mut self) {
        self.emit(format_args!(""));
    }
}

#[cfg(test)]
pub(crate) fn render_to_string(report: &dyn Report) -> String {
    let mut out = TerminalOutput::new(Vec::new());
    report.render(&mut out);
    String::from_utf8(out.finish().unwrap()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_markers() {
        let mut out = TerminalOutput::new(Vec::new());
        out.entry('+', "values.tex");
        out.entry('-', "handler");
        let text = String::from_utf8(out.finish().unwrap()).unwrap();
        assert_eq!(text, "  + values.tex\n  - handler\n");
    }

    #[test]
    fn test_first_error_is_kept() {
        let mut out = TerminalOutput::new(Broken);
        out.line("a");
        out.line("b");
        let err = out.finish().err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
