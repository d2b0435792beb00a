//! Diagnostic sink for compile and execute messages.
//!
//! Messages accumulate during a run and are written out (and cleared) when
//! the sink is flushed.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

/// Severity level of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Note,
}

/// A single diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Severity level
    pub level: Level,

    /// Message text
    pub text: String,

    /// Document the message refers to
    pub document: Option<PathBuf>,
}

impl Message {
    pub fn new(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            document: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Level::Error, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Level::Warning, text)
    }

    pub fn note(text: impl Into<String>) -> Self {
        Self::new(Level::Note, text)
    }

    /// Attach the document this message refers to.
    pub fn with_document(mut self, document: impl Into<PathBuf>) -> Self {
        self.document = Some(document.into());
        self
    }

    /// Format the message for terminal display.
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        let level_str = match self.level {
            Level::Error => "\x1b[1;31merror\x1b[0m",
            Level::Warning => "\x1b[1;33mwarning\x1b[0m",
            Level::Note => "\x1b[1;36mnote\x1b[0m",
        };
        output.push_str(&format!("{level_str}: {}\n", self.text));

        if let Some(document) = &self.document {
            output.push_str(&format!(
                "  \x1b[1;34m-->\x1b[0m {}\n",
                document.display()
            ));
        }

        output
    }
}

/// Accumulator of messages produced during a run.
pub struct Diagnostic {
    messages: Vec<Message>,
    sink: Box<dyn Write + Send>,
}

impl Diagnostic {
    /// Create a sink that writes to stderr.
    pub fn new() -> Self {
        Self::with_sink(io::stderr())
    }

    /// Create a sink that writes to `sink`.
    pub fn with_sink(sink: impl Write + Send + 'static) -> Self {
        Self {
            messages: Vec::new(),
            sink: Box::new(sink),
        }
    }

    /// Record a message to be emitted on the next flush.
    pub fn print(&mut self, message: Message) {
        match message.level {
            Level::Error => tracing::debug!("diagnostic error: {}", message.text),
            Level::Warning | Level::Note => tracing::trace!("diagnostic: {}", message.text),
        }
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn error_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.level == Level::Error)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Write a headline followed by a blank line, ahead of the messages.
    pub fn announce(&mut self, headline: &str) -> io::Result<()> {
        writeln!(self.sink, "{headline}\n")?;
        self.sink.flush()
    }

    /// Emit all accumulated messages in order and clear them.
    pub fn flush(&mut self) -> io::Result<()> {
        for message in self.messages.drain(..) {
            self.sink.write_all(message.format_terminal().as_bytes())?;
        }
        self.sink.flush()
    }
}

impl Default for Diagnostic {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostic")
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}
