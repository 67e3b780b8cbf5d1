//! I/O boundary traits for testability
//!
//! The editor talks to the terminal only through [`Console`], allowing the
//! session to be driven by scripted input in tests.

use std::io::{self, BufRead, Write};

use colored::Colorize;

/// Line-oriented terminal abstraction.
pub trait Console {
    /// Show `prompt` and read one line of input.
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Write one line of output.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        (**self).read_line(prompt)
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Console backed by any reader/writer pair, stdin/stdout by default.
#[derive(Debug)]
pub struct StdConsole<R, W> {
    input: R,
    output: W,
}

impl StdConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{} ", prompt.cyan())?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_console_reads_lines_until_eof() {
        let input = io::Cursor::new("first\nsecond\n");
        let mut out = Vec::new();
        let mut console = StdConsole::new(input, &mut out);

        assert_eq!(console.read_line(">").unwrap().as_deref(), Some("first\n"));
        assert_eq!(console.read_line(">").unwrap().as_deref(), Some("second\n"));
        assert_eq!(console.read_line(">").unwrap(), None);
    }

    #[test]
    fn test_std_console_writes_lines() {
        let mut out = Vec::new();
        {
            let mut console = StdConsole::new(io::Cursor::new(""), &mut out);
            console.write_line("hello").unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap(), "hello\n");
    }
}
