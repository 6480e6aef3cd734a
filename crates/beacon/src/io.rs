//! Program I/O: output, diagnostics and input streams

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use crate::error::EvalError;

/// The streams a running program talks to.
pub struct Io {
    out: Box<dyn Write>,
    err: Box<dyn Write>,
    input: Box<dyn BufRead>,
}

impl Default for Io {
    fn default() -> Self {
        Self {
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
            input: Box::new(io::BufReader::new(io::stdin())),
        }
    }
}

impl Io {
    /// Replace the program output stream.
    pub fn set_output(&mut self, out: impl Write + 'static) {
        self.out = Box::new(out);
    }

    /// Replace the diagnostics stream.
    pub fn set_diagnostics(&mut self, err: impl Write + 'static) {
        self.err = Box::new(err);
    }

    /// Replace the input stream.
    pub fn set_input(&mut self, input: impl BufRead + 'static) {
        self.input = Box::new(input);
    }

    /// Write text to program output without a newline.
    pub fn write(&mut self, text: &str) -> Result<(), EvalError> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    /// Write one line to program output.
    pub fn write_line(&mut self, text: &str) -> Result<(), EvalError> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }

    /// Write one line to the diagnostics stream.
    pub fn diagnostic(&mut self, text: &str) -> Result<(), EvalError> {
        writeln!(self.err, "{}", text)?;
        self.err.flush()?;
        Ok(())
    }

    /// Read one line without its line terminator. `None` at end of input.
    pub fn read_line(&mut self) -> Result<Option<String>, EvalError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

/// A cloneable in-memory sink.
///
/// Every clone writes into the same buffer, so a test can hand one clone
/// to the interpreter and read the other.
///
/// ```
/// use std::io::Write;
/// use beacon::CaptureBuffer;
///
/// let buffer = CaptureBuffer::new();
/// let mut writer = buffer.clone();
/// writer.write_all(b"hello").unwrap();
/// assert_eq!(buffer.contents(), "hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }

    /// Written text split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Discard everything written so far.
    pub fn clear(&self) {
        self.bytes.borrow_mut().clear();
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_line_strips_terminator() {
        let mut io = Io::default();
        io.set_input(io::Cursor::new("first\r\nsecond"));
        assert_eq!(io.read_line().unwrap(), Some("first".to_string()));
        assert_eq!(io.read_line().unwrap(), Some("second".to_string()));
        assert_eq!(io.read_line().unwrap(), None);
    }

    #[test]
    fn test_capture_buffer_shared_between_clones() {
        let buffer = CaptureBuffer::new();
        let mut io = Io::default();
        io.set_output(buffer.clone());
        io.write_line("a").unwrap();
        io.write("b").unwrap();
        assert_eq!(buffer.contents(), "a\nb");
        buffer.clear();
        assert_eq!(buffer.contents(), "");
    }
}
