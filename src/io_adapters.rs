use crate::error::ReadError;
use crate::line_source::LineSource;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::{Result as IoResult, Write};
use std::rc::Rc;

/// Memory-backed writer for capturing shell output.
#[derive(Debug, Default)]
pub struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    /// A writer plus a handle for reading what it captured after it was moved away.
    pub fn with_handle() -> (Self, Rc<RefCell<Vec<u8>>>) {
        let writer = MemWriter::default();
        let handle = Rc::clone(&writer.buf);
        (writer, handle)
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

/// Decode everything captured so far.
pub fn captured(buf: &Rc<RefCell<Vec<u8>>>) -> String {
    String::from_utf8_lossy(&buf.borrow()).into_owned()
}

/// [`LineSource`] replaying a fixed sequence of lines and read errors.
///
/// Once the queue is drained every read reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    queue: VecDeque<Result<String, ReadError>>,
    closed: Rc<Cell<bool>>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: lines.into_iter().map(|line| Ok(line.into())).collect(),
            closed: Rc::new(Cell::new(false)),
        }
    }

    pub fn push_line(mut self, line: impl Into<String>) -> Self {
        self.queue.push_back(Ok(line.into()));
        self
    }

    pub fn push_error(mut self, err: ReadError) -> Self {
        self.queue.push_back(Err(err));
        self
    }

    /// Flag flipped once [`LineSource::close`] has been called.
    pub fn closed_handle(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.closed)
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> Result<String, ReadError> {
        self.queue.pop_front().unwrap_or(Err(ReadError::Eof))
    }

    fn close(&mut self) -> anyhow::Result<()> {
        self.closed.set(true);
        Ok(())
    }
}
