//! Line-oriented transport over a reader and a writer.
//!
//! Each request is written as one line of bits; the reply is the next line
//! read back.

use std::io::{self, BufRead, Write};

use gx_eval::{Transport, TransportError};

pub struct StdioTransport<R, W> {
    reader: R,
    writer: W,
}

impl StdioTransport<io::StdinLock<'static>, io::Stdout> {
    /// Requests on stdout, replies on stdin.
    pub fn stdio() -> Self {
        StdioTransport::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdioTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        StdioTransport { reader, writer }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: BufRead, W: Write> Transport for StdioTransport<R, W> {
    fn send_bits(&mut self, bits: &str) -> Result<String, TransportError> {
        writeln!(self.writer, "{bits}")?;
        self.writer.flush()?;
        let mut reply = String::new();
        if self.reader.read_line(&mut reply)? == 0 {
            return Err(TransportError::Closed);
        }
        Ok(reply.trim().to_string())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn writes_request_and_reads_reply() {
        let mut transport = StdioTransport::new(Cursor::new("010\r\n"), Vec::new());
        assert_eq!(transport.send_bits("00").unwrap(), "010");
        let (_, written) = transport.into_inner();
        assert_eq!(written, b"00\n");
    }

    #[test]
    fn end_of_input_closes() {
        let mut transport = StdioTransport::new(Cursor::new(""), Vec::new());
        assert_eq!(transport.send_bits("00"), Err(TransportError::Closed));
    }
}
