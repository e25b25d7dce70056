use crate::error::{Error, Result};
use crate::lz77::{Token, TOKEN_SIZE};
use std::io::Read;

/// Reads fixed-width tokens from a byte stream
///
/// The stream has no header or length prefix; it ends when the source
/// is exhausted. A partial trailing token is an error.
pub struct TokenReader<R: Read> {
    reader: R,
    /// Total bytes read (for stats and error reporting)
    bytes_read: u64,
    /// Set once the source is exhausted or an error was returned
    done: bool,
}

impl<R: Read> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, bytes_read: 0, done: false }
    }

    /// Read the next token, or `None` at a clean end of stream
    pub fn read_token(&mut self) -> Result<Option<Token>> {
        if self.done {
            return Ok(None);
        }

        let mut buf = [0u8; TOKEN_SIZE];
        let mut filled = 0;

        // A single read() may return fewer bytes than asked for
        while filled < TOKEN_SIZE {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                    // Retry on interrupt
                }
                Err(e) => {
                    self.done = true;
                    return Err(Error::Io(e));
                }
            }
        }
        self.bytes_read += filled as u64;

        match filled {
            0 => {
                self.done = true;
                Ok(None)
            }
            TOKEN_SIZE => match parse_token(&buf) {
                Ok(token) => Ok(Some(token)),
                Err(e) => {
                    self.done = true;
                    Err(e)
                }
            },
            trailing => {
                self.done = true;
                Err(Error::TruncatedStream { trailing })
            }
        }
    }

    /// Read every remaining token in order
    pub fn read_all(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.read_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Total bytes consumed from the source
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

impl<R: Read> Iterator for TokenReader<R> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_token().transpose()
    }
}

/// Decode one 6-byte big-endian record
pub fn parse_token(buf: &[u8; TOKEN_SIZE]) -> Result<Token> {
    let offset = u16::from_be_bytes([buf[0], buf[1]]);
    let length = u16::from_be_bytes([buf[2], buf[3]]);
    let unit = u16::from_be_bytes([buf[4], buf[5]]);

    let next_unit = u8::try_from(unit).map_err(|_| Error::FieldOverflow {
        field: "next_unit",
        value: unit as u64,
        max: u8::MAX as u64,
    })?;

    Ok(Token { offset, length, next_unit })
}

/// Deserialize an in-memory artifact
pub fn deserialize(data: &[u8]) -> Result<Vec<Token>> {
    let trailing = data.len() % TOKEN_SIZE;
    if trailing != 0 {
        return Err(Error::TruncatedStream { trailing });
    }

    data.chunks_exact(TOKEN_SIZE)
        .map(|chunk| {
            let mut buf = [0u8; TOKEN_SIZE];
            buf.copy_from_slice(chunk);
            parse_token(&buf)
        })
        .collect()
}
