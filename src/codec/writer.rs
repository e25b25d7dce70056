use crate::error::Result;
use crate::lz77::{Token, TOKEN_SIZE};
use std::io::Write;

/// Writes tokens as flat 6-byte big-endian records
pub struct TokenWriter<W: Write> {
    writer: W,
    bytes_written: u64,
}

impl<W: Write> TokenWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, bytes_written: 0 }
    }

    /// Write a single token
    pub fn write_token(&mut self, token: &Token) -> Result<()> {
        self.writer.write_all(&encode_token(token))?;
        self.bytes_written += TOKEN_SIZE as u64;
        Ok(())
    }

    /// Write tokens in stream order, no separators
    pub fn write_tokens(&mut self, tokens: &[Token]) -> Result<()> {
        for token in tokens {
            self.write_token(token)?;
        }
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and finish writing
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Encode one token: offset, length, then the unit zero-extended to 16 bits
pub fn encode_token(token: &Token) -> [u8; TOKEN_SIZE] {
    let [o0, o1] = token.offset.to_be_bytes();
    let [l0, l1] = token.length.to_be_bytes();
    let [u0, u1] = (token.next_unit as u16).to_be_bytes();
    [o0, o1, l0, l1, u0, u1]
}

/// Serialize a token stream into an in-memory artifact
pub fn serialize(tokens: &[Token]) -> Vec<u8> {
    let mut out = Vec::with_capacity(tokens.len() * TOKEN_SIZE);
    for token in tokens {
        out.extend_from_slice(&encode_token(token));
    }
    out
}
