pub mod codec;
pub mod compressor;
pub mod error;
pub mod fileops;
pub mod lz77;

pub use codec::{deserialize, serialize, TokenReader, TokenWriter};
pub use compressor::Compressor;
pub use error::{Error, Result};
pub use fileops::{compress_file, decompress_file, file_size, files_equal};
pub use lz77::{decode, encode, Encoder, Token, TOKEN_SIZE};

use std::io::{Read, Write};

/// Largest window or match length representable in a 16-bit token field
pub const MAX_WINDOW_SIZE: usize = u16::MAX as usize;

/// Longest run a single token may copy
pub const MAX_MATCH_LENGTH: usize = u16::MAX as usize;

/// Window used when none is configured
pub const DEFAULT_WINDOW_SIZE: usize = 60000;

/// Configuration for the match finder
///
/// Both limits must fit the 16-bit token fields, so a valid config can
/// never produce an offset or length that overflows on serialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    /// How far back matches may be searched (1-65535)
    pub window_size: usize,
    /// Upper bound on a single match (1-65535)
    pub max_match_length: usize,
}

impl EncoderConfig {
    /// Check both limits against the token field width
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_WINDOW_SIZE).contains(&self.window_size) {
            return Err(Error::InvalidConfig(format!(
                "window size {} outside 1..={}",
                self.window_size, MAX_WINDOW_SIZE
            )));
        }
        if !(1..=MAX_MATCH_LENGTH).contains(&self.max_match_length) {
            return Err(Error::InvalidConfig(format!(
                "max match length {} outside 1..={}",
                self.max_match_length, MAX_MATCH_LENGTH
            )));
        }
        Ok(())
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self { window_size: DEFAULT_WINDOW_SIZE, max_match_length: MAX_MATCH_LENGTH }
    }
}

/// Configuration for stream and file level compression
#[derive(Clone, Debug)]
pub struct CompressConfig {
    /// Match finder limits
    pub encoder: EncoderConfig,
    /// Buffer size for I/O operations
    pub buffer_size: usize,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self { encoder: EncoderConfig::default(), buffer_size: 128 * 1024 }
    }
}

/// Statistics from a compress or decompress operation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodecStats {
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub tokens: u64,
    /// Tokens that copy from earlier output
    pub matches: u64,
    pub literals: u64,
}

impl CodecStats {
    /// Build stats from a token stream and the byte counts on either side
    pub fn from_tokens(tokens: &[Token], input_bytes: u64, output_bytes: u64) -> Self {
        let matches = tokens.iter().filter(|t| t.is_match()).count() as u64;
        let total = tokens.len() as u64;
        Self { input_bytes, output_bytes, tokens: total, matches, literals: total - matches }
    }

    /// Output size relative to input size (0.0 for empty input)
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }
}

/// Trait for the complete compress/decompress operation
pub trait Codec {
    /// Compress raw input into a token artifact
    fn compress<R: Read, W: Write>(&mut self, input: R, output: W) -> Result<CodecStats>;

    /// Decompress a token artifact back to the raw input
    fn decompress<R: Read, W: Write>(&mut self, input: R, output: W) -> Result<CodecStats>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EncoderConfig::default().validate().is_ok());
        assert_eq!(CompressConfig::default().encoder.window_size, 60000);
    }

    #[test]
    fn test_config_bounds() {
        let max = EncoderConfig { window_size: 65535, max_match_length: 65535 };
        assert!(max.validate().is_ok());

        let zero_window = EncoderConfig { window_size: 0, ..Default::default() };
        assert!(matches!(zero_window.validate(), Err(Error::InvalidConfig(_))));

        let wide_match = EncoderConfig { max_match_length: 65536, ..Default::default() };
        assert!(matches!(wide_match.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_stats_from_tokens() {
        let tokens = [Token::literal(b'a'), Token::back_ref(1, 8, b'a')];
        let stats = CodecStats::from_tokens(&tokens, 10, 12);
        assert_eq!(stats.tokens, 2);
        assert_eq!(stats.matches, 1);
        assert_eq!(stats.literals, 1);
        assert!((stats.ratio() - 1.2).abs() < 1e-9);
        assert_eq!(CodecStats::default().ratio(), 0.0);
    }
}
