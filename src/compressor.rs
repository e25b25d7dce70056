use crate::codec::{TokenReader, TokenWriter};
use crate::error::Result;
use crate::lz77::{decode, Encoder};
use crate::{Codec, CodecStats, CompressConfig};
use std::io::{BufReader, BufWriter, Read, Write};

/// Whole-input compressor over arbitrary readers and writers
///
/// Input is buffered completely in memory before encoding, and every token
/// (or decoded unit) is produced before the first byte is written.
pub struct Compressor {
    config: CompressConfig,
    encoder: Encoder,
}

impl Compressor {
    pub fn new(config: CompressConfig) -> Result<Self> {
        let encoder = Encoder::new(config.encoder)?;
        Ok(Self { config, encoder })
    }
}

impl Codec for Compressor {
    fn compress<R: Read, W: Write>(&mut self, input: R, output: W) -> Result<CodecStats> {
        let mut reader = BufReader::with_capacity(self.config.buffer_size, input);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        let tokens = self.encoder.encode(&data)?;

        let mut writer = TokenWriter::new(BufWriter::with_capacity(self.config.buffer_size, output));
        writer.write_tokens(&tokens)?;
        let output_bytes = writer.bytes_written();
        writer.finish()?;

        let stats = CodecStats::from_tokens(&tokens, data.len() as u64, output_bytes);
        log::info!(
            "compressed {} bytes into {} tokens ({} matches, {} bytes)",
            stats.input_bytes,
            stats.tokens,
            stats.matches,
            stats.output_bytes
        );
        Ok(stats)
    }

    fn decompress<R: Read, W: Write>(&mut self, input: R, output: W) -> Result<CodecStats> {
        let mut reader =
            TokenReader::new(BufReader::with_capacity(self.config.buffer_size, input));
        let tokens = reader.read_all()?;
        let data = decode(&tokens)?;

        let mut writer = BufWriter::with_capacity(self.config.buffer_size, output);
        writer.write_all(&data)?;
        writer.flush()?;

        let stats = CodecStats::from_tokens(&tokens, reader.bytes_read(), data.len() as u64);
        log::info!(
            "decompressed {} tokens ({} bytes) into {} bytes",
            stats.tokens,
            stats.input_bytes,
            stats.output_bytes
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EncoderConfig, Error, TOKEN_SIZE};
    use std::io::Cursor;

    fn compressor(window_size: usize) -> Compressor {
        let config = CompressConfig {
            encoder: EncoderConfig { window_size, ..Default::default() },
            ..Default::default()
        };
        Compressor::new(config).unwrap()
    }

    #[test]
    fn test_stream_round_trip() {
        let data = b"Hello, Hello, Hello!".to_vec();
        let mut c = compressor(13);

        let mut archive = Vec::new();
        let stats = c.compress(Cursor::new(&data), &mut archive).unwrap();
        assert_eq!(stats.input_bytes, 20);
        assert_eq!(stats.tokens, 7);
        assert_eq!(stats.matches, 2);
        assert_eq!(stats.output_bytes, archive.len() as u64);
        assert_eq!(archive.len(), 7 * TOKEN_SIZE);

        let mut restored = Vec::new();
        let stats = c.decompress(Cursor::new(&archive), &mut restored).unwrap();
        assert_eq!(restored, data);
        assert_eq!(stats.input_bytes, archive.len() as u64);
        assert_eq!(stats.output_bytes, 20);
    }

    #[test]
    fn test_empty_stream() {
        let mut c = compressor(16);
        let mut archive = Vec::new();
        c.compress(Cursor::new(Vec::<u8>::new()), &mut archive).unwrap();
        assert!(archive.is_empty());

        let mut restored = Vec::new();
        c.decompress(Cursor::new(archive), &mut restored).unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn test_decompress_writes_nothing_on_error() {
        let mut c = compressor(16);
        let archive = [0u8, 0, 0, 0, 0, b'a', 0, 9, 0, 1, 0, b'b'];
        let mut restored = Vec::new();
        let err = c.decompress(Cursor::new(&archive), &mut restored).unwrap_err();
        assert!(matches!(err, Error::InvalidReference { offset: 9, available: 1 }));
        assert!(restored.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        let config = CompressConfig {
            encoder: EncoderConfig { window_size: 0, ..Default::default() },
            ..Default::default()
        };
        assert!(Compressor::new(config).is_err());
    }
}
