//! File-level helpers behind the CLI commands.

use crate::error::Result;
use crate::{Codec, CodecStats, CompressConfig, Compressor};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Compress `source` into a token archive at `archive`
///
/// The source is read and encoded in full before `archive` is opened, so
/// a failure never truncates an existing file (or the source itself when
/// both paths name the same file).
pub fn compress_file(
    source: impl AsRef<Path>,
    archive: impl AsRef<Path>,
    config: &CompressConfig,
) -> Result<CodecStats> {
    let mut compressor = Compressor::new(config.clone())?;
    let input = std::fs::read(source.as_ref())?;

    let mut encoded = Vec::new();
    let stats = compressor.compress(input.as_slice(), &mut encoded)?;
    std::fs::write(archive.as_ref(), &encoded)?;
    Ok(stats)
}

/// Restore the original file from a token archive
///
/// `output` is only created once the whole archive has decoded cleanly.
pub fn decompress_file(
    archive: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &CompressConfig,
) -> Result<CodecStats> {
    let mut compressor = Compressor::new(config.clone())?;
    let input = std::fs::read(archive.as_ref())?;

    let mut decoded = Vec::new();
    let stats = compressor.decompress(input.as_slice(), &mut decoded)?;
    std::fs::write(output.as_ref(), &decoded)?;
    Ok(stats)
}

/// Size of a file in bytes
pub fn file_size(path: impl AsRef<Path>) -> Result<u64> {
    Ok(std::fs::metadata(path.as_ref())?.len())
}

/// Byte-for-byte comparison of two files
pub fn files_equal(first: impl AsRef<Path>, second: impl AsRef<Path>) -> Result<bool> {
    let a = File::open(first.as_ref())?;
    let b = File::open(second.as_ref())?;

    let len = a.metadata()?.len();
    if len != b.metadata()?.len() {
        return Ok(false);
    }
    // Zero-length files cannot be mapped
    if len == 0 {
        return Ok(true);
    }

    // SAFETY: the maps are read-only and dropped before returning; a file
    // truncated concurrently by another process is outside our contract.
    let map_a = unsafe { Mmap::map(&a)? };
    let map_b = unsafe { Mmap::map(&b)? };
    Ok(map_a[..] == map_b[..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{serialize, Error, Token};
    use tempfile::tempdir;

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("source.txt");
        let archive = dir.path().join("source.lz");
        let restored = dir.path().join("restored.txt");

        std::fs::write(&source, b"abracadabra abracadabra").unwrap();
        let config = CompressConfig::default();

        let stats = compress_file(&source, &archive, &config).unwrap();
        assert_eq!(stats.input_bytes, 23);
        assert_eq!(file_size(&archive).unwrap(), stats.output_bytes);

        decompress_file(&archive, &restored, &config).unwrap();
        assert!(files_equal(&source, &restored).unwrap());
    }

    #[test]
    fn test_failed_decompress_keeps_existing_output() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("bad.lz");
        let output = dir.path().join("keep.txt");

        std::fs::write(&archive, serialize(&[Token::back_ref(1000, 1, b'x')])).unwrap();
        std::fs::write(&output, b"precious data").unwrap();

        let result = decompress_file(&archive, &output, &CompressConfig::default());
        assert!(matches!(result, Err(Error::InvalidReference { offset: 1000, available: 0 })));
        assert_eq!(std::fs::read(&output).unwrap(), b"precious data");
    }

    #[test]
    fn test_compress_in_place_keeps_source_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let restored = dir.path().join("a.out");
        std::fs::write(&path, b"twenty bytes of text").unwrap();

        let config = CompressConfig::default();
        let stats = compress_file(&path, &path, &config).unwrap();
        assert_eq!(stats.input_bytes, 20);
        assert_eq!(file_size(&path).unwrap(), stats.output_bytes);

        decompress_file(&path, &restored, &config).unwrap();
        assert_eq!(std::fs::read(&restored).unwrap(), b"twenty bytes of text");
    }

    #[test]
    fn test_files_equal() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        let c = dir.path().join("c");
        let empty1 = dir.path().join("e1");
        let empty2 = dir.path().join("e2");

        std::fs::write(&a, b"same bytes").unwrap();
        std::fs::write(&b, b"same bytes").unwrap();
        std::fs::write(&c, b"same bytez").unwrap();
        std::fs::write(&empty1, b"").unwrap();
        std::fs::write(&empty2, b"").unwrap();

        assert!(files_equal(&a, &b).unwrap());
        assert!(!files_equal(&a, &c).unwrap());
        assert!(!files_equal(&a, &empty1).unwrap());
        assert!(files_equal(&empty1, &empty2).unwrap());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(file_size(&missing), Err(Error::Io(_))));
        assert!(matches!(
            compress_file(&missing, dir.path().join("out"), &CompressConfig::default()),
            Err(Error::Io(_))
        ));
    }
}
