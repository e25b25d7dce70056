#![no_main]

use libfuzzer_sys::fuzz_target;
use triplz::lz77::tokens::uncompressed_size;
use triplz::{decode, deserialize, Token, TokenReader};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as an archive: errors are fine, panics are not
    let Ok(tokens) = deserialize(data) else {
        return;
    };

    // Streaming reader must agree with the in-memory path
    let streamed: Vec<Token> = TokenReader::new(Cursor::new(data))
        .collect::<Result<_, _>>()
        .expect("reader rejected an archive deserialize accepted");
    assert_eq!(streamed, tokens);

    // Corrupt references must surface as errors, never as an abort
    if let Ok(out) = decode(&tokens) {
        assert_eq!(out.len(), uncompressed_size(&tokens));
    }
});
