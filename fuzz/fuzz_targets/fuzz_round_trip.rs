#![no_main]

use libfuzzer_sys::fuzz_target;
use triplz::{decode, deserialize, encode, serialize};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte picks the window so small and large windows both get coverage
    let window = (data[0] as usize) * 64 + 1;
    let data = if data.len() > 64 * 1024 { &data[1..64 * 1024] } else { &data[1..] };

    let tokens = encode(data, window).expect("valid window must encode");
    let restored = deserialize(&serialize(&tokens)).expect("own archive must deserialize");
    assert_eq!(restored, tokens);
    assert_eq!(decode(&restored).expect("own tokens must decode"), data, "Round-trip mismatch");
});
