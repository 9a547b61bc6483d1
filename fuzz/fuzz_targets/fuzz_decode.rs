#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use tcp_header::Header;

fuzz_target!(|data: &[u8]| {
    // Fuzz header decoding - test for panics, out-of-bounds reads, infinite loops
    let Ok(header) = Header::decode(data, 0) else {
        return;
    };

    // Anything that decodes must re-encode to its declared length and decode again
    let encoded = header.encode();
    assert_eq!(encoded.len(), header.header_length());
    let again = Header::decode(&encoded, 0).expect("re-encoded header must decode");
    assert_eq!(again.options(), header.options());

    let shared = Bytes::copy_from_slice(data);
    let _ = Header::decode_bytes(&shared, 0);
});
