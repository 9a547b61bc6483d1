//! Property-based tests using proptest
//!
//! These tests validate codec invariants across randomly generated headers
//! and arbitrary input bytes.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use bytes::Bytes;
use proptest::prelude::*;
use tcp_header::{Flags, Header, HeaderFields, TcpOption};

fn arb_flags() -> impl Strategy<Value = Flags> {
    (any::<u8>(), any::<bool>()).prop_map(|(control, ns)| {
        Flags::from_wire(if ns { 1 } else { 0 }, control)
    })
}

fn arb_option() -> impl Strategy<Value = TcpOption> {
    prop_oneof![
        Just(TcpOption::no_op()),
        any::<u16>().prop_map(TcpOption::mss),
        any::<u8>().prop_map(TcpOption::window_scale),
        (any::<u32>(), any::<u32>()).prop_map(|(a, b)| TcpOption::timestamps(a, b)),
        (2u8..=255, prop::collection::vec(any::<u8>(), 0..6))
            .prop_map(|(kind, value)| TcpOption::new(kind, value)),
    ]
}

/// Option lists that fit in 40 bytes together with the sentinel
fn arb_options() -> impl Strategy<Value = Vec<TcpOption>> {
    prop::collection::vec(arb_option(), 0..8).prop_map(|mut options| {
        while tcp_header::core::options::options_len(&options) > 40 {
            options.pop();
        }
        options
    })
}

fn arb_fields() -> impl Strategy<Value = HeaderFields> {
    (
        (any::<u16>(), any::<u16>(), any::<u32>(), any::<u32>()),
        arb_flags(),
        (any::<u16>(), any::<u16>(), any::<u16>()),
        arb_options(),
    )
        .prop_map(
            |((source_port, dest_port, sequence_number, acknowledgment_number),
              flags,
              (window, checksum, urgent_pointer),
              options)| {
                HeaderFields {
                    source_port,
                    dest_port,
                    sequence_number,
                    acknowledgment_number,
                    flags,
                    window,
                    checksum,
                    urgent_pointer,
                    header_length: 0,
                    options,
                }
                .fit_length()
            },
        )
}

// Property: any valid header survives encode then decode unchanged
proptest! {
    #[test]
    fn prop_header_roundtrip(fields in arb_fields()) {
        let header = Header::new(fields).expect("fit_length yields a valid header");
        let bytes = header.encode();

        prop_assert_eq!(bytes.len(), header.header_length());
        prop_assert_eq!(bytes.len() % 4, 0);

        let decoded = Header::decode(&bytes, 0).expect("Decode should not fail");
        prop_assert_eq!(decoded, header);
    }
}

// Property: zero-copy and copying decode agree
proptest! {
    #[test]
    fn prop_decode_modes_agree(fields in arb_fields()) {
        let header = Header::new(fields).unwrap();
        let bytes = Bytes::from(header.encode());

        let copied = Header::decode(&bytes, 0).unwrap();
        let sliced = Header::decode_bytes(&bytes, 0).unwrap();
        prop_assert_eq!(copied, sliced);
    }
}

// Property: decoding arbitrary bytes never panics, and anything that decodes re-encodes to its own length
proptest! {
    #[test]
    fn prop_decode_arbitrary_never_panics(data in prop::collection::vec(any::<u8>(), 0..80), offset in 0usize..8) {
        if let Ok(header) = Header::decode(&data, offset) {
            prop_assert_eq!(header.encode().len(), header.header_length());
            prop_assert!(header.header_length() >= 20 && header.header_length() <= 60);
        }
    }
}

// Property: encoding is deterministic and respects the caller's offset
proptest! {
    #[test]
    fn prop_encode_into_matches_encode(fields in arb_fields(), offset in 0usize..16) {
        let header = Header::new(fields).unwrap();
        let mut buf = vec![0xA5u8; offset + header.header_length()];
        let written = header.encode_into(&mut buf, offset).unwrap();

        prop_assert_eq!(written, header.header_length());
        let expected = header.encode();
        prop_assert_eq!(&buf[offset..], expected.as_slice());
        prop_assert!(buf[..offset].iter().all(|b| *b == 0xA5));
    }
}
