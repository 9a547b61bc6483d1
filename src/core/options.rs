//! # Header Options
//!
//! Options are self-describing extension fields following the fixed 20-byte
//! header. Apart from the two single-byte kinds, every option is encoded as
//!
//! ```text
//! [kind(1)] [length(1)] [value(length - 2)]
//! ```
//!
//! where `length` counts the kind and length bytes themselves. Kind 0 ends the
//! list; kind 1 is a one-byte no-op used for alignment.

use crate::error::{HeaderError, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::{trace, warn};

/// Well-known option kinds
pub mod kind {
    /// End of option list
    pub const END_OF_LIST: u8 = 0;
    /// No-operation (single byte)
    pub const NO_OP: u8 = 1;
    /// Maximum segment size
    pub const MSS: u8 = 2;
    /// Window scale shift count
    pub const WINDOW_SCALE: u8 = 3;
    /// Selective acknowledgment permitted
    pub const SACK_PERMITTED: u8 = 4;
    /// Selective acknowledgment blocks
    pub const SACK: u8 = 5;
    /// Timestamp value and echo reply
    pub const TIMESTAMPS: u8 = 8;
}

/// Largest value a length-prefixed option can carry (length byte max 255, minus kind and length)
pub const MAX_OPTION_VALUE_LEN: usize = u8::MAX as usize - 2;

/// A single option: its kind byte and the value bytes that follow the length byte
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TcpOption {
    pub kind: u8,
    pub value: Bytes,
}

impl TcpOption {
    /// Create an option from a kind and raw value
    pub fn new(kind: u8, value: impl Into<Bytes>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Single-byte no-operation option
    pub fn no_op() -> Self {
        Self::new(kind::NO_OP, Bytes::new())
    }

    /// Maximum segment size option
    pub fn mss(mss: u16) -> Self {
        Self::new(kind::MSS, mss.to_be_bytes().to_vec())
    }

    /// Window scale option carrying the shift count
    pub fn window_scale(shift: u8) -> Self {
        Self::new(kind::WINDOW_SCALE, vec![shift])
    }

    /// SACK-permitted option (no value)
    pub fn sack_permitted() -> Self {
        Self::new(kind::SACK_PERMITTED, Bytes::new())
    }

    /// Timestamps option
    pub fn timestamps(value: u32, echo_reply: u32) -> Self {
        let mut raw = Vec::with_capacity(8);
        raw.extend_from_slice(&value.to_be_bytes());
        raw.extend_from_slice(&echo_reply.to_be_bytes());
        Self::new(kind::TIMESTAMPS, raw)
    }

    /// Number of bytes this option occupies on the wire
    pub fn encoded_len(&self) -> usize {
        if self.kind == kind::NO_OP {
            1
        } else {
            2 + self.value.len()
        }
    }

    /// Maximum segment size, if this is a well-formed MSS option
    pub fn as_mss(&self) -> Option<u16> {
        if self.kind != kind::MSS {
            return None;
        }
        let raw: [u8; 2] = self.value.as_ref().try_into().ok()?;
        Some(u16::from_be_bytes(raw))
    }

    /// Window scale shift count, if this is a well-formed window scale option
    pub fn as_window_scale(&self) -> Option<u8> {
        match (self.kind, self.value.as_ref()) {
            (kind::WINDOW_SCALE, [shift]) => Some(*shift),
            _ => None,
        }
    }

    /// `(value, echo_reply)`, if this is a well-formed timestamps option
    pub fn as_timestamps(&self) -> Option<(u32, u32)> {
        if self.kind != kind::TIMESTAMPS || self.value.len() != 8 {
            return None;
        }
        let (tsval, tsecr) = self.value.split_at(4);
        Some((
            u32::from_be_bytes(tsval.try_into().ok()?),
            u32::from_be_bytes(tsecr.try_into().ok()?),
        ))
    }
}

/// Bytes the option list occupies on the wire, including the end-of-list
/// sentinel when the list is non-empty. Padding is not included.
pub fn options_len(options: &[TcpOption]) -> usize {
    if options.is_empty() {
        return 0;
    }
    options.iter().map(TcpOption::encoded_len).sum::<usize>() + 1
}

/// Parse the option region of a header.
///
/// `region` is exactly the `header_length - 20` bytes after the fixed header;
/// `base` is the region's offset from the header start and only feeds error
/// reporting. `value_of` turns a byte range of `region` into the option value,
/// which lets callers choose between copying and slicing a shared buffer.
pub(crate) fn parse_options<F>(
    region: &[u8],
    base: usize,
    mut value_of: F,
) -> Result<Vec<TcpOption>>
where
    F: FnMut(Range<usize>) -> Bytes,
{
    let mut options = Vec::new();
    let mut pos = 0;

    while pos < region.len() {
        let kind = region[pos];
        match kind {
            kind::END_OF_LIST => break,
            kind::NO_OP => {
                options.push(TcpOption::no_op());
                pos += 1;
            }
            _ => {
                let Some(&length) = region.get(pos + 1) else {
                    warn!(offset = base + pos, kind, "option length byte past header end");
                    return Err(HeaderError::MalformedOption {
                        offset: base + pos,
                        kind,
                        length: 0,
                    });
                };
                let length = usize::from(length);
                if length < 2 || pos + length > region.len() {
                    warn!(offset = base + pos, kind, length, "malformed option length");
                    return Err(HeaderError::MalformedOption {
                        offset: base + pos,
                        kind,
                        length,
                    });
                }
                options.push(TcpOption {
                    kind,
                    value: value_of(pos + 2..pos + length),
                });
                pos += length;
            }
        }
    }

    trace!(count = options.len(), consumed = pos, "parsed options");
    Ok(options)
}

/// Write the option list into `region`, followed by the end-of-list sentinel
/// and zero padding. The caller guarantees every option fits; the sentinel is
/// dropped only when the options fill the region exactly, which is how a
/// decoded list without a sentinel comes back out.
pub(crate) fn write_options(options: &[TcpOption], region: &mut [u8]) {
    let mut pos = 0;
    for opt in options {
        region[pos] = opt.kind;
        if opt.kind == kind::NO_OP {
            pos += 1;
            continue;
        }
        region[pos + 1] = opt.encoded_len() as u8;
        region[pos + 2..pos + opt.encoded_len()].copy_from_slice(&opt.value);
        pos += opt.encoded_len();
    }
    // sentinel and padding are both zero
    region[pos..].fill(kind::END_OF_LIST);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    fn parse(region: &[u8]) -> Result<Vec<TcpOption>> {
        parse_options(region, 20, |r| Bytes::copy_from_slice(&region[r]))
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(TcpOption::no_op().encoded_len(), 1);
        assert_eq!(TcpOption::sack_permitted().encoded_len(), 2);
        assert_eq!(TcpOption::mss(1460).encoded_len(), 4);
        assert_eq!(TcpOption::window_scale(7).encoded_len(), 3);
        assert_eq!(TcpOption::timestamps(1, 2).encoded_len(), 10);
        assert_eq!(options_len(&[]), 0);
        assert_eq!(options_len(&[TcpOption::no_op(), TcpOption::mss(1)]), 6);
    }

    #[test]
    fn test_typed_readers() {
        assert_eq!(TcpOption::mss(1460).as_mss(), Some(1460));
        assert_eq!(TcpOption::window_scale(9).as_window_scale(), Some(9));
        assert_eq!(
            TcpOption::timestamps(0xDEAD_BEEF, 7).as_timestamps(),
            Some((0xDEAD_BEEF, 7))
        );
        assert_eq!(TcpOption::new(kind::MSS, vec![1, 2, 3]).as_mss(), None);
        assert_eq!(TcpOption::window_scale(3).as_mss(), None);
    }

    #[test]
    fn test_parse_stops_at_end_of_list() {
        let opts = parse(&[2, 4, 0xAA, 0xBB, 0, 9, 9, 9]).unwrap();
        assert_eq!(opts, vec![TcpOption::new(2, vec![0xAA, 0xBB])]);
    }

    #[test]
    fn test_parse_no_ops() {
        let opts = parse(&[1, 1, 0, 0]).unwrap();
        assert_eq!(opts, vec![TcpOption::no_op(), TcpOption::no_op()]);
    }

    #[test]
    fn test_parse_without_sentinel() {
        let opts = parse(&[3, 3, 7, 1]).unwrap();
        assert_eq!(opts, vec![TcpOption::window_scale(7), TcpOption::no_op()]);
    }

    #[test]
    fn test_parse_rejects_short_length() {
        let err = parse(&[2, 1, 0, 0]).unwrap_err();
        assert!(matches!(
            err,
            HeaderError::MalformedOption { offset: 20, kind: 2, length: 1 }
        ));
    }

    #[test]
    fn test_parse_rejects_overrun() {
        let err = parse(&[1, 1, 8, 10]).unwrap_err();
        assert!(matches!(
            err,
            HeaderError::MalformedOption { offset: 22, kind: 8, length: 10 }
        ));
    }

    #[test]
    fn test_parse_rejects_missing_length_byte() {
        let err = parse(&[1, 1, 1, 2]).unwrap_err();
        assert!(matches!(err, HeaderError::MalformedOption { offset: 23, kind: 2, .. }));
    }

    #[test]
    fn test_write_pads_with_zero() {
        let mut region = [0xFF; 8];
        write_options(&[TcpOption::no_op(), TcpOption::mss(0x0102)], &mut region);
        assert_eq!(region, [1, 2, 4, 1, 2, 0, 0, 0]);
    }

    #[test]
    fn test_write_exact_fit_omits_sentinel() {
        let mut region = [0xFF; 4];
        write_options(&[TcpOption::mss(0x0102)], &mut region);
        assert_eq!(region, [2, 4, 1, 2]);
    }
}
