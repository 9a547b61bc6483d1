//! # Header
//!
//! Typed representation of the segment header and its two directions:
//! `Header::decode` (bytes to value) and `Header::encode` (value to bytes).
//!
//! ## Wire Format
//! ```text
//! 0      2      4          8          12   13    14     16       18       20
//! [sport][dport][sequence ][ack      ][off][flg][window][checksum][urgent][options..]
//! ```
//! All multi-byte fields are big-endian. Byte 12 holds the header length in
//! 32-bit words in its high nibble and the `ns` flag in bit 0.
//!
//! ## Construction
//! A `Header` comes from exactly one of two places:
//! - `Header::new(fields)` validates `header_length` against the options;
//! - `Header::decode(bytes, offset)` trusts the length read from the wire.
//!
//! Either way the value is immutable. To change a header, take its fields with
//! `into_fields`, edit them and construct again.

use crate::config::{MAX_HEADER_LEN, MIN_HEADER_LEN};
use crate::core::checksum::IpContext;
use crate::core::flags::Flags;
use crate::core::options::{self, kind, TcpOption, MAX_OPTION_VALUE_LEN};
use crate::error::{HeaderError, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::{debug, trace, warn};

/// Plain field set used to construct a [`Header`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderFields {
    pub source_port: u16,
    pub dest_port: u16,
    pub sequence_number: u32,
    pub acknowledgment_number: u32,
    pub flags: Flags,
    pub window: u16,
    /// Opaque to this crate; see [`Header::set_checksum`]
    pub checksum: u16,
    pub urgent_pointer: u16,
    /// Whole header length in bytes, options included
    pub header_length: usize,
    /// Options in wire order
    pub options: Vec<TcpOption>,
}

impl Default for HeaderFields {
    fn default() -> Self {
        Self {
            source_port: 0,
            dest_port: 0,
            sequence_number: 0,
            acknowledgment_number: 0,
            flags: Flags::default(),
            window: 0,
            checksum: 0,
            urgent_pointer: 0,
            header_length: MIN_HEADER_LEN,
            options: Vec::new(),
        }
    }
}

impl HeaderFields {
    /// Header length implied by the options: fixed header, options, the
    /// end-of-list byte when options are present, rounded up to 32 bits.
    pub fn required_length(&self) -> usize {
        let unpadded = MIN_HEADER_LEN + options::options_len(&self.options);
        (unpadded + 3) & !3
    }

    /// Set `header_length` to the length the options require
    pub fn fit_length(mut self) -> Self {
        self.header_length = self.required_length();
        self
    }
}

/// Decoded or validated segment header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HeaderFields")]
pub struct Header {
    source_port: u16,
    dest_port: u16,
    sequence_number: u32,
    acknowledgment_number: u32,
    flags: Flags,
    window: u16,
    checksum: u16,
    urgent_pointer: u16,
    header_length: usize,
    options: Vec<TcpOption>,
}

impl TryFrom<HeaderFields> for Header {
    type Error = HeaderError;

    fn try_from(fields: HeaderFields) -> Result<Self> {
        Header::new(fields)
    }
}

impl Header {
    /// Construct a header from explicit fields.
    ///
    /// Fails with `InvalidHeaderLength` unless `header_length` is exactly the
    /// length the options require (see [`HeaderFields::required_length`]) and
    /// lies within 20..=60. A value too long for the option length byte is a
    /// length error as well. Options the decoder could never return (an
    /// explicit end-of-list entry, a no-op carrying a value) are rejected with
    /// `MalformedOption`.
    pub fn new(fields: HeaderFields) -> Result<Self> {
        let mut offset = MIN_HEADER_LEN;
        for opt in &fields.options {
            if opt.kind != kind::NO_OP && opt.value.len() > MAX_OPTION_VALUE_LEN {
                warn!(offset, kind = opt.kind, len = opt.value.len(), "option value too long");
                return Err(HeaderError::InvalidHeaderLength {
                    length: fields.header_length,
                    expected: fields.required_length(),
                });
            }
            let unrepresentable = match opt.kind {
                kind::END_OF_LIST => true,
                kind::NO_OP => !opt.value.is_empty(),
                _ => false,
            };
            if unrepresentable {
                warn!(offset, kind = opt.kind, "option cannot be encoded");
                return Err(HeaderError::MalformedOption {
                    offset,
                    kind: opt.kind,
                    length: opt.value.len(),
                });
            }
            offset += opt.encoded_len();
        }

        let expected = fields.required_length();
        if fields.header_length < MIN_HEADER_LEN
            || fields.header_length > MAX_HEADER_LEN
            || fields.header_length != expected
        {
            warn!(
                header_length = fields.header_length,
                expected, "header length does not match options"
            );
            return Err(HeaderError::InvalidHeaderLength {
                length: fields.header_length,
                expected,
            });
        }

        Ok(Self::from_fields_unchecked(fields))
    }

    fn from_fields_unchecked(fields: HeaderFields) -> Self {
        Self {
            source_port: fields.source_port,
            dest_port: fields.dest_port,
            sequence_number: fields.sequence_number,
            acknowledgment_number: fields.acknowledgment_number,
            flags: fields.flags,
            window: fields.window,
            checksum: fields.checksum,
            urgent_pointer: fields.urgent_pointer,
            header_length: fields.header_length,
            options: fields.options,
        }
    }

    /// Give back the field set, e.g. to edit and re-construct
    pub fn into_fields(self) -> HeaderFields {
        HeaderFields {
            source_port: self.source_port,
            dest_port: self.dest_port,
            sequence_number: self.sequence_number,
            acknowledgment_number: self.acknowledgment_number,
            flags: self.flags,
            window: self.window,
            checksum: self.checksum,
            urgent_pointer: self.urgent_pointer,
            header_length: self.header_length,
            options: self.options,
        }
    }

    /// Decode a header starting at `offset`, copying option values out of `buf`
    pub fn decode(buf: &[u8], offset: usize) -> Result<Self> {
        decode_with(buf, offset, |range| Bytes::copy_from_slice(&buf[range]))
    }

    /// Decode a header starting at `offset`; option values are slices of `buf`
    pub fn decode_bytes(buf: &Bytes, offset: usize) -> Result<Self> {
        decode_with(buf, offset, |range| buf.slice(range))
    }

    /// Encode into a freshly allocated buffer of exactly `header_length` bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.header_length];
        self.write_to(&mut out);
        out
    }

    /// Encode into `buf` starting at `offset`, returning the bytes written.
    ///
    /// Fails with `BufferTooShort` if `buf` has fewer than `header_length`
    /// bytes from `offset`. Bytes outside that span are left untouched.
    pub fn encode_into(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        let available = buf.len().saturating_sub(offset);
        if available < self.header_length {
            warn!(
                needed = self.header_length,
                available, "destination buffer too short"
            );
            return Err(HeaderError::BufferTooShort {
                needed: self.header_length,
                available,
            });
        }
        self.write_to(&mut buf[offset..offset + self.header_length]);
        Ok(self.header_length)
    }

    /// `out` is exactly `header_length` bytes
    fn write_to(&self, out: &mut [u8]) {
        out[0..2].copy_from_slice(&self.source_port.to_be_bytes());
        out[2..4].copy_from_slice(&self.dest_port.to_be_bytes());
        out[4..8].copy_from_slice(&self.sequence_number.to_be_bytes());
        out[8..12].copy_from_slice(&self.acknowledgment_number.to_be_bytes());
        out[12] = (((self.header_length / 4) as u8) << 4) | self.flags.ns_bit();
        out[13] = self.flags.control_byte();
        out[14..16].copy_from_slice(&self.window.to_be_bytes());
        out[16..18].copy_from_slice(&self.checksum.to_be_bytes());
        out[18..20].copy_from_slice(&self.urgent_pointer.to_be_bytes());
        options::write_options(&self.options, &mut out[MIN_HEADER_LEN..]);

        trace!(
            header_length = self.header_length,
            options = self.options.len(),
            "encoded header"
        );
    }

    /// Checksum hook for the external pseudo-header collaborator.
    ///
    /// Computing the checksum needs the enclosing IP header and the payload,
    /// neither of which this crate owns, so this always fails with
    /// `ChecksumUnsupported` and never writes a value. The collaborator stores
    /// its result with [`crate::core::checksum::write_checksum`].
    pub fn set_checksum(&self, ip: &IpContext, buf: &mut [u8], offset: usize) -> Result<()> {
        let available = buf.len().saturating_sub(offset);
        if available < self.header_length {
            return Err(HeaderError::BufferTooShort {
                needed: self.header_length,
                available,
            });
        }
        warn!(?ip, "pseudo-header checksum requested but not supported");
        Err(HeaderError::ChecksumUnsupported)
    }

    /// Source port
    pub fn source_port(&self) -> u16 {
        self.source_port
    }

    /// Destination port
    pub fn dest_port(&self) -> u16 {
        self.dest_port
    }

    /// Sequence number
    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    /// Acknowledgment number
    pub fn acknowledgment_number(&self) -> u32 {
        self.acknowledgment_number
    }

    /// Control flags, `ns` included
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Receive window
    pub fn window(&self) -> u16 {
        self.window
    }

    /// Checksum as carried on the wire; never recomputed here
    pub fn checksum(&self) -> u16 {
        self.checksum
    }

    /// Urgent pointer
    pub fn urgent_pointer(&self) -> u16 {
        self.urgent_pointer
    }

    /// Header length in bytes, options included
    pub fn header_length(&self) -> usize {
        self.header_length
    }

    /// Number of bytes `encode` produces
    pub fn encoded_len(&self) -> usize {
        self.header_length
    }

    /// Options in wire order
    pub fn options(&self) -> &[TcpOption] {
        &self.options
    }

    /// First option of the given kind
    pub fn option(&self, kind: u8) -> Option<&TcpOption> {
        self.options.iter().find(|opt| opt.kind == kind)
    }
}

fn be_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_be_bytes([buf[at], buf[at + 1]])
}

fn be_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

/// Shared decode path. `value_of` receives ranges into `buf` (not into the header).
fn decode_with<F>(buf: &[u8], offset: usize, mut value_of: F) -> Result<Header>
where
    F: FnMut(Range<usize>) -> Bytes,
{
    let available = buf.len().saturating_sub(offset);
    if available < MIN_HEADER_LEN {
        warn!(available, "buffer shorter than fixed header");
        return Err(HeaderError::BufferTooShort {
            needed: MIN_HEADER_LEN,
            available,
        });
    }
    let raw = &buf[offset..];

    let header_length = usize::from(raw[12] >> 4) * 4;
    if header_length < MIN_HEADER_LEN {
        warn!(header_length, "data offset below fixed header size");
        return Err(HeaderError::InvalidHeaderLength {
            length: header_length,
            expected: MIN_HEADER_LEN,
        });
    }
    if available < header_length {
        warn!(header_length, available, "buffer shorter than declared header");
        return Err(HeaderError::BufferTooShort {
            needed: header_length,
            available,
        });
    }

    let region_start = offset + MIN_HEADER_LEN;
    let options = options::parse_options(
        &raw[MIN_HEADER_LEN..header_length],
        MIN_HEADER_LEN,
        |range| value_of(region_start + range.start..region_start + range.end),
    )?;

    debug!(header_length, options = options.len(), "decoded header");

    Ok(Header::from_fields_unchecked(HeaderFields {
        source_port: be_u16(raw, 0),
        dest_port: be_u16(raw, 2),
        sequence_number: be_u32(raw, 4),
        acknowledgment_number: be_u32(raw, 8),
        flags: Flags::from_wire(raw[12], raw[13]),
        window: be_u16(raw, 14),
        checksum: be_u16(raw, 16),
        urgent_pointer: be_u16(raw, 18),
        header_length,
        options,
    }))
}
