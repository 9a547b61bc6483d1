//! # Header Framing Codec
//!
//! `tokio_util` codec for streams of back-to-back headers, such as a replayed
//! capture of header-only segments. The framing length is the data offset of
//! each header, so the decoder waits for the fixed 20 bytes, reads the declared
//! length, then waits for the rest.
//!
//! The codec holds nothing but its configuration; every frame is decoded
//! independently through [`Header::decode_bytes`] or [`Header::decode`].

use crate::config::{CodecConfig, MIN_HEADER_LEN};
use crate::core::header::Header;
use crate::error::{HeaderError, Result};
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{trace, warn};

/// Byte 12 carries the data offset nibble
const DATA_OFFSET_BYTE: usize = 12;

/// Stateless framing codec for back-to-back headers
#[derive(Debug, Clone, Copy)]
pub struct HeaderCodec {
    zero_copy: bool,
}

impl Default for HeaderCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderCodec {
    /// Codec that decodes option values as slices of the received frame
    pub fn new() -> Self {
        Self { zero_copy: true }
    }

    /// Codec configured from a [`CodecConfig`]
    pub fn with_config(config: &CodecConfig) -> Self {
        Self {
            zero_copy: config.zero_copy,
        }
    }

    /// Whether decoded option values share the frame's allocation
    pub fn is_zero_copy(&self) -> bool {
        self.zero_copy
    }
}

impl Decoder for HeaderCodec {
    type Item = Header;
    type Error = HeaderError;

    /// Split one header off `src` once it is fully buffered.
    ///
    /// The frame is removed from `src` before its options are parsed, so a
    /// frame rejected with `MalformedOption` is consumed and the stream stays
    /// aligned on the next header. A data offset below 5 leaves `src` as is.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        if src.len() < MIN_HEADER_LEN {
            return Ok(None);
        }

        let header_length = usize::from(src[DATA_OFFSET_BYTE] >> 4) * 4;
        if header_length < MIN_HEADER_LEN {
            warn!(header_length, "frame declares header shorter than fixed part");
            return Err(HeaderError::InvalidHeaderLength {
                length: header_length,
                expected: MIN_HEADER_LEN,
            });
        }

        if src.len() < header_length {
            src.reserve(header_length - src.len());
            return Ok(None);
        }

        // Split exactly one header off the buffer
        let frame = src.split_to(header_length).freeze();
        trace!(header_length, remaining = src.len(), "framed header");

        let header = if self.zero_copy {
            Header::decode_bytes(&frame, 0)?
        } else {
            Header::decode(&frame, 0)?
        };
        Ok(Some(header))
    }
}

impl Encoder<&Header> for HeaderCodec {
    type Error = HeaderError;

    fn encode(&mut self, item: &Header, dst: &mut BytesMut) -> Result<()> {
        let start = dst.len();
        dst.resize(start + item.encoded_len(), 0);
        item.encode_into(dst, start)?;
        Ok(())
    }
}

impl Encoder<Header> for HeaderCodec {
    type Error = HeaderError;

    fn encode(&mut self, item: Header, dst: &mut BytesMut) -> Result<()> {
        <Self as Encoder<&Header>>::encode(self, &item, dst)
    }
}
