//! # Checksum Hook
//!
//! The header checksum covers a pseudo-header built from the enclosing IP
//! header, the TCP header and the segment payload. Computing it is the job of
//! an external collaborator that owns the IP layer; this module only describes
//! the context that collaborator needs and where the result goes.

use crate::config::CHECKSUM_OFFSET;
use crate::error::{HeaderError, Result};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Addressing of the IP header enclosing a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpContext {
    V4 { source: Ipv4Addr, destination: Ipv4Addr },
    V6 { source: Ipv6Addr, destination: Ipv6Addr },
}

/// Store a computed checksum into the header starting at `offset`.
///
/// Fails with `BufferTooShort` if the checksum field lies outside `buf`.
pub fn write_checksum(buf: &mut [u8], offset: usize, checksum: u16) -> Result<()> {
    let available = buf.len().saturating_sub(offset);
    let start = offset.saturating_add(CHECKSUM_OFFSET);
    let field = buf
        .get_mut(start..start.saturating_add(2))
        .ok_or(HeaderError::BufferTooShort {
            needed: CHECKSUM_OFFSET + 2,
            available,
        })?;
    field.copy_from_slice(&checksum.to_be_bytes());
    Ok(())
}
