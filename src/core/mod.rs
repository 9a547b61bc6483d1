//! # Core Header Components
//!
//! Bit-level layout, options and framing for the segment header.
//!
//! ## Components
//! - **Header**: typed header, validated construction, decode and encode
//! - **Flags**: the nine control bits and their wire positions
//! - **Options**: kind/length/value option list with end-of-list and no-op kinds
//! - **Checksum**: pseudo-header checksum hook for an external collaborator
//! - **Codec**: Tokio codec for streams of back-to-back headers
//!
//! ## Wire Format
//! ```text
//! [SrcPort(2)] [DstPort(2)] [Seq(4)] [Ack(4)] [Off|NS(1)] [Flags(1)]
//! [Window(2)] [Checksum(2)] [Urgent(2)] [Options(0-40)]
//! ```
//!
//! ## Safety
//! - Every read is bounds-checked against the declared header length
//! - Option lengths that overrun the header are rejected, never truncated

pub mod checksum;
pub mod codec;
pub mod flags;
pub mod header;
pub mod options;
