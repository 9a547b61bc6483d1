//! # tcp-header
//!
//! Bidirectional codec for the TCP segment header: a fixed 20-byte prefix of
//! ports, sequence numbers, packed control flags, window, checksum and urgent
//! pointer, followed by up to 40 bytes of self-describing options.
//!
//! The codec is a pure, stateless transform. [`Header::decode`] turns bytes
//! into a typed [`Header`], trusting the length field on the wire;
//! [`Header::new`] builds one from explicit fields and validates the length
//! against the options; [`Header::encode`] writes it back out. The checksum is
//! carried as opaque data; computing it belongs to the IP layer.
//!
//! ## Example
//! ```rust
//! use tcp_header::{Flags, Header, HeaderFields, TcpOption};
//!
//! let header = Header::new(
//!     HeaderFields {
//!         source_port: 40000,
//!         dest_port: 443,
//!         sequence_number: 1,
//!         flags: Flags { syn: true, ..Flags::default() },
//!         window: 64240,
//!         options: vec![TcpOption::mss(1460), TcpOption::no_op(), TcpOption::window_scale(7)],
//!         ..HeaderFields::default()
//!     }
//!     .fit_length(),
//! )?;
//!
//! let bytes = header.encode();
//! assert_eq!(bytes.len(), 32);
//! assert_eq!(Header::decode(&bytes, 0)?, header);
//! # Ok::<(), tcp_header::HeaderError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::core::checksum::{write_checksum, IpContext};
pub use crate::core::codec::HeaderCodec;
pub use crate::core::flags::Flags;
pub use crate::core::header::{Header, HeaderFields};
pub use crate::core::options::{kind, TcpOption};
pub use crate::error::{HeaderError, Result};
