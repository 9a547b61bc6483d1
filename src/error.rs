//! # Error Types
//!
//! Error handling for the header codec.
//!
//! Every failure is a deterministic function of the input: nothing here is
//! transient, so the codec never retries. Callers decide whether to drop the
//! segment or propagate the error further up their stack.
//!
//! ## Error Categories
//! - **Length Errors**: header length out of range or inconsistent with options
//! - **Buffer Errors**: source or destination buffer too small for the span
//! - **Option Errors**: option length byte inconsistent with the header boundary
//! - **Checksum**: the pseudo-header checksum hook is not provided by this crate
//! - **Configuration / I/O**: config loading and framing-codec plumbing
//!
//! ## Example Usage
//! ```rust
//! use tcp_header::core::header::Header;
//! use tcp_header::error::HeaderError;
//!
//! match Header::decode(&[0u8; 10], 0) {
//!     Err(HeaderError::BufferTooShort { needed, available }) => {
//!         assert_eq!((needed, available), (20, 10));
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Checksum hook
    pub const ERR_CHECKSUM_UNSUPPORTED: &str =
        "Pseudo-header checksum computation is not supported by this codec";

    /// Configuration errors
    pub const ERR_CONFIG_OPEN: &str = "Failed to open config file";
    pub const ERR_CONFIG_READ: &str = "Failed to read config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
    pub const ERR_CONFIG_SERIALIZE: &str = "Failed to serialize config";
    pub const ERR_CONFIG_WRITE: &str = "Failed to write config file";

    /// Logging errors
    pub const ERR_LOGGING_INIT: &str = "Failed to install tracing subscriber";
}

// HeaderError is the error type for all codec operations
#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("Invalid header length: {length} bytes (expected {expected})")]
    InvalidHeaderLength { length: usize, expected: usize },

    #[error("Buffer too short: need {needed} bytes, have {available}")]
    BufferTooShort { needed: usize, available: usize },

    #[error("Malformed option kind {kind} at byte {offset}: encoded length {length}")]
    MalformedOption { offset: usize, kind: u8, length: usize },

    #[error("{}", constants::ERR_CHECKSUM_UNSUPPORTED)]
    ChecksumUnsupported,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Type alias for Results using HeaderError
pub type Result<T> = std::result::Result<T, HeaderError>;
