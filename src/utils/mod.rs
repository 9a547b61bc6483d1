//! # Utility Modules
//!
//! Supporting utilities shared by applications embedding the codec.
//!
//! ## Components
//! - **Logging**: tracing subscriber installation from [`crate::config::LoggingConfig`]

pub mod logging;
