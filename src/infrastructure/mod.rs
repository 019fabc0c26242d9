//! Adapters for the domain ports.

#[cfg(feature = "http-gateway")]
pub mod http;
pub mod in_memory;
pub mod ip;
