//! Oracle-facing half of the bridge: wire codec, one-shot UDP transport,
//! configuration, and the blocking request/response client.
//!
//! The oracle is an external process that computes propagation metrics from
//! scene geometry; this module implements its ASCII datagram protocol.

pub mod client;
pub mod command;
pub mod config;
pub mod transport;

pub use client::{DELAY_SENTINEL_SECS, OracleClient, PATH_LOSS_SENTINEL_DB};
pub use command::{DecodeError, OracleCommand};
pub use config::OracleConfig;
pub use transport::{DEFAULT_TIMEOUT, MAX_DATAGRAM_LEN, TransportError};
