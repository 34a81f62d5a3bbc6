//! Synchronous bridge between a discrete-event network simulator and an
//! external ray-tracing oracle (Sionna).
//!
//! The simulator hands two 3-D positions to a propagation-loss model; the
//! model asks the oracle process for the attenuation between them over a
//! small ASCII-over-UDP protocol and scales the transmitted power spectral
//! density accordingly. Everything is blocking and strictly sequential:
//! each datagram exchange stalls the caller on the wall clock (bounded by a
//! configurable timeout) without advancing simulated time.
//!
//! Failure policy: the simulation never aborts because the oracle is slow,
//! unreachable, or returns malformed data. Transport and decode failures
//! are logged where they occur and degrade to benign defaults, most
//! prominently the 300 dB path loss sentinel standing in for "metric
//! unavailable".
//!
//! Module map:
//! - [`geometry`] - positions, velocities, heading derivation
//! - [`spectrum`] - power spectral density container
//! - [`oracle`] - wire codec, one-shot UDP transport, config, client
//! - [`channel`] - propagation-loss strategies plugged into the host
//!   framework (oracle-backed and local log-distance)

pub mod channel;
pub mod geometry;
pub mod oracle;
pub mod spectrum;

pub use channel::{
    LogDistanceModel, LogDistanceParameters, OraclePathLossModel, PropagationLossModel, SignalParams,
};
pub use geometry::Vec3;
pub use oracle::{OracleClient, OracleConfig, PATH_LOSS_SENTINEL_DB};
pub use spectrum::SpectrumValue;
