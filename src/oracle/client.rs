//! Client for the oracle's UDP request/response protocol.
//!
//! The client is the only component aware of the protocol's sequencing: a
//! path-loss query must land both location updates in the oracle's scene
//! before the path-gain request, since the oracle computes against its
//! last-known position per object id. Every step is one blocking
//! send-then-receive cycle on its own socket; no connection state carries
//! across steps.

use crate::geometry::Vec3;

use super::command::{self, OracleCommand};
use super::config::OracleConfig;
use super::transport::{self, TransportError};

/// Path loss reported when the oracle is unreachable, times out, or replies
/// with something unparsable. 300 dB is effectively total attenuation; the
/// protocol has no explicit error code, so callers distinguish failure only
/// by magnitude.
pub const PATH_LOSS_SENTINEL_DB: f64 = 300.0;

/// Delay reported when a delay query fails, mirroring the value the oracle
/// itself reports when no usable ray exists between two objects.
pub const DELAY_SENTINEL_SECS: f64 = 1e5;

// Fixed oracle-side slots reused for every metric query. The oracle keys its
// scene objects by id, so interleaved queries for different entity pairs
// overwrite each other's locations; see `query_path_loss`.
const TX_SLOT: &str = "obj0";
const RX_SLOT: &str = "obj1";

/// Client for querying channel metrics from the oracle process.
///
/// All operations are synchronous and may stall the caller up to the
/// configured timeout per datagram exchange. They are safe to call
/// repeatedly: a later location update for the same object id overwrites
/// the earlier one in the oracle's scene.
pub struct OracleClient {
    config: OracleConfig,
}

impl OracleClient {
    /// Create a client from an explicit configuration.
    pub fn new(config: OracleConfig) -> Self {
        OracleClient { config }
    }

    /// Create a client for an oracle on the default local endpoint.
    pub fn with_defaults() -> Self {
        OracleClient::new(OracleConfig::default())
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Report an entity's position and heading to the oracle.
    ///
    /// The heading is derived from the ground-plane velocity components;
    /// a stationary entity reports heading 0. A missing or malformed
    /// acknowledgment is logged and otherwise ignored: the oracle's scene
    /// is corrected by the next update for the same object.
    pub fn update_location(&self, object_id: &str, position: Vec3, velocity: Vec3) {
        let message = OracleCommand::LocUpdate {
            object_id: object_id.to_string(),
            position,
            angle_deg: velocity.heading_degrees(),
        }
        .encode();

        match self.exchange(&message) {
            Ok(reply) => match command::decode_loc_confirm(&reply) {
                Ok(confirmed) => log::debug!("oracle confirmed location of {}", confirmed),
                Err(e) => log::warn!("unexpected ack for {:?}: {}", message, e),
            },
            Err(e) => log::warn!("no ack for {:?}: {}", message, e),
        }
    }

    /// Query the path loss in dB between a transmitter and a receiver
    /// position.
    ///
    /// Performs three synchronous exchanges in order: locate the
    /// transmitter in slot `obj0`, locate the receiver in slot `obj1`, then
    /// request the path gain between the two slots. Because the slots are
    /// fixed, concurrent or interleaved queries for different entity pairs
    /// corrupt each other's located objects; callers must keep queries
    /// strictly sequential.
    ///
    /// On any step failure the result is [`PATH_LOSS_SENTINEL_DB`] and the
    /// cause is logged; the caller never sees an error.
    pub fn query_path_loss(&self, tx_position: Vec3, rx_position: Vec3) -> f64 {
        self.locate_slots(tx_position, rx_position);

        let message = OracleCommand::CalcPathGain {
            object_a: TX_SLOT.to_string(),
            object_b: RX_SLOT.to_string(),
        }
        .encode();

        match self.exchange(&message) {
            Ok(reply) => match command::decode_path_gain(&reply) {
                Ok(path_loss_db) => path_loss_db,
                Err(e) => {
                    log::error!("invalid pathgain response: {}", e);
                    PATH_LOSS_SENTINEL_DB
                }
            },
            Err(e) => {
                log::error!("pathgain request failed: {}", e);
                PATH_LOSS_SENTINEL_DB
            }
        }
    }

    /// Query the shortest propagation delay in seconds between two
    /// positions.
    ///
    /// Same slot discipline and failure policy as [`query_path_loss`];
    /// failures degrade to [`DELAY_SENTINEL_SECS`].
    ///
    /// [`query_path_loss`]: OracleClient::query_path_loss
    pub fn query_delay(&self, tx_position: Vec3, rx_position: Vec3) -> f64 {
        self.locate_slots(tx_position, rx_position);

        let message = OracleCommand::CalcDelay {
            object_a: TX_SLOT.to_string(),
            object_b: RX_SLOT.to_string(),
        }
        .encode();

        match self.exchange(&message) {
            Ok(reply) => match command::decode_delay(&reply) {
                Ok(delay_secs) => delay_secs,
                Err(e) => {
                    log::error!("invalid delay response: {}", e);
                    DELAY_SENTINEL_SECS
                }
            },
            Err(e) => {
                log::error!("delay request failed: {}", e);
                DELAY_SENTINEL_SECS
            }
        }
    }

    /// Query line-of-sight status between two positions.
    ///
    /// Same slot discipline as [`query_path_loss`]; failures degrade to
    /// `false` (assume obstructed).
    ///
    /// [`query_path_loss`]: OracleClient::query_path_loss
    pub fn query_los(&self, tx_position: Vec3, rx_position: Vec3) -> bool {
        self.locate_slots(tx_position, rx_position);

        let message = OracleCommand::CalcLos {
            object_a: TX_SLOT.to_string(),
            object_b: RX_SLOT.to_string(),
        }
        .encode();

        match self.exchange(&message) {
            Ok(reply) => match command::decode_los(&reply) {
                Ok(los) => los,
                Err(e) => {
                    log::error!("invalid LOS response: {}", e);
                    false
                }
            },
            Err(e) => {
                log::error!("LOS request failed: {}", e);
                false
            }
        }
    }

    /// Ask the oracle process to exit.
    ///
    /// Fire-and-forget: the reply outcome is ignored, and if the oracle is
    /// already gone this returns after the configured timeout. A leftover
    /// oracle process is harmless.
    pub fn shutdown(&self) {
        if let Err(e) = self.exchange(&OracleCommand::Shutdown.encode()) {
            log::debug!("shutdown request got no reply: {}", e);
        }
        log::info!("asked oracle to shut down");
    }

    /// Land both metric-query slots in the oracle's scene, transmitter
    /// first. Zero velocity: slot locations carry no heading.
    fn locate_slots(&self, tx_position: Vec3, rx_position: Vec3) {
        self.update_location(TX_SLOT, tx_position, Vec3::ZERO);
        self.update_location(RX_SLOT, rx_position, Vec3::ZERO);
    }

    fn exchange(&self, message: &str) -> Result<String, TransportError> {
        let server = self.config.server_addr()?;
        transport::send_recv(server, message, self.config.timeout())
    }
}
