//! Propagation-loss model backed by the external ray-tracing oracle.

use crate::geometry::Vec3;
use crate::oracle::OracleClient;
use crate::spectrum::SpectrumValue;

use super::{PropagationLossModel, SignalParams, path_loss_db_to_linear};

/// A [`PropagationLossModel`] that queries the oracle for every
/// transmission.
///
/// Each invocation costs three blocking datagram exchanges (two location
/// updates plus the path-gain request); the stall is wall-clock only and
/// never advances simulated time. When the oracle is slow, unreachable, or
/// replies with garbage, the client's 300 dB sentinel flows through here as
/// an attenuation of ~1e-30, so the simulation sees total signal loss
/// rather than an error.
pub struct OraclePathLossModel {
    client: OracleClient,
}

impl OraclePathLossModel {
    pub fn new(client: OracleClient) -> Self {
        OraclePathLossModel { client }
    }

    pub fn client(&self) -> &OracleClient {
        &self.client
    }
}

impl PropagationLossModel for OraclePathLossModel {
    fn calc_rx_power_spectral_density(
        &self,
        params: &SignalParams,
        tx_position: Vec3,
        rx_position: Vec3,
    ) -> SpectrumValue {
        let Some(tx_psd) = &params.tx_psd else {
            log::warn!("transmitted signal carries no PSD, returning empty spectrum");
            return SpectrumValue::empty();
        };

        let path_loss_db = self.client.query_path_loss(tx_position, rx_position);
        let linear = path_loss_db_to_linear(path_loss_db);
        log::debug!(
            "oracle path loss {} -> {}: {} dB (linear {:e})",
            tx_position,
            rx_position,
            path_loss_db,
            linear
        );

        tx_psd.scaled(linear)
    }
}
