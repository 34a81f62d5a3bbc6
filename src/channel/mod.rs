//! Propagation-loss models plugged into the host framework's spectrum
//! channel.
//!
//! The host simulator invokes one model per transmission event, handing it
//! the transmitted signal's power spectral density and both endpoints'
//! current positions. The model returns the received PSD before the event
//! handler continues; nothing here schedules simulated time.

pub mod log_distance;
pub mod oracle_model;

pub use log_distance::{LogDistanceModel, LogDistanceParameters};
pub use oracle_model::OraclePathLossModel;

use crate::geometry::Vec3;
use crate::spectrum::SpectrumValue;

/// Per-transmission signal descriptor handed to a propagation model.
#[derive(Debug, Clone)]
pub struct SignalParams {
    /// Transmitted power spectral density, if the signal carries one.
    /// Control signals without spectral content leave this empty.
    pub tx_psd: Option<SpectrumValue>,
}

/// A pluggable propagation-loss strategy.
///
/// Implementations compute the received PSD from the transmitted PSD and
/// the two endpoint positions. The call is synchronous: it completes, and
/// may block the caller on the wall clock (e.g. waiting on an external
/// oracle up to its configured timeout), before the transmission event
/// handler returns. It must not be deferred or re-scheduled.
pub trait PropagationLossModel {
    /// Compute the received PSD for one transmission.
    ///
    /// # Parameters
    ///
    /// * `params` - The transmitted signal descriptor
    /// * `tx_position` - Transmitter position in meters
    /// * `rx_position` - Receiver position in meters
    ///
    /// # Returns
    ///
    /// The attenuated PSD with the original spectral support, or an empty
    /// PSD when the input carries none.
    fn calc_rx_power_spectral_density(
        &self,
        params: &SignalParams,
        tx_position: Vec3,
        rx_position: Vec3,
    ) -> SpectrumValue;
}

/// Convert a path loss in dB to the linear attenuation factor applied to a
/// PSD.
pub(crate) fn path_loss_db_to_linear(path_loss_db: f64) -> f64 {
    10.0_f64.powf(-path_loss_db / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_to_linear_conversion() {
        assert!((path_loss_db_to_linear(0.0) - 1.0).abs() < 1e-12);
        assert!((path_loss_db_to_linear(10.0) - 0.1).abs() < 1e-12);
        assert!((path_loss_db_to_linear(20.0) - 0.01).abs() < 1e-12);
        // The failure sentinel attenuates to effectively nothing
        assert!(path_loss_db_to_linear(300.0) < 1e-29);
    }
}
