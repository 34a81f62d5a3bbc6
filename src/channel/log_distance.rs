//! Local log-distance propagation model.
//!
//! A purely analytical alternative to the oracle-backed model, usable when
//! no oracle process is running. Implements the log-distance path loss
//! model with optional log-normal shadowing:
//!
//! ```text
//! PL(d) = PL(d₀) + 10 × n × log₁₀(d/d₀) + X_σ
//! where d₀ = 1 meter (reference distance)
//! ```

use rand::thread_rng;
use rand_distr::{Distribution, Normal};
use serde::Deserialize;

use crate::geometry::Vec3;
use crate::spectrum::SpectrumValue;

use super::{PropagationLossModel, SignalParams, path_loss_db_to_linear};

/// Parameters of the log-distance path loss model.
#[derive(Debug, Clone, Deserialize)]
pub struct LogDistanceParameters {
    /// Path loss exponent (n). 2.0 for free space, 2.7-3.5 for urban,
    /// up to 5.0 indoors.
    pub path_loss_exponent: f64,
    /// Standard deviation for log-normal shadowing (σ) in dB; 0.0 disables
    /// shadowing and makes the model deterministic.
    pub shadowing_sigma: f64,
    /// Path loss at the reference distance d₀ (1 meter) in dB.
    pub path_loss_at_reference_distance: f64,
}

/// Path loss (in dB) at a given distance under the log-distance model.
///
/// For distances below the 1 m reference distance the reference loss is
/// returned without further attenuation. When `shadowing_sigma` is
/// positive each call samples a fresh `Normal(0, σ)` term, so repeated
/// calls at the same distance yield different results.
pub fn path_loss_db(distance: f64, params: &LogDistanceParameters) -> f64 {
    if distance < 1.0 {
        return params.path_loss_at_reference_distance;
    }
    let path_loss =
        params.path_loss_at_reference_distance + 10.0 * params.path_loss_exponent * distance.log10();
    let shadowing = if params.shadowing_sigma > 0.0 {
        let normal = Normal::new(0.0, params.shadowing_sigma).expect("invalid normal sigma");
        normal.sample(&mut thread_rng())
    } else {
        0.0
    };
    path_loss + shadowing
}

/// A [`PropagationLossModel`] computed locally from endpoint distance.
///
/// One concrete strategy among those the host framework may select; useful
/// as a stand-in when the oracle process is unavailable, at the cost of
/// ignoring scene geometry.
pub struct LogDistanceModel {
    params: LogDistanceParameters,
}

impl LogDistanceModel {
    pub fn new(params: LogDistanceParameters) -> Self {
        LogDistanceModel { params }
    }
}

impl PropagationLossModel for LogDistanceModel {
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

        let distance = tx_position.distance(&rx_position);
        let path_loss_db = path_loss_db(distance, &self.params);
        tx_psd.scaled(path_loss_db_to_linear(path_loss_db))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free_space() -> LogDistanceParameters {
        LogDistanceParameters {
            path_loss_exponent: 2.0,
            shadowing_sigma: 0.0,
            path_loss_at_reference_distance: 40.0,
        }
    }

    #[test]
    fn loss_is_clamped_below_reference_distance() {
        let params = free_space();
        assert_eq!(path_loss_db(0.0, &params), 40.0);
        assert_eq!(path_loss_db(0.5, &params), 40.0);
    }

    #[test]
    fn loss_grows_monotonically_with_distance() {
        let params = free_space();
        let near = path_loss_db(10.0, &params);
        let far = path_loss_db(100.0, &params);
        assert!(far > near);
        // Free space: +20 dB per decade of distance
        assert!((far - near - 20.0).abs() < 1e-9);
    }

    #[test]
    fn zero_sigma_is_deterministic() {
        let params = free_space();
        assert_eq!(path_loss_db(250.0, &params), path_loss_db(250.0, &params));
    }

    #[test]
    fn model_scales_psd_without_contacting_anything() {
        let model = LogDistanceModel::new(free_space());
        let params = SignalParams {
            tx_psd: Some(SpectrumValue::new(vec![868e6], vec![1.0])),
        };
        // 10 m at n=2.0 with PL(d0)=40 dB -> 60 dB -> factor 1e-6
        let rx_psd = model.calc_rx_power_spectral_density(
            &params,
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
        );
        assert!((rx_psd.values()[0] - 1e-6).abs() < 1e-12);

        let rx_psd = model.calc_rx_power_spectral_density(
            &SignalParams { tx_psd: None },
            Vec3::ZERO,
            Vec3::ZERO,
        );
        assert!(rx_psd.is_empty());
    }
}
