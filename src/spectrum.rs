//! Power spectral density container.
//!
//! Contains the frequency-domain representation of a transmitted or
//! received signal's power, as handed across the propagation-loss
//! extension point. The bridge never synthesizes spectral content; it only
//! scales what the host framework provides.
//!
//! Units:
//! - Frequency bins: Hz
//! - Values: W/Hz

/// A power spectral density over a fixed set of frequency bins.
///
/// The spectral support (bin frequencies) is established by the host
/// framework when the signal is built and is never altered by propagation
/// models; attenuation scales the values element-wise.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumValue {
    frequencies: Vec<f64>,
    values: Vec<f64>,
}

impl SpectrumValue {
    /// Build a PSD from matching frequency and value slices.
    ///
    /// # Panics
    ///
    /// Panics if the two vectors differ in length; the host framework
    /// constructs both from the same spectrum model, so a mismatch is a
    /// caller bug rather than a runtime condition.
    pub fn new(frequencies: Vec<f64>, values: Vec<f64>) -> Self {
        assert_eq!(
            frequencies.len(),
            values.len(),
            "frequency bins and PSD values must align"
        );
        SpectrumValue { frequencies, values }
    }

    /// A PSD with no spectral support, returned when a signal carries no
    /// transmit PSD.
    pub fn empty() -> Self {
        SpectrumValue {
            frequencies: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of frequency bins.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Bin center frequencies in Hz.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Per-bin power density values in W/Hz.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Return a copy scaled by a linear factor, keeping the spectral
    /// support unchanged.
    pub fn scaled(&self, factor: f64) -> SpectrumValue {
        SpectrumValue {
            frequencies: self.frequencies.clone(),
            values: self.values.iter().map(|v| v * factor).collect(),
        }
    }
}
