use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParamsError {
    #[error("Error deserializing parameters")]
    Deserialize(#[from] toml::de::Error),

    #[error("Smoothing constant must be in (0, 1), got {0}")]
    BadSmoothing(f32),

    #[error("Sampling period must be greater than zero")]
    ZeroSamplingPeriod,

    #[error("Falling threshold {falling} must be below rising threshold {rising}")]
    OverlappingThresholds { rising: f32, falling: f32 },

    #[error("Log probe cap must be greater than zero")]
    ZeroProbeCap,
}

/// Build-time tuning of the flight core. There is no runtime
/// reconfiguration surface: a `FlightParams` is validated once when the
/// pipeline is constructed and stays fixed for the whole session.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FlightParams {
    /// EWMA smoothing constant for the altitude filter.
    pub smoothing_alpha: f32,
    /// Climb rate above which a tick counts as rising evidence.
    pub rising_threshold_m_s: f32,
    /// Climb rate below which a tick counts as falling evidence. Must leave
    /// a dead zone below `rising_threshold_m_s`.
    pub falling_threshold_m_s: f32,
    pub sampling_period_ms: u32,
    pub log_base_name: String,
    pub log_extension: String,
    /// Number of candidate log-target names probed before the logger gives
    /// up on storage and degrades to console-only.
    pub log_probe_cap: u32,
}

impl Default for FlightParams {
    fn default() -> Self {
        FlightParams {
            smoothing_alpha: 0.9,
            rising_threshold_m_s: 5.0,
            falling_threshold_m_s: -5.0,
            sampling_period_ms: 20,
            log_base_name: "flight".to_string(),
            log_extension: ".log".to_string(),
            log_probe_cap: 100,
        }
    }
}

impl FlightParams {
    pub fn from_toml(text: &str) -> Result<Self, ParamsError> {
        let params: FlightParams = toml::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    /// Rejects configurations the steady-state tick could not handle.
    /// Performed once at construction; the tick itself stays total.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha < 1.0) {
            return Err(ParamsError::BadSmoothing(self.smoothing_alpha));
        }

        if self.sampling_period_ms == 0 {
            return Err(ParamsError::ZeroSamplingPeriod);
        }

        if self.falling_threshold_m_s >= self.rising_threshold_m_s {
            return Err(ParamsError::OverlappingThresholds {
                rising: self.rising_threshold_m_s,
                falling: self.falling_threshold_m_s,
            });
        }

        if self.log_probe_cap == 0 {
            return Err(ParamsError::ZeroProbeCap);
        }

        Ok(())
    }
}
