//! Breathing configuration and presets

use embassy_time::Duration;

use crate::waveform::Wave;

/// Configuration of a breathing session
///
/// Applied as a whole by the task: readers never see a mix of two configurations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BreathConfig {
    /// The wave to play
    pub pattern: Wave,
    /// Time each brightness level is held, e.g. 1ms
    pub cadence: Duration,
    /// Number of steps in one half-sweep of the wave
    pub resolution: u16,
    /// Gaussian peak position within the sweep, usually 0.5
    pub beta: f32,
    /// Gaussian width: 0.01 is mostly dark, 1.0 is mostly bright
    pub gamma: f32,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Stepping wave with a zero cadence
    ZeroCadence,
    /// Stepping wave with zero steps per sweep
    ZeroResolution,
    /// Gaussian with a width that is zero, negative or not finite
    InvalidGaussianWidth,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroCadence => write!(f, "cadence must be greater than zero"),
            ConfigError::ZeroResolution => write!(f, "resolution must be greater than zero"),
            ConfigError::InvalidGaussianWidth => {
                write!(f, "gaussian gamma must be a finite value greater than zero")
            }
        }
    }
}

impl BreathConfig {
    /// Linear ramp
    pub const fn triangular(cadence: Duration, resolution: u16) -> Self {
        Self::with_pattern(Wave::Triangular, cadence, resolution)
    }

    /// Semicircular ramp
    pub const fn circular(cadence: Duration, resolution: u16) -> Self {
        Self::with_pattern(Wave::Circular, cadence, resolution)
    }

    /// Bell curve
    pub const fn gaussian(cadence: Duration, resolution: u16, beta: f32, gamma: f32) -> Self {
        Self {
            pattern: Wave::Gaussian,
            cadence,
            resolution,
            beta,
            gamma,
        }
    }

    /// Freeze the output in place
    pub const fn hold() -> Self {
        Self::with_pattern(Wave::Hold, Duration::from_ticks(0), 0)
    }

    /// End the breathing session
    pub const fn stop() -> Self {
        Self::with_pattern(Wave::Stop, Duration::from_ticks(0), 0)
    }

    /// Circular sweep over 750 steps of 1ms
    pub const fn bouncy() -> Self {
        Self::circular(Duration::from_millis(1), 750)
    }

    /// Short sharp gaussian pulse over 750 steps of 1ms
    pub const fn pingy() -> Self {
        Self::gaussian(Duration::from_millis(1), 750, 0.5, 0.01)
    }

    /// Slow wide gaussian fade over 1250 steps of 1ms
    pub const fn relaxy() -> Self {
        Self::gaussian(Duration::from_millis(1), 1250, 0.5, 0.15)
    }

    const fn with_pattern(pattern: Wave, cadence: Duration, resolution: u16) -> Self {
        Self {
            pattern,
            cadence,
            resolution,
            beta: 0.5,
            gamma: 1.0,
        }
    }

    /// Check that a stepping wave can be sampled
    ///
    /// Hold and Stop never step, so their timing fields are not checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.pattern.is_stepping() {
            return Ok(());
        }
        if self.cadence.as_ticks() == 0 {
            return Err(ConfigError::ZeroCadence);
        }
        if self.resolution == 0 {
            return Err(ConfigError::ZeroResolution);
        }
        if self.pattern == Wave::Gaussian && !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(ConfigError::InvalidGaussianWidth);
        }
        Ok(())
    }

    /// Sample the configured wave at the given step
    pub fn brightness(&self, step: i32) -> Option<f32> {
        self.pattern
            .brightness(step, self.resolution, self.beta, self.gamma)
    }
}

impl Default for BreathConfig {
    fn default() -> Self {
        Self::stop()
    }
}
