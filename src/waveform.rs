//! Breathing waveforms
//!
//! Pure functions mapping a ping-pong step to a brightness fraction in `0.0..=1.0`.
//! The step counter sweeps `0 → resolution`, flips to `-resolution` and climbs
//! back to zero, so every wave is sampled at phase `|step| / resolution`.

const WAVE_NAME_TRIANGULAR: &str = "triangular";
const WAVE_NAME_CIRCULAR: &str = "circular";
const WAVE_NAME_GAUSSIAN: &str = "gaussian";
const WAVE_NAME_HOLD: &str = "hold";
const WAVE_NAME_STOP: &str = "stop";

const WAVE_ID_TRIANGULAR: u8 = 0;
const WAVE_ID_CIRCULAR: u8 = 1;
const WAVE_ID_GAUSSIAN: u8 = 2;
const WAVE_ID_HOLD: u8 = 3;
const WAVE_ID_STOP: u8 = 4;

/// Breathing pattern
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Wave {
    /// Linear ramp up and down, dark at the sweep ends and peaking mid-sweep
    #[default]
    Triangular = WAVE_ID_TRIANGULAR,
    /// Semicircle, fast at the edges and slow at the peak
    Circular = WAVE_ID_CIRCULAR,
    /// Bell curve shaped by `beta` (center) and `gamma` (width)
    Gaussian = WAVE_ID_GAUSSIAN,
    /// Freezes the output at its last value
    Hold = WAVE_ID_HOLD,
    /// Turns the output off and ends the breathing session
    Stop = WAVE_ID_STOP,
}

impl Wave {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            WAVE_ID_TRIANGULAR => Self::Triangular,
            WAVE_ID_CIRCULAR => Self::Circular,
            WAVE_ID_GAUSSIAN => Self::Gaussian,
            WAVE_ID_HOLD => Self::Hold,
            WAVE_ID_STOP => Self::Stop,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub fn parse_from_str(value: &str) -> Option<Self> {
        Some(match value {
            WAVE_NAME_TRIANGULAR => Self::Triangular,
            WAVE_NAME_CIRCULAR => Self::Circular,
            WAVE_NAME_GAUSSIAN => Self::Gaussian,
            WAVE_NAME_HOLD => Self::Hold,
            WAVE_NAME_STOP => Self::Stop,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Triangular => WAVE_NAME_TRIANGULAR,
            Self::Circular => WAVE_NAME_CIRCULAR,
            Self::Gaussian => WAVE_NAME_GAUSSIAN,
            Self::Hold => WAVE_NAME_HOLD,
            Self::Stop => WAVE_NAME_STOP,
        }
    }

    /// Check if the wave produces samples (advances the step counter)
    pub const fn is_stepping(self) -> bool {
        matches!(self, Self::Triangular | Self::Circular | Self::Gaussian)
    }

    /// Sample the wave at the given step
    ///
    /// Returns `None` for [`Wave::Hold`] and [`Wave::Stop`], which never write.
    pub fn brightness(self, step: i32, resolution: u16, beta: f32, gamma: f32) -> Option<f32> {
        let p = phase(step, resolution);
        let value = match self {
            Self::Triangular => triangular(p),
            Self::Circular => circular(p),
            Self::Gaussian => gaussian(p, beta, gamma),
            Self::Hold | Self::Stop => return None,
        };
        Some(normalize(value))
    }
}

/// Position within a half-sweep, `0.0..=1.0`
#[allow(clippy::cast_precision_loss)]
pub fn phase(step: i32, resolution: u16) -> f32 {
    if resolution == 0 {
        return 0.0;
    }
    let p = step.unsigned_abs() as f32 / f32::from(resolution);
    p.min(1.0)
}

/// Linear ramp peaking at the middle of the sweep
pub fn triangular(phase: f32) -> f32 {
    1.0 - libm::fabsf(2.0 * phase - 1.0)
}

/// Semicircular profile peaking at the middle of the sweep
pub fn circular(phase: f32) -> f32 {
    let x = 2.0 * phase - 1.0;
    libm::sqrtf((1.0 - x * x).max(0.0))
}

/// Gaussian bell centered at `beta` with width `gamma`
pub fn gaussian(phase: f32, beta: f32, gamma: f32) -> f32 {
    let z = (phase - beta) / gamma;
    libm::expf(-(z * z) / 2.0)
}

/// Clamp a sample into `0.0..=1.0`, mapping NaN to zero
fn normalize(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Step counter that reflects at the resolution boundary
///
/// Counts up from `-resolution`; reaching `+resolution` flips the sign instead
/// of wrapping to zero, so the sweep continues without a discontinuity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingPong {
    step: i32,
    resolution: i32,
}

impl PingPong {
    pub const fn new(resolution: u16) -> Self {
        Self {
            step: 0,
            resolution: resolution as i32,
        }
    }

    pub const fn step(&self) -> i32 {
        self.step
    }

    pub fn resolution(&self) -> u16 {
        u16::try_from(self.resolution).unwrap_or(u16::MAX)
    }

    /// Move to the next step
    pub fn advance(&mut self) {
        self.step += 1;
        if self.step >= self.resolution {
            self.step = -self.resolution;
        }
    }

    /// Change the resolution, keeping the step within the new bounds
    pub fn set_resolution(&mut self, resolution: u16) {
        self.resolution = i32::from(resolution);
        self.step = self.step.clamp(-self.resolution, self.resolution);
    }
}
