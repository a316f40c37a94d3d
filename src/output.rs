//! PWM output adapter
//!
//! Wraps an `embedded-hal` PWM channel. The breathing task is a best-effort
//! indicator: a channel that could not be acquired turns into a no-op output,
//! and failed writes are logged and skipped.

use core::fmt::Debug;

use embedded_hal::pwm::SetDutyCycle;

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// Source of PWM channels, e.g. a PWM slice that can drive several pins
///
/// Implement this for your PWM peripheral. Pin and peripheral setup happen
/// before the channel is requested.
pub trait ChannelProvider<Pin> {
    type Channel: SetDutyCycle;
    type Error: Debug;

    /// Obtain the channel wired to `pin`
    fn channel(&mut self, pin: Pin) -> Result<Self::Channel, Self::Error>;
}

/// Convert a brightness fraction into a duty cycle value
///
/// The fraction is clamped into `0.0..=1.0`, scaled by `max_duty` and rounded.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn fraction_to_duty(fraction: f32, max_duty: u16) -> u16 {
    if fraction.is_nan() {
        return 0;
    }
    let scaled = libm::roundf(fraction.clamp(0.0, 1.0) * f32::from(max_duty));
    (scaled as u16).min(max_duty)
}

/// PWM output driven by the breathing task
#[derive(Debug)]
pub struct PwmOutput<P> {
    channel: Option<P>,
    max_duty: u16,
    duty: u16,
}

impl<P: SetDutyCycle> PwmOutput<P> {
    /// Wrap an acquired channel
    pub fn new(channel: P) -> Self {
        let max_duty = channel.max_duty_cycle();
        Self {
            channel: Some(channel),
            max_duty,
            duty: 0,
        }
    }

    /// Output that ignores all writes
    pub const fn degraded() -> Self {
        Self {
            channel: None,
            max_duty: 0,
            duty: 0,
        }
    }

    /// Wrap the result of a channel acquisition
    ///
    /// An error is logged and produces a [degraded](Self::degraded) output.
    pub fn acquire<E: Debug>(channel: Result<P, E>) -> Self {
        match channel {
            Ok(channel) => Self::new(channel),
            Err(_err) => {
                #[cfg(feature = "esp32-log")]
                println!("[PwmOutput.acquire] could not obtain channel: {:?}", _err);
                Self::degraded()
            }
        }
    }

    /// Obtain the channel for `pin` from a PWM peripheral
    pub fn for_pin<Pin, C>(pin: Pin, provider: &mut C) -> Self
    where
        C: ChannelProvider<Pin, Channel = P>,
    {
        Self::acquire(provider.channel(pin))
    }

    /// Check if writes are being ignored
    pub const fn is_degraded(&self) -> bool {
        self.channel.is_none()
    }

    /// Maximum duty cycle of the channel, zero when degraded
    pub const fn max_duty(&self) -> u16 {
        self.max_duty
    }

    /// Last duty cycle successfully written
    pub const fn duty(&self) -> u16 {
        self.duty
    }

    /// Write a brightness fraction, returning the duty cycle it maps to
    pub fn set_brightness(&mut self, fraction: f32) -> u16 {
        let duty = fraction_to_duty(fraction, self.max_duty);
        self.set_duty(duty);
        duty
    }

    /// Drive the output to zero duty cycle
    pub fn off(&mut self) {
        self.set_duty(0);
    }

    /// Give the channel back
    pub fn into_inner(self) -> Option<P> {
        self.channel
    }

    fn set_duty(&mut self, duty: u16) {
        let Some(channel) = self.channel.as_mut() else {
            return;
        };
        match channel.set_duty_cycle(duty) {
            Ok(()) => self.duty = duty,
            Err(_err) => {
                #[cfg(feature = "esp32-log")]
                println!("[PwmOutput.set_duty] write of {} failed: {:?}", duty, _err);
            }
        }
    }
}
