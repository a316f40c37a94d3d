//! Shared test infrastructure for myrtio-breath integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};
use myrtio_breath::ChannelProvider;

pub const MAX_DUTY: u16 = 1000;

// ============================================================================
// Mock PWM channel
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPwmError;

impl embedded_hal::pwm::Error for MockPwmError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Handle to inspect what a [`MockPwm`] received after it moved into a task
#[derive(Clone, Default)]
pub struct PwmProbe {
    writes: Rc<RefCell<Vec<u16>>>,
    failing: Rc<Cell<bool>>,
}

impl PwmProbe {
    pub fn writes(&self) -> Vec<u16> {
        self.writes.borrow().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }

    pub fn last(&self) -> Option<u16> {
        self.writes.borrow().last().copied()
    }

    /// Make every following write fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

/// Mock PWM channel recording every successful duty cycle write
pub struct MockPwm {
    max_duty: u16,
    probe: PwmProbe,
}

impl MockPwm {
    pub fn new(max_duty: u16) -> (Self, PwmProbe) {
        let probe = PwmProbe::default();
        (
            Self {
                max_duty,
                probe: probe.clone(),
            },
            probe,
        )
    }
}

impl ErrorType for MockPwm {
    type Error = MockPwmError;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if self.probe.failing.get() {
            return Err(MockPwmError);
        }
        self.probe.writes.borrow_mut().push(duty);
        Ok(())
    }
}

// ============================================================================
// Mock PWM peripheral
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoChannelForPin(pub u8);

/// PWM slice with two channels, wired to pins 0 and 1
pub struct MockSlice {
    pub probe: PwmProbe,
}

impl ChannelProvider<u8> for MockSlice {
    type Channel = MockPwm;
    type Error = NoChannelForPin;

    fn channel(&mut self, pin: u8) -> Result<Self::Channel, Self::Error> {
        if pin > 1 {
            return Err(NoChannelForPin(pin));
        }
        Ok(MockPwm {
            max_duty: MAX_DUTY,
            probe: self.probe.clone(),
        })
    }
}
