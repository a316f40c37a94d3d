//! Breathing task
//!
//! Owns the PWM output and the waveform state. Each [`tick`](BreathTask::tick)
//! drains the breather's mailbox without blocking, then writes the next sample
//! once the cadence window has elapsed. [`run`](BreathTask::run) wraps ticks in
//! an async loop that sleeps until the next deadline or the next command.

use embassy_futures::select::select;
use embassy_futures::yield_now;
use embassy_time::{Instant, Timer};
use embedded_hal::pwm::SetDutyCycle;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::breather::{Breather, Command};
use crate::config::BreathConfig;
use crate::output::PwmOutput;
use crate::waveform::{PingPong, Wave};

/// Result of a single task iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// No session; nothing to do until a command arrives
    Idle,
    /// Session frozen by [`Wave::Hold`]; nothing to do until a command arrives
    Holding,
    /// A command was handled; tick again right away
    Applied,
    /// A sample was written
    Stepped {
        /// Duty cycle computed for this step
        duty: u16,
        /// When the next sample is due
        next: Instant,
    },
    /// The cadence window is still open
    Waiting(Instant),
}

/// State of a running breathing session
#[derive(Debug, Clone, Copy)]
struct Session {
    config: BreathConfig,
    step: PingPong,
    holding: bool,
    last_step: Option<Instant>,
}

impl Session {
    fn new(config: BreathConfig) -> Self {
        let mut session = Self {
            config,
            step: PingPong::new(config.resolution),
            holding: false,
            last_step: None,
        };
        session.reconfigure(config);
        session
    }

    fn reconfigure(&mut self, config: BreathConfig) {
        self.config = config;
        self.holding = config.pattern == Wave::Hold;
        if config.pattern.is_stepping() {
            self.step.set_resolution(config.resolution);
        }
    }

    fn deadline(&self) -> Option<Instant> {
        self.last_step.map(|last| last + self.config.cadence)
    }
}

/// Task writing breathing samples to a PWM output
pub struct BreathTask<'a, P> {
    breather: &'a Breather,
    output: PwmOutput<P>,
    session: Option<Session>,
}

impl<'a, P: SetDutyCycle> BreathTask<'a, P> {
    /// Create a task for `breather` driving `output`
    pub(crate) fn new(breather: &'a Breather, output: PwmOutput<P>) -> Self {
        Self {
            breather,
            output,
            session: None,
        }
    }

    /// Run one iteration of the breathing loop
    pub fn tick(&mut self, now: Instant) -> Tick {
        if let Some(command) = self.breather.take() {
            match command {
                Command::Configure(config) => self.apply(config),
                Command::Stop => self.shutdown(),
            }
            return Tick::Applied;
        }

        let Some(session) = self.session.as_mut() else {
            return Tick::Idle;
        };
        if session.holding {
            return Tick::Holding;
        }
        if let Some(deadline) = session.deadline() {
            if now < deadline {
                return Tick::Waiting(deadline);
            }
        }

        let Some(fraction) = session.config.brightness(session.step.step()) else {
            return Tick::Holding;
        };
        let duty = self.output.set_brightness(fraction);
        session.last_step = Some(now);
        session.step.advance();

        Tick::Stepped {
            duty,
            next: now + session.config.cadence,
        }
    }

    /// Drive the breathing loop forever
    ///
    /// Suspends while idle or holding until a command arrives, and between
    /// samples until the cadence deadline or a command, whichever comes first.
    pub async fn run(&mut self) {
        let breather = self.breather;
        loop {
            match self.tick(Instant::now()) {
                Tick::Idle | Tick::Holding => breather.pending().await,
                Tick::Applied => yield_now().await,
                Tick::Stepped { next, .. } | Tick::Waiting(next) => {
                    select(breather.pending(), Timer::at(next)).await;
                }
            }
        }
    }

    /// Output being driven
    pub fn output(&self) -> &PwmOutput<P> {
        &self.output
    }

    /// Current step of the session, `None` while idle
    pub fn step(&self) -> Option<i32> {
        self.session.map(|session| session.step.step())
    }

    /// Check if the session is frozen by [`Wave::Hold`]
    pub fn is_holding(&self) -> bool {
        self.session.is_some_and(|session| session.holding)
    }

    /// Check if a session is in progress
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    fn apply(&mut self, config: BreathConfig) {
        match self.session.as_mut() {
            Some(session) => session.reconfigure(config),
            None => {
                #[cfg(feature = "esp32-log")]
                println!("[BreathTask.apply] starting session with {:?}", config.pattern);
                self.session = Some(Session::new(config));
            }
        }
        self.breather.publish(config);
    }

    fn shutdown(&mut self) {
        self.output.off();
        self.session = None;
        self.breather.finish();

        #[cfg(feature = "esp32-log")]
        println!("[BreathTask.shutdown] session stopped");
    }
}

impl<P> Drop for BreathTask<'_, P> {
    fn drop(&mut self) {
        self.breather.release();
    }
}
