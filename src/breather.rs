//! Caller-facing breather handle
//!
//! Shared between the application and the breathing task. Holds the
//! reconfiguration mailbox, the stop request, the running flag and the last
//! applied configuration behind one critical-section mutex, so a stop racing a
//! fresh start can never leave two sessions alive or a mailbox nobody drains.
//!
//! Stop is kept apart from the mailbox: a configuration posted after a stop
//! cannot displace it, and starts a fresh session once the old one has ended.

use core::cell::RefCell;
use core::future::poll_fn;
use core::task::Poll;

use critical_section::Mutex;
use embassy_sync::waitqueue::AtomicWaker;
use embedded_hal::pwm::SetDutyCycle;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config::{BreathConfig, ConfigError};
use crate::mailbox::Mailbox;
use crate::output::PwmOutput;
use crate::task::BreathTask;
use crate::waveform::Wave;

/// Message delivered from the breather to its task
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Apply a new configuration, starting a session if idle
    Configure(BreathConfig),
    /// Drive the output low and end the session
    Stop,
}

/// Outcome of a [`Breather::breathe`] or [`Breather::stop`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// No session was running; the task starts one on receipt
    Started,
    /// Delivered to the running session
    Reconfigured,
    /// Delivered, replacing a command the task had not picked up yet
    Superseded,
    /// The running session will shut down
    StopRequested,
    /// Nothing was running, nothing to stop
    AlreadyStopped,
}

struct Control {
    mailbox: Mailbox<BreathConfig, 1>,
    stop_pending: bool,
    running: bool,
    task_taken: bool,
    applied: BreathConfig,
}

impl Control {
    fn is_pending(&self) -> bool {
        self.stop_pending || self.mailbox.is_pending()
    }
}

/// Breathing light handle
///
/// Usually placed in a `static` and shared between the code choosing patterns
/// and the task writing to the PWM channel.
pub struct Breather {
    control: Mutex<RefCell<Control>>,
    waker: AtomicWaker,
}

impl Breather {
    pub const fn new() -> Self {
        Self {
            control: Mutex::new(RefCell::new(Control {
                mailbox: Mailbox::new(),
                stop_pending: false,
                running: false,
                task_taken: false,
                applied: BreathConfig::stop(),
            })),
            waker: AtomicWaker::new(),
        }
    }

    /// Create the task driving `output` for this breather
    ///
    /// A breather has at most one task. Returns `None` while another task for
    /// it is alive; dropping that task frees the slot.
    pub fn task<P: SetDutyCycle>(&self, output: PwmOutput<P>) -> Option<BreathTask<'_, P>> {
        let taken = critical_section::with(|cs| {
            let mut control = self.control.borrow_ref_mut(cs);
            core::mem::replace(&mut control.task_taken, true)
        });
        if taken {
            #[cfg(feature = "esp32-log")]
            println!("[Breather.task] breather already has a task");
            return None;
        }
        Some(BreathTask::new(self, output))
    }

    /// Start breathing or change the running pattern
    ///
    /// Passing [`Wave::Stop`] is the same as calling [`stop`](Self::stop).
    /// Never blocks: a configuration the task has not picked up yet is replaced.
    pub fn breathe(&self, config: BreathConfig) -> Result<Dispatch, ConfigError> {
        if config.pattern == Wave::Stop {
            return Ok(self.stop());
        }
        if let Err(err) = config.validate() {
            #[cfg(feature = "esp32-log")]
            println!("[Breather.breathe] rejected {:?}: {}", config.pattern, err);
            return Err(err);
        }

        let dispatch = critical_section::with(|cs| {
            let mut control = self.control.borrow_ref_mut(cs);
            let displaced = control.mailbox.post(config);
            if !control.running {
                control.running = true;
                Dispatch::Started
            } else if displaced.is_some() {
                Dispatch::Superseded
            } else if control.stop_pending {
                Dispatch::Started
            } else {
                Dispatch::Reconfigured
            }
        });
        self.waker.wake();

        #[cfg(feature = "esp32-log")]
        println!("[Breather.breathe] {:?} -> {:?}", config.pattern, dispatch);
        Ok(dispatch)
    }

    /// Ask the running session to turn the output off and end
    ///
    /// Drops a configuration the task has not picked up yet. Does nothing when
    /// no session is running.
    pub fn stop(&self) -> Dispatch {
        let dispatch = critical_section::with(|cs| {
            let mut control = self.control.borrow_ref_mut(cs);
            if !control.running {
                return Dispatch::AlreadyStopped;
            }
            control.mailbox.take();
            control.stop_pending = true;
            Dispatch::StopRequested
        });
        if dispatch == Dispatch::StopRequested {
            self.waker.wake();
        }
        dispatch
    }

    /// Last configuration applied by the task
    pub fn current_config(&self) -> BreathConfig {
        critical_section::with(|cs| self.control.borrow_ref(cs).applied)
    }

    /// Check if a session is running or about to start
    pub fn is_running(&self) -> bool {
        critical_section::with(|cs| self.control.borrow_ref(cs).running)
    }

    /// Take the pending command, if any
    ///
    /// A stop request comes first; a configuration posted after it stays in the
    /// mailbox for the next call.
    pub(crate) fn take(&self) -> Option<Command> {
        critical_section::with(|cs| {
            let mut control = self.control.borrow_ref_mut(cs);
            if core::mem::take(&mut control.stop_pending) {
                return Some(Command::Stop);
            }
            control.mailbox.take().map(Command::Configure)
        })
    }

    /// Record the configuration the task just applied
    pub(crate) fn publish(&self, config: BreathConfig) {
        critical_section::with(|cs| self.control.borrow_ref_mut(cs).applied = config);
    }

    /// Mark the session as ended
    ///
    /// A start that raced in after the stop was taken keeps the breather running;
    /// the task picks it up as a fresh session.
    pub(crate) fn finish(&self) {
        critical_section::with(|cs| {
            let mut control = self.control.borrow_ref_mut(cs);
            let pending = control.is_pending();
            control.applied.pattern = Wave::Stop;
            control.running = pending;
        });
    }

    /// Free the task slot and forget any session state
    pub(crate) fn release(&self) {
        critical_section::with(|cs| {
            let mut control = self.control.borrow_ref_mut(cs);
            control.mailbox.take();
            control.stop_pending = false;
            control.running = false;
            control.task_taken = false;
            control.applied.pattern = Wave::Stop;
        });
    }

    /// Wait until a command is pending
    pub(crate) async fn pending(&self) {
        poll_fn(|cx| {
            self.waker.register(cx.waker());
            let pending =
                critical_section::with(|cs| self.control.borrow_ref(cs).is_pending());
            if pending { Poll::Ready(()) } else { Poll::Pending }
        })
        .await;
    }
}

impl Default for Breather {
    fn default() -> Self {
        Self::new()
    }
}
