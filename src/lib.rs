#![no_std]

//! Breathing light driver for PWM outputs
//!
//! A [`BreathTask`] samples a waveform at a fixed cadence and writes the result
//! to a PWM channel. The application reconfigures it at any time through a
//! [`Breather`], which delivers commands through a single-slot mailbox: a newer
//! configuration replaces one the task has not picked up yet.
//!
//! ```ignore
//! static BREATHER: Breather = Breather::new();
//!
//! #[embassy_executor::task]
//! async fn breath_task(output: PwmOutput<PwmChannel>) {
//!     if let Some(mut task) = BREATHER.task(output) {
//!         task.run().await;
//!     }
//! }
//!
//! let _ = BREATHER.breathe(BreathConfig::bouncy());
//! ```

pub mod breather;
pub mod config;
pub mod mailbox;
pub mod output;
pub mod task;
pub mod waveform;

pub use breather::{Breather, Command, Dispatch};
pub use config::{BreathConfig, ConfigError};
pub use mailbox::Mailbox;
pub use output::{ChannelProvider, PwmOutput, fraction_to_duty};
pub use task::{BreathTask, Tick};
pub use waveform::{PingPong, Wave};

pub use embassy_time::{Duration, Instant};
