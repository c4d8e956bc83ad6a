//! 16-bit PWM for the ATmega328P/168 built from the chip's 8-bit timers.
//!
//! Timer1 is a native 16-bit timer and drives two channels on its own. Timer0 and
//! Timer2 only have 8-bit compare registers, so each of their channel pairs is
//! combined through an external flip-flop: one timer runs at the full clock and
//! carries the low byte of the duty code, the other runs at clock/256 and carries
//! the high byte. See [`Pwm16`] for usage.
//!
//! # Glossary
//!
//! - **High half / Low half:** the most-/least-significant byte role of one of the two
//!   8-bit timers that together emulate a 16-bit compare value.
//! - **Flip-flop / latch:** the external bistable circuit toggled by the low-half
//!   timer's output edge.
//! - **Duty code:** the caller-facing 16-bit on-time, `0x0000` fully off, `0xFFFF`
//!   fully on.
//! - **OCR:** the literal value written into a compare register. It is derived from,
//!   but not identical to, the encoded duty byte.
//! - **Synchronization:** aligning the phase of all three timer counters once at
//!   startup.
#![cfg_attr(not(feature = "host"), no_std)]

// Compile-time checks: exactly one chip must be selected (unless testing with host feature)
#[cfg(all(
    not(any(feature = "atmega328p", feature = "atmega168")),
    not(feature = "host")
))]
compile_error!("Must enable exactly one chip feature: 'atmega328p' or 'atmega168'");

#[cfg(all(feature = "atmega328p", feature = "atmega168"))]
compile_error!("Cannot enable both 'atmega328p' and 'atmega168' features simultaneously");

mod fmt;

#[cfg(any(feature = "atmega328p", feature = "atmega168"))]
pub mod avr;
pub mod channel;
pub mod configure;
mod driver;
pub mod duty;
mod error;
pub mod pins;
pub mod registers;
#[cfg(feature = "host")]
pub mod sim;
pub mod sync;

pub use crate::channel::{Channel, Half, Mode};
pub use crate::driver::Pwm16;
pub use crate::duty::{EncodedDuty, encode};
pub use crate::error::{Error, Result};
