use derive_more::{Display, Error};

/// Errors from converting raw configuration bytes into [`Channel`](crate::Channel),
/// [`Mode`](crate::Mode) or [`Pin`](crate::pins::Pin).
///
/// Driving the PWM itself never fails; see [`Pwm16::write`](crate::Pwm16::write).
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Channel index outside `0..=3`.
    #[display("invalid channel index {_0} (expected 0..=3)")]
    InvalidChannel(#[error(not(source))] u8),

    /// Mode index outside `0..=2`.
    #[display("invalid mode index {_0} (expected 0..=2)")]
    InvalidMode(#[error(not(source))] u8),

    /// Arduino pin number that carries none of the PWM outputs.
    #[display("pin D{_0} is not a PWM output of this driver")]
    InvalidPin(#[error(not(source))] u8),
}

/// Result type for this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
