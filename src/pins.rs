//! The six PWM output pins and the GPIO collaborator that drives them.

use embedded_hal::digital::PinState;

use crate::{Error, Result};

/// I/O port of an output pin.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    /// PORTB.
    B,
    /// PORTD.
    D,
}

/// A compare-output pin, named by its Arduino Uno/Nano digital number.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pin {
    /// PD3, OC2B.
    D3,
    /// PD5, OC0B.
    D5,
    /// PD6, OC0A.
    D6,
    /// PB1, OC1A.
    D9,
    /// PB2, OC1B.
    D10,
    /// PB3, OC2A.
    D11,
}

impl Pin {
    /// All output pins.
    pub const ALL: [Self; 6] = [
        Self::D3,
        Self::D5,
        Self::D6,
        Self::D9,
        Self::D10,
        Self::D11,
    ];

    /// Arduino digital pin number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::D3 => 3,
            Self::D5 => 5,
            Self::D6 => 6,
            Self::D9 => 9,
            Self::D10 => 10,
            Self::D11 => 11,
        }
    }

    /// Port holding this pin.
    #[must_use]
    pub const fn port(self) -> Port {
        match self {
            Self::D3 | Self::D5 | Self::D6 => Port::D,
            Self::D9 | Self::D10 | Self::D11 => Port::B,
        }
    }

    /// Bit mask of this pin within its port's DDR/PORT registers.
    #[must_use]
    pub const fn mask(self) -> u8 {
        match self {
            Self::D3 | Self::D11 => 1 << 3,
            Self::D5 => 1 << 5,
            Self::D6 => 1 << 6,
            Self::D9 => 1 << 1,
            Self::D10 => 1 << 2,
        }
    }
}

impl TryFrom<u8> for Pin {
    type Error = Error;

    fn try_from(number: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|pin| pin.number() == number)
            .ok_or(Error::InvalidPin(number))
    }
}

/// Pin direction and level control, provided by the platform.
///
/// `set_level` must not touch any timer compare-output bits; the driver disconnects
/// the compare unit itself before it drives a static level.
pub trait Gpio {
    /// Make `pin` an output. Idempotent.
    fn set_output(&mut self, pin: Pin);

    /// Drive `pin` to `level`.
    fn set_level(&mut self, pin: Pin, level: PinState);
}
