//! Splitting a 16-bit duty code into the bytes carried by the two 8-bit timers.
//!
//! | code            | result                                   |
//! |-----------------|------------------------------------------|
//! | `0x0000`        | [`EncodedDuty::FullyOff`], static low    |
//! | `0xFFFF`        | [`EncodedDuty::FullyOn`], static high    |
//! | anything else   | `code + 1` split into high and low bytes |
//!
//! The `+ 1` reserves a zero byte as "drive this half low and clear the
//! flip-flop" instead of spending it on a 1/256 step. As a consequence a code on an
//! 8-bit boundary lands one step high: `0x00FF` produces the duty of `0x0100`.

/// Duty code that drives a channel fully off.
pub const FULLY_OFF: u16 = 0x0000;

/// Duty code that drives a channel fully on.
pub const FULLY_ON: u16 = 0xFFFF;

/// A duty code split for the two auxiliary timers.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodedDuty {
    /// `0x0000`: both halves static low.
    FullyOff,
    /// `0xFFFF`: both halves static high.
    FullyOn,
    /// Intermediate code. A zero byte means that half is driven low and the latch
    /// is cleared; it is never written as a compare value.
    Pwm {
        /// Byte for the high-half timer.
        high: u8,
        /// Byte for the low-half timer.
        low: u8,
    },
}

/// Encode a duty code.
///
/// ```
/// use pwm16::{EncodedDuty, encode};
///
/// assert_eq!(encode(0x0100), EncodedDuty::Pwm { high: 1, low: 1 });
/// assert_eq!(encode(0x00FF), EncodedDuty::Pwm { high: 1, low: 0 });
/// assert_eq!(encode(0xFFFF), EncodedDuty::FullyOn);
/// ```
#[must_use]
pub const fn encode(code: u16) -> EncodedDuty {
    match code {
        FULLY_OFF => EncodedDuty::FullyOff,
        FULLY_ON => EncodedDuty::FullyOn,
        _ => {
            // No overflow: code <= 0xFFFE here.
            let [high, low] = code.wrapping_add(1).to_be_bytes();
            EncodedDuty::Pwm { high, low }
        }
    }
}

impl EncodedDuty {
    /// Recover the duty code this encoding came from.
    #[must_use]
    pub const fn decode(self) -> u16 {
        match self {
            Self::FullyOff => FULLY_OFF,
            Self::FullyOn => FULLY_ON,
            Self::Pwm { high, low } => u16::from_be_bytes([high, low]).wrapping_sub(1),
        }
    }
}

/// Compare value for an encoded byte: `byte - 1`, or `None` for the zero sentinel.
#[must_use]
pub const fn duty_to_ocr(byte: u8) -> Option<u8> {
    byte.checked_sub(1)
}
