//! Operating modes, logical channels, and which timer plays which half.
//!
//! Nothing here is stored: every role is recomputed from the [`Mode`] on use, so a
//! half assignment can never disagree with the mode it was derived from.

use crate::pins::Pin;
use crate::registers::{AuxTimer, SubChannel};
use crate::{Error, Result};

// ============================================================================
// Mode
// ============================================================================

/// Operating mode, fixed when the [`Pwm16`](crate::Pwm16) is created.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Only Timer1's two channels ([`Channel::Ch0A`], [`Channel::Ch0B`]). Timer0 and
    /// Timer2 are left alone, so `millis()`-style timebases on Timer0 keep working.
    TwoChannel,
    /// All four channels; Timer2 is the high half and Timer0 the low half.
    FourChannel,
    /// All four channels; Timer0 is the high half and Timer2 the low half.
    FourChannelReversed,
}

impl Mode {
    /// Whether the auxiliary timers' roles are swapped.
    #[must_use]
    pub const fn is_reversed(self) -> bool {
        matches!(self, Self::FourChannelReversed)
    }

    /// Whether the auxiliary timer pair generates PWM in this mode.
    #[must_use]
    pub const fn uses_auxiliary_timers(self) -> bool {
        !matches!(self, Self::TwoChannel)
    }

    /// The auxiliary timer playing `half`.
    #[must_use]
    pub fn aux_timer(self, half: Half) -> AuxTimer {
        if is_timer_half(self, AuxTimer::Timer0, half) {
            AuxTimer::Timer0
        } else {
            AuxTimer::Timer2
        }
    }

    /// The half played by `aux`.
    #[must_use]
    pub fn half_of(self, aux: AuxTimer) -> Half {
        if is_timer_half(self, aux, Half::High) {
            Half::High
        } else {
            Half::Low
        }
    }
}

impl TryFrom<u8> for Mode {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self> {
        match index {
            0 => Ok(Self::TwoChannel),
            1 => Ok(Self::FourChannel),
            2 => Ok(Self::FourChannelReversed),
            _ => Err(Error::InvalidMode(index)),
        }
    }
}

// ============================================================================
// Half
// ============================================================================

/// Byte role of an auxiliary timer within a channel.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Half {
    /// Most-significant byte; prescaler /256, non-inverting output.
    High,
    /// Least-significant byte; prescaler /1, inverting output (it clocks the flip-flop).
    Low,
}

/// Whether `timer` plays `half` in `mode`.
///
/// `(timer is Timer0) XOR (mode is reversed) XOR (half is High)`.
#[must_use]
pub fn is_timer_half(mode: Mode, timer: AuxTimer, half: Half) -> bool {
    (timer == AuxTimer::Timer0) ^ mode.is_reversed() ^ (half == Half::High)
}

// ============================================================================
// Channel
// ============================================================================

/// A logical 16-bit output.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Timer1 compare A on D9.
    Ch0A,
    /// Timer1 compare B on D10.
    Ch0B,
    /// Timer0/Timer2 compare A on D6 and D11, combined by a flip-flop.
    Ch1A,
    /// Timer0/Timer2 compare B on D5 and D3, combined by a flip-flop.
    Ch1B,
}

/// Which hardware generates a channel.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Route {
    /// Timer1 alone, full 16-bit compare.
    Primary(SubChannel),
    /// Timer0 and Timer2 through the external flip-flop.
    Auxiliary(SubChannel),
}

impl Channel {
    /// All channels.
    pub const ALL: [Self; 4] = [Self::Ch0A, Self::Ch0B, Self::Ch1A, Self::Ch1B];

    /// Hardware route of this channel.
    #[must_use]
    pub const fn route(self) -> Route {
        match self {
            Self::Ch0A => Route::Primary(SubChannel::A),
            Self::Ch0B => Route::Primary(SubChannel::B),
            Self::Ch1A => Route::Auxiliary(SubChannel::A),
            Self::Ch1B => Route::Auxiliary(SubChannel::B),
        }
    }

    /// Whether writes to this channel have any effect in `mode`.
    #[must_use]
    pub const fn is_available(self, mode: Mode) -> bool {
        match self.route() {
            Route::Primary(_) => true,
            Route::Auxiliary(_) => mode.uses_auxiliary_timers(),
        }
    }

    /// Output pins as `[Timer0 side, Timer2 side]`. Primary channels list their one
    /// pin twice.
    #[must_use]
    pub const fn pins(self) -> [Pin; 2] {
        match self {
            Self::Ch0A => [Pin::D9, Pin::D9],
            Self::Ch0B => [Pin::D10, Pin::D10],
            Self::Ch1A => [Pin::D6, Pin::D11],
            Self::Ch1B => [Pin::D5, Pin::D3],
        }
    }

    /// Pin driven by `aux` for this channel.
    #[must_use]
    pub const fn aux_pin(self, aux: AuxTimer) -> Pin {
        let [timer0_pin, timer2_pin] = self.pins();
        match aux {
            AuxTimer::Timer0 => timer0_pin,
            AuxTimer::Timer2 => timer2_pin,
        }
    }

    /// Pin that outputs `half` of this channel in `mode`.
    #[must_use]
    pub fn half_pin(self, mode: Mode, half: Half) -> Pin {
        self.aux_pin(mode.aux_timer(half))
    }
}

impl TryFrom<u8> for Channel {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self> {
        match index {
            0 => Ok(Self::Ch0A),
            1 => Ok(Self::Ch0B),
            2 => Ok(Self::Ch1A),
            3 => Ok(Self::Ch1B),
            _ => Err(Error::InvalidChannel(index)),
        }
    }
}
