#![allow(missing_docs)]
//! Host-level tests for modes, channels, and the half-role formula.

use pwm16::channel::{Route, is_timer_half};
use pwm16::pins::{Pin, Port};
use pwm16::registers::{AuxTimer, SubChannel};
use pwm16::{Channel, Error, Half, Mode};

#[test]
fn xor_identity_matches_all_eight_combinations() {
    // (timer, reversed, half) -> is_timer_half
    let table = [
        (AuxTimer::Timer0, false, Half::High, false),
        (AuxTimer::Timer0, false, Half::Low, true),
        (AuxTimer::Timer0, true, Half::High, true),
        (AuxTimer::Timer0, true, Half::Low, false),
        (AuxTimer::Timer2, false, Half::High, true),
        (AuxTimer::Timer2, false, Half::Low, false),
        (AuxTimer::Timer2, true, Half::High, false),
        (AuxTimer::Timer2, true, Half::Low, true),
    ];
    for (timer, reversed, half, expected) in table {
        let mode = if reversed {
            Mode::FourChannelReversed
        } else {
            Mode::FourChannel
        };
        assert_eq!(
            is_timer_half(mode, timer, half),
            expected,
            "{timer:?} {mode:?} {half:?}"
        );
        assert_eq!(
            is_timer_half(mode, timer, half),
            (timer == AuxTimer::Timer0) ^ reversed ^ (half == Half::High)
        );
    }
}

#[test]
fn forward_mode_puts_timer2_on_the_high_half() {
    assert_eq!(Mode::FourChannel.aux_timer(Half::High), AuxTimer::Timer2);
    assert_eq!(Mode::FourChannel.aux_timer(Half::Low), AuxTimer::Timer0);
    assert_eq!(Mode::FourChannel.half_of(AuxTimer::Timer2), Half::High);
    assert_eq!(Mode::FourChannel.half_of(AuxTimer::Timer0), Half::Low);
}

#[test]
fn reversed_mode_swaps_the_halves() {
    let mode = Mode::FourChannelReversed;
    assert_eq!(mode.aux_timer(Half::High), AuxTimer::Timer0);
    assert_eq!(mode.aux_timer(Half::Low), AuxTimer::Timer2);
    assert_eq!(mode.half_of(AuxTimer::Timer0), Half::High);
    assert_eq!(mode.half_of(AuxTimer::Timer2), Half::Low);
}

#[test]
fn each_timer_plays_exactly_one_half() {
    for mode in [Mode::TwoChannel, Mode::FourChannel, Mode::FourChannelReversed] {
        for timer in AuxTimer::ALL {
            assert_ne!(
                is_timer_half(mode, timer, Half::High),
                is_timer_half(mode, timer, Half::Low)
            );
        }
    }
}

#[test]
fn channel_pins_follow_the_wiring_table() {
    assert_eq!(Channel::Ch0A.pins(), [Pin::D9, Pin::D9]);
    assert_eq!(Channel::Ch0B.pins(), [Pin::D10, Pin::D10]);
    assert_eq!(Channel::Ch1A.pins(), [Pin::D6, Pin::D11]);
    assert_eq!(Channel::Ch1B.pins(), [Pin::D5, Pin::D3]);

    assert_eq!(Channel::Ch1A.half_pin(Mode::FourChannel, Half::High), Pin::D11);
    assert_eq!(Channel::Ch1A.half_pin(Mode::FourChannelReversed, Half::High), Pin::D6);
}

#[test]
fn routes_and_availability() {
    assert_eq!(Channel::Ch0A.route(), Route::Primary(SubChannel::A));
    assert_eq!(Channel::Ch1B.route(), Route::Auxiliary(SubChannel::B));

    for channel in [Channel::Ch0A, Channel::Ch0B] {
        for mode in [Mode::TwoChannel, Mode::FourChannel, Mode::FourChannelReversed] {
            assert!(channel.is_available(mode));
        }
    }
    for channel in [Channel::Ch1A, Channel::Ch1B] {
        assert!(!channel.is_available(Mode::TwoChannel));
        assert!(channel.is_available(Mode::FourChannel));
        assert!(channel.is_available(Mode::FourChannelReversed));
    }
}

#[test]
fn pin_ports_and_masks() {
    assert_eq!((Pin::D3.port(), Pin::D3.mask()), (Port::D, 0b0000_1000));
    assert_eq!((Pin::D5.port(), Pin::D5.mask()), (Port::D, 0b0010_0000));
    assert_eq!((Pin::D6.port(), Pin::D6.mask()), (Port::D, 0b0100_0000));
    assert_eq!((Pin::D9.port(), Pin::D9.mask()), (Port::B, 0b0000_0010));
    assert_eq!((Pin::D10.port(), Pin::D10.mask()), (Port::B, 0b0000_0100));
    assert_eq!((Pin::D11.port(), Pin::D11.mask()), (Port::B, 0b0000_1000));
}

#[test]
fn conversions_from_raw_bytes() {
    assert_eq!(Channel::try_from(2), Ok(Channel::Ch1A));
    assert_eq!(Channel::try_from(4), Err(Error::InvalidChannel(4)));
    assert_eq!(Mode::try_from(2), Ok(Mode::FourChannelReversed));
    assert_eq!(Mode::try_from(3), Err(Error::InvalidMode(3)));
    assert_eq!(Pin::try_from(11), Ok(Pin::D11));
    assert_eq!(Pin::try_from(13), Err(Error::InvalidPin(13)));
}

#[test]
fn errors_display_the_offending_value() {
    assert_eq!(
        Error::InvalidChannel(7).to_string(),
        "invalid channel index 7 (expected 0..=3)"
    );
    assert_eq!(
        Error::InvalidPin(13).to_string(),
        "pin D13 is not a PWM output of this driver"
    );
}
