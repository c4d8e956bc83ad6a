//! Per-timer waveform, polarity and prescaler setup.
//!
//! The auxiliary timers run fast PWM with TOP = 0xFF. Their role in the current
//! [`Mode`] decides the rest:
//!
//! | role      | compare output | prescaler |
//! |-----------|----------------|-----------|
//! | high half | non-inverting  | /256      |
//! | low half  | inverting      | /1        |
//!
//! The flip-flop is clocked by the low half's edge, which is why that half is
//! inverted. The /256 ratio makes one step of the high half worth 256 steps of
//! the low half.
//!
//! Timer1 always runs mode 14 (fast PWM, TOP = ICR1 = 0xFFFF) at /1, in every mode.

use crate::channel::{Half, Mode};
use crate::fmt::debug;
use crate::registers::{
    AuxTimer, CompareOutput, ControlA, ControlB, Prescaler, SubChannel, Timer, TimerBus,
};

/// ICR1 value: Timer1 counts the full 16-bit range.
pub const PRIMARY_TOP: u16 = 0xFFFF;

/// Prescaler for a timer playing `half`.
#[must_use]
pub const fn half_prescaler(half: Half) -> Prescaler {
    match half {
        Half::High => Prescaler::Div256,
        Half::Low => Prescaler::Div1,
    }
}

/// Compare output polarity for a timer playing `half`.
#[must_use]
pub const fn half_polarity(half: Half) -> CompareOutput {
    match half {
        Half::High => CompareOutput::NonInverting,
        Half::Low => CompareOutput::Inverting,
    }
}

/// Configure `timer` for PWM and connect the enabled compare units.
///
/// A `false` flag leaves that sub-channel's compare output bits exactly as they are,
/// so the two channels sharing a timer can be set up independently.
pub fn configure<T: TimerBus>(
    timers: &mut T,
    mode: Mode,
    timer: Timer,
    a_enabled: bool,
    b_enabled: bool,
) {
    critical_section::with(|_| match timer {
        Timer::Timer1 => configure_primary(timers, a_enabled, b_enabled),
        Timer::Timer0 => configure_auxiliary(timers, mode, AuxTimer::Timer0, a_enabled, b_enabled),
        Timer::Timer2 => configure_auxiliary(timers, mode, AuxTimer::Timer2, a_enabled, b_enabled),
    });
}

/// Configure `timer` with only `sub` enabled.
pub fn configure_sub_channel<T: TimerBus>(
    timers: &mut T,
    mode: Mode,
    timer: Timer,
    sub: SubChannel,
) {
    configure(
        timers,
        mode,
        timer,
        sub == SubChannel::A,
        sub == SubChannel::B,
    );
}

fn with_enabled_outputs(
    control_a: ControlA,
    a_enabled: bool,
    b_enabled: bool,
    output: CompareOutput,
) -> ControlA {
    [(SubChannel::A, a_enabled), (SubChannel::B, b_enabled)]
        .into_iter()
        .filter(|&(_, enabled)| enabled)
        .fold(control_a, |control_a, (sub, _)| {
            control_a.with_compare_output(sub, output)
        })
}

fn configure_primary<T: TimerBus>(timers: &mut T, a_enabled: bool, b_enabled: bool) {
    timers.modify_control_a(Timer::Timer1, |control_a| {
        with_enabled_outputs(
            control_a.with_waveform(ControlA::FAST_PWM_ICR),
            a_enabled,
            b_enabled,
            CompareOutput::NonInverting,
        )
    });
    timers.set_control_b(
        Timer::Timer1,
        ControlB::FAST_PWM_ICR | Prescaler::Div1.clock_select(Timer::Timer1),
    );
    timers.set_top(PRIMARY_TOP);
}

fn configure_auxiliary<T: TimerBus>(
    timers: &mut T,
    mode: Mode,
    aux: AuxTimer,
    a_enabled: bool,
    b_enabled: bool,
) {
    let half = mode.half_of(aux);
    let timer = aux.timer();
    timers.modify_control_a(timer, |control_a| {
        with_enabled_outputs(
            control_a.with_waveform(ControlA::FAST_PWM_8BIT),
            a_enabled,
            b_enabled,
            half_polarity(half),
        )
    });
    timers.set_control_b(timer, half_prescaler(half).clock_select(timer));
}

/// One-time setup at startup: configure the timers `mode` uses with both compare
/// units connected, and zero their compare registers so nothing is driven before
/// the first write.
pub fn init_timers<T: TimerBus>(timers: &mut T, mode: Mode) {
    let used: &[Timer] = if mode.uses_auxiliary_timers() {
        &[Timer::Timer1, Timer::Timer0, Timer::Timer2]
    } else {
        &[Timer::Timer1]
    };
    for &timer in used {
        configure(timers, mode, timer, true, true);
        timers.set_compare(timer, SubChannel::A, 0);
        timers.set_compare(timer, SubChannel::B, 0);
        debug!(
            "init_timers: {} control_a={=u8:#x} control_b={=u8:#x}",
            timer,
            timers.control_a(timer).bits(),
            timers.control_b(timer).bits()
        );
    }
}
