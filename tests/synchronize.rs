#![allow(missing_docs)]
//! Host-level tests for timer synchronization.

use pwm16::registers::{Gtccr, Timer, TimerBus};
use pwm16::sim::{Access, PinBank, RegisterFile};
use pwm16::sync::synchronize;
use pwm16::{Mode, Pwm16};

#[test]
fn counters_start_at_zero_after_construction() {
    for mode in [Mode::TwoChannel, Mode::FourChannel, Mode::FourChannelReversed] {
        let pwm = Pwm16::new(mode, RegisterFile::new(), PinBank::new());
        for timer in Timer::ALL {
            assert_eq!(pwm.timers().counter(timer), 0, "{mode:?} {timer:?}");
        }
        assert_eq!(pwm.timers().gtccr(), Gtccr::empty());
        assert!(!pwm.timers().is_halted());
    }
}

#[test]
fn synchronize_zeroes_running_counters() {
    let mut timers = RegisterFile::new();
    timers.set_counter(Timer::Timer0, 0x12);
    timers.set_counter(Timer::Timer1, 0x3456);
    timers.set_counter(Timer::Timer2, 0x78);
    timers.clear_journal();

    synchronize(&mut timers);

    for timer in Timer::ALL {
        assert_eq!(timers.counter(timer), 0, "{timer:?}");
    }
    assert_eq!(timers.journal().len(), 5);
}

#[test]
fn counters_are_reset_while_halted() {
    let mut timers = RegisterFile::new();
    synchronize(&mut timers);

    assert_eq!(
        timers.journal(),
        &[
            Access::Gtccr(Gtccr::HALT_ALL),
            Access::Counter(Timer::Timer0, 0),
            Access::Counter(Timer::Timer1, 0),
            Access::Counter(Timer::Timer2, 0),
            Access::Gtccr(Gtccr::empty()),
        ]
    );
}

#[test]
fn construction_synchronizes_after_configuring() {
    let pwm = Pwm16::new(Mode::FourChannel, RegisterFile::new(), PinBank::new());
    let journal = pwm.timers().journal();

    let halt = journal
        .iter()
        .position(|access| *access == Access::Gtccr(Gtccr::HALT_ALL));
    let last_control = journal
        .iter()
        .rposition(|access| matches!(access, Access::ControlA(..) | Access::ControlB(..)));
    let (Some(halt), Some(last_control)) = (halt, last_control) else {
        panic!("missing configuration or halt: {journal:?}");
    };
    assert!(last_control < halt);
    assert_eq!(journal.last(), Some(&Access::Gtccr(Gtccr::empty())));
}

#[test]
fn synchronized_timers_count_in_step() {
    let (mut timers, _pins) =
        Pwm16::new(Mode::FourChannel, RegisterFile::new(), PinBank::new()).release();

    timers.advance(768);

    // Timer0 (low half, /1) wrapped three times; Timer2 (high half, /256) counted 3.
    assert_eq!(timers.counter(Timer::Timer0), 0);
    assert_eq!(timers.counter(Timer::Timer2), 3);
    assert_eq!(timers.counter(Timer::Timer1), 768);

    timers.advance(256 * 253 + 5);
    assert_eq!(timers.counter(Timer::Timer0), 5);
    assert_eq!(timers.counter(Timer::Timer2), 0);
}

#[test]
fn reversed_mode_swaps_the_prescalers() {
    let (mut timers, _pins) =
        Pwm16::new(Mode::FourChannelReversed, RegisterFile::new(), PinBank::new()).release();

    timers.advance(512 + 7);

    assert_eq!(timers.counter(Timer::Timer0), 2);
    assert_eq!(timers.counter(Timer::Timer2), 7);
}

#[test]
fn long_runs_wrap_instead_of_overflowing() {
    let (mut timers, _pins) =
        Pwm16::new(Mode::FourChannel, RegisterFile::new(), PinBank::new()).release();

    timers.advance(5);
    timers.advance(u32::MAX);

    // 5 + (2^32 - 1) cycles = 2^32 + 4.
    assert_eq!(timers.counter(Timer::Timer0), 4);
    assert_eq!(timers.counter(Timer::Timer1), 4);
    // 2^24 ticks at /256, a whole number of 256-count periods.
    assert_eq!(timers.counter(Timer::Timer2), 0);

    timers.advance(252);
    assert_eq!(timers.counter(Timer::Timer2), 1);
}

#[test]
fn halted_timers_do_not_count() {
    let (mut timers, _pins) =
        Pwm16::new(Mode::FourChannel, RegisterFile::new(), PinBank::new()).release();

    timers.set_gtccr(Gtccr::HALT_ALL);
    timers.advance(1000);
    for timer in Timer::ALL {
        assert_eq!(timers.counter(timer), 0, "{timer:?}");
    }

    timers.set_gtccr(Gtccr::empty());
    timers.advance(10);
    assert_eq!(timers.counter(Timer::Timer0), 10);
    assert_eq!(timers.counter(Timer::Timer1), 10);
}

#[test]
fn two_channel_mode_leaves_aux_timers_stopped() {
    let (mut timers, _pins) =
        Pwm16::new(Mode::TwoChannel, RegisterFile::new(), PinBank::new()).release();

    timers.advance(300);

    assert_eq!(timers.counter(Timer::Timer0), 0);
    assert_eq!(timers.counter(Timer::Timer2), 0);
    assert_eq!(timers.counter(Timer::Timer1), 300);
}
