#![cfg(feature = "host")]
//! Host-side stand-ins for the timer registers and GPIO, used by tests and docs.
//!
//! [`RegisterFile`] stores every register, journals each write, and can be clocked
//! with [`RegisterFile::advance`] to check that synchronized timers count in step.
//! [`PinBank`] records pin directions and every level written.

use embedded_hal::digital::PinState;

use crate::pins::{Gpio, Pin};
use crate::registers::{
    ControlA, ControlB, Gtccr, SubChannel, Timer, TimerBus, clock_divisor,
};

// ============================================================================
// Register file
// ============================================================================

/// Register contents of one timer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TimerState {
    /// TCCRnA.
    pub control_a: ControlA,
    /// TCCRnB.
    pub control_b: ControlB,
    /// OCRnA.
    pub compare_a: u16,
    /// OCRnB.
    pub compare_b: u16,
    /// TCNTn.
    pub counter: u16,
}

/// Every timer register at one instant; compare two to prove a call changed nothing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RegisterSnapshot {
    /// Timer0.
    pub timer0: TimerState,
    /// Timer1.
    pub timer1: TimerState,
    /// Timer2.
    pub timer2: TimerState,
    /// ICR1.
    pub top: u16,
    /// GTCCR.
    pub gtccr: Gtccr,
}

/// One register write, in the order it happened.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Access {
    /// TCCRnA written.
    ControlA(Timer, ControlA),
    /// TCCRnB written.
    ControlB(Timer, ControlB),
    /// OCRnx written.
    Compare(Timer, SubChannel, u16),
    /// TCNTn written.
    Counter(Timer, u16),
    /// ICR1 written.
    Top(u16),
    /// GTCCR written.
    Gtccr(Gtccr),
}

/// Simulated Timer0/1/2 register set.
#[derive(Clone, Debug, Default)]
pub struct RegisterFile {
    registers: RegisterSnapshot,
    prescale_phase: [u32; 3],
    journal: Vec<Access>,
}

impl RegisterFile {
    /// All registers at their reset value of zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every register.
    #[must_use]
    pub const fn snapshot(&self) -> RegisterSnapshot {
        self.registers
    }

    /// Registers of one timer.
    #[must_use]
    pub const fn timer(&self, timer: Timer) -> &TimerState {
        match timer {
            Timer::Timer0 => &self.registers.timer0,
            Timer::Timer1 => &self.registers.timer1,
            Timer::Timer2 => &self.registers.timer2,
        }
    }

    const fn timer_mut(&mut self, timer: Timer) -> &mut TimerState {
        match timer {
            Timer::Timer0 => &mut self.registers.timer0,
            Timer::Timer1 => &mut self.registers.timer1,
            Timer::Timer2 => &mut self.registers.timer2,
        }
    }

    const fn phase_mut(&mut self, timer: Timer) -> &mut u32 {
        let [timer0, timer1, timer2] = &mut self.prescale_phase;
        match timer {
            Timer::Timer0 => timer0,
            Timer::Timer1 => timer1,
            Timer::Timer2 => timer2,
        }
    }

    /// Every write since creation or the last [`clear_journal`](Self::clear_journal).
    #[must_use]
    pub fn journal(&self) -> &[Access] {
        &self.journal
    }

    /// Forget the recorded writes.
    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    /// Whether GTCCR currently holds the timers halted.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.registers.gtccr.contains(Gtccr::TSM)
    }

    /// Run the CPU clock for `cycles` cycles.
    ///
    /// Each running timer advances by one count per prescaler period and wraps at its
    /// TOP: 0xFF for the 8-bit timers, ICR1 for Timer1 in mode 14, 0xFFFF otherwise.
    /// Nothing moves while GTCCR.TSM is set.
    pub fn advance(&mut self, cycles: u32) {
        if self.is_halted() {
            return;
        }
        for timer in Timer::ALL {
            let Some(divisor) = clock_divisor(timer, self.timer(timer).control_b) else {
                continue;
            };
            // u64 holds phase + cycles and counter + ticks without wrapping.
            let divisor = u64::from(divisor);
            let period = u64::from(self.top_of(timer)).wrapping_add(1);
            let phase = self.phase_mut(timer);
            let total = u64::from(*phase).wrapping_add(u64::from(cycles));
            *phase = u32::try_from(total.checked_rem(divisor).unwrap_or(0)).unwrap_or(0);
            let ticks = total.checked_div(divisor).unwrap_or(0);
            let state = self.timer_mut(timer);
            let counter = u64::from(state.counter)
                .wrapping_add(ticks)
                .checked_rem(period)
                .unwrap_or(0);
            state.counter = u16::try_from(counter).unwrap_or(u16::MAX);
        }
    }

    fn top_of(&self, timer: Timer) -> u16 {
        if timer.is_8bit() {
            return 0xFF;
        }
        let state = self.timer(timer);
        let mode14 = state.control_a & ControlA::WAVEFORM == ControlA::FAST_PWM_ICR
            && state.control_b.contains(ControlB::FAST_PWM_ICR);
        if mode14 { self.registers.top } else { 0xFFFF }
    }

    const fn width_mask(timer: Timer) -> u16 {
        if timer.is_8bit() { 0x00FF } else { 0xFFFF }
    }
}

impl TimerBus for RegisterFile {
    fn control_a(&self, timer: Timer) -> ControlA {
        self.timer(timer).control_a
    }

    fn set_control_a(&mut self, timer: Timer, value: ControlA) {
        self.journal.push(Access::ControlA(timer, value));
        self.timer_mut(timer).control_a = value;
    }

    fn control_b(&self, timer: Timer) -> ControlB {
        self.timer(timer).control_b
    }

    fn set_control_b(&mut self, timer: Timer, value: ControlB) {
        self.journal.push(Access::ControlB(timer, value));
        self.timer_mut(timer).control_b = value;
    }

    fn compare(&self, timer: Timer, sub: SubChannel) -> u16 {
        match sub {
            SubChannel::A => self.timer(timer).compare_a,
            SubChannel::B => self.timer(timer).compare_b,
        }
    }

    fn set_compare(&mut self, timer: Timer, sub: SubChannel, value: u16) {
        let value = value & Self::width_mask(timer);
        self.journal.push(Access::Compare(timer, sub, value));
        let state = self.timer_mut(timer);
        match sub {
            SubChannel::A => state.compare_a = value,
            SubChannel::B => state.compare_b = value,
        }
    }

    fn counter(&self, timer: Timer) -> u16 {
        self.timer(timer).counter
    }

    fn set_counter(&mut self, timer: Timer, value: u16) {
        let value = value & Self::width_mask(timer);
        self.journal.push(Access::Counter(timer, value));
        self.timer_mut(timer).counter = value;
    }

    fn top(&self) -> u16 {
        self.registers.top
    }

    fn set_top(&mut self, value: u16) {
        self.journal.push(Access::Top(value));
        self.registers.top = value;
    }

    fn gtccr(&self) -> Gtccr {
        self.registers.gtccr
    }

    fn set_gtccr(&mut self, value: Gtccr) {
        self.journal.push(Access::Gtccr(value));
        if value.contains(Gtccr::PSRSYNC) {
            *self.phase_mut(Timer::Timer0) = 0;
            *self.phase_mut(Timer::Timer1) = 0;
        }
        if value.contains(Gtccr::PSRASY) {
            *self.phase_mut(Timer::Timer2) = 0;
        }
        // The prescaler reset bits clear themselves unless TSM holds them.
        self.registers.gtccr = if value.contains(Gtccr::TSM) {
            value
        } else {
            value - (Gtccr::PSRSYNC | Gtccr::PSRASY)
        };
    }
}

// ============================================================================
// Pin bank
// ============================================================================

/// Direction and level of one simulated pin.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PinRecord {
    /// Set by [`Gpio::set_output`].
    pub is_output: bool,
    /// Last level written, if any.
    pub level: Option<PinState>,
}

/// Simulated GPIO for the six PWM pins.
#[derive(Clone, Debug)]
pub struct PinBank {
    records: [PinRecord; 6],
    levels: Vec<(Pin, PinState)>,
}

impl Default for PinBank {
    fn default() -> Self {
        Self::new()
    }
}

impl PinBank {
    /// All pins inputs with no level written.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: [PinRecord {
                is_output: false,
                level: None,
            }; 6],
            levels: Vec::new(),
        }
    }

    const fn slot(pin: Pin) -> usize {
        match pin {
            Pin::D3 => 0,
            Pin::D5 => 1,
            Pin::D6 => 2,
            Pin::D9 => 3,
            Pin::D10 => 4,
            Pin::D11 => 5,
        }
    }

    /// State of `pin`.
    #[must_use]
    pub fn record(&self, pin: Pin) -> PinRecord {
        self.records
            .get(Self::slot(pin))
            .copied()
            .unwrap_or(PinRecord {
                is_output: false,
                level: None,
            })
    }

    /// Last level written to `pin`.
    #[must_use]
    pub fn level(&self, pin: Pin) -> Option<PinState> {
        self.record(pin).level
    }

    /// Every level write, in order.
    #[must_use]
    pub fn history(&self) -> &[(Pin, PinState)] {
        &self.levels
    }
}

impl Gpio for PinBank {
    fn set_output(&mut self, pin: Pin) {
        if let Some(record) = self.records.get_mut(Self::slot(pin)) {
            record.is_output = true;
        }
    }

    fn set_level(&mut self, pin: Pin, level: PinState) {
        self.levels.push((pin, level));
        if let Some(record) = self.records.get_mut(Self::slot(pin)) {
            record.level = Some(level);
        }
    }
}
