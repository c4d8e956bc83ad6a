//! Typed model of the Timer0/Timer1/Timer2 register set.
//!
//! The driver never touches raw addresses. It talks to a [`TimerBus`], which is
//! implemented over the real PAC peripherals in [`avr`](crate::avr) and by the
//! [`RegisterFile`](crate::sim::RegisterFile) simulator for host tests. Register
//! contents are the [`bitflags`] types [`ControlA`], [`ControlB`] and [`Gtccr`], so
//! every bit the driver sets has a name.

use bitflags::bitflags;

// ============================================================================
// Timer identities
// ============================================================================

/// One of the three timer/counter peripherals.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Timer {
    /// 8-bit Timer/Counter0 (OC0A = D6, OC0B = D5).
    Timer0,
    /// 16-bit Timer/Counter1, the primary timer (OC1A = D9, OC1B = D10).
    Timer1,
    /// 8-bit Timer/Counter2 with its own prescaler (OC2A = D11, OC2B = D3).
    Timer2,
}

impl Timer {
    /// All timers, in register order.
    pub const ALL: [Self; 3] = [Self::Timer0, Self::Timer1, Self::Timer2];

    /// Whether the compare and counter registers are 8 bits wide.
    #[must_use]
    pub const fn is_8bit(self) -> bool {
        !matches!(self, Self::Timer1)
    }
}

/// One of the two 8-bit timers that together emulate a 16-bit compare.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AuxTimer {
    /// Timer/Counter0, the low half in forward mode.
    Timer0,
    /// Timer/Counter2, the high half in forward mode.
    Timer2,
}

impl AuxTimer {
    /// Both auxiliary timers.
    pub const ALL: [Self; 2] = [Self::Timer0, Self::Timer2];

    /// The underlying peripheral.
    #[must_use]
    pub const fn timer(self) -> Timer {
        match self {
            Self::Timer0 => Timer::Timer0,
            Self::Timer2 => Timer::Timer2,
        }
    }
}

/// Compare unit within a timer (OCnA or OCnB).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubChannel {
    /// Compare unit A.
    A,
    /// Compare unit B.
    B,
}

// ============================================================================
// TCCRnA
// ============================================================================

bitflags! {
    /// TCCRnA: compare output modes plus the two low waveform-generation bits.
    ///
    /// The layout is identical for all three timers.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct ControlA: u8 {
        /// COMnA1.
        const COM_A1 = 1 << 7;
        /// COMnA0.
        const COM_A0 = 1 << 6;
        /// COMnB1.
        const COM_B1 = 1 << 5;
        /// COMnB0.
        const COM_B0 = 1 << 4;
        /// WGMn1.
        const WGM1 = 1 << 1;
        /// WGMn0.
        const WGM0 = 1 << 0;
    }
}

/// How a compare unit drives its output pin (COMnx1:COMnx0).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompareOutput {
    /// Normal port operation; the pin follows its PORT bit.
    Disconnected,
    /// `01`: toggle on match (mode dependent, unused by this driver).
    Toggle,
    /// `10`: clear on match, set at BOTTOM.
    NonInverting,
    /// `11`: set on match, clear at BOTTOM.
    Inverting,
}

impl ControlA {
    /// Waveform bits for fast PWM with TOP = 0xFF (mode 3 on Timer0/Timer2).
    pub const FAST_PWM_8BIT: Self = Self::WGM1.union(Self::WGM0);

    /// Low waveform bits for Timer1 mode 14 (fast PWM, TOP = ICR1).
    pub const FAST_PWM_ICR: Self = Self::WGM1;

    /// Both waveform bits.
    pub const WAVEFORM: Self = Self::WGM1.union(Self::WGM0);

    const fn compare_bits(sub: SubChannel) -> (Self, Self) {
        match sub {
            SubChannel::A => (Self::COM_A1, Self::COM_A0),
            SubChannel::B => (Self::COM_B1, Self::COM_B0),
        }
    }

    /// Decode the compare output mode of `sub`.
    #[must_use]
    pub fn compare_output(self, sub: SubChannel) -> CompareOutput {
        let (high, low) = Self::compare_bits(sub);
        match (self.contains(high), self.contains(low)) {
            (false, false) => CompareOutput::Disconnected,
            (false, true) => CompareOutput::Toggle,
            (true, false) => CompareOutput::NonInverting,
            (true, true) => CompareOutput::Inverting,
        }
    }

    /// Replace the compare output mode of `sub`, leaving every other bit as is.
    #[must_use]
    pub fn with_compare_output(self, sub: SubChannel, output: CompareOutput) -> Self {
        let (high, low) = Self::compare_bits(sub);
        let cleared = self - (high | low);
        match output {
            CompareOutput::Disconnected => cleared,
            CompareOutput::Toggle => cleared | low,
            CompareOutput::NonInverting => cleared | high,
            CompareOutput::Inverting => cleared | high | low,
        }
    }

    /// Replace the waveform bits, leaving the compare outputs as is.
    #[must_use]
    pub fn with_waveform(self, waveform: Self) -> Self {
        (self - Self::WAVEFORM) | (waveform & Self::WAVEFORM)
    }
}

// ============================================================================
// TCCRnB
// ============================================================================

bitflags! {
    /// TCCRnB: upper waveform-generation bits and the clock select.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct ControlB: u8 {
        /// WGM13 (Timer1 only).
        const WGM3 = 1 << 4;
        /// WGMn2.
        const WGM2 = 1 << 3;
        /// CSn2.
        const CS2 = 1 << 2;
        /// CSn1.
        const CS1 = 1 << 1;
        /// CSn0.
        const CS0 = 1 << 0;
    }
}

impl ControlB {
    /// All clock-select bits.
    pub const CLOCK_SELECT: Self = Self::CS2.union(Self::CS1).union(Self::CS0);

    /// Upper waveform bits for Timer1 mode 14 (fast PWM, TOP = ICR1).
    pub const FAST_PWM_ICR: Self = Self::WGM3.union(Self::WGM2);
}

/// Clock prescaler selections used by this driver.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescaler {
    /// clk/1, used by the low half and by Timer1.
    Div1,
    /// clk/256, used by the high half.
    Div256,
}

impl Prescaler {
    /// Clock-select bits for this prescaler on `timer`.
    ///
    /// Timer2 has its own prescaler table, so /256 encodes differently there.
    #[must_use]
    pub fn clock_select(self, timer: Timer) -> ControlB {
        match (self, timer) {
            (Self::Div1, _) => ControlB::CS0,
            (Self::Div256, Timer::Timer2) => ControlB::CS2 | ControlB::CS1,
            (Self::Div256, Timer::Timer0 | Timer::Timer1) => ControlB::CS2,
        }
    }
}

/// Clock divisor selected by the CS bits of `control_b` on `timer`.
///
/// Returns `None` when the timer is stopped or clocked from an external pin.
#[must_use]
pub fn clock_divisor(timer: Timer, control_b: ControlB) -> Option<u16> {
    let clock_select = (control_b & ControlB::CLOCK_SELECT).bits();
    match timer {
        Timer::Timer2 => match clock_select {
            1 => Some(1),
            2 => Some(8),
            3 => Some(32),
            4 => Some(64),
            5 => Some(128),
            6 => Some(256),
            7 => Some(1024),
            _ => None,
        },
        Timer::Timer0 | Timer::Timer1 => match clock_select {
            1 => Some(1),
            2 => Some(8),
            3 => Some(64),
            4 => Some(256),
            5 => Some(1024),
            _ => None,
        },
    }
}

// ============================================================================
// GTCCR
// ============================================================================

bitflags! {
    /// GTCCR: general timer/counter control, used to halt and release all timers.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Gtccr: u8 {
        /// Timer/Counter synchronization mode: holds the prescaler resets while set.
        const TSM = 1 << 7;
        /// Prescaler reset for Timer2 (asynchronous prescaler).
        const PSRASY = 1 << 1;
        /// Prescaler reset for Timer0 and Timer1 (shared prescaler).
        const PSRSYNC = 1 << 0;
    }
}

impl Gtccr {
    /// Halt every timer and hold both prescalers in reset.
    pub const HALT_ALL: Self = Self::TSM.union(Self::PSRASY).union(Self::PSRSYNC);
}

// ============================================================================
// Register access
// ============================================================================

/// Register-level access to the three timers.
///
/// Implementations perform plain reads and writes; callers wrap read-modify-write
/// sequences in a critical section. 8-bit timers keep the low byte of any `u16`
/// written to a compare or counter register.
pub trait TimerBus {
    /// Read TCCRnA.
    fn control_a(&self, timer: Timer) -> ControlA;
    /// Write TCCRnA.
    fn set_control_a(&mut self, timer: Timer, value: ControlA);
    /// Read TCCRnB.
    fn control_b(&self, timer: Timer) -> ControlB;
    /// Write TCCRnB.
    fn set_control_b(&mut self, timer: Timer, value: ControlB);
    /// Read OCRnA/OCRnB.
    fn compare(&self, timer: Timer, sub: SubChannel) -> u16;
    /// Write OCRnA/OCRnB.
    fn set_compare(&mut self, timer: Timer, sub: SubChannel, value: u16);
    /// Read TCNTn.
    fn counter(&self, timer: Timer) -> u16;
    /// Write TCNTn.
    fn set_counter(&mut self, timer: Timer, value: u16);
    /// Read ICR1, Timer1's TOP in mode 14.
    fn top(&self) -> u16;
    /// Write ICR1.
    fn set_top(&mut self, value: u16);
    /// Read GTCCR.
    fn gtccr(&self) -> Gtccr;
    /// Write GTCCR.
    fn set_gtccr(&mut self, value: Gtccr);

    /// Read-modify-write TCCRnA.
    fn modify_control_a(&mut self, timer: Timer, f: impl FnOnce(ControlA) -> ControlA) {
        let value = f(self.control_a(timer));
        self.set_control_a(timer, value);
    }
}
